pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpClient;
pub use config::QuizConfig;
pub use crate::core::{
    main_queue::{MainQueue, MainQueueHandle},
    movies_loader::{ApiEndpoints, MoviesLoader},
    question_factory::{QuestionFactory, QuizSettings},
    randomizer::ThreadRandomizer,
};
pub use utils::error::{LoadError, QuestionFactoryError, QuizError, Result, TransportError};
