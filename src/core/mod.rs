pub mod main_queue;
pub mod movies_loader;
pub mod question_factory;
pub mod randomizer;

pub use crate::domain::model::{Comparison, Movie, MostPopularMovies, QuizQuestion};
pub use crate::domain::ports::{
    ConfigProvider, ImageFetcher, MovieSource, MoviesLoading, QuestionFactoryDelegate,
    QuestionRandomizer,
};
pub use crate::utils::error::Result;
