use clap::Parser;
use movie_quiz::core::{ConfigProvider, QuestionFactoryDelegate, QuizQuestion};
use movie_quiz::utils::logger::{self, LogFormat};
use movie_quiz::utils::validation::Validate;
use movie_quiz::{
    ApiEndpoints, CliConfig, HttpClient, MainQueue, MoviesLoader, QuestionFactory,
    QuestionFactoryError, QuizError, QuizSettings, ThreadRandomizer,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const QUESTION_WAIT: Duration = Duration::from_secs(15);

/// 每題最多重試三次
fn max_attempts(questions: usize) -> usize {
    questions.saturating_mul(3)
}

enum QuizEvent {
    Loaded,
    LoadFailed(QuestionFactoryError),
    Question,
}

/// 把題目印到終端機，並通知主流程
struct ConsolePresenter {
    events: mpsc::UnboundedSender<QuizEvent>,
    asked: std::sync::atomic::AtomicUsize,
}

impl QuestionFactoryDelegate for ConsolePresenter {
    fn did_load_data_from_server(&self) {
        let _ = self.events.send(QuizEvent::Loaded);
    }

    fn did_fail_to_load_data(&self, error: QuestionFactoryError) {
        let _ = self.events.send(QuizEvent::LoadFailed(error));
    }

    fn did_receive_next_question(&self, question: QuizQuestion) {
        let number = self
            .asked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
            + 1;
        println!("❓ Question {}: {}", number, question.text);
        println!(
            "   Answer: {} (poster: {} bytes)",
            if question.correct_answer { "Yes" } else { "No" },
            question.image.len()
        );
        let _ = self.events.send(QuizEvent::Question);
    }
}

fn fail(e: &QuizError, exit_code: i32) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_flag(cli.json_logs), cli.verbose);

    tracing::info!("Starting movie-quiz");

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(&e, 1),
    };
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let client = HttpClient::with_timeout(config.request_timeout())
        .map_err(|e| QuizError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
        .unwrap_or_else(|e| fail(&e, 1));
    let loader = MoviesLoader::new(client.clone(), ApiEndpoints::from_config(&config));

    let (main_queue, main_handle) = MainQueue::new();
    let factory = QuestionFactory::with_parts(
        loader,
        client,
        main_handle,
        QuizSettings::from_config(&config),
        ThreadRandomizer,
    );

    let (events_tx, mut events) = mpsc::unbounded_channel();
    let presenter = Arc::new(ConsolePresenter {
        events: events_tx,
        asked: Default::default(),
    });
    factory.set_delegate(&presenter);
    tokio::spawn(main_queue.run());

    tracing::info!("📥 Loading movies...");
    factory.load_data();
    match events.recv().await {
        Some(QuizEvent::Loaded) => {
            tracing::info!("✅ {} movies loaded", factory.movie_count());
        }
        Some(QuizEvent::LoadFailed(error)) => fail(&QuizError::QuestionFactory(error), 2),
        _ => return Ok(()),
    }

    // 圖片下載失敗時不會有回呼，逾時就再要一題
    let mut received = 0;
    let mut attempts = 0;
    while received < cli.questions && attempts < max_attempts(cli.questions) {
        attempts += 1;
        factory.request_next_question();
        match tokio::time::timeout(QUESTION_WAIT, events.recv()).await {
            Ok(Some(QuizEvent::Question)) => received += 1,
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(_) => tracing::warn!("⏱️ No question received, requesting another one"),
        }
    }

    if let Some(movie) = factory.get_movie() {
        println!("🎬 Last movie: {} (rank {})", movie.title, movie.rank);
        match factory.provide_trailer_link().await {
            Some(link) if !link.is_empty() => println!("▶️  Trailer: {}", link),
            _ => println!("▶️  Trailer not available"),
        }
    }

    Ok(())
}
