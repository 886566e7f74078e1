use crate::core::main_queue::MainQueueHandle;
use crate::core::randomizer::ThreadRandomizer;
use crate::domain::model::{compose_question, Movie};
use crate::domain::ports::{
    ConfigProvider, ImageFetcher, MoviesLoading, QuestionFactoryDelegate, QuestionRandomizer,
};
use crate::utils::error::QuestionFactoryError;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    pub threshold_min: u8,
    pub threshold_max: u8,
    pub poster_width: u32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            threshold_min: 6,
            threshold_max: 8,
            poster_width: 600,
        }
    }
}

impl QuizSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        let range = config.threshold_range();
        Self {
            threshold_min: *range.start(),
            threshold_max: *range.end(),
            poster_width: config.poster_width(),
        }
    }

    /// 上限小於下限時收斂成單一值，避免空區間
    pub fn threshold_range(&self) -> RangeInclusive<u8> {
        self.threshold_min..=self.threshold_max.max(self.threshold_min)
    }
}

#[derive(Default)]
struct FactoryState {
    movies: Vec<Movie>,
    current_movie: Option<Movie>,
    delegate: Option<Weak<dyn QuestionFactoryDelegate>>,
}

struct FactoryInner<L, I> {
    movies_loader: Arc<L>,
    image_fetcher: Arc<I>,
    randomizer: Arc<dyn QuestionRandomizer>,
    settings: QuizSettings,
    main_queue: MainQueueHandle,
    state: Mutex<FactoryState>,
}

impl<L, I> FactoryInner<L, I> {
    fn state(&self) -> MutexGuard<'_, FactoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn delegate(&self) -> Option<Arc<dyn QuestionFactoryDelegate>> {
        self.state().delegate.as_ref().and_then(Weak::upgrade)
    }

    fn select_movie(&self) -> Option<Movie> {
        let mut state = self.state();
        if state.movies.is_empty() {
            return None;
        }

        let index = self.randomizer.index(state.movies.len());
        let movie = state.movies.get(index)?.clone();
        state.current_movie = Some(movie.clone());
        Some(movie)
    }
}

/// 把通知排到主佇列；工廠或 delegate 已釋放時靜默丟棄
fn deliver<L, I, F>(factory: Weak<FactoryInner<L, I>>, notify: F)
where
    L: Send + Sync + 'static,
    I: Send + Sync + 'static,
    F: FnOnce(&dyn QuestionFactoryDelegate) + Send + 'static,
{
    let Some(main_queue) = factory.upgrade().map(|inner| inner.main_queue.clone()) else {
        tracing::debug!("Question factory dropped, discarding result");
        return;
    };

    main_queue.dispatch(move || {
        let Some(delegate) = factory.upgrade().and_then(|inner| inner.delegate()) else {
            tracing::debug!("No delegate to notify");
            return;
        };
        notify(delegate.as_ref());
    });
}

/// 題目工廠
///
/// 背景工作只持有內部狀態的 `Weak`，工廠被 drop 後尚未完成的結果不會送出。
/// `load_data` 與 `request_next_question` 需在 Tokio runtime 內呼叫。
pub struct QuestionFactory<L, I> {
    inner: Arc<FactoryInner<L, I>>,
}

impl<L, I> QuestionFactory<L, I>
where
    L: MoviesLoading + 'static,
    I: ImageFetcher + 'static,
{
    pub fn new(movies_loader: L, image_fetcher: I, main_queue: MainQueueHandle) -> Self {
        Self::with_parts(
            movies_loader,
            image_fetcher,
            main_queue,
            QuizSettings::default(),
            ThreadRandomizer,
        )
    }

    pub fn with_parts<R: QuestionRandomizer + 'static>(
        movies_loader: L,
        image_fetcher: I,
        main_queue: MainQueueHandle,
        settings: QuizSettings,
        randomizer: R,
    ) -> Self {
        Self {
            inner: Arc::new(FactoryInner {
                movies_loader: Arc::new(movies_loader),
                image_fetcher: Arc::new(image_fetcher),
                randomizer: Arc::new(randomizer),
                settings,
                main_queue,
                state: Mutex::new(FactoryState::default()),
            }),
        }
    }

    pub fn set_delegate<D: QuestionFactoryDelegate + 'static>(&self, delegate: &Arc<D>) {
        let delegate = Arc::downgrade(delegate) as Weak<dyn QuestionFactoryDelegate>;
        self.inner.state().delegate = Some(delegate);
    }

    pub fn load_data(&self) {
        let factory = Arc::downgrade(&self.inner);
        let loader = self.inner.movies_loader.clone();

        tokio::spawn(async move {
            let result = loader.load_movies().await;

            let Some(inner) = factory.upgrade() else {
                tracing::debug!("Question factory dropped while loading movies");
                return;
            };

            match result {
                Ok(movies) => {
                    tracing::info!("Loaded {} movies", movies.items.len());
                    inner.state().movies = movies.items;
                    drop(inner);
                    deliver(factory, |delegate| delegate.did_load_data_from_server());
                }
                Err(source) => {
                    tracing::warn!("Failed to load movies: {}", source);
                    drop(inner);
                    let error = QuestionFactoryError::Loading { source };
                    deliver(factory, move |delegate| delegate.did_fail_to_load_data(error));
                }
            }
        });
    }

    pub fn request_next_question(&self) {
        let factory = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            let Some(inner) = factory.upgrade() else {
                return;
            };

            let Some(movie) = inner.select_movie() else {
                tracing::debug!("No movies loaded yet, skipping question");
                return;
            };
            let image_fetcher = inner.image_fetcher.clone();
            let randomizer = inner.randomizer.clone();
            let settings = inner.settings.clone();
            drop(inner);

            let image_url = movie.resized_image_url(settings.poster_width);
            let image = match image_fetcher.fetch_image(&image_url).await {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("Failed to load image for '{}': {}", movie.title, e);
                    return;
                }
            };

            let threshold = randomizer.threshold(settings.threshold_range());
            let comparison = randomizer.comparison();
            let question = compose_question(&movie, image, threshold, comparison);
            tracing::debug!("Prepared question for '{}': {}", movie.title, question.text);

            deliver(factory, move |delegate| {
                delegate.did_receive_next_question(question)
            });
        });
    }

    /// 目前題目的預告片連結
    ///
    /// 尚未選出電影時回傳 `Some("")`，查詢失敗時回傳 `None`。
    pub async fn provide_trailer_link(&self) -> Option<String> {
        let Some(id) = self.current_movie_id() else {
            return Some(String::new());
        };

        let loader = self.inner.movies_loader.clone();
        match loader.load_trailer_link(&id).await {
            Ok(link) => Some(link),
            Err(e) => {
                tracing::warn!("Failed to load trailer for {}: {}", id, e);
                None
            }
        }
    }

    pub fn get_movie(&self) -> Option<Movie> {
        self.inner.state().current_movie.clone()
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.inner.state().movies.clone()
    }

    pub fn movie_count(&self) -> usize {
        self.inner.state().movies.len()
    }

    fn current_movie_id(&self) -> Option<String> {
        self.inner
            .state()
            .current_movie
            .as_ref()
            .map(|movie| movie.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::main_queue::MainQueue;
    use crate::domain::model::{MostPopularMovies, QuizQuestion};
    use crate::utils::error::{LoadError, TransportError};
    use async_trait::async_trait;
    use url::Url;

    struct NoMovies;

    #[async_trait]
    impl MoviesLoading for NoMovies {
        async fn load_movies(&self) -> Result<MostPopularMovies, LoadError> {
            Ok(MostPopularMovies {
                error_message: None,
                items: vec![],
            })
        }

        async fn load_trailer_link(&self, _id: &str) -> Result<String, LoadError> {
            Ok(String::new())
        }
    }

    struct NoImages;

    #[async_trait]
    impl ImageFetcher for NoImages {
        async fn fetch_image(&self, _url: &Url) -> Result<Vec<u8>, TransportError> {
            Ok(vec![])
        }
    }

    struct SilentDelegate;

    impl QuestionFactoryDelegate for SilentDelegate {
        fn did_load_data_from_server(&self) {}
        fn did_fail_to_load_data(&self, _error: QuestionFactoryError) {}
        fn did_receive_next_question(&self, _question: QuizQuestion) {}
    }

    #[test]
    fn test_set_delegate_holds_weak_reference() {
        let (_queue, handle) = MainQueue::new();
        let factory = QuestionFactory::new(NoMovies, NoImages, handle);
        let delegate = Arc::new(SilentDelegate);

        factory.set_delegate(&delegate);
        assert!(factory.inner.delegate().is_some());
        assert_eq!(Arc::strong_count(&delegate), 1);

        drop(delegate);
        assert!(factory.inner.delegate().is_none());
    }

    #[test]
    fn test_default_settings() {
        let settings = QuizSettings::default();
        assert_eq!(settings.threshold_range(), 6..=8);
        assert_eq!(settings.poster_width, 600);
    }

    #[test]
    fn test_inverted_threshold_range_collapses() {
        let settings = QuizSettings {
            threshold_min: 7,
            threshold_max: 5,
            poster_width: 600,
        };
        assert_eq!(settings.threshold_range(), 7..=7);
    }
}
