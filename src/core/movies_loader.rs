use crate::domain::model::{MostPopularMovies, TrailerResponse};
use crate::domain::ports::{ConfigProvider, MovieSource, MoviesLoading};
use crate::utils::error::{LoadError, TransportError};
use async_trait::async_trait;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://imdb-api.com";
pub const DEFAULT_LANGUAGE: &str = "en";

/// API 端點設定，網址在建構後固定
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    base_url: String,
    api_key: String,
    language: String,
}

impl ApiEndpoints {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.api_base_url(), config.api_key()).with_language(config.language())
    }

    pub fn movies_url(&self) -> Result<Url, TransportError> {
        self.build(&format!("Top250Movies/{}", self.api_key))
    }

    pub fn trailer_url(&self, id: &str) -> Result<Url, TransportError> {
        self.build(&format!("Trailer/{}/{}", self.api_key, id))
    }

    fn build(&self, path: &str) -> Result<Url, TransportError> {
        let base = self.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}/{}/API/{}", base, self.language, path))?)
    }
}

pub struct MoviesLoader<S: MovieSource> {
    source: S,
    endpoints: ApiEndpoints,
}

impl<S: MovieSource> MoviesLoader<S> {
    pub fn new(source: S, endpoints: ApiEndpoints) -> Self {
        Self { source, endpoints }
    }
}

#[async_trait]
impl<S: MovieSource> MoviesLoading for MoviesLoader<S> {
    async fn load_movies(&self) -> Result<MostPopularMovies, LoadError> {
        let url = self.endpoints.movies_url()?;
        let data = self.source.fetch(&url).await?;

        let movies: MostPopularMovies = serde_json::from_slice(&data).map_err(|e| {
            tracing::debug!("Failed to decode movie list: {}", e);
            LoadError::Decode(e)
        })?;

        if let Some(message) = movies.rejection() {
            tracing::warn!("Movie list rejected by server: {}", message);
            return Err(LoadError::RemoteRejected {
                message: message.to_string(),
            });
        }

        tracing::debug!("Loaded {} movies", movies.items.len());
        Ok(movies)
    }

    async fn load_trailer_link(&self, id: &str) -> Result<String, LoadError> {
        let url = self.endpoints.trailer_url(id)?;
        let data = self.source.fetch(&url).await?;
        let trailer: TrailerResponse = serde_json::from_slice(&data)?;

        if let Some(message) = trailer.rejection() {
            tracing::warn!("Trailer lookup for {} rejected: {}", id, message);
            return Err(LoadError::RemoteRejected {
                message: message.to_string(),
            });
        }

        if trailer.link.is_empty() {
            return Err(LoadError::RemoteRejected {
                message: "no trailer available".to_string(),
            });
        }

        Ok(trailer.link)
    }
}
