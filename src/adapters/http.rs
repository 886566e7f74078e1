use crate::domain::ports::{ImageFetcher, MovieSource};
use crate::utils::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get_bytes(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        // 只接受 2xx
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MovieSource for HttpClient {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        self.get_bytes(url).await
    }
}

#[async_trait]
impl ImageFetcher for HttpClient {
    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        self.get_bytes(url).await
    }
}
