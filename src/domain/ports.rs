use crate::domain::model::{Comparison, MostPopularMovies, QuizQuestion};
use crate::utils::error::{LoadError, QuestionFactoryError, TransportError};
use async_trait::async_trait;
use std::ops::RangeInclusive;
use std::time::Duration;
use url::Url;

/// 遠端資料來源：抓取單一網址的原始位元組
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

/// 海報圖片下載，與 `MovieSource` 分開以便個別替換
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

#[async_trait]
pub trait MoviesLoading: Send + Sync {
    async fn load_movies(&self) -> Result<MostPopularMovies, LoadError>;
    async fn load_trailer_link(&self, id: &str) -> Result<String, LoadError>;
}

/// 題目工廠的通知對象，所有方法都在主佇列上依序呼叫
pub trait QuestionFactoryDelegate: Send + Sync {
    fn did_load_data_from_server(&self);
    fn did_fail_to_load_data(&self, error: QuestionFactoryError);
    fn did_receive_next_question(&self, question: QuizQuestion);
}

pub trait QuestionRandomizer: Send + Sync {
    /// `len` 必須大於 0，回傳值落在 `[0, len)`
    fn index(&self, len: usize) -> usize;
    fn threshold(&self, range: RangeInclusive<u8>) -> u8;
    fn comparison(&self) -> Comparison;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn language(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn threshold_range(&self) -> RangeInclusive<u8>;
    fn poster_width(&self) -> u32;
}
