use crate::core::movies_loader::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use crate::core::ConfigProvider;
use crate::utils::error::{QuizError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

pub const API_KEY_ENV: &str = "IMDB_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub quiz: QuizSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSection {
    #[serde(default = "default_threshold_min")]
    pub threshold_min: u8,
    #[serde(default = "default_threshold_max")]
    pub threshold_max: u8,
    #[serde(default = "default_poster_width")]
    pub poster_width: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_threshold_min() -> u8 {
    6
}

fn default_threshold_max() -> u8 {
    8
}

fn default_poster_width() -> u32 {
    600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            language: default_language(),
            timeout_seconds: None,
        }
    }
}

impl Default for QuizSection {
    fn default() -> Self {
        Self {
            threshold_min: default_threshold_min(),
            threshold_max: default_threshold_max(),
            poster_width: default_poster_width(),
        }
    }
}

impl QuizConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuizError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuizError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IMDB_API_KEY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuizError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 沒有設定 API key 時改用環境變數
    pub fn with_env_fallback(mut self) -> Self {
        if self.api.api_key.as_deref().map_or(true, is_unresolved) {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                self.api.api_key = Some(key);
            }
        }
        self
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_non_empty_string("api.language", &self.api.language)?;

        let api_key = validation::validate_required_field("api.api_key", &self.api.api_key)?;
        if is_unresolved(api_key) {
            return Err(QuizError::MissingConfigError {
                field: "api.api_key".to_string(),
            });
        }
        validation::validate_non_empty_string("api.api_key", api_key)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_positive_number("api.timeout_seconds", timeout as usize, 1)?;
        }

        validation::validate_range("quiz.threshold_min", self.quiz.threshold_min, 0, 10)?;
        validation::validate_range(
            "quiz.threshold_max",
            self.quiz.threshold_max,
            self.quiz.threshold_min,
            10,
        )?;
        validation::validate_positive_number(
            "quiz.poster_width",
            self.quiz.poster_width as usize,
            1,
        )?;

        Ok(())
    }
}

fn is_unresolved(value: &str) -> bool {
    value.trim().is_empty() || value.starts_with("${")
}

impl ConfigProvider for QuizConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn api_key(&self) -> &str {
        self.api.api_key.as_deref().unwrap_or_default()
    }

    fn language(&self) -> &str {
        &self.api.language
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    fn threshold_range(&self) -> RangeInclusive<u8> {
        self.quiz.threshold_min..=self.quiz.threshold_max
    }

    fn poster_width(&self) -> u32 {
        self.quiz.poster_width
    }
}

impl Validate for QuizConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
