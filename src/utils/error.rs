use thiserror::Error;

/// 網路層錯誤，原樣往上傳遞
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// 載入電影清單或預告片連結時的錯誤分類
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Load error: {message}")]
    RemoteRejected { message: String },
}

/// 題目工廠回報給 delegate 的錯誤
#[derive(Error, Debug)]
pub enum QuestionFactoryError {
    #[error("Fail to loading data")]
    Loading {
        #[source]
        source: LoadError,
    },
}

impl QuestionFactoryError {
    /// 底層的載入錯誤
    pub fn cause(&self) -> &LoadError {
        match self {
            QuestionFactoryError::Loading { source } => source,
        }
    }
}

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration parsing error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    QuestionFactory(#[from] QuestionFactoryError),
}

impl QuizError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            QuizError::IoError(e) => format!("無法讀取檔案: {}", e),
            QuizError::ConfigError { message } => format!("設定錯誤: {}", message),
            QuizError::ConfigValidationError { field, message } => {
                format!("設定檔格式錯誤 ({}): {}", field, message)
            }
            QuizError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 {} 不正確: {}", field, reason)
            }
            QuizError::MissingConfigError { field } => format!("缺少必要設定: {}", field),
            QuizError::Load(e) => format!("無法載入電影資料: {}", e),
            QuizError::QuestionFactory(e) => format!("{}: {}", e, e.cause()),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuizError::IoError(_) => "確認設定檔路徑存在且可讀取",
            QuizError::ConfigError { .. }
            | QuizError::ConfigValidationError { .. }
            | QuizError::InvalidConfigValueError { .. } => "檢查 TOML 設定檔的內容",
            QuizError::MissingConfigError { .. } => {
                "在設定檔或 IMDB_API_KEY 環境變數中提供對應的值"
            }
            QuizError::Load(LoadError::Transport(_)) => "檢查網路連線後重試",
            QuizError::Load(LoadError::Decode(_)) => "API 回應格式不符，確認 API 端點設定",
            QuizError::Load(LoadError::RemoteRejected { .. })
            | QuizError::QuestionFactory(_) => "確認 API key 是否有效或已超過每日配額",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;
