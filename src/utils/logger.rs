use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 終端機輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 互動遊玩時的精簡單行格式
    Compact,
    /// `--json-logs`：每筆事件一行 JSON，可導向檔案或 jq 篩選題目流程
    Json,
}

impl LogFormat {
    pub fn from_flag(json_logs: bool) -> Self {
        if json_logs {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

/// 未設定 RUST_LOG 時使用的過濾規則
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "movie_quiz=debug,info"
    } else {
        "movie_quiz=info"
    }
}

pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_thread_ids(false).compact())
            .init(),
        // 背景下載與主佇列在不同執行緒，保留 thread id 方便對照回呼順序
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_thread_ids(true).json())
            .init(),
    }
}
