pub mod toml_config;

pub use toml_config::QuizConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "movie-quiz")]
#[command(about = "Movie rating trivia built from the IMDb Top 250")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "IMDb API key (overrides the configuration file)")]
    pub api_key: Option<String>,

    #[arg(long, short = 'n', default_value = "3")]
    pub questions: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔、命令列參數與環境變數
    pub fn resolve(&self) -> Result<QuizConfig> {
        let mut config = match &self.config {
            Some(path) => QuizConfig::from_file(path)?,
            None => QuizConfig::default(),
        };

        if let Some(key) = &self.api_key {
            config.api.api_key = Some(key.clone());
        }

        Ok(config.with_env_fallback())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_arguments() {
        let cli = CliConfig::parse_from(["movie-quiz", "-n", "5", "--verbose"]);
        assert_eq!(cli.questions, 5);
        assert!(cli.verbose);
        assert!(!cli.json_logs);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_api_key_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[api]\napi_key = \"k_file\"\nlanguage = \"ru\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "movie-quiz",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--api-key",
            "k_cli",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("k_cli"));
        assert_eq!(config.api.language, "ru");
    }
}
