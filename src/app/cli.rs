use super::logging_system::TracingLevel;
use crate::config::{ConfigError, LoggerConfig, Mode};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Which facade operation each message goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MessageLevel {
    #[default]
    Info,
    Error,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tandem-log",
    author,
    version,
    about = "Write log messages to the console and ship them to a remote ingest endpoint",
    long_about = None
)]
pub struct Cli {
    /// Application name attached to every remote line
    #[arg(long, env = "LOG_APPLICATION")]
    pub application: Option<String>,

    /// Ingest API key
    #[arg(long, env = "LOG_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Host identifier (defaults to the machine hostname)
    #[arg(long, env = "LOG_SOURCE")]
    pub source: Option<String>,

    /// Process mode; `testing` silences all output
    #[arg(long, env = "LOG_MODE")]
    pub mode: Option<Mode>,

    /// Do not prefix messages with the correlation id
    #[arg(long)]
    pub no_unique_id: bool,

    /// Ingest endpoint URL
    #[arg(long, env = "LOG_INGEST_URL")]
    pub ingest_url: Option<String>,

    /// TOML file with logger settings; flags override its values
    #[arg(long, env = "LOG_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Level for the messages given on this invocation
    #[arg(long, default_value = "info")]
    pub level: MessageLevel,

    /// JSON data attached to info messages
    #[arg(long)]
    pub data: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "LOG_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Level of tandem-log's own diagnostics on stderr
    #[arg(long, env = "TANDEM_LOG_LEVEL", default_value = "warn")]
    pub log_level: TracingLevel,

    /// Messages to log; read from stdin, one per line, when omitted
    pub messages: Vec<String>,
}

impl Cli {
    /// Layers flags over the optional config file, fills `source` from the
    /// hostname when unset, then validates.
    pub fn logger_config(&self) -> Result<LoggerConfig, ConfigError> {
        let mut config = match &self.config_file {
            Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
            None => LoggerConfig::default(),
        };

        if let Some(application) = &self.application {
            config.application = application.clone();
        }
        if let Some(key) = &self.key {
            config.key = key.clone();
        }
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(mode) = self.mode {
            config.mode = Some(mode);
        }
        if self.no_unique_id {
            config.include_unique_id = Some(false);
        }
        if let Some(ingest_url) = &self.ingest_url {
            config.ingest_url = ingest_url.clone();
        }

        if config.source.is_empty()
            && let Ok(hostname) = hostname::get()
            && let Some(hostname) = hostname.to_str()
        {
            config.source = hostname.to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_build_config() {
        let cli = Cli::try_parse_from([
            "tandem-log",
            "--application",
            "app",
            "--key",
            "key",
            "--source",
            "source",
            "--mode",
            "production",
            "--no-unique-id",
            "hello",
        ])
        .unwrap();

        let config = cli.logger_config().unwrap();
        assert_eq!(config.application, "app");
        assert_eq!(config.mode, Some(Mode::Production));
        assert!(!config.includes_unique_id());
        assert_eq!(cli.messages, ["hello"]);
        assert_eq!(cli.level, MessageLevel::Info);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "application = \"from-file\"\nkey = \"file-key\"\nsource = \"file-host\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from([
            "tandem-log",
            "--config-file",
            path.as_str(),
            "--key",
            "flag-key",
        ])
        .unwrap();

        let config = cli.logger_config().unwrap();
        assert_eq!(config.application, "from-file");
        assert_eq!(config.key, "flag-key");
        assert_eq!(config.source, "file-host");
    }

    #[test]
    fn test_level_and_timeout() {
        let cli =
            Cli::try_parse_from(["tandem-log", "--level", "error", "--timeout-secs", "5"]).unwrap();

        assert_eq!(cli.level, MessageLevel::Error);
        assert_eq!(cli.timeout(), Duration::from_secs(5));
    }
}
