use super::{ConfigError, LoggerConfig};
use url::Url;

impl LoggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.trim().is_empty() {
            return Err(ConfigError::MissingField("application"));
        }

        if self.key.trim().is_empty() {
            return Err(ConfigError::MissingField("key"));
        }

        if self.source.trim().is_empty() {
            return Err(ConfigError::MissingField("source"));
        }

        let url = Url::parse(&self.ingest_url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid ingest URL '{}': {}", self.ingest_url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Ingest URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.query().is_some() {
            return Err(ConfigError::InvalidConfig(
                "Ingest URL must not carry a query string".to_string(),
            ));
        }

        Ok(())
    }
}
