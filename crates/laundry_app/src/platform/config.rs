use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use laundry_engine::{default_sources, EngineConfig, RetrievalSettings, SourceSpec};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "laundry.ron";
pub const DEFAULT_TARGET_URL: &str =
    "https://laundry.senkaq.com/shop/osaka/osaka-shi-ikuno-ku/4710/";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings read from `laundry.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub target_url: String,
    /// Display language code; detected from the environment when absent.
    pub language: Option<String>,
    pub sources: Vec<SourceSpec>,
    pub min_content_len: usize,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let retrieval = RetrievalSettings::default();
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            language: None,
            sources: default_sources(),
            min_content_len: retrieval.min_content_len,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given, else `./laundry.ron` if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                match Self::load_from(path) {
                    Err(ConfigError::Read { source, .. })
                        if source.kind() == io::ErrorKind::NotFound =>
                    {
                        engine_info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                        Ok(Self::default())
                    }
                    other => other,
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_url.trim().is_empty() {
            return Err(ConfigError::Invalid("target_url is empty".to_string()));
        }
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("at least one source is required".to_string()));
        }
        if let Some(source) = self
            .sources
            .iter()
            .find(|s| !s.url_template.contains("{url}") && !s.url_template.contains("{raw_url}"))
        {
            return Err(ConfigError::Invalid(format!(
                "source {} never mentions the target url",
                source.name
            )));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            engine_warn!("Zero timeout in config; requests will fail immediately");
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        let mut config = EngineConfig::new(self.target_url.clone());
        config.fetch.connect_timeout = Duration::from_secs(self.connect_timeout_secs);
        config.fetch.request_timeout = Duration::from_secs(self.request_timeout_secs);
        config.retrieval.sources = self.sources.clone();
        config.retrieval.min_content_len = self.min_content_len;
        config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use laundry_engine::SourceFormat;
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let file = write_config(r#"(target_url: "https://shop.example/9/", language: Some("ko"))"#);
        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.target_url, "https://shop.example/9/");
        assert_eq!(config.language.as_deref(), Some("ko"));
        assert_eq!(config.sources, default_sources());
        assert_eq!(config.min_content_len, 500);
    }

    #[test]
    fn custom_sources_reach_the_engine_config() {
        let file = write_config(
            r#"(
                sources: [
                    (name: "Mirror", url_template: "https://mirror.example/?u={url}", format: RawHtml),
                    (name: "Wrapped", url_template: "https://wrap.example/get?url={url}", format: AllOriginsJson),
                ],
                request_timeout_secs: 5,
            )"#,
        );
        let config = AppConfig::load(Some(file.path())).unwrap();
        let engine = config.engine_config();

        assert_eq!(engine.target_url, DEFAULT_TARGET_URL);
        assert_eq!(engine.fetch.request_timeout, Duration::from_secs(5));
        let names: Vec<&str> = engine.retrieval.sources.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mirror", "Wrapped"]);
        assert_eq!(engine.retrieval.sources[1].format, SourceFormat::AllOriginsJson);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = write_config("(target_url: ");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn explicit_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn empty_source_list_is_rejected() {
        let file = write_config("(sources: [])");
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert_eq!(err.to_string(), "invalid config: at least one source is required");
    }

    #[test]
    fn source_without_target_placeholder_is_rejected() {
        let file = write_config(
            r#"(sources: [(name: "Fixed", url_template: "https://fixed.example/", format: RawHtml)])"#,
        );
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Fixed"));
    }

    #[test]
    fn defaults_round_trip_through_ron() {
        let text = ron::ser::to_string_pretty(&AppConfig::default(), ron::ser::PrettyConfig::new())
            .unwrap();
        let parsed: AppConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }
}
