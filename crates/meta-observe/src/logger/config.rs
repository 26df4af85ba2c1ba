use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::logger::{error::LoggerError, format::LoggerFormat};

const ENV_LEVEL: &str = "META_LOG_LEVEL";
const ENV_FORMAT: &str = "META_LOG_FORMAT";

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `meta_core=debug,info`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color: std::io::stdout().is_terminal(),
        }
    }
}

impl LoggerConfig {
    /// Defaults overridden by `META_LOG_LEVEL` and `META_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, LoggerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoggerError> {
        let mut cfg = Self::default();
        if let Some(level) = lookup(ENV_LEVEL) {
            cfg.level = level;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            cfg.format = format.parse()?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        self.filter().map(|_| ())
    }

    pub(crate) fn filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.level)
            .map_err(|_| LoggerError::InvalidLogLevel(self.level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_overrides_defaults() {
        let cfg = LoggerConfig::from_lookup(|key| match key {
            "META_LOG_LEVEL" => Some("meta_core=debug,warn".into()),
            "META_LOG_FORMAT" => Some("json".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cfg.level, "meta_core=debug,warn");
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert!(cfg.with_targets);
    }

    #[test]
    fn empty_lookup_keeps_defaults() {
        let cfg = LoggerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, LoggerFormat::Text);
    }

    #[test]
    fn rejects_bad_directive() {
        let err = LoggerConfig::from_lookup(|key| {
            (key == "META_LOG_LEVEL").then(|| "meta_core=loud".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLogLevel(_)));
    }
}
