//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("expanding '{value}': {message}")]
    Expand { value: String, message: String },
}

impl ConfigError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn expand(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Expand {
            value: value.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let err = ConfigError::read(
            "/nope/config.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nope/config.toml"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_expand_error_display() {
        let err = ConfigError::expand("$NOPE/log", "variable not found");
        assert_eq!(err.to_string(), "expanding '$NOPE/log': variable not found");
    }
}
