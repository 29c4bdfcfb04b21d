//! Configuration error types.
//!
//! Every variant names the `folio.toml` key it is about, so the message can
//! be acted on without looking up the source.

use std::{net::AddrParseError, path::PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating `folio.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse folio.toml")]
    Toml(#[from] toml::de::Error),

    #[error("[effects.observer.threshold] must be between 0.0 and 1.0, got {0}")]
    Threshold(f64),

    #[error("[effects.observer.root_margin] must be one px length like `0px` or `-20px`, got `{0}`")]
    RootMargin(String),

    #[error("{field} must be a single non-empty class name, got `{value}`")]
    ClassName { field: &'static str, value: String },

    #[error("[effects.typewriter.interval_ms] must be greater than 0")]
    ZeroInterval,

    #[error("[build.output] must not be the project root `{0}`")]
    OutputIsRoot(PathBuf),

    #[error("[serve.port] must not be 0")]
    ZeroPort,

    #[error("[serve.interface] `{0}` is not an IP address")]
    Interface(String, #[source] AddrParseError),

    #[error("`{0}` already exists, remove it or init in a different path")]
    AlreadyExists(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_messages_name_the_key() {
        let io_err = ConfigError::Io(
            PathBuf::from("folio.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        assert_eq!(io_err.to_string(), "failed to read `folio.toml`");

        assert!(ConfigError::Threshold(1.5).to_string().contains("got 1.5"));
        assert!(
            ConfigError::RootMargin("10%".into())
                .to_string()
                .starts_with("[effects.observer.root_margin]")
        );

        let class = ConfigError::ClassName {
            field: "[effects.observer.visible_class]",
            value: "is visible".into(),
        };
        assert_eq!(
            class.to_string(),
            "[effects.observer.visible_class] must be a single non-empty class name, got `is visible`"
        );
    }

    #[test]
    fn test_interface_keeps_parse_error_as_source() {
        let source = "localhost".parse::<std::net::IpAddr>().unwrap_err();
        let err = ConfigError::Interface("localhost".into(), source);

        assert!(err.to_string().contains("`localhost`"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
