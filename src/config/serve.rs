//! `[serve]` section configuration.
//!
//! Where `folio serve` listens and whether it rebuilds on change.

use super::{defaults, error::ConfigError};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// `[serve]` section in folio.toml.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # reachable from the LAN, e.g. to check a phone
/// port = 5277            # first port tried; the next free one is used if taken
/// watch = true           # rebuild when data.json, folio.toml or assets/ change
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// IP address to bind. A host name such as `localhost` is rejected.
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// First port tried.
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,

    /// Rebuild the page when its inputs change.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub watch: bool,
}

impl ServeConfig {
    /// Address the server binds first.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .interface
            .trim()
            .parse()
            .map_err(|err| ConfigError::Interface(self.interface.clone(), err))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        self.addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_serve_config() {
        let config = r#"
            [serve]
            interface = "0.0.0.0"
            port = 8080
            watch = false
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.serve.addr().unwrap(), "0.0.0.0:8080".parse::<std::net::SocketAddr>().unwrap());
        assert!(!config.serve.watch);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert_eq!(config.serve.addr().unwrap(), "127.0.0.1:5277".parse::<std::net::SocketAddr>().unwrap());
        assert!(config.serve.watch);
        assert!(config.serve.validate().is_ok());
    }

    #[test]
    fn test_ipv6_interface() {
        let serve = ServeConfig {
            interface: "::1".into(),
            ..ServeConfig::default()
        };
        assert_eq!(serve.addr().unwrap(), "[::1]:5277".parse::<std::net::SocketAddr>().unwrap());
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let serve = ServeConfig {
            port: 0,
            ..ServeConfig::default()
        };
        assert!(matches!(serve.validate(), Err(ConfigError::ZeroPort)));
    }

    #[test]
    fn test_validate_rejects_host_name() {
        let serve = ServeConfig {
            interface: "localhost".into(),
            ..ServeConfig::default()
        };
        assert!(matches!(serve.validate(), Err(ConfigError::Interface(..))));
    }

    #[test]
    fn test_unknown_field_rejection_in_serve() {
        let config = r#"
            [serve]
            host = "localhost"
        "#;
        assert!(toml::from_str::<SiteConfig>(config).is_err());
    }
}
