//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration from file or defaults
//! - Apply command-line overrides before validation
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Overrides are validated with the rest of the config, never after

use std::path::Path;

use crate::config::loader::{read_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::ProxyConfig;

/// Values supplied on the command line or environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub backend_origin: Option<String>,
}

/// Produce the validated configuration the process will run with.
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ProxyConfig::default(),
    };

    if let Some(bind_address) = overrides.bind_address {
        config.listener.bind_address = bind_address;
    }
    if let Some(origin) = overrides.backend_origin {
        config.backend.origin = origin;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file() {
        let config = resolve_config(None, Overrides::default()).unwrap();
        assert_eq!(config.backend.origin, "127.0.0.1:5000");
    }

    #[test]
    fn overrides_win() {
        let overrides = Overrides {
            bind_address: Some("127.0.0.1:3000".into()),
            backend_origin: Some("backend.internal:5000".into()),
        };
        let config = resolve_config(None, overrides).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.backend.origin, "backend.internal:5000");
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = Overrides {
            backend_origin: Some("http://backend.internal:5000".into()),
            ..Overrides::default()
        };
        let err = resolve_config(None, overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
