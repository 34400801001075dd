//! Network configuration for the extraction server.

use std::time::Duration;

/// Paths reserved for the health probes; the extract endpoint may not use them.
pub const HEALTH_PATHS: [&str; 3] = ["/health", "/health/live", "/health/ready"];

/// Errors from validating a [`NetworkConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("extract path must start with '/': {0:?}")]
    RelativePath(String),
    #[error("extract path {0:?} collides with a health endpoint")]
    ReservedPath(String),
    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}

/// Top-level network configuration for the server.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Route that accepts text to extract from. Any HTTP method is accepted.
    pub extract_path: String,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
    /// Largest request body, in bytes, the extract handler will read.
    /// `None` reads the whole body whatever its size.
    pub max_body_bytes: Option<usize>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            extract_path: "/".to_string(),
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
            max_body_bytes: None,
        }
    }
}

impl NetworkConfig {
    /// Checks that the configuration can be turned into a router.
    ///
    /// # Errors
    ///
    /// Rejects an extract path that is relative or shadows a health route,
    /// a zero body limit, and a zero request timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.extract_path.starts_with('/') {
            return Err(ConfigError::RelativePath(self.extract_path.clone()));
        }
        if HEALTH_PATHS.contains(&self.extract_path.as_str()) {
            return Err(ConfigError::ReservedPath(self.extract_path.clone()));
        }
        if self.max_body_bytes == Some(0) {
            return Err(ConfigError::ZeroBodyLimit);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Body cap handed to the reader; unlimited when none is configured.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.max_body_bytes.unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_config_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 0);
        assert_eq!(config.extract_path, "/");
        assert_eq!(config.cors_origins, vec!["*"]);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_bytes, None);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = NetworkConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..NetworkConfig::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn validate_rejects_relative_path() {
        let config = NetworkConfig {
            extract_path: "extract".to_string(),
            ..NetworkConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::RelativePath("extract".to_string()))
        );
    }

    #[test]
    fn validate_rejects_health_paths() {
        for path in HEALTH_PATHS {
            let config = NetworkConfig {
                extract_path: path.to_string(),
                ..NetworkConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::ReservedPath(path.to_string()))
            );
        }
    }

    #[test]
    fn validate_rejects_zero_body_limit() {
        let config = NetworkConfig {
            max_body_bytes: Some(0),
            ..NetworkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBodyLimit));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = NetworkConfig {
            request_timeout: Duration::ZERO,
            ..NetworkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[test]
    fn body_limit_is_unbounded_by_default() {
        assert_eq!(NetworkConfig::default().body_limit(), usize::MAX);

        let config = NetworkConfig {
            max_body_bytes: Some(1024),
            ..NetworkConfig::default()
        };
        assert_eq!(config.body_limit(), 1024);
    }

    #[test]
    fn validate_accepts_nested_path() {
        let config = NetworkConfig {
            extract_path: "/api/extract".to_string(),
            ..NetworkConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }
}
