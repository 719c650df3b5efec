//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::core::endpoint::trim_endpoint;
use crate::core::errors::{Result, TranslationError};

const DEFAULT_ENDPOINT: &str = "http://localhost:8001";
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_READ_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_WRITE_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_POOL_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Per-phase timeouts for one request.
///
/// reqwest only exposes connect and read timeouts directly. Write and
/// pool-acquire are enforced through an overall deadline equal to the sum of
/// all four phases, see [`TimeoutPolicy::total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    /// TCP/TLS connection establishment
    pub connect: Duration,
    /// Inactivity while reading the response
    pub read: Duration,
    /// Sending the request body
    pub write: Duration,
    /// Waiting for a connection from the pool
    pub pool: Duration,
}

impl TimeoutPolicy {
    /// Same limit for every phase
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            connect: timeout,
            read: timeout,
            write: timeout,
            pool: timeout,
        }
    }

    /// Overall request deadline
    pub fn total(&self) -> Duration {
        self.connect + self.read + self.write + self.pool
    }
}

/// Configuration for the NLLB client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NllbConfig {
    /// Default service endpoint, used when a call does not supply one
    pub endpoint: String,
    /// Translate connect timeout
    pub connect_timeout_ms: u64,
    /// Translate read timeout, the longest since batches are slow
    pub read_timeout_ms: u64,
    /// Translate write timeout
    pub write_timeout_ms: u64,
    /// Translate pool-acquire timeout
    pub pool_timeout_ms: u64,
    /// Flat timeout for the language and health probes
    pub probe_timeout_ms: u64,
}

impl Default for NllbConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_WRITE_TIMEOUT_MS,
            pool_timeout_ms: DEFAULT_POOL_TIMEOUT_MS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

fn env_u64(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
            TranslationError::config(format!("{} must be an integer number of milliseconds: {}", name, e))
        }),
        Err(_) => Ok(default),
    }
}

impl NllbConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("NLLB_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let config = Self {
            endpoint,
            connect_timeout_ms: env_u64("NLLB_CONNECT_TIMEOUT_MS", DEFAULT_CONNECT_TIMEOUT_MS)?,
            read_timeout_ms: env_u64("NLLB_READ_TIMEOUT_MS", DEFAULT_READ_TIMEOUT_MS)?,
            write_timeout_ms: env_u64("NLLB_WRITE_TIMEOUT_MS", DEFAULT_WRITE_TIMEOUT_MS)?,
            pool_timeout_ms: env_u64("NLLB_POOL_TIMEOUT_MS", DEFAULT_POOL_TIMEOUT_MS)?,
            probe_timeout_ms: env_u64("NLLB_PROBE_TIMEOUT_MS", DEFAULT_PROBE_TIMEOUT_MS)?,
        };

        info!("Loaded NLLB configuration, default endpoint: {}", config.endpoint);
        Ok(config)
    }

    /// Load from a JSON file, or YAML when the extension is `.yaml`/`.yml`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let endpoint = trim_endpoint(&self.endpoint);
        if endpoint.is_empty() {
            return Err(TranslationError::config("endpoint is required"));
        }

        let parsed = url::Url::parse(endpoint)
            .map_err(|e| TranslationError::config(format!("invalid endpoint {}: {}", endpoint, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TranslationError::config(format!(
                "endpoint must use http or https, got {}",
                parsed.scheme()
            )));
        }

        let timeouts = [
            ("connect_timeout_ms", self.connect_timeout_ms),
            ("read_timeout_ms", self.read_timeout_ms),
            ("write_timeout_ms", self.write_timeout_ms),
            ("pool_timeout_ms", self.pool_timeout_ms),
            ("probe_timeout_ms", self.probe_timeout_ms),
        ];
        for (name, value) in timeouts {
            if value == 0 {
                return Err(TranslationError::config(format!("{} must be greater than 0", name)));
            }
        }

        Ok(())
    }

    /// Replace the default endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the four translate timeouts
    pub fn with_translate_timeouts(mut self, policy: TimeoutPolicy) -> Self {
        self.connect_timeout_ms = policy.connect.as_millis() as u64;
        self.read_timeout_ms = policy.read.as_millis() as u64;
        self.write_timeout_ms = policy.write.as_millis() as u64;
        self.pool_timeout_ms = policy.pool.as_millis() as u64;
        self
    }

    /// Replace the flat probe timeout
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Timeouts applied to `translate`
    pub fn translate_timeouts(&self) -> TimeoutPolicy {
        TimeoutPolicy {
            connect: Duration::from_millis(self.connect_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
            write: Duration::from_millis(self.write_timeout_ms),
            pool: Duration::from_millis(self.pool_timeout_ms),
        }
    }

    /// Timeouts applied to the language and health probes
    pub fn probe_timeouts(&self) -> TimeoutPolicy {
        TimeoutPolicy::uniform(Duration::from_millis(self.probe_timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = NllbConfig::default();
        let policy = config.translate_timeouts();

        assert_eq!(policy.connect, Duration::from_secs(10));
        assert_eq!(policy.read, Duration::from_secs(30));
        assert_eq!(policy.write, Duration::from_secs(10));
        assert_eq!(policy.pool, Duration::from_secs(10));
        assert_eq!(policy.total(), Duration::from_secs(60));
        assert_eq!(config.probe_timeouts(), TimeoutPolicy::uniform(Duration::from_secs(10)));
    }

    #[test]
    fn test_config_validation() {
        let config = NllbConfig::default().with_endpoint("https://nllb.internal/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_endpoint() {
        let config = NllbConfig::default().with_endpoint("///");
        assert!(matches!(config.validate(), Err(TranslationError::ConfigError { .. })));
    }

    #[test]
    fn test_config_validation_bad_scheme() {
        let config = NllbConfig::default().with_endpoint("ftp://nllb.internal");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = NllbConfig {
            read_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_translate_timeouts() {
        let policy = TimeoutPolicy {
            connect: Duration::from_millis(100),
            read: Duration::from_millis(200),
            write: Duration::from_millis(300),
            pool: Duration::from_millis(400),
        };
        let config = NllbConfig::default().with_translate_timeouts(policy);
        assert_eq!(config.translate_timeouts(), policy);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nllb.json");

        let config = NllbConfig::default().with_endpoint("http://10.0.0.5:9000");
        config.to_file(&path).unwrap();

        assert_eq!(NllbConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_yaml_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nllb.yaml");
        std::fs::write(&path, "endpoint: http://gpu-box:8001\nread_timeout_ms: 45000\n").unwrap();

        let config = NllbConfig::from_file(&path).unwrap();
        assert_eq!(config.endpoint, "http://gpu-box:8001");
        assert_eq!(config.read_timeout_ms, 45_000);
        assert_eq!(config.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
    }

    const ENV_VARS: &[&str] = &[
        "NLLB_ENDPOINT",
        "NLLB_CONNECT_TIMEOUT_MS",
        "NLLB_READ_TIMEOUT_MS",
        "NLLB_WRITE_TIMEOUT_MS",
        "NLLB_POOL_TIMEOUT_MS",
        "NLLB_PROBE_TIMEOUT_MS",
    ];

    fn clear_env() {
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_unparseable_timeout() {
        clear_env();
        std::env::set_var("NLLB_READ_TIMEOUT_MS", "abc");

        let result = NllbConfig::from_env();
        clear_env();

        match result {
            Err(TranslationError::ConfigError { message }) => {
                assert!(message.contains("NLLB_READ_TIMEOUT_MS"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_unset_uses_defaults() {
        clear_env();

        let config = NllbConfig::from_env().unwrap();
        assert_eq!(config, NllbConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("NLLB_ENDPOINT", "http://gpu-box:8001/");
        std::env::set_var("NLLB_READ_TIMEOUT_MS", " 45000 ");

        let result = NllbConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.endpoint, "http://gpu-box:8001/");
        assert_eq!(config.read_timeout_ms, 45_000);
        assert_eq!(config.connect_timeout_ms, DEFAULT_CONNECT_TIMEOUT_MS);
    }
}
