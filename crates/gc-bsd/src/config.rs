//! BSD connection settings.

use std::time::Duration;

use crate::error::{BsdError, BsdResult};

/// Default timeout applied to every BSD request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credentials and host of a BSD instance.
#[derive(Debug, Clone)]
pub struct BsdConfig {
    /// Bare host name (`example.bsd.net`) or a full base URL.
    pub host: String,
    pub api_id: String,
    pub api_secret: String,
    pub timeout: Duration,
}

impl BsdConfig {
    pub fn new(host: &str, api_id: &str, api_secret: &str) -> Self {
        Self {
            host: host.to_string(),
            api_id: api_id.to_string(),
            api_secret: api_secret.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `BSD_HOST`, `BSD_API_ID`, `BSD_API_SECRET` and the optional
    /// `BSD_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> BsdResult<Self> {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| BsdError::Config(format!("{} is not set", name)))
        };
        let mut config = Self::new(&var("BSD_HOST")?, &var("BSD_API_ID")?, &var("BSD_API_SECRET")?);
        if let Ok(secs) = std::env::var("BSD_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| BsdError::Config(format!("BSD_TIMEOUT_SECS is not a number: {}", secs)))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL of the instance. A bare host is served over https.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_bare_host() {
        let config = BsdConfig::new("demo.bsd.net", "id", "secret");
        assert_eq!(config.base_url(), "https://demo.bsd.net");
    }

    #[test]
    fn test_base_url_keeps_scheme() {
        let config = BsdConfig::new("http://localhost:8080/", "id", "secret");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }
}
