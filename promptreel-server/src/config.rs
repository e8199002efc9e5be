use promptreel_providers::error::GenerateError;
use promptreel_providers::veo::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub api_key: String,
    pub port: u16,
    pub model: String,
    pub base_url: String,
    pub poll_interval: Duration,
    /// Unset means the poll loop runs for as long as the provider needs.
    pub max_poll_checks: Option<u32>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"[REDACTED]")
            .field("port", &self.port)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("poll_interval", &self.poll_interval)
            .field("max_poll_checks", &self.max_poll_checks)
            .finish()
    }
}

impl ServerConfig {
    /// Reads the environment. `API_KEY` is the one hard requirement; the
    /// process must not come up without it.
    pub fn from_env() -> Result<Self, GenerateError> {
        let api_key = std::env::var("API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(GenerateError::MissingApiKey)?;

        Ok(Self {
            api_key,
            port: parse_port(std::env::var("PORT").ok().as_deref()),
            model: std::env::var("VIDEO_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            base_url: std::env::var("PROVIDER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            poll_interval: Duration::from_secs(parse_secs(
                std::env::var("POLL_INTERVAL_SECS").ok().as_deref(),
            )),
            max_poll_checks: parse_max_checks(std::env::var("MAX_POLL_CHECKS").ok().as_deref()),
        })
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT)
}

fn parse_secs(raw: Option<&str>) -> u64 {
    raw.and_then(|p| p.parse().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS)
}

fn parse_max_checks(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|p| p.parse().ok()).filter(|&max| max > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_to_default() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("3000")), 3000);
        assert_eq!(parse_port(Some("not-a-port")), 8080);
    }

    #[test]
    fn poll_interval_rejects_zero() {
        assert_eq!(parse_secs(None), 10);
        assert_eq!(parse_secs(Some("30")), 30);
        assert_eq!(parse_secs(Some("0")), 10);
        assert_eq!(parse_secs(Some("soon")), 10);
    }

    #[test]
    fn max_checks_defaults_to_unbounded() {
        assert_eq!(parse_max_checks(None), None);
        assert_eq!(parse_max_checks(Some("120")), Some(120));
        assert_eq!(parse_max_checks(Some("0")), None);
        assert_eq!(parse_max_checks(Some("forever")), None);
    }

    #[test]
    fn debug_redacts_the_credential() {
        let cfg = ServerConfig {
            api_key: "k-secret".into(),
            port: 8080,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            poll_interval: Duration::from_secs(10),
            max_poll_checks: None,
        };
        let s = format!("{cfg:?}");
        assert!(!s.contains("k-secret"));
        assert!(s.contains("[REDACTED]"));
    }
}
