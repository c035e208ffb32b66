use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

/// Sports prediction dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "picks-dashboard", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// Base URL of the predictions API (results, games, dashboard/performance)
    #[arg(
        long,
        env = "PREDICTIONS_API_URL",
        default_value = "http://127.0.0.1:5000/api"
    )]
    pub api_base_url: String,

    /// Per-request timeout in seconds; unset leaves the transport default
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.dashboard_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("dashboard_addr '{}' is not a socket address", self.dashboard_addr);
        }
        let url = Url::parse(&self.api_base_url)
            .map_err(|e| anyhow::anyhow!("api_base_url '{}' is invalid: {}", self.api_base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("api_base_url must use http or https, got '{}'", url.scheme());
        }
        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be positive when set");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["picks-dashboard"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = parse(&[]);
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let config = parse(&["--api-base-url", "ftp://example.com/api"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_listen_addr() {
        let config = parse(&["--dashboard-addr", "localhost"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = parse(&["--request-timeout-secs", "0"]);
        assert!(config.validate().is_err());
        let config = parse(&["--request-timeout-secs", "15"]);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
    }
}
