//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Interval between SSE keep-alive comments. `None` disables them.
    pub sse_keep_alive: Option<Duration>,

    /// Upper bound on the time a handler may take to produce response
    /// headers. Open event streams are not affected.
    pub request_timeout: Duration,

    /// Whether to install a permissive CORS layer.
    pub cors_permissive: bool,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            sse_keep_alive: Some(Duration::from_secs(15)),
            request_timeout: Duration::from_secs(30),
            cors_permissive: true,
            log_format: LogFormat::Plain,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let keep_alive_secs: u64 = parse_env("SSE_KEEP_ALIVE_SECS", 15);
        let sse_keep_alive = (keep_alive_secs > 0).then(|| Duration::from_secs(keep_alive_secs));

        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30));
        let cors_permissive = parse_env_bool("CORS_PERMISSIVE", true);

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Plain,
        };

        Ok(Self {
            listen_addr,
            sse_keep_alive,
            request_timeout,
            cors_permissive,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variables_use_defaults() {
        assert_eq!(parse_env("RELAY_FEED_TEST_UNSET_NUMBER", 42_u64), 42);
        assert!(parse_env_bool("RELAY_FEED_TEST_UNSET_BOOL", true));
    }

    #[test]
    fn default_config_keeps_streams_alive() {
        let config = RelayConfig::default();
        assert_eq!(config.sse_keep_alive, Some(Duration::from_secs(15)));
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.log_format, LogFormat::Plain);
    }
}
