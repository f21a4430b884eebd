//! Centralized configuration for api-server.
//!
//! All environment variables are loaded and validated at startup to fail fast
//! on misconfiguration rather than at request time.

use axum::http::HeaderValue;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_str(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Where the catalog data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureSource {
    /// The Tech Day data compiled into the binary.
    BuiltIn,
    /// A JSON fixture file read once at startup.
    File(PathBuf),
}

impl FixtureSource {
    fn from_env_value(v: Option<String>) -> Self {
        match v.filter(|s| !s.trim().is_empty()) {
            Some(path) => Self::File(PathBuf::from(path)),
            None => Self::BuiltIn,
        }
    }
}

impl fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn => f.write_str("built-in"),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error for {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Server configuration loaded from environment variables.
///
/// All fields are validated at construction time.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port (default: 8000)
    pub port: u16,
    /// CORS allow origin
    pub cors_allow_origin: HeaderValue,
    /// Log format
    pub log_format: LogFormat,
    /// Catalog data source
    pub fixture: FixtureSource,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// Fails fast on invalid configuration.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Port
        let port = match env::var("PORT") {
            Ok(s) => s.parse().map_err(|e| ConfigError {
                field: "PORT",
                message: format!("Invalid port '{}': {}", s, e),
            })?,
            Err(_) => 8000,
        };

        // CORS allow origin
        let cors_origin_str = env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| "*".into());
        let cors_allow_origin = parse_cors_origin(&cors_origin_str)?;

        // Log format
        let log_format =
            LogFormat::from_str(&env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".into()));

        let fixture = FixtureSource::from_env_value(env::var("FIXTURE_PATH").ok());

        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_static_dir);

        Ok(Self {
            port,
            cors_allow_origin,
            log_format,
            fixture,
            static_dir,
        })
    }

    /// Log warnings about configuration that works but is probably unintended.
    pub fn warn_if_unusual(&self) {
        if !self.static_dir.is_dir() {
            tracing::warn!(
                static_dir = %self.static_dir.display(),
                "STATIC_DIR does not exist; /static requests will return 404"
            );
        }
    }
}

fn parse_cors_origin(s: &str) -> Result<HeaderValue, ConfigError> {
    if s == "*" {
        Ok(HeaderValue::from_static("*"))
    } else {
        HeaderValue::from_str(s).map_err(|e| ConfigError {
            field: "CORS_ALLOW_ORIGIN",
            message: format!("Invalid header value '{}': {}", s, e),
        })
    }
}

/// Assets shipped next to the crate manifest.
pub fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::from_str("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_str("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::from_str("anything"), LogFormat::Pretty);
    }

    #[test]
    fn fixture_source_parsing() {
        assert_eq!(FixtureSource::from_env_value(None), FixtureSource::BuiltIn);
        assert_eq!(
            FixtureSource::from_env_value(Some("  ".into())),
            FixtureSource::BuiltIn
        );
        assert_eq!(
            FixtureSource::from_env_value(Some("/tmp/catalog.json".into())),
            FixtureSource::File(PathBuf::from("/tmp/catalog.json"))
        );
        assert_eq!(FixtureSource::BuiltIn.to_string(), "built-in");
    }

    #[test]
    fn cors_origin_parsing() {
        assert_eq!(parse_cors_origin("*").unwrap(), HeaderValue::from_static("*"));
        assert_eq!(
            parse_cors_origin("https://techday.example").unwrap(),
            HeaderValue::from_static("https://techday.example")
        );
        let err = parse_cors_origin("bad\norigin").unwrap_err();
        assert_eq!(err.field, "CORS_ALLOW_ORIGIN");
    }

    #[test]
    fn default_static_dir_points_into_crate() {
        assert!(default_static_dir().ends_with("static"));
    }
}
