//! Shared HTTP utilities for the Tech Day workspace.
//!
//! Provides response bodies, escaping, and time helpers used by the
//! api-server. Nothing here depends on a particular HTTP framework.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::SystemTime;

// ============================================================================
// JSON Response Helpers (framework-agnostic)
// ============================================================================

/// Create a structured error JSON with a default message based on the code.
///
/// Returns: `{"error": {"code": "<code>", "message": "<default message>"}}`
pub fn json_err(code: &str) -> serde_json::Value {
    let message = match code {
        "not_found" => "Resource not found",
        "bad_request" => "Bad request",
        _ => code, // Fallback to code as message for unknown codes
    };
    serde_json::json!({"error": {"code": code, "message": message}})
}

/// Liveness payload for `/api/health`.
pub fn health_body(service: &str, version: &str, started_at: SystemTime) -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "service": service,
        "version": version,
        "started_at": system_time_to_rfc3339(started_at),
    })
}

// ============================================================================
// HTML
// ============================================================================

/// Escape text for use in HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

// ============================================================================
// Time Utilities
// ============================================================================

/// Convert SystemTime to RFC3339 string (seconds precision, UTC).
pub fn system_time_to_rfc3339(t: SystemTime) -> String {
    let dt: DateTime<Utc> = t.into();
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_err() {
        let err = json_err("not_found");
        assert_eq!(err, serde_json::json!({"error": {"code": "not_found", "message": "Resource not found"}}));

        let err = json_err("bad_request");
        assert_eq!(err, serde_json::json!({"error": {"code": "bad_request", "message": "Bad request"}}));

        // Unknown code falls back to code as message
        let err = json_err("custom_error");
        assert_eq!(err, serde_json::json!({"error": {"code": "custom_error", "message": "custom_error"}}));
    }

    #[test]
    fn test_health_body() {
        let body = health_body("backend-api", "0.1.0", SystemTime::UNIX_EPOCH);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "backend-api");
        assert_eq!(body["version"], "0.1.0");
        assert_eq!(body["started_at"], "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("Ana García"), "Ana García");
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }
}
