//! CORS policy for the collector HTTP server
//!
//! Only localhost origins may call the collector from a browser context:
//! `localhost`, `127.0.0.1` and `[::1]` on any port, over http or https.
//! Everything else, including other private IP ranges and subdomain
//! lookalikes such as `localhost.evil.com`, is rejected.

use axum::http::{header, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Headers a collector client may send.
pub const ALLOWED_HEADERS: [header::HeaderName; 1] = [header::CONTENT_TYPE];

/// Methods the collector serves.
pub const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// Preflight cache lifetime in seconds.
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// A strict CORS layer that only admits localhost origins.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| {
            is_localhost_origin(origin)
        }))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .max_age(Duration::from_secs(DEFAULT_MAX_AGE_SECS))
}

/// Whether `origin` names this machine.
///
/// Accepts `http(s)://localhost`, `http(s)://127.0.0.1` and `http(s)://[::1]`
/// with an optional port and path. Comparison is case-insensitive.
pub fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let origin_str = match origin.to_str() {
        Ok(s) => s,
        Err(_) => return false,
    };

    let origin_lower = origin_str.to_lowercase();

    if origin_lower.starts_with("http://localhost") || origin_lower.starts_with("https://localhost")
    {
        return validate_localhost_format(&origin_lower, "localhost");
    }

    if origin_lower.starts_with("http://127.0.0.1") || origin_lower.starts_with("https://127.0.0.1")
    {
        return validate_localhost_format(&origin_lower, "127.0.0.1");
    }

    if origin_lower.starts_with("http://[::1]") || origin_lower.starts_with("https://[::1]") {
        return validate_ipv6_localhost_format(&origin_lower);
    }

    false
}

/// Checks what follows the host: nothing, a numeric port, or a path.
/// Anything else is a lookalike such as `localhostevil.com`.
fn validate_localhost_format(origin: &str, host: &str) -> bool {
    let scheme_end = if origin.starts_with("https://") { 8 } else { 7 };
    let after_host = scheme_end + host.len();

    if origin.len() == after_host {
        return true;
    }

    let remaining = &origin[after_host..];

    if let Some(port_str) = remaining.strip_prefix(':') {
        let port_end = port_str.find('/').unwrap_or(port_str.len());
        if let Ok(port) = port_str[..port_end].parse::<u16>() {
            return port > 0;
        }
        return false;
    }

    remaining.starts_with('/')
}

/// Same check for `[::1]`, where the host ends at the closing bracket.
fn validate_ipv6_localhost_format(origin: &str) -> bool {
    let scheme_end = if origin.starts_with("https://") { 8 } else { 7 };

    let Some(pos) = origin[scheme_end..].find(']') else {
        return false;
    };
    let after_host = scheme_end + pos + 1;

    if origin.len() == after_host {
        return true;
    }

    let remaining = &origin[after_host..];

    if let Some(port_str) = remaining.strip_prefix(':') {
        let port_end = port_str.find('/').unwrap_or(port_str.len());
        if let Ok(port) = port_str[..port_end].parse::<u16>() {
            return port > 0;
        }
        return false;
    }

    remaining.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(origin: &'static str) -> bool {
        is_localhost_origin(&HeaderValue::from_static(origin))
    }

    #[test]
    fn test_localhost_origins_allowed() {
        assert!(allowed("http://localhost"));
        assert!(allowed("https://localhost"));
        assert!(allowed("http://localhost:3000"));
        assert!(allowed("http://localhost:65535"));
        assert!(allowed("http://localhost/summary"));
        assert!(allowed("http://localhost:5584/store"));
    }

    #[test]
    fn test_loopback_origins_allowed() {
        assert!(allowed("http://127.0.0.1"));
        assert!(allowed("https://127.0.0.1"));
        assert!(allowed("http://127.0.0.1:5584"));
        assert!(allowed("http://127.0.0.1/status"));
    }

    #[test]
    fn test_ipv6_loopback_allowed() {
        assert!(allowed("http://[::1]"));
        assert!(allowed("http://[::1]:5584"));
        assert!(allowed("https://[::1]:8080"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(allowed("HTTP://LOCALHOST:3000"));
        assert!(allowed("HTTPS://127.0.0.1:8080"));
    }

    #[test]
    fn test_external_origins_blocked() {
        assert!(!allowed("http://example.com"));
        assert!(!allowed("https://malicious.org"));
        assert!(!allowed("http://evil.com:3000"));
    }

    #[test]
    fn test_subdomain_lookalikes_blocked() {
        assert!(!allowed("http://localhost.evil.com"));
        assert!(!allowed("http://localhostevil.com"));
        assert!(!allowed("http://sub.localhost.com"));
        assert!(!allowed("http://my-localhost.com"));
    }

    #[test]
    fn test_private_ips_blocked() {
        assert!(!allowed("http://192.168.1.1"));
        assert!(!allowed("http://10.0.0.1:8080"));
        assert!(!allowed("http://172.16.0.1"));
    }

    #[test]
    fn test_bad_formats_blocked() {
        assert!(!allowed("localhost:3000"));
        assert!(!allowed("ftp://localhost"));
        assert!(!allowed("file://localhost"));
        assert!(!allowed("http://localhost:notaport"));
        assert!(!allowed("http://localhost:0"));
        assert!(!allowed(""));
    }

    #[test]
    fn test_cors_layer_creation() {
        let layer = cors_layer();
        let _ = format!("{layer:?}");
    }
}
