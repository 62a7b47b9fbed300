//! Paths that bypass authentication and authorization entirely

/// How a public entry matches a request path
#[derive(Debug, Clone, Copy)]
enum PathMatch {
    Exact(&'static str),
    Prefix(&'static str),
}

const PUBLIC_PATHS: &[PathMatch] = &[
    PathMatch::Exact("/"),
    PathMatch::Exact("/favicon.ico"),
    PathMatch::Prefix("/error"),
    PathMatch::Prefix("/actuator"),
    PathMatch::Prefix("/swagger-ui"),
    PathMatch::Prefix("/v3/api-docs"),
    PathMatch::Prefix("/api/v1/orders/health"),
    PathMatch::Exact("/api/v1/management/health"),
    PathMatch::Prefix("/api/v1/test/public"),
];

/// Whether `path` is on the public allow-list
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|entry| match entry {
        PathMatch::Exact(exact) => path == *exact,
        PathMatch::Prefix(prefix) => path.starts_with(prefix),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        for path in [
            "/",
            "/favicon.ico",
            "/error",
            "/actuator/health",
            "/swagger-ui/index.html",
            "/v3/api-docs/swagger-config",
            "/api/v1/orders/health",
            "/api/v1/management/health",
            "/api/v1/test/public",
        ] {
            assert!(is_public_path(path), "{} should be public", path);
        }
    }

    #[test]
    fn test_protected_paths() {
        for path in [
            "/api/v1/order-management/orders",
            "/api/v1/management/health/details",
            "/api/v1/management/system/info",
            "/api/v1/test/auth",
            "/favicon.ico/x",
        ] {
            assert!(!is_public_path(path), "{} should be protected", path);
        }
    }
}
