use crate::attributes::Route;
use crate::error::DiscoveryError;
use http::Method;

/// HTTP methods a route may declare.
pub const ALLOWED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// `GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS`
#[must_use]
pub fn allowed_methods_list() -> String {
    ALLOWED_METHODS
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a declared method token (trimmed, case-insensitive) against
/// [`ALLOWED_METHODS`].
#[must_use]
pub fn parse_http_method(raw: &str) -> Option<Method> {
    let upper = raw.trim().to_ascii_uppercase();
    ALLOWED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
}

/// Check a route declaration and return its prefix with blank normalized to `None`.
pub fn validate_route<'r>(route: &'r Route, handler: &str) -> Result<Option<&'r str>, DiscoveryError> {
    if route.path.trim().is_empty() {
        return Err(DiscoveryError::EmptyPath {
            handler: handler.to_string(),
        });
    }
    if route.methods.is_empty() {
        return Err(DiscoveryError::EmptyMethods {
            handler: handler.to_string(),
        });
    }
    Ok(route.prefix.as_deref().filter(|p| !p.trim().is_empty()))
}
