//! Endpoint resolution

/// Strip trailing slashes from a base URL.
pub fn trim_endpoint(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/')
}

/// Pick the base URL for one call.
///
/// A call-supplied endpoint wins when it is non-empty after trimming trailing
/// slashes; otherwise the configured default is used, trimmed the same way.
pub fn resolve_endpoint<'a>(explicit: Option<&'a str>, default: &'a str) -> &'a str {
    match explicit.map(trim_endpoint) {
        Some(base) if !base.is_empty() => base,
        _ => trim_endpoint(default),
    }
}
