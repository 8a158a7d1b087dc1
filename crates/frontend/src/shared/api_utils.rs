//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use crate::shared::config::AppConfig;
use serde::Serialize;

/// Get the base URL for API requests
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if neither a configured base nor a window is available
pub fn api_base() -> String {
    AppConfig::get().api_base.clone()
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/attributes");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

/// Join a base origin and a path. Absolute URLs are returned untouched.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Append serialized query parameters to a path
///
/// # Example
/// ```rust,ignore
/// #[derive(Serialize)]
/// struct Search<'a> { search: &'a str }
/// let url = url_with_query("/api/products", &Search { search: "shirt" });
/// // "/api/products?search=shirt"
/// ```
pub fn url_with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => {
            let sep = if path.contains('?') { '&' } else { '?' };
            format!("{}{}{}", path, sep, qs)
        }
        Ok(_) => path.to_string(),
        Err(e) => {
            log::warn!("Failed to serialize query for {}: {}", path, e);
            path.to_string()
        }
    }
}

/// Path of a single record, e.g. `/api/attributes/65f0`
pub fn record_url(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h:3000/", "/api/x"), "http://h:3000/api/x");
        assert_eq!(join_url("http://h:3000", "api/x"), "http://h:3000/api/x");
        assert_eq!(join_url("http://h:3000", "https://cdn/x"), "https://cdn/x");
        assert_eq!(join_url("", "/api/x"), "/api/x");
    }

    #[test]
    fn test_url_with_query() {
        let mut q = BTreeMap::new();
        q.insert("search", "shirt");
        assert_eq!(
            url_with_query("/api/products", &q),
            "/api/products?search=shirt"
        );
        assert_eq!(
            url_with_query("/api/products?page=2", &q),
            "/api/products?page=2&search=shirt"
        );
        let empty: BTreeMap<&str, &str> = BTreeMap::new();
        assert_eq!(url_with_query("/api/products", &empty), "/api/products");
    }

    #[test]
    fn test_record_url_encodes_id() {
        assert_eq!(record_url("/api/attributes/", "a b"), "/api/attributes/a%20b");
    }
}
