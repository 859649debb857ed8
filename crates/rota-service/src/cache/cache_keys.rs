//! Cache key generators for consistent key naming.

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "rota:cache";

/// Generate a cache key for an aggregated roster request.
///
/// `path_and_query` is the inbound path including its query string, so
/// distinct query combinations are cached independently.
#[must_use]
pub fn roster_by_path(path_and_query: &str) -> String {
    format!("{}:roster:{}", CACHE_PREFIX, path_and_query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_key_includes_query() {
        assert_eq!(
            roster_by_path("/api/roster?offset=1"),
            "rota:cache:roster:/api/roster?offset=1"
        );
        assert_ne!(roster_by_path("/api/roster"), roster_by_path("/api/roster?offset=1"));
    }
}
