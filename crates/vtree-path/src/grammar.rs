//! Path grammar: `/` | (`/` component)+, component over `[A-Za-z0-9.\-]+`.

use vtree_model::{StoreError, StoreResult};

fn is_component_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-'
}

fn is_valid_component(component: &str) -> bool {
    !component.is_empty() && component.bytes().all(is_component_byte)
}

/// Validates a path against the grammar, without splitting it.
pub fn check_path(path: &str) -> StoreResult<()> {
    if path == "/" {
        return Ok(());
    }
    if !path.starts_with('/') || path.ends_with('/') {
        return Err(StoreError::BadPath);
    }
    if path[1..].split('/').all(is_valid_component) {
        Ok(())
    } else {
        Err(StoreError::BadPath)
    }
}

/// Splits a valid path into its components, root yielding an empty sequence.
///
/// Callers are expected to have already validated `path` (e.g. via
/// [`check_path`]); this function does not re-validate.
pub fn split(path: &str) -> Vec<&str> {
    if path == "/" {
        Vec::new()
    } else {
        path[1..].split('/').collect()
    }
}

/// Rejoins path components produced by [`split`] back into a path string.
pub fn join(parts: &[&str]) -> String {
    if parts.is_empty() {
        "/".to_owned()
    } else {
        let mut out = String::new();
        for part in parts {
            out.push('/');
            out.push_str(part);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_valid() {
        check_path("/").unwrap();
        assert!(split("/").is_empty());
    }

    #[test]
    fn rejects_trailing_slash_and_missing_leading_slash() {
        assert_eq!(check_path("/a/"), Err(StoreError::BadPath));
        assert_eq!(check_path("a/b"), Err(StoreError::BadPath));
        assert_eq!(check_path(""), Err(StoreError::BadPath));
    }

    #[test]
    fn rejects_bad_component_characters() {
        assert_eq!(check_path("/a/b c"), Err(StoreError::BadPath));
        assert_eq!(check_path("/a//b"), Err(StoreError::BadPath));
        assert_eq!(check_path("/a/b$"), Err(StoreError::BadPath));
    }

    #[test]
    fn accepts_the_full_component_charset() {
        check_path("/a-b.c/D3f").unwrap();
    }

    #[test]
    fn split_and_join_round_trip() {
        for path in ["/", "/x", "/a/b/c"] {
            let parts = split(path);
            assert_eq!(join(&parts), path);
        }
    }
}
