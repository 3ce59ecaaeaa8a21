//! Path segment capture under the proxy mount point.
//!
//! # Responsibilities
//! - Match the mount prefix on a segment boundary (case-sensitive)
//! - Split the remainder into ordered segments
//! - Produce the route patterns the HTTP server registers
//!
//! # Design Decisions
//! - Segments are taken from the raw (still percent-encoded) path
//! - No normalization: empty segments and `..` are kept as captured
//! - No regex, a single prefix comparison

/// The inbound path prefix the proxy is mounted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    /// Prefix with any trailing `/` removed; empty when mounted at root.
    prefix: String,
}

impl Mount {
    /// Create a mount point. A trailing `/` is ignored, so `"/"` mounts at root.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// The normalized prefix (`""` for root).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Route patterns covering the bare prefix, the prefix with a trailing
    /// slash, and everything below it.
    pub fn route_patterns(&self) -> Vec<String> {
        let mut patterns = Vec::with_capacity(3);
        if !self.prefix.is_empty() {
            patterns.push(self.prefix.clone());
        }
        patterns.push(format!("{}/", self.prefix));
        patterns.push(format!("{}/{{*path}}", self.prefix));
        patterns
    }

    /// Capture the segments following the prefix.
    ///
    /// Returns `None` when `path` is not under this mount. `"/api"` and
    /// `"/api/"` both capture no segments.
    pub fn capture(&self, path: &str) -> Option<Vec<String>> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            return Some(Vec::new());
        }
        let rest = rest.strip_prefix('/')?;
        if rest.is_empty() {
            return Some(Vec::new());
        }
        Some(rest.split('/').map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_segments_in_order() {
        let mount = Mount::new("/api");
        assert_eq!(
            mount.capture("/api/users/42/posts"),
            Some(vec!["users".to_string(), "42".to_string(), "posts".to_string()])
        );
    }

    #[test]
    fn bare_prefix_captures_nothing() {
        let mount = Mount::new("/api");
        assert_eq!(mount.capture("/api"), Some(vec![]));
        assert_eq!(mount.capture("/api/"), Some(vec![]));
    }

    #[test]
    fn prefix_must_end_on_segment_boundary() {
        let mount = Mount::new("/api");
        assert_eq!(mount.capture("/apix/users"), None);
        assert_eq!(mount.capture("/images"), None);
        assert_eq!(mount.capture("/API/users"), None);
    }

    #[test]
    fn keeps_segments_unnormalized() {
        let mount = Mount::new("/api");
        assert_eq!(
            mount.capture("/api/a//b/"),
            Some(vec![
                "a".to_string(),
                String::new(),
                "b".to_string(),
                String::new()
            ])
        );
        assert_eq!(
            mount.capture("/api/a%20b/.."),
            Some(vec!["a%20b".to_string(), "..".to_string()])
        );
    }

    #[test]
    fn root_mount() {
        let mount = Mount::new("/");
        assert_eq!(mount.prefix(), "");
        assert_eq!(mount.capture("/"), Some(vec![]));
        assert_eq!(mount.capture("/x/y"), Some(vec!["x".to_string(), "y".to_string()]));
        assert_eq!(mount.route_patterns(), vec!["/", "/{*path}"]);
    }

    #[test]
    fn route_patterns_for_prefix() {
        let mount = Mount::new("/api/");
        assert_eq!(mount.route_patterns(), vec!["/api", "/api/", "/api/{*path}"]);
    }
}
