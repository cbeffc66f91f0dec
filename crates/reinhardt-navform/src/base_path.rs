//! Base path prefixing for applications mounted below the site root.

/// A path prefix such as `/docs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
	/// Creates a base path. Trailing slashes are dropped.
	pub fn new(prefix: impl Into<String>) -> Self {
		let prefix = prefix.into();
		Self(prefix.trim_end_matches('/').to_string())
	}

	/// Returns the prefix without a trailing slash.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns whether no prefix is configured.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Prefixes an absolute path. Anything that does not start with `/`
	/// (relative paths, full URLs) is returned unchanged.
	pub fn apply(&self, path: &str) -> String {
		if self.is_empty() || !path.starts_with('/') {
			return path.to_string();
		}
		format!("{}{}", self.0, path)
	}
}
