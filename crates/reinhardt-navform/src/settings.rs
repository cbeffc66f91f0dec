//! Form navigation settings.
//!
//! Settings are plain serde data so they can live next to the rest of an
//! application's configuration.

use serde::{Deserialize, Serialize};

use crate::base_path::BasePath;
use crate::router::PrefetchKind;

/// Root margin handed to the visibility detector unless configured.
pub const DEFAULT_ROOT_MARGIN: &str = "200px";

fn default_root_margin() -> String {
	DEFAULT_ROOT_MARGIN.to_string()
}

/// Settings shared by every navigating form of an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavFormSettings {
	/// Prefix applied to form actions before rendering and prefetching.
	pub base_path: String,
	/// How far outside the viewport a form counts as visible.
	#[serde(default = "default_root_margin")]
	pub root_margin: String,
	/// Prefetch kind requested when a form becomes visible.
	pub prefetch_kind: PrefetchKind,
}

impl Default for NavFormSettings {
	fn default() -> Self {
		Self {
			base_path: String::new(),
			root_margin: default_root_margin(),
			prefetch_kind: PrefetchKind::Auto,
		}
	}
}

impl NavFormSettings {
	/// Returns the configured base path.
	pub fn base_path(&self) -> BasePath {
		BasePath::new(self.base_path.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = NavFormSettings::default();

		assert_eq!(settings.root_margin, "200px");
		assert_eq!(settings.prefetch_kind, PrefetchKind::Auto);
		assert!(settings.base_path().is_empty());
	}

	#[rstest]
	fn test_partial_settings_fill_defaults() {
		let settings: NavFormSettings = serde_json::from_str(r#"{"base_path": "/docs"}"#).unwrap();

		assert_eq!(settings.base_path().as_str(), "/docs");
		assert_eq!(settings.root_margin, "200px");
		assert_eq!(settings.prefetch_kind, PrefetchKind::Auto);
	}

	#[rstest]
	fn test_full_settings() {
		let settings: NavFormSettings = serde_json::from_str(
			r#"{"base_path": "", "root_margin": "0px", "prefetch_kind": "full"}"#,
		)
		.unwrap();

		assert_eq!(settings.root_margin, "0px");
		assert_eq!(settings.prefetch_kind, PrefetchKind::Full);
	}
}
