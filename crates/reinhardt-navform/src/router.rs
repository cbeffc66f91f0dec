//! Router integration.
//!
//! The router itself lives outside this crate; forms only need to prefetch,
//! push and replace. [`dispatch`] picks between push and replace.

use url::Url;

use crate::error::NavigationError;

/// How eagerly the router should prefetch a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefetchKind {
	/// Let the router decide how much to fetch.
	#[default]
	Auto,
	/// Fetch the full route payload.
	Full,
	/// Fetch a short-lived payload.
	Temporary,
}

/// Options passed to [`Navigator::prefetch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefetchOptions {
	/// Prefetch kind.
	pub kind: PrefetchKind,
}

/// Options passed to [`Navigator::push`] and [`Navigator::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Whether to scroll to the top (or to the fragment) after navigating.
	pub scroll: bool,
}

impl Default for NavigateOptions {
	fn default() -> Self {
		Self { scroll: true }
	}
}

/// Which history operation a navigation used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMethod {
	/// A new history entry.
	Push,
	/// The current entry was replaced.
	Replace,
}

/// Client-side router used by forms.
pub trait Navigator {
	/// Schedules a speculative fetch of `href`. Completion is never awaited.
	fn prefetch(&self, href: &str, options: PrefetchOptions) -> Result<(), NavigationError>;

	/// Navigates to `href`, adding a history entry.
	fn push(&self, href: &str, options: NavigateOptions);

	/// Navigates to `href`, replacing the current history entry.
	fn replace(&self, href: &str, options: NavigateOptions);
}

/// Navigates to `target` with the requested history semantics.
///
/// Callers must already have prevented the native submission.
pub fn dispatch(
	navigator: &dyn Navigator,
	target: &Url,
	replace: bool,
	scroll: Option<bool>,
) -> NavigationMethod {
	let options = NavigateOptions {
		scroll: scroll.unwrap_or(true),
	};

	if replace {
		navigator.replace(target.as_str(), options);
		NavigationMethod::Replace
	} else {
		navigator.push(target.as_str(), options);
		NavigationMethod::Push
	}
}
