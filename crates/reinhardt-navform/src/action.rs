//! Form actions.
//!
//! A form either navigates to a URL or hands its data to a handler. Only the
//! URL variant is ever intercepted.

use std::fmt;
use std::rc::Rc;

use url::Url;

use crate::destination::FormEntry;
use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Placeholder base used to validate relative actions before a location exists.
const VALIDATION_BASE: &str = "http://n";

/// Mutation-style action invoked with the submitted entries.
pub type ActionHandler = Rc<dyn Fn(&[FormEntry])>;

/// The declared target of a form.
#[derive(Clone)]
pub enum FormAction {
	/// Navigate to this URL (resolved against the current location).
	Url(String),
	/// Run a handler; submissions are never intercepted.
	Handler(ActionHandler),
}

impl FormAction {
	/// Creates a URL action.
	pub fn url(action: impl Into<String>) -> Self {
		Self::Url(action.into())
	}

	/// Creates a handler action.
	pub fn handler<F>(f: F) -> Self
	where
		F: Fn(&[FormEntry]) + 'static,
	{
		Self::Handler(Rc::new(f))
	}

	/// Returns the URL if this action navigates.
	pub fn as_url(&self) -> Option<&str> {
		match self {
			Self::Url(url) => Some(url),
			Self::Handler(_) => None,
		}
	}

	/// Returns whether this action navigates.
	pub fn is_navigating(&self) -> bool {
		matches!(self, Self::Url(_))
	}
}

impl fmt::Debug for FormAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Url(url) => f.debug_tuple("Url").field(url).finish(),
			Self::Handler(_) => f.write_str("Handler(..)"),
		}
	}
}

impl From<&str> for FormAction {
	fn from(action: &str) -> Self {
		Self::Url(action.to_string())
	}
}

impl From<String> for FormAction {
	fn from(action: String) -> Self {
		Self::Url(action)
	}
}

/// Which attribute an action string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSource {
	/// The form's own `action`.
	Action,
	/// A submitter's `formAction` override.
	FormAction,
}

impl ActionSource {
	pub(crate) fn describe(self) -> &'static str {
		match self {
			Self::Action => "an `action`",
			Self::FormAction => "a `formAction`",
		}
	}
}

/// Checks an action string for problems a developer should hear about.
///
/// Reports [`Diagnostic::UnparsableAction`] when the value is not a URL even
/// relative to a placeholder base, and [`Diagnostic::ActionHasSearchParams`]
/// when it carries a query that submission will discard.
pub fn check_action_url(action: &str, source: ActionSource, sink: &dyn DiagnosticSink) {
	let parsed = Url::parse(VALIDATION_BASE).and_then(|base| base.join(action));
	match parsed {
		Err(_) => sink.report(Diagnostic::UnparsableAction {
			source,
			action: action.to_string(),
		}),
		Ok(url) => {
			if url.query().is_some_and(|query| !query.is_empty()) {
				sink.report(Diagnostic::ActionHasSearchParams {
					source,
					action: action.to_string(),
				});
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MemorySink;
	use rstest::rstest;

	#[rstest]
	fn test_form_action_kinds() {
		let url = FormAction::url("/search");
		let handler = FormAction::handler(|_| {});

		assert_eq!(url.as_url(), Some("/search"));
		assert!(url.is_navigating());
		assert_eq!(handler.as_url(), None);
		assert!(!handler.is_navigating());
		assert_eq!(format!("{:?}", handler), "Handler(..)");
	}

	#[rstest]
	#[case("/search")]
	#[case("https://example.com/search#results")]
	#[case("/search?")]
	fn test_check_action_url_accepts_plain_urls(#[case] action: &str) {
		let sink = MemorySink::new();
		check_action_url(action, ActionSource::Action, &sink);
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_check_action_url_warns_on_search_params() {
		let sink = MemorySink::new();
		check_action_url("/search?q=1", ActionSource::FormAction, &sink);

		assert_eq!(
			sink.take(),
			vec![Diagnostic::ActionHasSearchParams {
				source: ActionSource::FormAction,
				action: "/search?q=1".into(),
			}]
		);
	}

	#[rstest]
	fn test_check_action_url_reports_unparsable() {
		let sink = MemorySink::new();
		check_action_url("http://[::1", ActionSource::Action, &sink);

		assert!(matches!(
			sink.take().as_slice(),
			[Diagnostic::UnparsableAction { source: ActionSource::Action, .. }]
		));
	}
}
