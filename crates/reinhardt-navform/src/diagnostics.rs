//! Developer diagnostics.
//!
//! Configuration problems never change how a submission is handled; they are
//! only reported. Every report goes through a [`DiagnosticSink`] so the
//! reporting points stay in one place and can be silenced or captured.
//!
//! ```ignore
//! use std::rc::Rc;
//! use reinhardt_navform::diagnostics::{ConsoleSink, DiagnosticSink};
//!
//! let sink: Rc<dyn DiagnosticSink> = Rc::new(ConsoleSink);
//! ```

use std::fmt;

use crate::action::ActionSource;
use crate::submitter::SubmitterAttribute;
use crate::{error_log, warn_log};

/// How loudly a diagnostic should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	/// Likely a misconfiguration, behaviour is unaffected.
	Warning,
	/// Something failed, but the submission path is unaffected.
	Error,
}

/// A single developer-facing report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// A `method`, `encType` or `target` prop was passed and has been stripped.
	DisallowedProp {
		/// Attribute name as it was passed.
		prop: String,
		/// Whether the form's action is a navigable URL.
		navigating: bool,
	},
	/// `replace` or `scroll` was passed alongside a handler action.
	NavigationOptionsIgnored,
	/// `prefetch` was passed alongside a handler action.
	PrefetchIgnored,
	/// `prefetch` was set to something other than `false` or unset.
	InvalidPrefetch,
	/// An action could not be parsed as a URL.
	UnparsableAction {
		/// Which attribute carried the action.
		source: ActionSource,
		/// The offending value.
		action: String,
	},
	/// An action carries search params that will be replaced on submit.
	ActionHasSearchParams {
		/// Which attribute carried the action.
		source: ActionSource,
		/// The offending value.
		action: String,
	},
	/// A submitter overrides an attribute with a value that cannot be navigated.
	UnsupportedSubmitterAttribute {
		/// The overridden attribute.
		attribute: SubmitterAttribute,
		/// The value found on the submitter.
		value: String,
	},
	/// A file entry was serialized as its file name.
	FileInputCoerced {
		/// Entry name.
		name: String,
	},
	/// A prefetch request failed.
	PrefetchFailed {
		/// The href that was being prefetched.
		href: String,
		/// Failure reported by the router.
		reason: String,
	},
}

impl Diagnostic {
	/// Returns the severity of this diagnostic.
	pub fn severity(&self) -> Severity {
		match self {
			Self::PrefetchFailed { .. } | Self::DisallowedProp { .. } | Self::InvalidPrefetch => {
				Severity::Error
			}
			_ => Severity::Warning,
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DisallowedProp { prop, navigating: true } => write!(
				f,
				"<Form> does not support changing `{}`. If you'd like to use it to perform a mutation, consider making `action` a handler instead.",
				prop
			),
			Self::DisallowedProp { prop, navigating: false } => {
				write!(f, "<Form> does not support changing `{}`.", prop)
			}
			Self::NavigationOptionsIgnored => write!(
				f,
				"Passing `replace` or `scroll` to a <Form> whose `action` is a handler has no effect."
			),
			Self::PrefetchIgnored => write!(
				f,
				"Passing `prefetch` to a <Form> whose `action` is a handler has no effect."
			),
			Self::InvalidPrefetch => {
				write!(f, "The `prefetch` prop of <Form> must be `false` or unset.")
			}
			Self::UnparsableAction { source, action } => write!(
				f,
				"<Form> received {} that cannot be parsed as a URL: \"{}\".",
				source.describe(),
				action
			),
			Self::ActionHasSearchParams { source, action } => write!(
				f,
				"<Form> received {} that contains search params: \"{}\". They will be ignored; use an `<input type=\"hidden\" />` to pass additional search params.",
				source.describe(),
				action
			),
			Self::UnsupportedSubmitterAttribute { attribute, value } => write!(
				f,
				"<Form>'s `{}` was set to an unsupported value via `{}=\"{}\"`. This disables client-side navigation for this submission.",
				attribute.form_property(),
				attribute.attribute_name(),
				value
			),
			Self::FileInputCoerced { name } => write!(
				f,
				"<Form> only supports file inputs if `action` is a handler. File input `{}` was submitted as its file name.",
				name
			),
			Self::PrefetchFailed { href, reason } => {
				write!(f, "Failed to prefetch \"{}\": {}", href, reason)
			}
		}
	}
}

/// Receives diagnostics at the points where they are raised.
pub trait DiagnosticSink {
	/// Reports a diagnostic.
	fn report(&self, diagnostic: Diagnostic);
}

/// Logs diagnostics through the crate's logging macros.
///
/// Output is compiled out without `debug_assertions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
	fn report(&self, diagnostic: Diagnostic) {
		match diagnostic.severity() {
			Severity::Warning => warn_log!("{}", diagnostic),
			Severity::Error => error_log!("{}", diagnostic),
		}
	}
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
	fn report(&self, _diagnostic: Diagnostic) {}
}
