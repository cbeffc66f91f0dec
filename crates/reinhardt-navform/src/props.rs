//! Form props and their validation.
//!
//! Props are validated once, when the form is built. Validation never touches
//! the caller's value; it produces the attributes to render plus the list of
//! violations that were found.

use std::fmt;
use std::rc::Rc;

use crate::action::{ActionSource, FormAction, check_action_url};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::form::SubmitEvent;
use crate::settings::NavFormSettings;

/// Form attributes a navigating form controls itself.
pub const DISALLOWED_FORM_PROPS: [&str; 3] = ["method", "encType", "target"];

/// Custom submit handler. Preventing the event skips interception.
pub type SubmitHandler = Rc<dyn Fn(&mut SubmitEvent)>;

/// Props accepted by [`NavForm`](crate::form::NavForm).
#[derive(Clone)]
pub struct FormProps {
	/// The form's action.
	pub action: FormAction,
	/// Replace the current history entry instead of pushing.
	pub replace: Option<bool>,
	/// Scroll after navigating. Defaults to `true`.
	pub scroll: Option<bool>,
	/// `Some(false)` disables prefetching.
	pub prefetch: Option<bool>,
	/// Runs before interception.
	pub on_submit: Option<SubmitHandler>,
	/// Any other attributes, passed through to the `<form>` element.
	pub attrs: Vec<(String, String)>,
}

impl FormProps {
	/// Creates props for the given action.
	pub fn new(action: impl Into<FormAction>) -> Self {
		Self {
			action: action.into(),
			replace: None,
			scroll: None,
			prefetch: None,
			on_submit: None,
			attrs: Vec::new(),
		}
	}

	/// Sets `replace`.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = Some(replace);
		self
	}

	/// Sets `scroll`.
	pub fn scroll(mut self, scroll: bool) -> Self {
		self.scroll = Some(scroll);
		self
	}

	/// Sets `prefetch`.
	pub fn prefetch(mut self, prefetch: bool) -> Self {
		self.prefetch = Some(prefetch);
		self
	}

	/// Sets the custom submit handler.
	pub fn on_submit<F>(mut self, handler: F) -> Self
	where
		F: Fn(&mut SubmitEvent) + 'static,
	{
		self.on_submit = Some(Rc::new(handler));
		self
	}

	/// Adds a pass-through attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}
}

impl fmt::Debug for FormProps {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FormProps")
			.field("action", &self.action)
			.field("replace", &self.replace)
			.field("scroll", &self.scroll)
			.field("prefetch", &self.prefetch)
			.field("has_on_submit", &self.on_submit.is_some())
			.field("attrs", &self.attrs)
			.finish()
	}
}

/// Something wrong with the props, found during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropViolation {
	/// A disallowed attribute was stripped.
	DisallowedProp(String),
	/// `replace` or `scroll` has no effect on a handler action.
	NavigationOptionsIgnored,
	/// `prefetch` has no effect on a handler action.
	PrefetchIgnored,
	/// `prefetch` was `true`.
	InvalidPrefetch,
}

/// Attributes for the rendered `<form>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormElementProps {
	/// `action` attribute, with the base path applied. `None` for handler actions.
	pub action: Option<String>,
	/// Remaining attributes in their original order.
	pub attrs: Vec<(String, String)>,
}

/// Result of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProps {
	/// What to render.
	pub element: FormElementProps,
	/// Violations found, in the order they were reported.
	pub violations: Vec<PropViolation>,
	/// Whether the action may be prefetched (router availability aside).
	pub prefetch_enabled: bool,
}

fn is_disallowed(name: &str) -> bool {
	DISALLOWED_FORM_PROPS
		.iter()
		.any(|prop| prop.eq_ignore_ascii_case(name))
}

/// Validates props and builds the element attributes.
///
/// Each violation is also reported to `sink`.
pub fn validate(
	props: &FormProps,
	settings: &NavFormSettings,
	sink: &dyn DiagnosticSink,
) -> ValidatedProps {
	let navigating = props.action.is_navigating();
	let mut violations = Vec::new();

	if let Some(action) = props.action.as_url() {
		check_action_url(action, ActionSource::Action, sink);
	}

	if props.prefetch == Some(true) {
		sink.report(Diagnostic::InvalidPrefetch);
		violations.push(PropViolation::InvalidPrefetch);
	}
	if props.prefetch.is_some() && !navigating {
		sink.report(Diagnostic::PrefetchIgnored);
		violations.push(PropViolation::PrefetchIgnored);
	}
	if !navigating && (props.replace.is_some() || props.scroll.is_some()) {
		sink.report(Diagnostic::NavigationOptionsIgnored);
		violations.push(PropViolation::NavigationOptionsIgnored);
	}

	let mut attrs = Vec::with_capacity(props.attrs.len());
	for (name, value) in &props.attrs {
		if is_disallowed(name) {
			sink.report(Diagnostic::DisallowedProp {
				prop: name.clone(),
				navigating,
			});
			violations.push(PropViolation::DisallowedProp(name.clone()));
		} else {
			attrs.push((name.clone(), value.clone()));
		}
	}

	let action = props
		.action
		.as_url()
		.map(|action| settings.base_path().apply(action));

	ValidatedProps {
		element: FormElementProps { action, attrs },
		violations,
		prefetch_enabled: navigating && props.prefetch != Some(false),
	}
}
