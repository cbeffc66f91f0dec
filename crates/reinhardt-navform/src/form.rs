//! The navigating form.
//!
//! [`NavForm`] ties validation, eligibility, URL construction, dispatch and
//! prefetching together for one mounted `<form>`.
//!
//! ## Submission flow
//!
//! ```text
//! submit ──▶ on_submit ──prevented──▶ Handled
//!               │
//!               ▼
//!          handler action / no router ──▶ Native
//!               │
//!               ▼
//!           classify ──ineligible──▶ Native
//!               │
//!               ▼
//!        build_target_url ──error──▶ Err(UrlParse)   (event untouched)
//!               │
//!               ▼
//!        prevent_default + dispatch ──▶ Navigated
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use reinhardt_navform::{FormEntry, FormProps, NavForm, SubmitEvent};
//!
//! let form = NavForm::builder(FormProps::new("/search"))
//!     .navigator(router.clone())
//!     .build();
//!
//! let mut event = SubmitEvent::new(vec![FormEntry::text("q", "rust")]);
//! let outcome = form.handle_submit(&mut event, &location)?;
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use url::Url;

use crate::action::{ActionSource, check_action_url};
use crate::destination::{FormEntry, build_target_url};
use crate::diagnostics::{ConsoleSink, DiagnosticSink};
use crate::eligibility::{EligibilityVerdict, IneligibleReason, classify};
use crate::error::FormNavResult;
use crate::prefetch::{PrefetchDeps, PrefetchEffect, VisibilityOptions};
use crate::props::{FormElementProps, FormProps, PropViolation, ValidatedProps, validate};
use crate::router::{NavigationMethod, Navigator, dispatch};
use crate::settings::NavFormSettings;
use crate::submitter::SubmitterAttributes;

/// Snapshot of one submit event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
	submitter: Option<SubmitterAttributes>,
	entries: Vec<FormEntry>,
	default_prevented: bool,
}

impl SubmitEvent {
	/// Creates an event for a form with the given entries and no submitter.
	pub fn new(entries: Vec<FormEntry>) -> Self {
		Self {
			submitter: None,
			entries,
			default_prevented: false,
		}
	}

	/// Sets the submitter.
	pub fn with_submitter(mut self, submitter: SubmitterAttributes) -> Self {
		self.submitter = Some(submitter);
		self
	}

	/// Returns the submitter, if the event has one.
	pub fn submitter(&self) -> Option<&SubmitterAttributes> {
		self.submitter.as_ref()
	}

	/// Returns the form's entries in document order.
	pub fn entries(&self) -> &[FormEntry] {
		&self.entries
	}

	/// Cancels the native submission.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	/// Returns whether the native submission was cancelled.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// The custom submit handler prevented the event.
	Handled,
	/// The browser submits the form itself.
	Native(IneligibleReason),
	/// A client-side navigation was dispatched.
	Navigated {
		/// The navigation target.
		href: String,
		/// The history operation used.
		method: NavigationMethod,
	},
}

/// Builder for [`NavForm`].
pub struct NavFormBuilder {
	props: FormProps,
	settings: NavFormSettings,
	navigator: Option<Rc<dyn Navigator>>,
	sink: Rc<dyn DiagnosticSink>,
}

impl NavFormBuilder {
	/// Sets the router. Without one, every submission is native.
	pub fn navigator(mut self, navigator: Rc<dyn Navigator>) -> Self {
		self.navigator = Some(navigator);
		self
	}

	/// Sets the settings.
	pub fn settings(mut self, settings: NavFormSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Sets where diagnostics go. Defaults to [`ConsoleSink`].
	pub fn sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
		self.sink = sink;
		self
	}

	/// Validates the props and builds the form.
	pub fn build(self) -> NavForm {
		let validated = validate(&self.props, &self.settings, &*self.sink);
		let form = NavForm {
			props: RefCell::new(self.props),
			validated: RefCell::new(validated),
			settings: self.settings,
			navigator: self.navigator,
			sink: self.sink,
			visible: Cell::new(false),
			prefetch: RefCell::new(PrefetchEffect::new()),
		};
		form.sync_prefetch();
		form
	}
}

impl fmt::Debug for NavFormBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavFormBuilder")
			.field("props", &self.props)
			.field("settings", &self.settings)
			.field("has_navigator", &self.navigator.is_some())
			.finish()
	}
}

/// A `<form>` whose GET submissions become client-side navigations.
///
/// All state sits behind interior mutability so a form shared with an event
/// listener through `Rc` can still be updated.
pub struct NavForm {
	props: RefCell<FormProps>,
	validated: RefCell<ValidatedProps>,
	settings: NavFormSettings,
	navigator: Option<Rc<dyn Navigator>>,
	sink: Rc<dyn DiagnosticSink>,
	visible: Cell<bool>,
	prefetch: RefCell<PrefetchEffect>,
}

impl fmt::Debug for NavForm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NavForm")
			.field("props", &*self.props.borrow())
			.field("element", &self.validated.borrow().element)
			.field("has_navigator", &self.navigator.is_some())
			.field("visible", &self.visible.get())
			.finish()
	}
}

impl NavForm {
	/// Starts building a form from its props.
	pub fn builder(props: FormProps) -> NavFormBuilder {
		NavFormBuilder {
			props,
			settings: NavFormSettings::default(),
			navigator: None,
			sink: Rc::new(ConsoleSink),
		}
	}

	/// Attributes for the rendered `<form>` element.
	pub fn element(&self) -> FormElementProps {
		self.validated.borrow().element.clone()
	}

	/// Violations found when the props were last validated.
	pub fn violations(&self) -> Vec<PropViolation> {
		self.validated.borrow().violations.clone()
	}

	/// The action href with the base path applied, for URL actions.
	pub fn action_href(&self) -> Option<String> {
		self.validated.borrow().element.action.clone()
	}

	/// Whether the action is prefetched when the form becomes visible.
	pub fn prefetch_enabled(&self) -> bool {
		self.validated.borrow().prefetch_enabled && self.navigator.is_some()
	}

	/// Options for the visibility detector observing this form.
	pub fn visibility_options(&self) -> VisibilityOptions {
		VisibilityOptions {
			root_margin: self.settings.root_margin.clone(),
			disabled: !self.prefetch_enabled(),
		}
	}

	/// Feeds the visibility signal. Returns whether a prefetch was requested.
	pub fn set_visible(&self, visible: bool) -> bool {
		self.visible.set(visible);
		self.sync_prefetch()
	}

	/// Replaces the props, as on a re-render.
	pub fn update(&self, props: FormProps) {
		let validated = validate(&props, &self.settings, &*self.sink);
		*self.validated.borrow_mut() = validated;
		*self.props.borrow_mut() = props;
		self.sync_prefetch();
	}

	/// Tears down the prefetch effect when the form leaves the page.
	pub fn unmount(&self) {
		self.prefetch.borrow_mut().dispose();
	}

	/// Handles one submit event.
	///
	/// The event is prevented only once the navigation target has been built,
	/// right before dispatching.
	///
	/// # Errors
	///
	/// Returns [`FormNavError::UrlParse`](crate::FormNavError::UrlParse) when the
	/// effective action cannot be resolved against `location`. The event is
	/// not prevented and nothing is dispatched.
	pub fn handle_submit(
		&self,
		event: &mut SubmitEvent,
		location: &Url,
	) -> FormNavResult<SubmitOutcome> {
		// Cloned out so the handler may call `update`.
		let on_submit = self.props.borrow().on_submit.clone();
		if let Some(on_submit) = on_submit {
			on_submit(event);
			if event.default_prevented() {
				return Ok(SubmitOutcome::Handled);
			}
		}

		let Some(action) = self.action_href() else {
			return Ok(SubmitOutcome::Native(IneligibleReason::HandlerAction));
		};
		let Some(navigator) = self.navigator.as_deref() else {
			return Ok(SubmitOutcome::Native(IneligibleReason::NoRouter));
		};

		let (replace, scroll) = {
			let props = self.props.borrow();
			if let EligibilityVerdict::Ineligible(reason) =
				classify(&props.action, event.submitter(), &*self.sink)
			{
				return Ok(SubmitOutcome::Native(reason));
			}
			(props.replace.unwrap_or(false), props.scroll)
		};
		let submitter_action = event
			.submitter()
			.and_then(|submitter| submitter.form_action.as_deref());
		if let Some(submitter_action) = submitter_action {
			check_action_url(submitter_action, ActionSource::FormAction, &*self.sink);
		}

		let target = build_target_url(
			&action,
			submitter_action,
			event.entries(),
			location,
			&*self.sink,
		)?;

		event.prevent_default();
		let method = dispatch(
			navigator,
			&target,
			replace,
			scroll,
		);

		Ok(SubmitOutcome::Navigated {
			href: target.into(),
			method,
		})
	}

	fn sync_prefetch(&self) -> bool {
		let deps = PrefetchDeps {
			visible: self.visible.get(),
			enabled: self.prefetch_enabled(),
			href: self.action_href(),
			kind: self.settings.prefetch_kind,
		};
		self.prefetch
			.borrow_mut()
			.sync(deps, self.navigator.as_deref(), &*self.sink)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::action::FormAction;
	use crate::testing::{MemorySink, RecordingNavigator};
	use rstest::{fixture, rstest};

	#[fixture]
	fn location() -> Url {
		Url::parse("https://example.com/").unwrap()
	}

	fn form_with(props: FormProps) -> (NavForm, Rc<RecordingNavigator>, Rc<MemorySink>) {
		let navigator = Rc::new(RecordingNavigator::new());
		let sink = Rc::new(MemorySink::new());
		let form = NavForm::builder(props)
			.navigator(navigator.clone())
			.sink(sink.clone())
			.build();
		(form, navigator, sink)
	}

	#[rstest]
	fn test_submission_navigates(location: Url) {
		let (form, navigator, _) = form_with(FormProps::new("/search"));
		let mut event = SubmitEvent::new(vec![FormEntry::text("q", "rust")]);

		let outcome = form.handle_submit(&mut event, &location).unwrap();

		assert_eq!(
			outcome,
			SubmitOutcome::Navigated {
				href: "https://example.com/search?q=rust".into(),
				method: NavigationMethod::Push,
			}
		);
		assert!(event.default_prevented());
		assert_eq!(navigator.navigation_count(), 1);
	}

	#[rstest]
	fn test_handler_action_is_native(location: Url) {
		let (form, navigator, _) = form_with(FormProps::new(FormAction::handler(|_| {})));
		let mut event = SubmitEvent::default();

		let outcome = form.handle_submit(&mut event, &location).unwrap();

		assert_eq!(outcome, SubmitOutcome::Native(IneligibleReason::HandlerAction));
		assert!(!event.default_prevented());
		assert!(navigator.calls().is_empty());
	}

	#[rstest]
	fn test_without_router_is_native(location: Url) {
		let sink = Rc::new(MemorySink::new());
		let form = NavForm::builder(FormProps::new("/search"))
			.sink(sink.clone())
			.build();
		let mut event = SubmitEvent::default();

		let outcome = form.handle_submit(&mut event, &location).unwrap();

		assert_eq!(outcome, SubmitOutcome::Native(IneligibleReason::NoRouter));
		assert!(!event.default_prevented());
		assert!(!form.prefetch_enabled());
		assert!(form.visibility_options().disabled);
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_custom_handler_can_take_over(location: Url) {
		let props = FormProps::new("/search").on_submit(|event| event.prevent_default());
		let (form, navigator, _) = form_with(props);
		let mut event = SubmitEvent::default();

		let outcome = form.handle_submit(&mut event, &location).unwrap();

		assert_eq!(outcome, SubmitOutcome::Handled);
		assert!(navigator.calls().is_empty());
	}

	#[rstest]
	fn test_update_revalidates(location: Url) {
		let (form, _, _) = form_with(FormProps::new("/search"));

		form.update(FormProps::new("/other").attr("target", "_blank"));

		assert_eq!(form.action_href().as_deref(), Some("/other"));
		assert_eq!(
			form.violations(),
			vec![PropViolation::DisallowedProp("target".into())]
		);
		let mut event = SubmitEvent::default();
		let outcome = form.handle_submit(&mut event, &location).unwrap();
		assert!(matches!(outcome, SubmitOutcome::Navigated { ref href, .. } if href == "https://example.com/other"));
	}

	#[rstest]
	fn test_update_through_shared_handle(location: Url) {
		let (form, navigator, _) = form_with(FormProps::new("/a"));
		let form = Rc::new(form);
		let listener = Rc::clone(&form);

		form.set_visible(true);
		listener.update(FormProps::new("/b").replace(true));

		let mut event = SubmitEvent::default();
		let outcome = listener.handle_submit(&mut event, &location).unwrap();
		assert_eq!(
			outcome,
			SubmitOutcome::Navigated {
				href: "https://example.com/b".into(),
				method: NavigationMethod::Replace,
			}
		);
		assert_eq!(form.action_href().as_deref(), Some("/b"));
		assert_eq!(navigator.prefetch_count(), 2);
	}
}
