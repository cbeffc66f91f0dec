//! Eligibility classification.
//!
//! Decides whether a submission may be turned into a client-side navigation
//! or must be left to the browser.

use crate::action::FormAction;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::submitter::{SubmitterAttribute, SubmitterAttributes};

/// Why a submission is left to the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
	/// The form's action is a handler.
	HandlerAction,
	/// No router is available to navigate with.
	NoRouter,
	/// The submitter belongs to a server action.
	ReservedSubmitterName,
	/// The submitter's `formAction` uses the `javascript:` scheme.
	JavascriptFormAction,
	/// The submitter overrides attributes a navigation cannot honour.
	UnsupportedSubmitterAttributes(Vec<SubmitterAttribute>),
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityVerdict {
	/// The submission can be intercepted.
	Eligible,
	/// The submission must proceed natively.
	Ineligible(IneligibleReason),
}

impl EligibilityVerdict {
	/// Returns whether the submission can be intercepted.
	pub fn is_eligible(&self) -> bool {
		matches!(self, Self::Eligible)
	}

	/// Returns the reason for native fallback, if any.
	pub fn reason(&self) -> Option<&IneligibleReason> {
		match self {
			Self::Eligible => None,
			Self::Ineligible(reason) => Some(reason),
		}
	}
}

/// Classifies one submission.
///
/// Server action submitters and `javascript:` overrides fall back silently.
/// Every unsupported override attribute is reported on its own, even though
/// one is enough to make the submission ineligible.
pub fn classify(
	action: &FormAction,
	submitter: Option<&SubmitterAttributes>,
	sink: &dyn DiagnosticSink,
) -> EligibilityVerdict {
	if !action.is_navigating() {
		return EligibilityVerdict::Ineligible(IneligibleReason::HandlerAction);
	}

	let Some(submitter) = submitter else {
		return EligibilityVerdict::Eligible;
	};

	if submitter.has_reserved_action_name() {
		return EligibilityVerdict::Ineligible(IneligibleReason::ReservedSubmitterName);
	}
	if submitter.has_javascript_form_action() {
		return EligibilityVerdict::Ineligible(IneligibleReason::JavascriptFormAction);
	}

	let unsupported = submitter.unsupported_overrides();
	if unsupported.is_empty() {
		return EligibilityVerdict::Eligible;
	}

	let attributes = unsupported
		.into_iter()
		.map(|(attribute, value)| {
			sink.report(Diagnostic::UnsupportedSubmitterAttribute {
				attribute,
				value: value.to_string(),
			});
			attribute
		})
		.collect();

	EligibilityVerdict::Ineligible(IneligibleReason::UnsupportedSubmitterAttributes(attributes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MemorySink;
	use rstest::{fixture, rstest};

	#[fixture]
	fn action() -> FormAction {
		FormAction::url("/search")
	}

	#[rstest]
	fn test_handler_action_is_ineligible_without_diagnostics() {
		let sink = MemorySink::new();
		let submitter = SubmitterAttributes::new().form_method("post");

		let verdict = classify(&FormAction::handler(|_| {}), Some(&submitter), &sink);

		assert_eq!(
			verdict,
			EligibilityVerdict::Ineligible(IneligibleReason::HandlerAction)
		);
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_no_submitter_is_eligible(action: FormAction) {
		let sink = MemorySink::new();
		assert!(classify(&action, None, &sink).is_eligible());
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_plain_submitter_is_eligible(action: FormAction) {
		let sink = MemorySink::new();
		let submitter = SubmitterAttributes::new().name("go").form_method("GET");

		assert!(classify(&action, Some(&submitter), &sink).is_eligible());
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_reserved_name_falls_back_silently(action: FormAction) {
		let sink = MemorySink::new();
		// Unsupported overrides are not reported once the name disqualifies it.
		let submitter = SubmitterAttributes::new()
			.name("$ACTION_ID_1")
			.form_method("post");

		let verdict = classify(&action, Some(&submitter), &sink);

		assert_eq!(
			verdict.reason(),
			Some(&IneligibleReason::ReservedSubmitterName)
		);
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_javascript_form_action_falls_back_silently(action: FormAction) {
		let sink = MemorySink::new();
		let submitter = SubmitterAttributes::new().form_action("javascript:void(0)");

		let verdict = classify(&action, Some(&submitter), &sink);

		assert_eq!(
			verdict.reason(),
			Some(&IneligibleReason::JavascriptFormAction)
		);
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_each_unsupported_override_is_reported(action: FormAction) {
		let sink = MemorySink::new();
		let submitter = SubmitterAttributes::new()
			.form_method("post")
			.form_target("_blank");

		let verdict = classify(&action, Some(&submitter), &sink);

		assert_eq!(
			verdict,
			EligibilityVerdict::Ineligible(IneligibleReason::UnsupportedSubmitterAttributes(vec![
				SubmitterAttribute::FormMethod,
				SubmitterAttribute::FormTarget,
			]))
		);
		assert_eq!(
			sink.take(),
			vec![
				Diagnostic::UnsupportedSubmitterAttribute {
					attribute: SubmitterAttribute::FormMethod,
					value: "post".into(),
				},
				Diagnostic::UnsupportedSubmitterAttribute {
					attribute: SubmitterAttribute::FormTarget,
					value: "_blank".into(),
				},
			]
		);
	}
}
