//! Submitter attribute snapshots and the predicates evaluated over them.
//!
//! The element that triggered a submission (a `<button>` or `<input
//! type="submit">`) can override the form's action, method, encoding and
//! target. Everything here works on a plain snapshot of those attributes so it
//! can be tested without a DOM.

use std::sync::LazyLock;

use regex::Regex;

/// Prefix given to submitters that belong to a server action.
pub const RESERVED_ACTION_NAME_PREFIX: &str = "$ACTION_ID_";

/// The only encoding a navigating form can express.
pub const SUPPORTED_ENC_TYPE: &str = "application/x-www-form-urlencoded";

/// The only method a navigating form can express.
pub const SUPPORTED_METHOD: &str = "get";

/// The only browsing context a navigating form can target.
pub const SUPPORTED_TARGET: &str = "_self";

// Leading C0 controls and spaces are stripped by URL parsing, and tabs or
// newlines inside the scheme are removed, so both must be tolerated.
static JAVASCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^[\x00-\x20]*j[\r\n\t]*a[\r\n\t]*v[\r\n\t]*a[\r\n\t]*s[\r\n\t]*c[\r\n\t]*r[\r\n\t]*i[\r\n\t]*p[\r\n\t]*t[\r\n\t]*:",
	)
	.expect("javascript URL pattern is valid")
});

/// Attributes read from the submitter when the event fires.
///
/// `None` means the attribute is absent, which is different from an empty
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitterAttributes {
	/// `formaction`
	pub form_action: Option<String>,
	/// `formmethod`
	pub form_method: Option<String>,
	/// `formenctype`
	pub form_enc_type: Option<String>,
	/// `formtarget`
	pub form_target: Option<String>,
	/// `name`
	pub name: Option<String>,
}

impl SubmitterAttributes {
	/// Creates an empty snapshot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `formaction`.
	pub fn form_action(mut self, value: impl Into<String>) -> Self {
		self.form_action = Some(value.into());
		self
	}

	/// Sets `formmethod`.
	pub fn form_method(mut self, value: impl Into<String>) -> Self {
		self.form_method = Some(value.into());
		self
	}

	/// Sets `formenctype`.
	pub fn form_enc_type(mut self, value: impl Into<String>) -> Self {
		self.form_enc_type = Some(value.into());
		self
	}

	/// Sets `formtarget`.
	pub fn form_target(mut self, value: impl Into<String>) -> Self {
		self.form_target = Some(value.into());
		self
	}

	/// Sets `name`.
	pub fn name(mut self, value: impl Into<String>) -> Self {
		self.name = Some(value.into());
		self
	}

	/// Returns the value of an override attribute.
	pub fn get(&self, attribute: SubmitterAttribute) -> Option<&str> {
		match attribute {
			SubmitterAttribute::FormEncType => self.form_enc_type.as_deref(),
			SubmitterAttribute::FormMethod => self.form_method.as_deref(),
			SubmitterAttribute::FormTarget => self.form_target.as_deref(),
		}
	}

	/// Returns whether the submitter is marked as belonging to a server action.
	pub fn has_reserved_action_name(&self) -> bool {
		self.name.as_deref().is_some_and(is_reserved_action_name)
	}

	/// Returns whether the submitter's `formAction` runs script.
	pub fn has_javascript_form_action(&self) -> bool {
		self.form_action.as_deref().is_some_and(is_javascript_url)
	}

	/// Returns the override attributes whose values cannot be navigated,
	/// paired with the offending value, in a fixed order.
	pub fn unsupported_overrides(&self) -> Vec<(SubmitterAttribute, &str)> {
		SubmitterAttribute::ALL
			.into_iter()
			.filter_map(|attribute| {
				self.get(attribute)
					.filter(|value| !attribute.accepts(value))
					.map(|value| (attribute, value))
			})
			.collect()
	}
}

/// A submitter attribute that overrides a property of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitterAttribute {
	/// `formEncType` overrides `encType`.
	FormEncType,
	/// `formMethod` overrides `method`.
	FormMethod,
	/// `formTarget` overrides `target`.
	FormTarget,
}

impl SubmitterAttribute {
	/// Every override attribute in checking order.
	pub const ALL: [Self; 3] = [Self::FormEncType, Self::FormMethod, Self::FormTarget];

	/// DOM attribute name.
	pub fn attribute_name(self) -> &'static str {
		match self {
			Self::FormEncType => "formEncType",
			Self::FormMethod => "formMethod",
			Self::FormTarget => "formTarget",
		}
	}

	/// The form property this attribute overrides.
	pub fn form_property(self) -> &'static str {
		match self {
			Self::FormEncType => "encType",
			Self::FormMethod => "method",
			Self::FormTarget => "target",
		}
	}

	/// Returns whether a navigating form can honour this value.
	///
	/// Enumerated HTML attributes are matched ASCII case-insensitively.
	pub fn accepts(self, value: &str) -> bool {
		let supported = match self {
			Self::FormEncType => SUPPORTED_ENC_TYPE,
			Self::FormMethod => SUPPORTED_METHOD,
			Self::FormTarget => SUPPORTED_TARGET,
		};
		value.eq_ignore_ascii_case(supported)
	}
}

/// Returns whether `name` follows the server action naming convention.
pub fn is_reserved_action_name(name: &str) -> bool {
	name.starts_with(RESERVED_ACTION_NAME_PREFIX)
}

/// Returns whether `url` uses the `javascript:` scheme.
pub fn is_javascript_url(url: &str) -> bool {
	JAVASCRIPT_URL.is_match(url)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("$ACTION_ID_1", true)]
	#[case("$ACTION_ID_abc123", true)]
	#[case("$ACTION_ID", false)]
	#[case("action", false)]
	#[case("", false)]
	fn test_is_reserved_action_name(#[case] name: &str, #[case] expected: bool) {
		assert_eq!(is_reserved_action_name(name), expected);
	}

	#[rstest]
	#[case("javascript:alert(1)", true)]
	#[case("JavaScript:void(0)", true)]
	#[case("  javascript:void(0)", true)]
	#[case("\u{0001}javascript:void(0)", true)]
	#[case("java\tscript:void(0)", true)]
	#[case("jav\r\nascript:void(0)", true)]
	#[case("/javascript:void(0)", false)]
	#[case("javascript", false)]
	#[case("https://example.com/javascript:", false)]
	#[case("/search", false)]
	fn test_is_javascript_url(#[case] url: &str, #[case] expected: bool) {
		assert_eq!(is_javascript_url(url), expected);
	}

	#[rstest]
	#[case(SubmitterAttribute::FormMethod, "get", true)]
	#[case(SubmitterAttribute::FormMethod, "GET", true)]
	#[case(SubmitterAttribute::FormMethod, "post", false)]
	#[case(SubmitterAttribute::FormMethod, "dialog", false)]
	#[case(SubmitterAttribute::FormEncType, "application/x-www-form-urlencoded", true)]
	#[case(SubmitterAttribute::FormEncType, "multipart/form-data", false)]
	#[case(SubmitterAttribute::FormEncType, "text/plain", false)]
	#[case(SubmitterAttribute::FormTarget, "_self", true)]
	#[case(SubmitterAttribute::FormTarget, "_blank", false)]
	#[case(SubmitterAttribute::FormTarget, "", false)]
	fn test_attribute_accepts(
		#[case] attribute: SubmitterAttribute,
		#[case] value: &str,
		#[case] expected: bool,
	) {
		assert_eq!(attribute.accepts(value), expected);
	}

	#[rstest]
	fn test_unsupported_overrides_reports_every_attribute() {
		let submitter = SubmitterAttributes::new()
			.form_target("_blank")
			.form_method("post")
			.form_enc_type("multipart/form-data");

		assert_eq!(
			submitter.unsupported_overrides(),
			vec![
				(SubmitterAttribute::FormEncType, "multipart/form-data"),
				(SubmitterAttribute::FormMethod, "post"),
				(SubmitterAttribute::FormTarget, "_blank"),
			]
		);
	}

	#[rstest]
	fn test_supported_overrides_are_not_reported() {
		let submitter = SubmitterAttributes::new()
			.form_method("get")
			.form_target("_self")
			.form_enc_type(SUPPORTED_ENC_TYPE);

		assert!(submitter.unsupported_overrides().is_empty());
	}

	#[rstest]
	fn test_silent_markers() {
		let reserved = SubmitterAttributes::new().name("$ACTION_ID_7");
		let script = SubmitterAttributes::new().form_action("javascript:void(0)");
		let plain = SubmitterAttributes::new().name("go").form_action("/other");

		assert!(reserved.has_reserved_action_name());
		assert!(script.has_javascript_form_action());
		assert!(!plain.has_reserved_action_name());
		assert!(!plain.has_javascript_form_action());
	}
}
