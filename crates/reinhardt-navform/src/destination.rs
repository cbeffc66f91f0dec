//! Navigation target construction.
//!
//! Mirrors what a browser does for a GET form with the default encoding: the
//! action's query is thrown away and replaced by the serialized entries, while
//! every other URL component is kept.

use url::Url;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{FormNavError, FormNavResult};

/// A file selected in a file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFile {
	/// The file name as reported by the browser.
	pub name: String,
}

/// The value of a form entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
	/// A plain string value.
	Text(String),
	/// A file payload.
	File(FormFile),
}

/// One `(name, value)` pair of the form's data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEntry {
	/// Control name. Several entries may share a name.
	pub name: String,
	/// Control value.
	pub value: FormValue,
}

impl FormEntry {
	/// Creates a text entry.
	pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: FormValue::Text(value.into()),
		}
	}

	/// Creates a file entry.
	pub fn file(name: impl Into<String>, file_name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: FormValue::File(FormFile {
				name: file_name.into(),
			}),
		}
	}
}

/// Builds the URL a GET submission navigates to.
///
/// `submitter_action` takes precedence over `base_action` when present. The
/// effective action is resolved against `location`.
///
/// # Errors
///
/// Returns [`FormNavError::UrlParse`] when the effective action cannot be
/// parsed.
pub fn build_target_url(
	base_action: &str,
	submitter_action: Option<&str>,
	entries: &[FormEntry],
	location: &Url,
	sink: &dyn DiagnosticSink,
) -> FormNavResult<Url> {
	let action = submitter_action.unwrap_or(base_action);

	let mut target = Url::options()
		.base_url(Some(location))
		.parse(action)
		.map_err(|source| FormNavError::UrlParse {
			action: action.to_string(),
			source,
		})?;

	if target.query().is_some_and(|query| !query.is_empty()) {
		target.set_query(None);
	}

	// `query_pairs_mut` would leave a bare `?` behind when there is nothing to add.
	if entries.is_empty() {
		return Ok(target);
	}

	{
		let mut pairs = target.query_pairs_mut();
		for entry in entries {
			let value = match &entry.value {
				FormValue::Text(text) => text.as_str(),
				FormValue::File(file) => {
					sink.report(Diagnostic::FileInputCoerced {
						name: entry.name.clone(),
					});
					file.name.as_str()
				}
			};
			pairs.append_pair(&entry.name, value);
		}
	}

	Ok(target)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MemorySink;
	use rstest::{fixture, rstest};

	#[fixture]
	fn location() -> Url {
		Url::parse("https://example.com/current/page?from=here#top").unwrap()
	}

	#[rstest]
	fn test_action_query_is_replaced(location: Url) {
		let sink = MemorySink::new();
		let entries = vec![FormEntry::text("a", "b")];

		let url = build_target_url("/path?x=1", None, &entries, &location, &sink).unwrap();

		assert_eq!(url.path(), "/path");
		assert_eq!(url.query(), Some("a=b"));
		assert!(sink.is_empty());
	}

	#[rstest]
	fn test_fragment_is_preserved(location: Url) {
		let sink = MemorySink::new();
		let entries = vec![FormEntry::text("q", "rust")];

		let url = build_target_url("/search?old=1#results", None, &entries, &location, &sink)
			.unwrap();

		assert_eq!(url.as_str(), "https://example.com/search?q=rust#results");
	}

	#[rstest]
	fn test_submitter_action_takes_precedence(location: Url) {
		let sink = MemorySink::new();

		let url = build_target_url("/search", Some("/other"), &[], &location, &sink).unwrap();

		assert_eq!(url.path(), "/other");
	}

	#[rstest]
	fn test_relative_action_resolves_against_location(location: Url) {
		let sink = MemorySink::new();

		let url = build_target_url("results", None, &[], &location, &sink).unwrap();

		assert_eq!(url.as_str(), "https://example.com/current/results");
	}

	#[rstest]
	fn test_empty_entries_leave_no_query(location: Url) {
		let sink = MemorySink::new();

		let url = build_target_url("/path?x=1", None, &[], &location, &sink).unwrap();

		assert_eq!(url.as_str(), "https://example.com/path");
	}

	#[rstest]
	fn test_duplicate_names_keep_order(location: Url) {
		let sink = MemorySink::new();
		let entries = vec![
			FormEntry::text("q", "1"),
			FormEntry::text("sort", "asc"),
			FormEntry::text("q", "2"),
		];

		let url = build_target_url("/search", None, &entries, &location, &sink).unwrap();

		assert_eq!(url.query(), Some("q=1&sort=asc&q=2"));
	}

	#[rstest]
	fn test_values_are_form_urlencoded(location: Url) {
		let sink = MemorySink::new();
		let entries = vec![FormEntry::text("q", "a b&c=d"), FormEntry::text("ü", "✓")];

		let url = build_target_url("/search", None, &entries, &location, &sink).unwrap();

		assert_eq!(url.query(), Some("q=a+b%26c%3Dd&%C3%BC=%E2%9C%93"));
	}

	#[rstest]
	fn test_file_entry_uses_file_name(location: Url) {
		let sink = MemorySink::new();
		let entries = vec![
			FormEntry::text("title", "report"),
			FormEntry::file("upload", "notes.txt"),
		];

		let url = build_target_url("/upload", None, &entries, &location, &sink).unwrap();

		assert_eq!(url.query(), Some("title=report&upload=notes.txt"));
		assert_eq!(
			sink.take(),
			vec![Diagnostic::FileInputCoerced {
				name: "upload".into()
			}]
		);
	}

	#[rstest]
	fn test_unparsable_action_is_an_error(location: Url) {
		let sink = MemorySink::new();

		let err = build_target_url("http://[::1", None, &[], &location, &sink).unwrap_err();

		assert!(matches!(
			err,
			FormNavError::UrlParse {
				ref action,
				source: url::ParseError::InvalidIpv6Address,
			} if action == "http://[::1"
		));
	}
}
