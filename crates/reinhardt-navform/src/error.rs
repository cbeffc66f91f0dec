//! Error types for reinhardt-navform.

use thiserror::Error;

/// Errors that abort a form submission.
#[derive(Debug, Error)]
pub enum FormNavError {
	/// The effective action could not be parsed against the current location.
	///
	/// Raised after the submission was judged eligible but before the native
	/// submission is prevented, so the event is left untouched.
	#[error("Cannot parse form action \"{action}\" as a URL")]
	UrlParse {
		/// The action string that failed to parse.
		action: String,
		/// The underlying parse failure.
		#[source]
		source: url::ParseError,
	},

	/// The current document location is unavailable or is not an absolute URL.
	#[error("Current location is not available: {0}")]
	Location(String),
}

/// Failures reported by a [`Navigator`](crate::router::Navigator).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// The router refused or failed to schedule a prefetch.
	#[error("Prefetch failed: {0}")]
	PrefetchFailed(String),
}

/// Result type alias for submission handling.
pub type FormNavResult<T> = Result<T, FormNavError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::error::Error as _;

	#[rstest]
	fn test_url_parse_error_keeps_cause() {
		let source = url::Url::parse("http://[::1").unwrap_err();
		let err = FormNavError::UrlParse {
			action: "http://[::1".to_string(),
			source,
		};

		assert_eq!(
			err.to_string(),
			"Cannot parse form action \"http://[::1\" as a URL"
		);
		let cause = err.source().expect("cause must be attached");
		assert_eq!(cause.to_string(), source.to_string());
	}

	#[rstest]
	#[case(NavigationError::PrefetchFailed("offline".into()), "Prefetch failed: offline")]
	#[case(NavigationError::PrefetchFailed(String::new()), "Prefetch failed: ")]
	fn test_navigation_error_display(#[case] err: NavigationError, #[case] expected: &str) {
		assert_eq!(err.to_string(), expected);
	}
}
