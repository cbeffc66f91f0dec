//! Test doubles for forms.
//!
//! - [`MemorySink`] collects diagnostics instead of logging them.
//! - [`RecordingNavigator`] records router calls and can fail prefetches.

use std::cell::RefCell;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::NavigationError;
use crate::router::{NavigateOptions, Navigator, PrefetchOptions};

/// A diagnostic sink that keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
	reports: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the reports so far.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		self.reports.borrow().clone()
	}

	/// Removes and returns the reports so far.
	pub fn take(&self) -> Vec<Diagnostic> {
		self.reports.take()
	}

	/// Number of reports.
	pub fn len(&self) -> usize {
		self.reports.borrow().len()
	}

	/// Returns whether nothing was reported.
	pub fn is_empty(&self) -> bool {
		self.reports.borrow().is_empty()
	}
}

impl DiagnosticSink for MemorySink {
	fn report(&self, diagnostic: Diagnostic) {
		self.reports.borrow_mut().push(diagnostic);
	}
}

/// A call made on a [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorCall {
	/// `prefetch`
	Prefetch {
		/// Requested href.
		href: String,
		/// Requested options.
		options: PrefetchOptions,
	},
	/// `push`
	Push {
		/// Requested href.
		href: String,
		/// Requested options.
		options: NavigateOptions,
	},
	/// `replace`
	Replace {
		/// Requested href.
		href: String,
		/// Requested options.
		options: NavigateOptions,
	},
}

/// A navigator that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	calls: RefCell<Vec<NavigatorCall>>,
	prefetch_error: Option<NavigationError>,
}

impl RecordingNavigator {
	/// Creates a navigator whose prefetches succeed.
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every prefetch fail with `error`.
	pub fn fail_prefetch_with(mut self, error: NavigationError) -> Self {
		self.prefetch_error = Some(error);
		self
	}

	/// Returns every call so far, in order.
	pub fn calls(&self) -> Vec<NavigatorCall> {
		self.calls.borrow().clone()
	}

	/// Number of `prefetch` calls.
	pub fn prefetch_count(&self) -> usize {
		self.calls
			.borrow()
			.iter()
			.filter(|call| matches!(call, NavigatorCall::Prefetch { .. }))
			.count()
	}

	/// Number of `push` and `replace` calls.
	pub fn navigation_count(&self) -> usize {
		self.calls.borrow().len() - self.prefetch_count()
	}
}

impl Navigator for RecordingNavigator {
	fn prefetch(&self, href: &str, options: PrefetchOptions) -> Result<(), NavigationError> {
		self.calls.borrow_mut().push(NavigatorCall::Prefetch {
			href: href.to_string(),
			options,
		});
		match &self.prefetch_error {
			Some(error) => Err(error.clone()),
			None => Ok(()),
		}
	}

	fn push(&self, href: &str, options: NavigateOptions) {
		self.calls.borrow_mut().push(NavigatorCall::Push {
			href: href.to_string(),
			options,
		});
	}

	fn replace(&self, href: &str, options: NavigateOptions) {
		self.calls.borrow_mut().push(NavigatorCall::Replace {
			href: href.to_string(),
			options,
		});
	}
}
