//! Prefetching a form's action once the form scrolls into view.
//!
//! [`PrefetchEffect`] behaves like an effect with a dependency list: it runs
//! only when [`PrefetchDeps`] change, tears the previous run down first, and
//! issues at most one prefetch per run.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::router::{Navigator, PrefetchKind, PrefetchOptions};
use crate::debug_log;

/// Options for the external visibility detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityOptions {
	/// Margin around the viewport, in CSS syntax.
	pub root_margin: String,
	/// When set, the detector should not observe the form at all.
	pub disabled: bool,
}

/// Inputs the prefetch effect depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefetchDeps {
	/// Whether the form is currently visible.
	pub visible: bool,
	/// Whether prefetching is enabled for this form.
	pub enabled: bool,
	/// The action href (base path applied).
	pub href: Option<String>,
	/// Prefetch kind to request.
	pub kind: PrefetchKind,
}

/// State of the prefetch effect for one mounted form.
#[derive(Debug, Default)]
pub struct PrefetchEffect {
	deps: Option<PrefetchDeps>,
	prefetched: Option<String>,
}

impl PrefetchEffect {
	/// Creates an effect that has not run yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Re-runs the effect if `deps` differ from the previous run.
	///
	/// Returns whether a prefetch was requested. Failures are reported to
	/// `sink` and never returned.
	pub fn sync(
		&mut self,
		deps: PrefetchDeps,
		navigator: Option<&dyn Navigator>,
		sink: &dyn DiagnosticSink,
	) -> bool {
		if self.deps.as_ref() == Some(&deps) {
			return false;
		}
		self.teardown();

		let requested = match (&deps, navigator) {
			(
				PrefetchDeps {
					visible: true,
					enabled: true,
					href: Some(href),
					kind,
				},
				Some(navigator),
			) => {
				debug_log!("Prefetching form action {}", href);
				if let Err(err) = navigator.prefetch(href, PrefetchOptions { kind: *kind }) {
					sink.report(Diagnostic::PrefetchFailed {
						href: href.clone(),
						reason: err.to_string(),
					});
				}
				self.prefetched = Some(href.clone());
				true
			}
			_ => false,
		};

		self.deps = Some(deps);
		requested
	}

	/// Tears the effect down, e.g. when the form unmounts.
	///
	/// The next [`sync`](Self::sync) runs unconditionally.
	pub fn dispose(&mut self) {
		self.teardown();
		self.deps = None;
	}

	/// Returns the href prefetched by the current run, if any.
	pub fn prefetched(&self) -> Option<&str> {
		self.prefetched.as_deref()
	}

	fn teardown(&mut self) {
		self.prefetched = None;
	}
}
