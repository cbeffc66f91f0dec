//! Reinhardt NavForm - client-side navigation for GET forms
//!
//! A `<form>` whose action is a URL behaves like a link with user-supplied
//! search params. This crate intercepts such submissions and turns them into
//! router navigations, falling back to the browser whenever the submission
//! could not be reproduced faithfully.
//!
//! ## Architecture
//!
//! - [`eligibility`]: decides whether a submission can be intercepted
//! - [`submitter`]: submitter attribute snapshots and predicates
//! - [`destination`]: builds the navigation target from the form's entries
//! - [`router`]: the [`Navigator`] seam and push/replace dispatch
//! - [`props`]: one-time validation of form props
//! - [`prefetch`]: prefetching the action when the form becomes visible
//! - [`form`](mod@form): [`NavForm`], tying everything together
//! - [`diagnostics`]: developer warnings, routed through a sink
//! - `web`: browser bindings (WASM only)
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use reinhardt_navform::{FormEntry, FormProps, NavForm, SubmitEvent, SubmitOutcome};
//!
//! let form = NavForm::builder(FormProps::new("/search").replace(true))
//!     .navigator(router)
//!     .build();
//!
//! let mut event = SubmitEvent::new(vec![FormEntry::text("q", "reinhardt")]);
//! match form.handle_submit(&mut event, &location)? {
//!     SubmitOutcome::Navigated { href, .. } => info_log!("navigated to {}", href),
//!     SubmitOutcome::Native(reason) => info_log!("native submission: {:?}", reason),
//!     SubmitOutcome::Handled => {}
//! }
//! ```

#![warn(missing_docs)]

pub mod action;
pub mod base_path;
pub mod destination;
pub mod diagnostics;
pub mod eligibility;
pub mod error;
pub mod form;
pub mod logging;
pub mod prefetch;
pub mod props;
pub mod router;
pub mod settings;
pub mod submitter;

// Test doubles (MemorySink, RecordingNavigator)
pub mod testing;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use action::{ActionSource, FormAction, check_action_url};
pub use base_path::BasePath;
pub use destination::{FormEntry, FormFile, FormValue, build_target_url};
pub use diagnostics::{ConsoleSink, Diagnostic, DiagnosticSink, NullSink, Severity};
pub use eligibility::{EligibilityVerdict, IneligibleReason, classify};
pub use error::{FormNavError, FormNavResult, NavigationError};
pub use form::{NavForm, NavFormBuilder, SubmitEvent, SubmitOutcome};
pub use prefetch::{PrefetchDeps, PrefetchEffect, VisibilityOptions};
pub use props::{FormElementProps, FormProps, PropViolation, ValidatedProps};
pub use router::{
	NavigateOptions, NavigationMethod, Navigator, PrefetchKind, PrefetchOptions, dispatch,
};
pub use settings::NavFormSettings;
pub use submitter::{SubmitterAttribute, SubmitterAttributes};

/// Re-exports used by the logging macros.
#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
