//! Browser bindings (WASM only).
//!
//! Snapshots native submit events into [`SubmitEvent`]s and wires a
//! [`NavForm`] to an `HtmlFormElement`.
//!
//! ```ignore
//! use std::rc::Rc;
//! use reinhardt_navform::{FormProps, NavForm, web};
//!
//! let form = Rc::new(NavForm::builder(FormProps::new("/search")).navigator(router).build());
//! web::attach(&form_element, form)?;
//! ```

use std::error::Error as _;
use std::rc::Rc;

use url::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{FormData, HtmlElement, HtmlFormElement};

use crate::destination::FormEntry;
use crate::error::{FormNavError, FormNavResult};
use crate::form::{NavForm, SubmitEvent};
use crate::submitter::SubmitterAttributes;
use crate::{debug_log, error_log};

/// Reads the override attributes of a submitter element.
pub fn submitter_attributes(submitter: &HtmlElement) -> SubmitterAttributes {
	SubmitterAttributes {
		form_action: submitter.get_attribute("formAction"),
		form_method: submitter.get_attribute("formMethod"),
		form_enc_type: submitter.get_attribute("formEncType"),
		form_target: submitter.get_attribute("formTarget"),
		name: submitter.get_attribute("name"),
	}
}

/// Collects the form's entries in document order, including the
/// submitter's own name and value at its position in the form.
pub fn form_entries(
	form: &HtmlFormElement,
	submitter: Option<&HtmlElement>,
) -> Result<Vec<FormEntry>, JsValue> {
	let mut entries = collect_entries(&FormData::new_with_form(form)?)?;

	let Some(submitter) = submitter else {
		return Ok(entries);
	};
	let name = submitter.get_attribute("name").unwrap_or_default();
	if name.is_empty() {
		return Ok(entries);
	}

	// Browsers without `new FormData(form, submitter)` ignore the second
	// argument, which shows up as a missing entry.
	if let Ok(data) = form_data_with_submitter(form, submitter) {
		let with_submitter = collect_entries(&data)?;
		if with_submitter.len() == entries.len() + 1 {
			return Ok(with_submitter);
		}
	}

	debug_log!("FormData submitter argument unsupported, appending submitter entry");
	let value = js_sys::Reflect::get(submitter.as_ref(), &JsValue::from_str("value"))?
		.as_string()
		.unwrap_or_default();
	entries.push(FormEntry::text(name, value));
	Ok(entries)
}

fn form_data_with_submitter(
	form: &HtmlFormElement,
	submitter: &HtmlElement,
) -> Result<FormData, JsValue> {
	let constructor: js_sys::Function =
		js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("FormData"))?.dyn_into()?;
	let args = js_sys::Array::of2(form.as_ref(), submitter.as_ref());
	js_sys::Reflect::construct(&constructor, &args)?.dyn_into::<FormData>()
}

fn collect_entries(data: &FormData) -> Result<Vec<FormEntry>, JsValue> {
	let mut entries = Vec::new();
	let Some(iter) = js_sys::try_iter(data.as_ref())? else {
		return Ok(entries);
	};

	for item in iter {
		let pair = js_sys::Array::from(&item?);
		let name = pair.get(0).as_string().unwrap_or_default();
		let value = pair.get(1);
		let entry = match value.as_string() {
			Some(text) => FormEntry::text(name, text),
			None => match value.dyn_into::<web_sys::File>() {
				Ok(file) => FormEntry::file(name, file.name()),
				Err(_) => continue,
			},
		};
		entries.push(entry);
	}

	Ok(entries)
}

/// Snapshots a native submit event.
pub fn snapshot(
	form: &HtmlFormElement,
	event: &web_sys::SubmitEvent,
) -> Result<SubmitEvent, JsValue> {
	let submitter = event.submitter();
	let entries = form_entries(form, submitter.as_ref())?;
	let mut snapshot = SubmitEvent::new(entries);
	if let Some(submitter) = submitter.as_ref() {
		snapshot = snapshot.with_submitter(submitter_attributes(submitter));
	}
	if event.default_prevented() {
		snapshot.prevent_default();
	}
	Ok(snapshot)
}

/// Returns `window.location.href` as a URL.
pub fn current_location() -> FormNavResult<Url> {
	let window =
		web_sys::window().ok_or_else(|| FormNavError::Location("no window".to_string()))?;
	let href = window
		.location()
		.href()
		.map_err(|err| FormNavError::Location(format!("{:?}", err)))?;
	Url::parse(&href).map_err(|err| FormNavError::Location(err.to_string()))
}

/// Handles `submit` events of `element` with `form`.
///
/// A URL parse failure is thrown back to the browser as a JS error.
pub fn attach(element: &HtmlFormElement, form: Rc<NavForm>) -> Result<(), JsValue> {
	let target = element.clone();

	let closure = Closure::<dyn FnMut(web_sys::SubmitEvent)>::new(
		move |native: web_sys::SubmitEvent| {
			let mut event = match snapshot(&target, &native) {
				Ok(event) => event,
				Err(err) => {
					error_log!("Failed to read submitted form data: {:?}", err);
					return;
				}
			};
			let location = match current_location() {
				Ok(location) => location,
				Err(err) => {
					error_log!("{}", err);
					return;
				}
			};

			match form.handle_submit(&mut event, &location) {
				Ok(outcome) => {
					if event.default_prevented() {
						native.prevent_default();
					}
					debug_log!("Form submission outcome: {:?}", outcome);
				}
				Err(err) => {
					let message = match err.source() {
						Some(cause) => format!("{}: {}", err, cause),
						None => err.to_string(),
					};
					wasm_bindgen::throw_str(&message);
				}
			}
		},
	);

	element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
	closure.forget();
	Ok(())
}
