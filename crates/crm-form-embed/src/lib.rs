//! CRM Form Embed - WASM entry point of `crm-form.js`
//!
//! The packaged script exposes these exports as the frozen `CrmForm` global:
//!
//! ```js
//! const handle = CrmForm.mount({
//!     formId: "contact",
//!     container: "#contact-form",
//!     apiUrl: "https://crm.example.com/api",
//! });
//! handle.state;     // "Loading", "Ready", ...
//! handle.unmount();
//! ```
//!
//! `mount` throws an `Error` whose `name` is `ContainerNotFound` when the
//! container cannot be resolved, and `InvalidOptions` when the options object
//! is incomplete.

#![cfg(target_arch = "wasm32")]

use crm_widget_dom::{CrmFormOptions, FormWidget};
use wasm_bindgen::prelude::*;

/// Module initialisation, run once when the bundle loads.
#[wasm_bindgen(start)]
pub fn start() {
	// Set up panic hook for better error messages in console
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();
}

/// Mounts a form widget into `options.container`.
#[wasm_bindgen]
pub fn mount(options: JsValue) -> Result<FormHandle, JsValue> {
	let options = CrmFormOptions::from_js(&options).map_err(|e| e.into_js_error())?;
	let widget = FormWidget::mount(options).map_err(|e| e.into_js_error())?;
	Ok(FormHandle { widget })
}

/// Version of the widget runtime.
#[wasm_bindgen]
pub fn version() -> String {
	env!("CARGO_PKG_VERSION").to_string()
}

/// Handle returned to the host page by `CrmForm.mount`.
#[wasm_bindgen]
pub struct FormHandle {
	widget: FormWidget,
}

#[wasm_bindgen]
impl FormHandle {
	/// Removes the widget. Safe to call more than once.
	pub fn unmount(&self) {
		self.widget.unmount();
	}

	/// Restores every field to its initial value.
	pub fn reset(&self) {
		self.widget.reset();
	}

	/// Current state name, e.g. `Ready` or `Error(SubmitFailed)`.
	#[wasm_bindgen(getter)]
	pub fn state(&self) -> String {
		self.widget.state().to_string()
	}

	/// Id of the mounted form.
	#[wasm_bindgen(getter, js_name = formId)]
	pub fn form_id(&self) -> String {
		self.widget.form_id().to_string()
	}
}
