//! # CRM Widgets
//!
//! Embeddable widgets a CRM customer drops onto their own site with one
//! `<script>` tag and one `mount` call.
//!
//! - `crm-form.js` installs `window.CrmForm` and renders a form defined in
//!   the CRM, validates it in the browser and submits it to the CRM API.
//! - `crm-chat.js` installs `window.CrmChat`, a launcher and panel shell.
//!
//! ```html
//! <div id="contact"></div>
//! <script src="https://cdn.example.com/crm-form.js"></script>
//! <script>
//!   const form = CrmForm.mount({ formId: "contact", container: "#contact" });
//! </script>
//! ```
//!
//! This facade re-exports the Rust side for applications that embed the
//! widgets from their own WASM code instead of the prebuilt scripts.
//!
//! ## Crates
//!
//! - [`core`]: config model, validation and the submission state machine
//! - [`dom`]: shadow-root rendering and the browser driver
//!
//! ## Feature Flags
//!
//! - `debug-log` - `debug_log!` output in the browser console for debug builds

pub use crm_widget_core as core;
pub use crm_widget_dom as dom;

pub use crm_widget_core::{
	ApiEndpoints, FieldType, FormConfig, FormField, FormState, WidgetErrorKind, WidgetVariant,
	debug_log, error_log, info_log, warn_log,
};
pub use crm_widget_dom::MountError;

#[cfg(target_arch = "wasm32")]
pub use crm_widget_dom::{CrmFormOptions, FormWidget};
