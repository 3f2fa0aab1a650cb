//! CRM Widget Core - platform-neutral runtime for the embeddable widgets
//!
//! Everything the form widget does that does not touch the DOM lives here, so
//! it can be exercised on the native target as well as inside the browser.
//!
//! ## Architecture
//!
//! - [`config`]: typed form definitions parsed from untrusted JSON
//! - [`validation`]: one pure rule per field type
//! - [`value`]: field values, seeding and submission payloads
//! - [`controller`]: the sans-IO submission state machine
//! - [`endpoints`]: URL construction for the widget API
//! - [`error`]: the user-facing error taxonomy
//! - [`variant`]: the packaging contract shared by every widget bundle
//! - [`health`]: wire shape of the backend health collaborator
//!
//! ## Example
//!
//! ```
//! use crm_widget_core::controller::{Command, FormController, FormEvent};
//! use crm_widget_core::endpoints::ApiEndpoints;
//! use serde_json::json;
//!
//! let endpoints = ApiEndpoints::new("https://api.example.com");
//! let (mut controller, commands) = FormController::start("contact", endpoints);
//! assert!(matches!(commands[1], Command::FetchConfig { .. }));
//!
//! let config = json!({
//!     "id": "contact",
//!     "fields": [{"id": "email", "fieldType": "email", "isRequired": true, "position": 0}]
//! });
//! let commands = controller.handle(FormEvent::ConfigFetched(Ok(config)));
//! assert_eq!(commands, vec![Command::RenderForm]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod endpoints;
pub mod error;
pub mod health;
pub mod logging;
pub mod validation;
pub mod value;
pub mod variant;

pub use config::{ConfigError, FieldKind, FieldType, FormConfig, FormField, SubmitResponse};
pub use controller::{Command, FormController, FormEvent, FormState};
pub use endpoints::ApiEndpoints;
pub use error::{FetchError, WidgetErrorKind};
pub use health::{DatabaseStatus, HealthReport, HealthStatus};
pub use validation::{FieldErrors, ValidationError, validate_field, validate_form};
pub use value::{FieldValue, FormValues};
pub use variant::WidgetVariant;

// Used by the exported logging macros so downstream crates do not need their
// own `web-sys` dependency.
#[doc(hidden)]
pub mod __private {
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
