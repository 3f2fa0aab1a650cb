//! Mount options read from the host page
//!
//! ```js
//! CrmForm.mount({ formId: "contact", container: "#contact-form", apiUrl: "https://crm.example.com/api" });
//! ```
//!
//! `apiUrl` may be omitted when the bundle was built with
//! `CRM_WIDGET_API_URL` set.

use js_sys::Reflect;
use wasm_bindgen::JsValue;

use crate::container::Container;
use crate::error::MountError;

/// API base URL baked in at build time, if any.
pub const DEFAULT_API_URL: Option<&str> = option_env!("CRM_WIDGET_API_URL");

/// Options of `CrmForm.mount`.
#[derive(Debug, Clone)]
pub struct CrmFormOptions {
	/// Id of the form to load
	pub form_id: String,
	/// Where to mount
	pub container: Container,
	/// Base URL of the widget API
	pub api_url: String,
}

impl CrmFormOptions {
	/// Creates options from already-typed values.
	pub fn new(
		form_id: impl Into<String>,
		container: impl Into<Container>,
		api_url: impl Into<String>,
	) -> Self {
		Self {
			form_id: form_id.into(),
			container: container.into(),
			api_url: api_url.into(),
		}
	}

	/// Reads `{ formId, container, apiUrl }` from a JS object.
	pub fn from_js(options: &JsValue) -> Result<Self, MountError> {
		require_object(options)?;
		let form_id = required_string(options, "formId")?;
		let container = Container::from_js(&property(options, "container")?)?;
		let api_url = api_url(options)?;
		Ok(Self {
			form_id,
			container,
			api_url,
		})
	}
}

/// Fails unless `value` is a non-null object.
pub fn require_object(value: &JsValue) -> Result<(), MountError> {
	if value.is_object() {
		Ok(())
	} else {
		Err(MountError::InvalidOptions(
			"options must be an object".to_string(),
		))
	}
}

/// Reads a property; a throwing getter is reported as invalid options.
pub fn property(options: &JsValue, key: &str) -> Result<JsValue, MountError> {
	Reflect::get(options, &JsValue::from_str(key))
		.map_err(|_| MountError::InvalidOptions(format!("`{}` could not be read", key)))
}

/// Reads an optional string property. `undefined`, `null` and blank strings
/// count as absent.
pub fn optional_string(options: &JsValue, key: &str) -> Result<Option<String>, MountError> {
	let value = property(options, key)?;
	if value.is_undefined() || value.is_null() {
		return Ok(None);
	}
	match value.as_string() {
		Some(text) if text.trim().is_empty() => Ok(None),
		Some(text) => Ok(Some(text)),
		None => Err(MountError::InvalidOptions(format!(
			"`{}` must be a string",
			key
		))),
	}
}

/// Reads a required string property.
pub fn required_string(options: &JsValue, key: &str) -> Result<String, MountError> {
	optional_string(options, key)?
		.ok_or_else(|| MountError::InvalidOptions(format!("`{}` is required", key)))
}

/// Reads `apiUrl`, falling back to [`DEFAULT_API_URL`].
pub fn api_url(options: &JsValue) -> Result<String, MountError> {
	match optional_string(options, "apiUrl")? {
		Some(url) => Ok(url),
		None => DEFAULT_API_URL
			.filter(|url| !url.trim().is_empty())
			.map(str::to_string)
			.ok_or_else(|| MountError::InvalidOptions("`apiUrl` is required".to_string())),
	}
}
