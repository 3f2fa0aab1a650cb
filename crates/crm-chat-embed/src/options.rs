//! Chat mount options

use crm_widget_dom::options::{api_url, optional_string, property, require_object};
use crm_widget_dom::{Container, MountError};
use wasm_bindgen::JsValue;

/// Panel title when none is given.
pub const DEFAULT_TITLE: &str = "Chat with us";

/// Greeting when none is given.
pub const DEFAULT_GREETING: &str = "Hi! How can we help?";

/// Options of `CrmChat.mount`.
#[derive(Debug, Clone)]
pub struct ChatOptions {
	/// Where to mount
	pub container: Container,
	/// Base URL of the widget API
	pub api_url: String,
	/// Panel title
	pub title: String,
	/// First message shown in the panel
	pub greeting: String,
}

impl ChatOptions {
	/// Reads `{ container, apiUrl, title?, greeting? }` from a JS object.
	pub fn from_js(options: &JsValue) -> Result<Self, MountError> {
		require_object(options)?;
		Ok(Self {
			container: Container::from_js(&property(options, "container")?)?,
			api_url: api_url(options)?,
			title: optional_string(options, "title")?.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
			greeting: optional_string(options, "greeting")?
				.unwrap_or_else(|| DEFAULT_GREETING.to_string()),
		})
	}
}
