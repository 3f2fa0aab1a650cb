//! CRM Chat Embed - WASM entry point of `crm-chat.js`
//!
//! Shares the embedding contract of the form widget: one frozen `CrmChat`
//! global, shadow-root isolation and the same container rules.
//!
//! ```js
//! const chat = CrmChat.mount({ container: "#chat", apiUrl: "https://crm.example.com/api" });
//! chat.open();
//! chat.unmount();
//! ```

#![cfg(target_arch = "wasm32")]

pub mod options;
pub mod widget;

use wasm_bindgen::prelude::*;

pub use options::ChatOptions;
pub use widget::ChatWidget;

/// Module initialisation, run once when the bundle loads.
#[wasm_bindgen(start)]
pub fn start() {
	// Set up panic hook for better error messages in console
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();
}

/// Mounts the chat shell into `options.container`.
#[wasm_bindgen]
pub fn mount(options: JsValue) -> Result<ChatHandle, JsValue> {
	let options = ChatOptions::from_js(&options).map_err(|e| e.into_js_error())?;
	let widget = ChatWidget::mount(options).map_err(|e| e.into_js_error())?;
	Ok(ChatHandle { widget })
}

/// Version of the widget runtime.
#[wasm_bindgen]
pub fn version() -> String {
	env!("CARGO_PKG_VERSION").to_string()
}

/// Handle returned to the host page by `CrmChat.mount`.
#[wasm_bindgen]
pub struct ChatHandle {
	widget: ChatWidget,
}

#[wasm_bindgen]
impl ChatHandle {
	/// Opens the panel.
	pub fn open(&self) {
		self.widget.open();
	}

	/// Closes the panel.
	pub fn close(&self) {
		self.widget.close();
	}

	/// Removes the shell. Safe to call more than once.
	pub fn unmount(&self) {
		self.widget.unmount();
	}

	/// Whether the panel is showing.
	#[wasm_bindgen(getter, js_name = isOpen)]
	pub fn is_open(&self) -> bool {
		self.widget.is_open()
	}
}
