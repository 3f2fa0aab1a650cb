//! Mount failures

use crm_widget_core::WidgetErrorKind;

/// Why `mount` refused to create an instance. Nothing is left in the page
/// when any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
	/// The container selector is invalid or matches nothing, or the element
	/// is not attached to a document.
	#[error("container `{selector}` not found")]
	ContainerNotFound {
		/// The selector, or a description of the element that was passed
		selector: String,
	},
	/// The options object is missing a key or has the wrong type for one.
	#[error("invalid mount options: {0}")]
	InvalidOptions(String),
	/// The browser refused to build the isolated subtree.
	#[error("could not create the widget root: {0}")]
	Isolation(String),
}

impl MountError {
	/// Taxonomy entry, for the failures the taxonomy names.
	pub fn kind(&self) -> Option<WidgetErrorKind> {
		match self {
			MountError::ContainerNotFound { .. } => Some(WidgetErrorKind::ContainerNotFound),
			_ => None,
		}
	}

	/// The `name` of the JS `Error` thrown to the host page.
	pub fn js_name(&self) -> &'static str {
		match self {
			MountError::ContainerNotFound { .. } => WidgetErrorKind::ContainerNotFound.as_str(),
			MountError::InvalidOptions(_) => "InvalidOptions",
			MountError::Isolation(_) => "MountFailed",
		}
	}
}

#[cfg(target_arch = "wasm32")]
impl MountError {
	/// Converts into a JS `Error` whose `name` is [`MountError::js_name`].
	pub fn into_js_error(self) -> wasm_bindgen::JsValue {
		let error = js_sys::Error::new(&self.to_string());
		error.set_name(self.js_name());
		error.into()
	}
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MountError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		MountError::Isolation(describe_js(&value))
	}
}

/// Best-effort text of a thrown JS value.
#[cfg(target_arch = "wasm32")]
pub fn describe_js(value: &wasm_bindgen::JsValue) -> String {
	use wasm_bindgen::JsCast;

	if let Some(text) = value.as_string() {
		return text;
	}
	if let Some(error) = value.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	format!("{:?}", value)
}
