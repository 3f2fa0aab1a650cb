//! Mount target resolution

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::error::MountError;

/// The `container` mount option: a CSS selector or an element.
#[derive(Debug, Clone)]
pub enum Container {
	/// Resolved with `querySelector` against the page document
	Selector(String),
	/// Used as is
	Element(Element),
}

impl Container {
	/// Reads the option value passed by the host page.
	pub fn from_js(value: &JsValue) -> Result<Self, MountError> {
		if let Some(selector) = value.as_string() {
			return Ok(Container::Selector(selector));
		}
		if let Some(element) = value.dyn_ref::<Element>() {
			return Ok(Container::Element(element.clone()));
		}
		Err(MountError::InvalidOptions(
			"`container` must be a CSS selector or an element".to_string(),
		))
	}

	/// Looks the container up. An invalid selector is reported like one that
	/// matches nothing; neither touches the document.
	pub fn resolve(&self, document: &Document) -> Result<Element, MountError> {
		match self {
			Container::Selector(selector) => {
				let trimmed = selector.trim();
				if trimmed.is_empty() {
					return Err(self.not_found());
				}
				match document.query_selector(trimmed) {
					Ok(Some(element)) => Ok(element),
					Ok(None) | Err(_) => Err(self.not_found()),
				}
			}
			Container::Element(element) => {
				if element.is_connected() {
					Ok(element.clone())
				} else {
					Err(self.not_found())
				}
			}
		}
	}

	/// Human-readable form, used in errors and logs.
	pub fn describe(&self) -> String {
		match self {
			Container::Selector(selector) => selector.clone(),
			Container::Element(element) => {
				let id = element.id();
				if id.is_empty() {
					format!("<{}>", element.tag_name().to_ascii_lowercase())
				} else {
					format!("<{} id=\"{}\">", element.tag_name().to_ascii_lowercase(), id)
				}
			}
		}
	}

	fn not_found(&self) -> MountError {
		MountError::ContainerNotFound {
			selector: self.describe(),
		}
	}
}

impl From<&str> for Container {
	fn from(selector: &str) -> Self {
		Container::Selector(selector.to_string())
	}
}

impl From<Element> for Container {
	fn from(element: Element) -> Self {
		Container::Element(element)
	}
}
