//! Shadow-root isolation
//!
//! Each instance gets its own host `<div>` with an open shadow root. The
//! subtree is assembled while detached and appended to the container as the
//! last step, so a failure part-way leaves the page untouched.

use crm_widget_core::WidgetVariant;
use crm_widget_core::variant::HOST_ATTRIBUTE;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, ShadowRoot, ShadowRootInit, ShadowRootMode};

use crate::error::MountError;

/// The host element and shadow root of one widget instance.
#[derive(Debug, Clone)]
pub struct IsolatedRoot {
	document: Document,
	host: Element,
	shadow: ShadowRoot,
}

impl IsolatedRoot {
	/// Builds a detached host element carrying `stylesheet` in its shadow root.
	pub fn new(
		document: &Document,
		variant: WidgetVariant,
		stylesheet: &str,
	) -> Result<Self, MountError> {
		let host = document.create_element("div")?;
		host.set_attribute(HOST_ATTRIBUTE, variant.host_attribute_value())?;

		let shadow = host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?;
		let style = document.create_element("style")?;
		style.set_text_content(Some(stylesheet));
		shadow.append_child(&style)?;

		Ok(Self {
			document: document.clone(),
			host,
			shadow,
		})
	}

	/// Appends the host element to `container`. This is the only mutation of
	/// the host page.
	pub fn attach_to(&self, container: &Element) -> Result<(), MountError> {
		container.append_child(&self.host)?;
		Ok(())
	}

	/// Creates an element owned by the page document.
	pub fn create(&self, tag: &str) -> Result<Element, JsValue> {
		self.document.create_element(tag)
	}

	/// Appends `child` to the shadow root.
	pub fn append(&self, child: &Element) -> Result<(), JsValue> {
		self.shadow.append_child(child).map(|_| ())
	}

	/// The document the widget renders into.
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// The host element in the light DOM.
	pub fn host(&self) -> &Element {
		&self.host
	}

	/// The shadow root holding the widget subtree.
	pub fn shadow(&self) -> &ShadowRoot {
		&self.shadow
	}

	/// Detaches the host element; the shadow subtree goes with it.
	pub fn remove(&self) {
		self.host.remove();
	}
}
