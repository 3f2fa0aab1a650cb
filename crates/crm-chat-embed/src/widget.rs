//! Chat widget shell
//!
//! A launcher button toggling a panel with a title and greeting. It shares
//! the container rules, shadow-root isolation and listener handling of the
//! form widget; the conversation itself is not part of this crate.

use std::cell::RefCell;
use std::rc::Rc;

use crm_widget_core::{WidgetVariant, info_log, warn_log};
use crm_widget_dom::live::{self, InstanceKey};
use crm_widget_dom::{IsolatedRoot, ListenerRegistry, MountError, styles};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Event};

use crate::options::ChatOptions;

/// Rules of the chat widget.
pub const CHAT_STYLES: &str = r#"
.crm-chat { position: relative; display: inline-flex; flex-direction: column; align-items: flex-end; gap: 0.5em; }
.crm-chat__panel {
	width: 320px;
	max-width: 100%;
	border: 1px solid #cbd2d9;
	border-radius: 12px;
	background: #fff;
	box-shadow: 0 8px 24px rgba(15, 23, 42, 0.15);
	overflow: hidden;
}
.crm-chat__header { display: flex; align-items: center; justify-content: space-between; padding: 0.75em 1em; background: #2563eb; color: #fff; }
.crm-chat__title { margin: 0; font-size: 1em; }
.crm-chat__close { padding: 0 0.4em; background: transparent; font-size: 1.25em; }
.crm-chat__greeting { margin: 0; padding: 1em; }
.crm-chat__launcher { border-radius: 999px; }
"#;

#[derive(Debug)]
struct ChatView {
	root: IsolatedRoot,
	panel: Element,
	launcher: Element,
	listeners: ListenerRegistry,
}

impl ChatView {
	fn set_open(&self, open: bool) -> Result<(), JsValue> {
		if open {
			self.panel.remove_attribute("hidden")?;
		} else {
			self.panel.set_attribute("hidden", "")?;
		}
		self.launcher
			.set_attribute("aria-expanded", if open { "true" } else { "false" })
	}

	fn is_open(&self) -> bool {
		!self.panel.has_attribute("hidden")
	}
}

type Slot = RefCell<Option<ChatView>>;

/// Handle to one mounted chat shell.
#[derive(Debug, Clone)]
pub struct ChatWidget {
	api_url: String,
	key: InstanceKey,
	slot: Rc<Slot>,
}

impl ChatWidget {
	/// Mounts the shell, closed. On error nothing has been added to the page.
	pub fn mount(options: ChatOptions) -> Result<Self, MountError> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| MountError::Isolation("no document".to_string()))?;
		let target = options.container.resolve(&document)?;

		let root = IsolatedRoot::new(
			&document,
			WidgetVariant::Chat,
			&styles::scoped(CHAT_STYLES),
		)?;
		let (frame, panel, launcher) = build(&document, &options)?;
		root.append(&frame)?;
		root.attach_to(&target)?;

		let slot: Rc<Slot> = Rc::new(RefCell::new(None));
		let mut listeners = ListenerRegistry::new();
		let toggle = Rc::downgrade(&slot);
		listeners.listen(&launcher, "click", move |_event: Event| {
			with_view(&toggle, |view| view.set_open(!view.is_open()));
		})?;
		if let Ok(Some(close)) = panel.query_selector(".crm-chat__close") {
			let close_slot = Rc::downgrade(&slot);
			listeners.listen(&close, "click", move |_event: Event| {
				with_view(&close_slot, |view| view.set_open(false));
			})?;
		}

		*slot.borrow_mut() = Some(ChatView {
			root,
			panel,
			launcher,
			listeners,
		});
		let key = live::retain(slot.clone());
		info_log!("mounted chat into {}", options.container.describe());

		Ok(Self {
			api_url: options.api_url,
			key,
			slot,
		})
	}

	/// Base URL the chat was configured with.
	pub fn api_url(&self) -> &str {
		&self.api_url
	}

	/// Opens the panel.
	pub fn open(&self) {
		with_view(&Rc::downgrade(&self.slot), |view| view.set_open(true));
	}

	/// Closes the panel.
	pub fn close(&self) {
		with_view(&Rc::downgrade(&self.slot), |view| view.set_open(false));
	}

	/// Whether the panel is showing.
	pub fn is_open(&self) -> bool {
		self.slot
			.try_borrow()
			.ok()
			.and_then(|guard| guard.as_ref().map(ChatView::is_open))
			.unwrap_or(false)
	}

	/// Whether [`ChatWidget::unmount`] has run.
	pub fn is_mounted(&self) -> bool {
		self.slot
			.try_borrow()
			.map(|guard| guard.is_some())
			.unwrap_or(true)
	}

	/// Removes the shell and its listeners. Calling this again does nothing.
	pub fn unmount(&self) {
		let taken = match self.slot.try_borrow_mut() {
			Ok(mut guard) => guard.take(),
			Err(_) => {
				warn_log!("chat: unmount while busy");
				return;
			}
		};
		if let Some(mut view) = taken {
			view.listeners.clear();
			view.root.remove();
			live::release(self.key);
			info_log!("unmounted chat");
		}
	}
}

fn with_view(
	slot: &std::rc::Weak<Slot>,
	action: impl FnOnce(&ChatView) -> Result<(), JsValue>,
) {
	let Some(strong) = slot.upgrade() else {
		return;
	};
	let Ok(guard) = strong.try_borrow() else {
		return;
	};
	if let Some(view) = guard.as_ref()
		&& let Err(err) = action(view)
	{
		warn_log!("chat: {}", crm_widget_dom::error::describe_js(&err));
	}
}

fn build(document: &Document, options: &ChatOptions) -> Result<(Element, Element, Element), JsValue> {
	let element = |tag: &str, class: &str| -> Result<Element, JsValue> {
		let element = document.create_element(tag)?;
		element.set_class_name(class);
		Ok(element)
	};

	let frame = element("div", "crm-chat")?;

	let panel = element("div", "crm-chat__panel")?;
	panel.set_attribute("role", "dialog")?;
	panel.set_attribute("aria-label", &options.title)?;
	panel.set_attribute("hidden", "")?;

	let header = element("div", "crm-chat__header")?;
	let title = element("h2", "crm-chat__title")?;
	title.set_text_content(Some(&options.title));
	let close = element("button", "crm-chat__close")?;
	close.set_attribute("type", "button")?;
	close.set_attribute("aria-label", "Close chat")?;
	close.set_text_content(Some("×"));
	header.append_child(&title)?;
	header.append_child(&close)?;

	let greeting = element("p", "crm-chat__greeting")?;
	greeting.set_text_content(Some(&options.greeting));
	panel.append_child(&header)?;
	panel.append_child(&greeting)?;

	let launcher = element("button", "crm-chat__launcher")?;
	launcher.set_attribute("type", "button")?;
	launcher.set_attribute("aria-expanded", "false")?;
	launcher.set_attribute("aria-label", "Open chat")?;
	launcher.set_text_content(Some("Chat"));

	frame.append_child(&panel)?;
	frame.append_child(&launcher)?;
	Ok((frame, panel, launcher))
}
