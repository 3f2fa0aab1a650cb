//! Isolation and listener browser tests
//!
//! Run with: `wasm-pack test --headless --chrome crates/crm-widget-dom`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use crm_widget_core::WidgetVariant;
use crm_widget_dom::isolation::IsolatedRoot;
use crm_widget_dom::listener::{EventListener, ListenerRegistry};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

fn button() -> HtmlElement {
	document().create_element("button").unwrap().dyn_into().unwrap()
}

fn counting(count: &Rc<Cell<u32>>) -> impl FnMut(Event) + 'static {
	let count = count.clone();
	move |_event: Event| count.set(count.get() + 1)
}

#[wasm_bindgen_test]
fn test_root_is_detached_until_attached() {
	let document = document();
	let root = IsolatedRoot::new(&document, WidgetVariant::Chat, "p { margin: 0; }").unwrap();

	assert!(!root.host().is_connected());
	assert_eq!(root.host().get_attribute("data-crm-widget").as_deref(), Some("chat"));
	assert!(root.document().is_same_node(Some(&document)));
	let style = root.shadow().query_selector("style").unwrap().unwrap();
	assert_eq!(style.text_content().as_deref(), Some("p { margin: 0; }"));

	let paragraph = root.create("p").unwrap();
	root.append(&paragraph).unwrap();
	assert!(!paragraph.is_connected());

	let container = document.create_element("div").unwrap();
	document.body().unwrap().append_child(&container).unwrap();
	root.attach_to(&container).unwrap();
	assert!(paragraph.is_connected());
	// The shadow subtree stays out of the light DOM.
	assert!(container.query_selector("p").unwrap().is_none());

	root.remove();
	assert_eq!(container.child_element_count(), 0);
	container.remove();
}

#[wasm_bindgen_test]
fn test_listener_detaches_on_drop() {
	let target = button();
	let count = Rc::new(Cell::new(0));
	let listener = EventListener::new(&target, "click", counting(&count)).unwrap();
	assert_eq!(listener.event_type(), "click");

	target.click();
	assert_eq!(count.get(), 1);

	drop(listener);
	target.click();
	assert_eq!(count.get(), 1);
}

#[wasm_bindgen_test]
fn test_registry_clear_detaches_everything() {
	let first = button();
	let second = button();
	let count = Rc::new(Cell::new(0));
	let mut registry = ListenerRegistry::new();
	assert!(registry.is_empty());

	registry.listen(&first, "click", counting(&count)).unwrap();
	registry.listen(&second, "click", counting(&count)).unwrap();
	assert_eq!(registry.len(), 2);
	assert!(!registry.is_empty());

	first.click();
	second.click();
	assert_eq!(count.get(), 2);

	registry.clear();
	assert!(registry.is_empty());
	first.click();
	second.click();
	assert_eq!(count.get(), 2);
}
