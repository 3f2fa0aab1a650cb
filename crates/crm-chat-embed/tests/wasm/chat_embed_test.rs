//! Chat shell browser tests
//!
//! Run with: `wasm-pack test --headless --chrome crates/crm-chat-embed`

#![cfg(target_arch = "wasm32")]

use crm_chat_embed::options::{DEFAULT_GREETING, DEFAULT_TITLE};
use crm_chat_embed::{ChatOptions, ChatWidget};
use crm_widget_dom::{Container, MountError};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fresh_container(id: &str) -> Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();
	container.set_id(id);
	document.body().unwrap().append_child(&container).unwrap();
	container
}

fn options(container: impl Into<Container>) -> ChatOptions {
	ChatOptions {
		container: container.into(),
		api_url: "http://127.0.0.1:9".into(),
		title: DEFAULT_TITLE.into(),
		greeting: DEFAULT_GREETING.into(),
	}
}

#[wasm_bindgen_test]
fn test_launcher_toggles_panel() {
	let container = fresh_container("chat-toggle");
	let chat = ChatWidget::mount(options("#chat-toggle")).unwrap();
	assert!(!chat.is_open());

	let shadow = container.first_element_child().unwrap().shadow_root().unwrap();
	let launcher: HtmlElement = shadow
		.query_selector(".crm-chat__launcher")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap();
	launcher.click();
	assert!(chat.is_open());
	assert_eq!(launcher.get_attribute("aria-expanded").as_deref(), Some("true"));

	launcher.click();
	assert!(!chat.is_open());
	chat.unmount();
}

#[wasm_bindgen_test]
fn test_open_close_and_greeting() {
	let container = fresh_container("chat-open");
	let chat = ChatWidget::mount(options(container.clone())).unwrap();

	chat.open();
	let shadow = container.first_element_child().unwrap().shadow_root().unwrap();
	let greeting = shadow.query_selector(".crm-chat__greeting").unwrap().unwrap();
	assert_eq!(greeting.text_content().as_deref(), Some(DEFAULT_GREETING));
	assert!(chat.is_open());

	chat.close();
	assert!(!chat.is_open());
	chat.unmount();
}

#[wasm_bindgen_test]
fn test_host_is_tagged_as_chat() {
	let container = fresh_container("chat-host");
	let chat = ChatWidget::mount(options("#chat-host")).unwrap();
	let host = container.first_element_child().unwrap();
	assert_eq!(host.get_attribute("data-crm-widget").as_deref(), Some("chat"));
	chat.unmount();
}

#[wasm_bindgen_test]
fn test_unmount_is_idempotent() {
	let container = fresh_container("chat-unmount");
	let chat = ChatWidget::mount(options("#chat-unmount")).unwrap();

	chat.unmount();
	chat.unmount();

	assert!(!chat.is_mounted());
	assert_eq!(container.child_element_count(), 0);
	chat.open();
	assert!(!chat.is_open());
}

#[wasm_bindgen_test]
fn test_missing_container() {
	let result = ChatWidget::mount(options("#no-chat-here"));
	assert!(matches!(result, Err(MountError::ContainerNotFound { .. })));
}
