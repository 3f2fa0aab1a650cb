//! JS-facing behaviour of the form entry point
//!
//! Run with: `wasm-pack test --headless --chrome crates/crm-form-embed`

#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn options(entries: &[(&str, &str)]) -> JsValue {
	let object = Object::new();
	for (key, value) in entries {
		Reflect::set(&object, &(*key).into(), &(*value).into()).unwrap();
	}
	object.into()
}

fn error_name(value: JsValue) -> String {
	String::from(value.dyn_into::<js_sys::Error>().unwrap().name())
}

#[wasm_bindgen_test]
fn test_missing_container_throws_named_error() {
	let Err(error) = crm_form_embed::mount(options(&[
		("formId", "contact"),
		("container", "#does-not-exist"),
		("apiUrl", "http://127.0.0.1:9"),
	])) else {
		panic!("mount should throw");
	};
	assert_eq!(error_name(error), "ContainerNotFound");
}

#[wasm_bindgen_test]
fn test_missing_form_id_throws_invalid_options() {
	let Err(error) = crm_form_embed::mount(options(&[
		("container", "body"),
		("apiUrl", "http://127.0.0.1:9"),
	])) else {
		panic!("mount should throw");
	};
	assert_eq!(error_name(error), "InvalidOptions");
}

#[wasm_bindgen_test]
fn test_non_object_options_throw() {
	let Err(error) = crm_form_embed::mount(JsValue::from_str("contact")) else {
		panic!("mount should throw");
	};
	assert_eq!(error_name(error), "InvalidOptions");
}

#[wasm_bindgen_test]
fn test_handle_reports_state_and_unmounts() {
	let document = web_sys::window().unwrap().document().unwrap();
	let container = document.create_element("div").unwrap();
	container.set_id("embed-handle");
	document.body().unwrap().append_child(&container).unwrap();

	let handle = crm_form_embed::mount(options(&[
		("formId", "contact"),
		("container", "#embed-handle"),
		("apiUrl", "http://127.0.0.1:9"),
	]))
	.unwrap();
	assert_eq!(handle.form_id(), "contact");
	assert_eq!(handle.state(), "Loading");

	handle.unmount();
	handle.unmount();
	assert_eq!(handle.state(), "Unmounted");
	assert_eq!(container.child_element_count(), 0);
	container.remove();
}
