//! Mount/unmount lifecycle browser tests
//!
//! The API URL points at a closed local port so the config fetch fails fast
//! without a server. Submission tests replace the global `fetch` instead.
//!
//! Run with: `wasm-pack test --headless --chrome crates/crm-widget-dom`

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use crm_widget_core::{FormState, WidgetErrorKind};
use crm_widget_dom::{CrmFormOptions, FormWidget, MountError, live};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, Event, HtmlInputElement, Request, Response};

wasm_bindgen_test_configure!(run_in_browser);

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

const EMAIL_FORM: &str = r#"{
	"id": "f",
	"name": "Contact",
	"fields": [
		{"id": "f1", "label": "Email", "fieldType": "email", "isRequired": true, "position": 0}
	]
}"#;

const ACCEPTED: &str = r#"{"id": "s1", "successMessage": "Thanks!", "redirectUrl": null}"#;

/// Answers `GET` with a form definition and `POST` with an accepted
/// submission. The original `fetch` is put back on drop.
struct FetchStub {
	original: JsValue,
	posts: Rc<Cell<u32>>,
	_handler: Closure<dyn FnMut(Request) -> Promise>,
}

impl FetchStub {
	fn install(config: &'static str, accepted: &'static str) -> Self {
		let global = js_sys::global();
		let original = Reflect::get(&global, &"fetch".into()).unwrap();
		let posts = Rc::new(Cell::new(0));
		let counter = posts.clone();
		let handler = Closure::<dyn FnMut(Request) -> Promise>::new(move |request: Request| {
			let body = if request.method() == "POST" {
				counter.set(counter.get() + 1);
				accepted
			} else {
				config
			};
			Promise::resolve(&Response::new_with_opt_str(Some(body)).unwrap())
		});
		Reflect::set(&global, &"fetch".into(), handler.as_ref()).unwrap();
		Self {
			original,
			posts,
			_handler: handler,
		}
	}

	fn posts(&self) -> u32 {
		self.posts.get()
	}
}

impl Drop for FetchStub {
	fn drop(&mut self) {
		let _ = Reflect::set(&js_sys::global(), &"fetch".into(), &self.original);
	}
}

fn type_into(input: &HtmlInputElement, value: &str) {
	input.set_value(value);
	input.dispatch_event(&Event::new("input").unwrap()).unwrap();
}

fn submit(form: &Element) {
	form.dispatch_event(&Event::new("submit").unwrap()).unwrap();
}

fn document() -> Document {
	web_sys::window().unwrap().document().unwrap()
}

fn fresh_container(id: &str) -> Element {
	let document = document();
	if let Some(old) = document.get_element_by_id(id) {
		old.remove();
	}
	let container = document.create_element("div").unwrap();
	container.set_id(id);
	document.body().unwrap().append_child(&container).unwrap();
	container
}

async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
	for _ in 0..100 {
		if condition() {
			return true;
		}
		TimeoutFuture::new(50).await;
	}
	condition()
}

#[wasm_bindgen_test]
fn test_missing_container_mutates_nothing() {
	let body = document().body().unwrap();
	let before = body.inner_html();

	let result = FormWidget::mount(CrmFormOptions::new(
		"contact",
		"#does-not-exist",
		UNREACHABLE_API,
	));

	let Err(error) = result else {
		panic!("mount should fail");
	};
	assert_eq!(
		error,
		MountError::ContainerNotFound {
			selector: "#does-not-exist".into()
		}
	);
	assert_eq!(error.js_name(), "ContainerNotFound");
	assert_eq!(body.inner_html(), before);
}

#[wasm_bindgen_test]
fn test_invalid_selector_is_container_not_found() {
	let result = FormWidget::mount(CrmFormOptions::new("contact", "##nope[", UNREACHABLE_API));
	assert!(matches!(result, Err(MountError::ContainerNotFound { .. })));
}

#[wasm_bindgen_test]
fn test_mount_builds_isolated_root() {
	let container = fresh_container("mount-isolated");
	let widget = FormWidget::mount(CrmFormOptions::new("contact", "#mount-isolated", UNREACHABLE_API))
		.unwrap();

	let host = container.first_element_child().unwrap();
	assert_eq!(host.get_attribute("data-crm-widget").as_deref(), Some("form"));
	let shadow = host.shadow_root().unwrap();
	let style = shadow.query_selector("style").unwrap().unwrap();
	assert!(style.text_content().unwrap().starts_with(":host { all: initial;"));
	assert_eq!(widget.state(), FormState::Loading);

	widget.unmount();
}

#[wasm_bindgen_test]
async fn test_config_fetch_failure_offers_retry() {
	let container = fresh_container("mount-fetch-failure");
	let widget = FormWidget::mount(CrmFormOptions::new(
		"contact",
		container.clone(),
		UNREACHABLE_API,
	))
	.unwrap();

	let failed = wait_until(|| {
		widget.state() == FormState::Error(WidgetErrorKind::ConfigFetchFailed)
	})
	.await;
	assert!(failed, "state was {}", widget.state());

	let shadow = container.first_element_child().unwrap().shadow_root().unwrap();
	assert!(shadow.query_selector(".crm-form__retry").unwrap().is_some());
	assert!(shadow.query_selector("[data-field-id]").unwrap().is_none());

	widget.unmount();
}

#[wasm_bindgen_test]
async fn test_unmount_twice_equals_once() {
	let container = fresh_container("mount-unmount");
	let before = live::count();
	let widget =
		FormWidget::mount(CrmFormOptions::new("contact", "#mount-unmount", UNREACHABLE_API)).unwrap();
	assert_eq!(live::count(), before + 1);

	widget.unmount();
	assert_eq!(container.child_element_count(), 0);
	assert_eq!(widget.state(), FormState::Unmounted);
	assert_eq!(live::count(), before);

	widget.unmount();
	assert_eq!(container.child_element_count(), 0);
	assert_eq!(live::count(), before);

	// The in-flight config fetch lands after unmount and must change nothing.
	TimeoutFuture::new(300).await;
	assert_eq!(widget.state(), FormState::Unmounted);
	assert_eq!(container.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn test_instances_are_independent() {
	let first_container = fresh_container("mount-first");
	let second_container = fresh_container("mount-second");
	let first =
		FormWidget::mount(CrmFormOptions::new("a", "#mount-first", UNREACHABLE_API)).unwrap();
	let second =
		FormWidget::mount(CrmFormOptions::new("b", "#mount-second", UNREACHABLE_API)).unwrap();

	first.unmount();

	assert_eq!(first_container.child_element_count(), 0);
	assert_eq!(second_container.child_element_count(), 1);
	assert_eq!(second.state(), FormState::Loading);
	second.unmount();
}

#[wasm_bindgen_test]
async fn test_invalid_submit_stays_local_then_valid_submit_succeeds() {
	let stub = FetchStub::install(EMAIL_FORM, ACCEPTED);
	let container = fresh_container("mount-submit");
	let widget = FormWidget::mount(CrmFormOptions::new(
		"contact",
		container.clone(),
		"https://crm.test",
	))
	.unwrap();
	let ready = wait_until(|| widget.state() == FormState::Ready).await;
	assert!(ready, "state was {}", widget.state());

	let shadow = container.first_element_child().unwrap().shadow_root().unwrap();
	let input: HtmlInputElement = shadow
		.query_selector("#f1")
		.unwrap()
		.unwrap()
		.dyn_into()
		.unwrap();
	let form = shadow.query_selector("form").unwrap().unwrap();
	let error = shadow.query_selector("#f1-error").unwrap().unwrap();

	type_into(&input, "not-an-email");
	submit(&form);

	let shown = wait_until(|| !error.has_attribute("hidden")).await;
	assert!(shown, "inline error never appeared");
	assert_eq!(
		error.text_content().as_deref(),
		Some("Enter a valid email address")
	);
	assert_eq!(input.get_attribute("aria-invalid").as_deref(), Some("true"));
	assert_eq!(
		shadow.active_element().map(|focused| focused.id()).as_deref(),
		Some("f1")
	);
	TimeoutFuture::new(100).await;
	assert_eq!(stub.posts(), 0);
	assert_eq!(widget.state(), FormState::Ready);

	type_into(&input, "a@b.com");
	submit(&form);

	let succeeded = wait_until(|| widget.state() == FormState::Success).await;
	assert!(succeeded, "state was {}", widget.state());
	assert_eq!(stub.posts(), 1);
	assert!(shadow.query_selector("form").unwrap().is_none());
	let success = shadow.query_selector(".crm-form__success").unwrap().unwrap();
	assert_eq!(success.text_content().as_deref(), Some("Thanks!"));

	widget.unmount();
	drop(stub);
}
