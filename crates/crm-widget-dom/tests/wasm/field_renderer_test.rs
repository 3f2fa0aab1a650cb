//! Field renderer browser tests
//!
//! Run with: `wasm-pack test --headless --chrome crates/crm-widget-dom`

#![cfg(target_arch = "wasm32")]

use crm_widget_core::{FieldKind, FieldType, FieldValue, FormField};
use crm_widget_dom::field::{Control, FieldRenderer, RenderedField};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlSelectElement;

wasm_bindgen_test_configure!(run_in_browser);

fn renderer() -> FieldRenderer {
	let document = web_sys::window().unwrap().document().unwrap();
	FieldRenderer::new(document)
}

fn render(field: FormField) -> RenderedField {
	let value = FieldValue::seed(&field);
	renderer().render(&field, &value).unwrap().unwrap()
}

#[wasm_bindgen_test]
fn test_input_types_follow_field_type() {
	let cases = [
		(FieldKind::Text, "text"),
		(FieldKind::Email, "email"),
		(FieldKind::Phone, "tel"),
		(FieldKind::Number, "number"),
		(FieldKind::Date, "date"),
		(FieldKind::Url, "url"),
		(FieldKind::Checkbox, "checkbox"),
	];
	for (kind, expected) in cases {
		let rendered = render(FormField::new("f", kind));
		let Control::Input(input) = rendered.control() else {
			panic!("expected an <input> for {}", expected);
		};
		assert_eq!(input.type_(), expected);
	}
}

#[wasm_bindgen_test]
fn test_control_carries_field_id() {
	let rendered = render(FormField::new("email", FieldKind::Email).required(true));
	let control = rendered.control().as_html_element();

	assert_eq!(control.id(), "email");
	assert_eq!(control.get_attribute("name").as_deref(), Some("email"));
	assert_eq!(control.get_attribute("data-field-id").as_deref(), Some("email"));
	assert_eq!(control.get_attribute("aria-required").as_deref(), Some("true"));
	assert_eq!(
		rendered.element().get_attribute("data-field-id").as_deref(),
		Some("email")
	);
}

#[wasm_bindgen_test]
fn test_select_has_leading_empty_option() {
	let rendered = render(FormField::new(
		"plan",
		FieldKind::Select {
			options: vec!["free".into(), "pro".into()],
		},
	));
	let select: &HtmlSelectElement = rendered.control().as_html_element().unchecked_ref();

	assert_eq!(select.length(), 3);
	assert_eq!(select.value(), "");
	rendered.write_value(&"pro".into());
	assert_eq!(rendered.read_value(), FieldValue::from("pro"));
}

#[wasm_bindgen_test]
fn test_textarea_round_trips_value() {
	let field = FormField::new("notes", FieldKind::Textarea).with_default("hello");
	let rendered = render(field);
	assert!(matches!(rendered.control(), Control::TextArea(_)));
	assert_eq!(rendered.read_value(), FieldValue::from("hello"));
}

#[wasm_bindgen_test]
fn test_checkbox_sits_inside_its_label() {
	let rendered = render(FormField::new("terms", FieldKind::Checkbox).with_default(true));
	let control = rendered.control().as_html_element();

	let parent = control.parent_element().unwrap();
	assert_eq!(parent.tag_name(), "LABEL");
	assert_eq!(rendered.read_value(), FieldValue::Bool(true));
	assert_eq!(rendered.change_event(), "change");

	rendered.write_value(&FieldValue::Bool(false));
	assert_eq!(rendered.read_value(), FieldValue::Bool(false));
}

#[wasm_bindgen_test]
fn test_hidden_renders_nothing() {
	let field = FormField::new("utm", FieldKind::Hidden).with_default("ad");
	assert_eq!(field.field_type(), FieldType::Hidden);
	let rendered = renderer().render(&field, &"ad".into()).unwrap();
	assert!(rendered.is_none());
}

#[wasm_bindgen_test]
fn test_error_slot_sets_aria_attributes() {
	let rendered = render(FormField::new("email", FieldKind::Email));
	let control = rendered.control().as_html_element();

	rendered.set_error(Some("Enter a valid email address")).unwrap();
	assert_eq!(rendered.error().as_deref(), Some("Enter a valid email address"));
	assert_eq!(control.get_attribute("aria-invalid").as_deref(), Some("true"));
	assert_eq!(
		control.get_attribute("aria-describedby").as_deref(),
		Some("email-error")
	);

	rendered.set_error(None).unwrap();
	assert_eq!(rendered.error(), None);
	assert!(control.get_attribute("aria-invalid").is_none());
}
