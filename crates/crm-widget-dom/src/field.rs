//! Field rendering
//!
//! [`FieldRenderer`] turns one [`FormField`] into a labelled control with an
//! inline error slot. The returned [`RenderedField`] is the read/write
//! accessor the form driver uses afterwards; it holds element handles only,
//! so clones are cheap and can move into event handlers.
//!
//! | Field type | Control |
//! |------------|---------|
//! | `text` | `<input type="text">` |
//! | `email` | `<input type="email">` |
//! | `phone` | `<input type="tel">` |
//! | `number` | `<input type="number">` |
//! | `date` | `<input type="date">` |
//! | `url` | `<input type="url">` |
//! | `textarea` | `<textarea>` |
//! | `select` | `<select>` with a leading empty option |
//! | `checkbox` | `<input type="checkbox">` inside its label |
//! | `hidden` | nothing |

use crm_widget_core::{FieldType, FieldValue, FormField};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
	Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
	HtmlTextAreaElement,
};

/// The interactive element of a rendered field.
#[derive(Debug, Clone)]
pub enum Control {
	/// `<input>` of any type
	Input(HtmlInputElement),
	/// `<textarea>`
	TextArea(HtmlTextAreaElement),
	/// `<select>`
	Select(HtmlSelectElement),
}

impl Control {
	/// The control as a generic HTML element.
	pub fn as_html_element(&self) -> &HtmlElement {
		match self {
			Control::Input(input) => input.unchecked_ref(),
			Control::TextArea(textarea) => textarea.unchecked_ref(),
			Control::Select(select) => select.unchecked_ref(),
		}
	}
}

/// A field rendered into the widget subtree.
#[derive(Debug, Clone)]
pub struct RenderedField {
	field_id: String,
	field_type: FieldType,
	wrapper: Element,
	control: Control,
	error_slot: Element,
}

impl RenderedField {
	/// Id of the field.
	pub fn field_id(&self) -> &str {
		&self.field_id
	}

	/// Type of the field.
	pub fn field_type(&self) -> FieldType {
		self.field_type
	}

	/// Outer element to insert into the form.
	pub fn element(&self) -> &Element {
		&self.wrapper
	}

	/// The interactive element.
	pub fn control(&self) -> &Control {
		&self.control
	}

	/// DOM event that signals a value change for this control.
	pub fn change_event(&self) -> &'static str {
		match self.control {
			Control::Select(_) => "change",
			Control::Input(_) if self.field_type == FieldType::Checkbox => "change",
			_ => "input",
		}
	}

	/// Reads the current value from the control.
	pub fn read_value(&self) -> FieldValue {
		match &self.control {
			Control::Input(input) if self.field_type == FieldType::Checkbox => {
				FieldValue::Bool(input.checked())
			}
			Control::Input(input) => FieldValue::Text(input.value()),
			Control::TextArea(textarea) => FieldValue::Text(textarea.value()),
			Control::Select(select) => FieldValue::Text(select.value()),
		}
	}

	/// Writes `value` into the control without firing input events.
	pub fn write_value(&self, value: &FieldValue) {
		match &self.control {
			Control::Input(input) if self.field_type == FieldType::Checkbox => {
				input.set_checked(value.is_checked());
			}
			Control::Input(input) => input.set_value(&value.as_text()),
			Control::TextArea(textarea) => textarea.set_value(&value.as_text()),
			Control::Select(select) => select.set_value(&value.as_text()),
		}
	}

	/// Shows `message` in the inline error slot, or clears it with `None`.
	pub fn set_error(&self, message: Option<&str>) -> Result<(), JsValue> {
		let control = self.control.as_html_element();
		match message {
			Some(message) => {
				self.error_slot.set_text_content(Some(message));
				self.error_slot.remove_attribute("hidden")?;
				control.set_attribute("aria-invalid", "true")?;
				control.set_attribute("aria-describedby", &self.error_slot.id())?;
			}
			None => {
				self.error_slot.set_text_content(None);
				self.error_slot.set_attribute("hidden", "")?;
				control.remove_attribute("aria-invalid")?;
				control.remove_attribute("aria-describedby")?;
			}
		}
		Ok(())
	}

	/// Current inline error text, if any.
	pub fn error(&self) -> Option<String> {
		if self.error_slot.has_attribute("hidden") {
			return None;
		}
		self.error_slot.text_content().filter(|t| !t.is_empty())
	}

	/// Moves keyboard focus to the control.
	pub fn focus(&self) -> Result<(), JsValue> {
		self.control.as_html_element().focus()
	}
}

/// Builds field controls with elements of one document.
#[derive(Debug, Clone)]
pub struct FieldRenderer {
	document: Document,
}

impl FieldRenderer {
	/// Creates a renderer for `document`.
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// Renders `field` seeded with `value`. Hidden fields render nothing.
	pub fn render(
		&self,
		field: &FormField,
		value: &FieldValue,
	) -> Result<Option<RenderedField>, JsValue> {
		let field_type = field.field_type();
		if field_type == FieldType::Hidden {
			return Ok(None);
		}

		let wrapper = self.element("div")?;
		wrapper.set_class_name(&format!(
			"crm-form__field crm-form__field--{}",
			field_type.as_str()
		));
		wrapper.set_attribute("data-field-id", &field.id)?;

		let control = self.control(field)?;
		let control_element = control.as_html_element();
		control_element.set_id(&field.id);
		control_element.set_class_name("crm-form__control");
		control_element.set_attribute("name", &field.id)?;
		control_element.set_attribute("data-field-id", &field.id)?;
		if field.is_required {
			control_element.set_attribute("aria-required", "true")?;
		}

		let label = self.element("label")?;
		label.set_attribute("for", &field.id)?;
		if field_type == FieldType::Checkbox {
			label.set_class_name("crm-form__label crm-form__label--checkbox");
			label.append_child(control_element)?;
			label.append_child(&self.document.create_text_node(&field.label))?;
			self.append_required_marker(&label, field)?;
			wrapper.append_child(&label)?;
		} else {
			label.set_class_name("crm-form__label");
			label.set_text_content(Some(&field.label));
			self.append_required_marker(&label, field)?;
			wrapper.append_child(&label)?;
			wrapper.append_child(control_element)?;
		}

		let error_slot = self.element("div")?;
		error_slot.set_class_name("crm-form__field-error");
		error_slot.set_id(&format!("{}-error", field.id));
		error_slot.set_attribute("role", "alert")?;
		error_slot.set_attribute("hidden", "")?;
		wrapper.append_child(&error_slot)?;

		let rendered = RenderedField {
			field_id: field.id.clone(),
			field_type,
			wrapper,
			control,
			error_slot,
		};
		rendered.write_value(value);
		Ok(Some(rendered))
	}

	fn control(&self, field: &FormField) -> Result<Control, JsValue> {
		let input_type = match field.field_type() {
			FieldType::Textarea => {
				let textarea: HtmlTextAreaElement = self.element("textarea")?.dyn_into()?;
				if let Some(placeholder) = &field.placeholder {
					textarea.set_placeholder(placeholder);
				}
				return Ok(Control::TextArea(textarea));
			}
			FieldType::Select => {
				let select: HtmlSelectElement = self.element("select")?.dyn_into()?;
				let empty = self.option("", field.placeholder.as_deref().unwrap_or(""))?;
				select.append_child(&empty)?;
				for option in field.options() {
					select.append_child(&self.option(option, option)?)?;
				}
				return Ok(Control::Select(select));
			}
			FieldType::Text | FieldType::Hidden => "text",
			FieldType::Email => "email",
			FieldType::Phone => "tel",
			FieldType::Number => "number",
			FieldType::Date => "date",
			FieldType::Url => "url",
			FieldType::Checkbox => "checkbox",
		};

		let input: HtmlInputElement = self.element("input")?.dyn_into()?;
		input.set_type(input_type);
		if field.field_type() != FieldType::Checkbox
			&& let Some(placeholder) = &field.placeholder
		{
			input.set_placeholder(placeholder);
		}
		Ok(Control::Input(input))
	}

	fn option(&self, value: &str, text: &str) -> Result<HtmlOptionElement, JsValue> {
		let option: HtmlOptionElement = self.element("option")?.dyn_into()?;
		option.set_value(value);
		option.set_text(text);
		Ok(option)
	}

	fn append_required_marker(&self, label: &Element, field: &FormField) -> Result<(), JsValue> {
		if field.is_required {
			let marker = self.element("span")?;
			marker.set_class_name("crm-form__required");
			marker.set_attribute("aria-hidden", "true")?;
			marker.set_text_content(Some(" *"));
			label.append_child(&marker)?;
		}
		Ok(())
	}

	fn element(&self, tag: &str) -> Result<Element, JsValue> {
		self.document.create_element(tag)
	}
}
