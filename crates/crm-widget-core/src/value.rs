//! Field values and submission payloads
//!
//! Controls report their state as a [`FieldValue`]; the controller keeps one
//! per field in [`FormValues`] and turns them into the JSON body of the
//! submission request with [`FormValues::to_payload`].

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::config::{FieldType, FormConfig, FormField};

/// The current value of one control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	/// Anything typed or chosen as text (select values included)
	Text(String),
	/// Checkbox state
	Bool(bool),
}

impl Default for FieldValue {
	fn default() -> Self {
		FieldValue::Text(String::new())
	}
}

impl FieldValue {
	/// Text form of the value; booleans become `"true"`/`"false"`.
	pub fn as_text(&self) -> Cow<'_, str> {
		match self {
			FieldValue::Text(s) => Cow::Borrowed(s),
			FieldValue::Bool(b) => Cow::Owned(b.to_string()),
		}
	}

	/// Whether the value is empty after trimming. `false` is never blank.
	pub fn is_blank(&self) -> bool {
		match self {
			FieldValue::Text(s) => s.trim().is_empty(),
			FieldValue::Bool(_) => false,
		}
	}

	/// Checkbox reading of the value.
	pub fn is_checked(&self) -> bool {
		match self {
			FieldValue::Bool(b) => *b,
			FieldValue::Text(s) => is_truthy_str(s),
		}
	}

	/// The initial value of a field, derived from its `defaultValue`.
	pub fn seed(field: &FormField) -> Self {
		let default = field.default_value.as_ref();
		if field.field_type() == FieldType::Checkbox {
			let checked = match default {
				Some(Value::Bool(b)) => *b,
				Some(Value::String(s)) => is_truthy_str(s),
				Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
				_ => false,
			};
			return FieldValue::Bool(checked);
		}
		let text = match default {
			None | Some(Value::Null) => return FieldValue::default(),
			Some(Value::String(s)) => s.clone(),
			Some(other) => other.to_string(),
		};
		// A select cannot display a value outside its options.
		if field.field_type() == FieldType::Select && !field.options().contains(&text) {
			return FieldValue::default();
		}
		FieldValue::Text(text)
	}

	/// JSON representation of the value for a field of the given type.
	pub fn to_json(&self, field_type: FieldType) -> Value {
		match field_type {
			FieldType::Checkbox => Value::Bool(self.is_checked()),
			FieldType::Number => number_json(&self.as_text()),
			// Validated on trimmed text, so sent trimmed.
			FieldType::Email | FieldType::Url | FieldType::Phone | FieldType::Date => {
				Value::String(self.as_text().trim().to_string())
			}
			_ => Value::String(self.as_text().into_owned()),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Bool(value)
	}
}

/// Values of every field of one form instance, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
	values: HashMap<String, FieldValue>,
}

impl FormValues {
	/// Seeds one value per field from its `defaultValue`.
	pub fn seeded(config: &FormConfig) -> Self {
		let values = config
			.fields()
			.iter()
			.map(|field| (field.id.clone(), FieldValue::seed(field)))
			.collect();
		Self { values }
	}

	/// The value of a field, if the field exists.
	pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
		self.values.get(field_id)
	}

	/// Replaces the value of a known field. Unknown ids are ignored and
	/// reported as `false`.
	pub fn set(&mut self, field_id: &str, value: FieldValue) -> bool {
		match self.values.get_mut(field_id) {
			Some(slot) => {
				*slot = value;
				true
			}
			None => false,
		}
	}

	/// Number of tracked fields.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Whether no fields are tracked.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Builds the submission body: one entry per field, hidden fields
	/// included, each normalised for its type.
	pub fn to_payload(&self, config: &FormConfig) -> Value {
		let mut body = Map::new();
		for field in config.fields() {
			let value = self
				.values
				.get(&field.id)
				.cloned()
				.unwrap_or_else(|| FieldValue::seed(field));
			body.insert(field.id.clone(), value.to_json(field.field_type()));
		}
		Value::Object(body)
	}
}

fn is_truthy_str(s: &str) -> bool {
	matches!(
		s.trim().to_ascii_lowercase().as_str(),
		"true" | "on" | "yes" | "1"
	)
}

// Integral values are sent as integers so `5` does not become `5.0`.
fn number_json(text: &str) -> Value {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return Value::Null;
	}
	if let Ok(int) = trimmed.parse::<i64>() {
		return Value::Number(int.into());
	}
	match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
		Some(number) => Value::Number(number),
		None => Value::String(trimmed.to_string()),
	}
}
