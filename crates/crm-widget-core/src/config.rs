//! Form configuration model
//!
//! Form definitions arrive as untrusted JSON from the widget API. They are
//! parsed in two steps: a permissive serde pass into raw structs, then a
//! validation pass that produces the closed [`FieldKind`] set. Anything the
//! runtime could not render or validate is rejected here rather than later.
//!
//! ```
//! use crm_widget_core::config::{FieldType, FormConfig};
//! use serde_json::json;
//!
//! let config = FormConfig::from_json(json!({
//!     "id": "newsletter",
//!     "name": "Newsletter",
//!     "fields": [
//!         {"id": "plan", "fieldType": "select", "position": 1, "options": ["free", "pro"]},
//!         {"id": "email", "fieldType": "email", "position": 0, "isRequired": true}
//!     ]
//! }))
//! .unwrap();
//!
//! let order: Vec<_> = config.fields().iter().map(|f| f.id.as_str()).collect();
//! assert_eq!(order, ["email", "plan"]);
//! assert_eq!(config.fields()[1].field_type(), FieldType::Select);
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::WidgetErrorKind;

/// Default label of the submit button when the config omits one.
pub const DEFAULT_SUBMIT_TEXT: &str = "Submit";

/// Default success message when the config omits one.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Thank you!";

/// The fixed enumeration of field types understood by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	/// Single-line free text
	Text,
	/// Email address
	Email,
	/// Telephone number
	Phone,
	/// Finite number
	Number,
	/// Multi-line free text
	Textarea,
	/// One value out of a fixed option list
	Select,
	/// Boolean toggle
	Checkbox,
	/// Calendar date
	Date,
	/// Absolute URL
	Url,
	/// Not rendered; submitted with its default value
	Hidden,
}

impl FieldType {
	/// Every field type, in declaration order.
	pub const ALL: [FieldType; 10] = [
		FieldType::Text,
		FieldType::Email,
		FieldType::Phone,
		FieldType::Number,
		FieldType::Textarea,
		FieldType::Select,
		FieldType::Checkbox,
		FieldType::Date,
		FieldType::Url,
		FieldType::Hidden,
	];

	/// The wire name used in `fieldType`.
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldType::Text => "text",
			FieldType::Email => "email",
			FieldType::Phone => "phone",
			FieldType::Number => "number",
			FieldType::Textarea => "textarea",
			FieldType::Select => "select",
			FieldType::Checkbox => "checkbox",
			FieldType::Date => "date",
			FieldType::Url => "url",
			FieldType::Hidden => "hidden",
		}
	}

	/// Parses a wire name; unknown names yield `None`.
	pub fn from_wire(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.as_str() == name)
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A field type together with the data only that type carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
	/// See [`FieldType::Text`]
	Text,
	/// See [`FieldType::Email`]
	Email,
	/// See [`FieldType::Phone`]
	Phone,
	/// See [`FieldType::Number`]
	Number,
	/// See [`FieldType::Textarea`]
	Textarea,
	/// A select with its non-empty, ordered option list
	Select {
		/// Allowed values, in display order
		options: Vec<String>,
	},
	/// See [`FieldType::Checkbox`]
	Checkbox,
	/// See [`FieldType::Date`]
	Date,
	/// See [`FieldType::Url`]
	Url,
	/// See [`FieldType::Hidden`]
	Hidden,
}

impl FieldKind {
	/// The plain type tag of this kind.
	pub fn field_type(&self) -> FieldType {
		match self {
			FieldKind::Text => FieldType::Text,
			FieldKind::Email => FieldType::Email,
			FieldKind::Phone => FieldType::Phone,
			FieldKind::Number => FieldType::Number,
			FieldKind::Textarea => FieldType::Textarea,
			FieldKind::Select { .. } => FieldType::Select,
			FieldKind::Checkbox => FieldType::Checkbox,
			FieldKind::Date => FieldType::Date,
			FieldKind::Url => FieldType::Url,
			FieldKind::Hidden => FieldType::Hidden,
		}
	}

	/// Select options; empty for every other kind.
	pub fn options(&self) -> &[String] {
		match self {
			FieldKind::Select { options } => options,
			_ => &[],
		}
	}
}

/// One input definition of a form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
	/// Identifier, unique within the form
	pub id: String,
	/// Visible label
	pub label: String,
	/// Type and type-specific data
	pub kind: FieldKind,
	/// Placeholder text for text-like controls
	pub placeholder: Option<String>,
	/// Whether a value must be supplied (for checkboxes: must be checked)
	pub is_required: bool,
	/// Render order key
	pub position: i64,
	/// Seed value
	pub default_value: Option<Value>,
}

impl FormField {
	/// Creates a field with the given id and kind and neutral defaults.
	pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
		let id = id.into();
		Self {
			label: id.clone(),
			id,
			kind,
			placeholder: None,
			is_required: false,
			position: 0,
			default_value: None,
		}
	}

	/// Marks the field as required.
	pub fn required(mut self, required: bool) -> Self {
		self.is_required = required;
		self
	}

	/// Sets the render position.
	pub fn at(mut self, position: i64) -> Self {
		self.position = position;
		self
	}

	/// Sets the seed value.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default_value = Some(value.into());
		self
	}

	/// The plain type tag of this field.
	pub fn field_type(&self) -> FieldType {
		self.kind.field_type()
	}

	/// Select options; empty for non-select fields.
	pub fn options(&self) -> &[String] {
		self.kind.options()
	}

	/// Whether the field renders no visible control.
	pub fn is_hidden(&self) -> bool {
		matches!(self.kind, FieldKind::Hidden)
	}
}

/// A complete form definition with fields in ascending `position` order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
	/// Form identifier
	pub id: String,
	/// Form title
	pub name: String,
	/// Optional introduction shown under the title
	pub description: Option<String>,
	/// Submit button label
	pub submit_button_text: String,
	/// Message shown after a successful submission
	pub success_message: String,
	/// Page to navigate to after a successful submission
	pub redirect_url: Option<String>,
	fields: Vec<FormField>,
}

impl FormConfig {
	/// Builds a config from already-typed fields, applying the ordering and
	/// uniqueness rules of [`FormConfig::from_json`].
	pub fn new(
		id: impl Into<String>,
		name: impl Into<String>,
		fields: Vec<FormField>,
	) -> Result<Self, ConfigError> {
		let mut seen = HashSet::new();
		for field in &fields {
			if !seen.insert(field.id.as_str()) {
				return Err(ConfigError::DuplicateFieldId {
					id: field.id.clone(),
				});
			}
		}
		let mut fields = fields;
		fields.sort_by_key(|f| f.position);
		Ok(Self {
			id: id.into(),
			name: name.into(),
			description: None,
			submit_button_text: DEFAULT_SUBMIT_TEXT.to_string(),
			success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
			redirect_url: None,
			fields,
		})
	}

	/// Parses and validates an untyped API payload.
	pub fn from_json(value: Value) -> Result<Self, ConfigError> {
		let Value::Object(mut object) = value else {
			return Err(ConfigError::NotAnObject);
		};

		let raw_fields = match object.remove("fields") {
			None | Some(Value::Null) => return Err(ConfigError::MissingFields),
			Some(Value::Array(items)) => items,
			Some(_) => return Err(ConfigError::FieldsNotAList),
		};

		let header: RawConfig = serde_json::from_value(Value::Object(object))
			.map_err(|e| ConfigError::Malformed(e.to_string()))?;

		let fields = raw_fields
			.into_iter()
			.enumerate()
			.map(|(index, raw)| parse_field(index, raw))
			.collect::<Result<Vec<_>, _>>()?;

		let mut config = Self::new(
			header.id.unwrap_or_default(),
			header.name.unwrap_or_default(),
			fields,
		)?;
		config.description = header.description.filter(|d| !d.trim().is_empty());
		if let Some(text) = header.submit_button_text.filter(|t| !t.trim().is_empty()) {
			config.submit_button_text = text;
		}
		if let Some(message) = header.success_message.filter(|m| !m.trim().is_empty()) {
			config.success_message = message;
		}
		config.redirect_url = non_blank(header.redirect_url);
		Ok(config)
	}

	/// Fields in render order.
	pub fn fields(&self) -> &[FormField] {
		&self.fields
	}

	/// Looks a field up by id.
	pub fn field(&self, id: &str) -> Option<&FormField> {
		self.fields.iter().find(|f| f.id == id)
	}

	/// Fields that render a control, in render order.
	pub fn visible_fields(&self) -> impl Iterator<Item = &FormField> {
		self.fields.iter().filter(|f| !f.is_hidden())
	}
}

/// The server acknowledgement of an accepted submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitResponse {
	/// Identifier of the created submission record
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	/// Message to show the visitor
	pub success_message: String,
	/// Page to navigate to; overrides the configured one
	pub redirect_url: Option<String>,
}

impl SubmitResponse {
	/// Decodes the body of an accepted submission. A body that does not
	/// decode yields an empty response, which shows the configured message.
	pub fn from_body(body: &str) -> Self {
		serde_json::from_str(body).unwrap_or_default()
	}

	/// The redirect target, ignoring blank values.
	pub fn redirect(&self) -> Option<&str> {
		self.redirect_url
			.as_deref()
			.map(str::trim)
			.filter(|u| !u.is_empty())
	}
}

/// Why a form definition was rejected. Every variant maps to
/// [`WidgetErrorKind::ConfigInvalid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	/// The payload is not a JSON object.
	#[error("form config must be a JSON object")]
	NotAnObject,
	/// `fields` is absent or null.
	#[error("form config has no `fields`")]
	MissingFields,
	/// `fields` is present but not an array.
	#[error("`fields` must be a list")]
	FieldsNotAList,
	/// A top-level key has the wrong JSON type.
	#[error("malformed form config: {0}")]
	Malformed(String),
	/// A field entry has the wrong shape.
	#[error("field #{index} is malformed: {reason}")]
	MalformedField {
		/// Position of the entry in the `fields` list
		index: usize,
		/// Serde's description of the problem
		reason: String,
	},
	/// A field entry has no usable `id`.
	#[error("field #{index} has no `id`")]
	MissingFieldId {
		/// Position of the entry in the `fields` list
		index: usize,
	},
	/// A field entry has no `fieldType`.
	#[error("field `{id}` has no `fieldType`")]
	MissingFieldType {
		/// The field id
		id: String,
	},
	/// A field uses a type outside the enumeration.
	#[error("field `{id}` has unknown type `{field_type}`")]
	UnknownFieldType {
		/// The field id
		id: String,
		/// The rejected type name
		field_type: String,
	},
	/// A select field has no options to choose from.
	#[error("select field `{id}` has no options")]
	SelectWithoutOptions {
		/// The field id
		id: String,
	},
	/// Two fields share an id.
	#[error("duplicate field id `{id}`")]
	DuplicateFieldId {
		/// The repeated id
		id: String,
	},
}

impl ConfigError {
	/// The taxonomy entry for config errors.
	pub fn kind(&self) -> WidgetErrorKind {
		WidgetErrorKind::ConfigInvalid
	}
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
	#[serde(default, deserialize_with = "optional_string_or_number")]
	id: Option<String>,
	name: Option<String>,
	description: Option<String>,
	submit_button_text: Option<String>,
	success_message: Option<String>,
	redirect_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
	#[serde(default, deserialize_with = "optional_string_or_number")]
	id: Option<String>,
	label: Option<String>,
	field_type: Option<String>,
	placeholder: Option<String>,
	is_required: Option<bool>,
	position: Option<i64>,
	options: Option<Vec<String>>,
	default_value: Option<Value>,
}

fn parse_field(index: usize, raw: Value) -> Result<FormField, ConfigError> {
	if !raw.is_object() {
		return Err(ConfigError::MalformedField {
			index,
			reason: "expected an object".to_string(),
		});
	}
	let raw: RawField = serde_json::from_value(raw).map_err(|e| ConfigError::MalformedField {
		index,
		reason: e.to_string(),
	})?;

	let id = non_blank(raw.id).ok_or(ConfigError::MissingFieldId { index })?;
	let type_name = raw
		.field_type
		.ok_or_else(|| ConfigError::MissingFieldType { id: id.clone() })?;
	let field_type =
		FieldType::from_wire(type_name.trim()).ok_or_else(|| ConfigError::UnknownFieldType {
			id: id.clone(),
			field_type: type_name.clone(),
		})?;

	let kind = match field_type {
		FieldType::Text => FieldKind::Text,
		FieldType::Email => FieldKind::Email,
		FieldType::Phone => FieldKind::Phone,
		FieldType::Number => FieldKind::Number,
		FieldType::Textarea => FieldKind::Textarea,
		FieldType::Select => match raw.options {
			Some(options) if !options.is_empty() => FieldKind::Select { options },
			_ => return Err(ConfigError::SelectWithoutOptions { id }),
		},
		FieldType::Checkbox => FieldKind::Checkbox,
		FieldType::Date => FieldKind::Date,
		FieldType::Url => FieldKind::Url,
		FieldType::Hidden => FieldKind::Hidden,
	};

	Ok(FormField {
		label: non_blank(raw.label).unwrap_or_else(|| id.clone()),
		placeholder: non_blank(raw.placeholder),
		is_required: raw.is_required.unwrap_or(false),
		position: raw.position.unwrap_or(index as i64),
		default_value: raw.default_value,
		kind,
		id,
	})
}

fn non_blank(value: Option<String>) -> Option<String> {
	value.filter(|v| !v.trim().is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		Value::Null => Ok(String::new()),
		other => Err(serde::de::Error::custom(format!(
			"expected a string or number id, got {}",
			other
		))),
	}
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	string_or_number(deserializer).map(|id| Some(id).filter(|id| !id.is_empty()))
}
