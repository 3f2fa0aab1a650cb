//! Client-side field validation
//!
//! One rule per [`FieldType`]. Every rule first applies the required check,
//! then the type-specific format check when a value is present. Rules are
//! pure and never fail on odd input; there are no cross-field rules.
//!
//! ## Security Note
//!
//! These checks only improve the visitor's experience. The API validates every
//! submission again and must not rely on them.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{FieldType, FormConfig, FormField};
use crate::value::{FieldValue, FormValues};

static EMAIL_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static PHONE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]+$").expect("Invalid phone regex"));

/// Minimum number of digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Invalid field id mapped to the reason shown next to the field.
pub type FieldErrors = BTreeMap<String, String>;

/// Why one field value was rejected. `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	/// A required value is missing.
	#[error("This field is required.")]
	Required,
	/// Not an email address.
	#[error("Enter a valid email address")]
	InvalidEmail,
	/// Not an absolute URL.
	#[error("Enter a valid URL")]
	InvalidUrl,
	/// Not a phone number.
	#[error("Enter a valid phone number")]
	InvalidPhone,
	/// Not a finite number.
	#[error("Enter a valid number")]
	InvalidNumber,
	/// Not a `YYYY-MM-DD` calendar date.
	#[error("Enter a valid date")]
	InvalidDate,
	/// Not one of the select options.
	#[error("Select a valid choice")]
	InvalidChoice,
	/// A required checkbox is unchecked.
	#[error("This box must be checked")]
	MustBeChecked,
}

/// Validates one value against the rule of its field.
pub fn validate_field(field: &FormField, value: &FieldValue) -> Result<(), ValidationError> {
	if field.field_type() == FieldType::Checkbox {
		if field.is_required && !value.is_checked() {
			return Err(ValidationError::MustBeChecked);
		}
		return Ok(());
	}

	if value.is_blank() {
		if field.is_required {
			return Err(ValidationError::Required);
		}
		return Ok(());
	}

	let raw = value.as_text();
	let text = raw.trim();
	match field.field_type() {
		FieldType::Text | FieldType::Textarea | FieldType::Hidden | FieldType::Checkbox => Ok(()),
		FieldType::Email => check(EMAIL_REGEX.is_match(text), ValidationError::InvalidEmail),
		FieldType::Url => check(is_absolute_url(text), ValidationError::InvalidUrl),
		FieldType::Phone => check(is_phone(text), ValidationError::InvalidPhone),
		FieldType::Number => check(
			text.parse::<f64>().is_ok_and(f64::is_finite),
			ValidationError::InvalidNumber,
		),
		FieldType::Date => check(
			chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
			ValidationError::InvalidDate,
		),
		FieldType::Select => check(
			// Option values are matched exactly; they may carry spaces.
			field.options().iter().any(|option| *option == *raw),
			ValidationError::InvalidChoice,
		),
	}
}

/// Validates every field of a form. An empty result means the form may be
/// submitted.
///
/// Fields without a tracked value are checked against their seed value.
pub fn validate_form(config: &FormConfig, values: &FormValues) -> FieldErrors {
	config
		.fields()
		.iter()
		.filter_map(|field| {
			let result = match values.get(&field.id) {
				Some(value) => validate_field(field, value),
				None => validate_field(field, &FieldValue::seed(field)),
			};
			result.err().map(|err| (field.id.clone(), err.to_string()))
		})
		.collect()
}

fn check(ok: bool, err: ValidationError) -> Result<(), ValidationError> {
	if ok { Ok(()) } else { Err(err) }
}

// `Url::parse` rejects relative references, which is what makes it absolute.
fn is_absolute_url(text: &str) -> bool {
	url::Url::parse(text).is_ok_and(|u| u.has_host() || u.scheme() == "mailto")
}

fn is_phone(text: &str) -> bool {
	PHONE_REGEX.is_match(text)
		&& text.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}
