//! Error taxonomy
//!
//! Technical failures are kept in typed errors for logging; what the visitor
//! sees is always the fixed text from [`WidgetErrorKind::user_message`].

use std::fmt;

/// The five failure classes a widget instance can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetErrorKind {
	/// The server returned a form definition that does not satisfy the model.
	ConfigInvalid,
	/// The form definition could not be fetched or decoded.
	ConfigFetchFailed,
	/// The mount container could not be resolved.
	ContainerNotFound,
	/// One or more fields failed client-side validation.
	ValidationFailed,
	/// The submission request failed or was rejected.
	SubmitFailed,
}

impl WidgetErrorKind {
	/// Stable identifier, also used as the `name` of errors thrown to the host page.
	pub fn as_str(&self) -> &'static str {
		match self {
			WidgetErrorKind::ConfigInvalid => "ConfigInvalid",
			WidgetErrorKind::ConfigFetchFailed => "ConfigFetchFailed",
			WidgetErrorKind::ContainerNotFound => "ContainerNotFound",
			WidgetErrorKind::ValidationFailed => "ValidationFailed",
			WidgetErrorKind::SubmitFailed => "SubmitFailed",
		}
	}

	/// The generic message shown to the visitor for this kind.
	pub fn user_message(&self) -> &'static str {
		match self {
			WidgetErrorKind::ConfigInvalid => "This form is currently unavailable.",
			WidgetErrorKind::ConfigFetchFailed => "We couldn't load this form.",
			WidgetErrorKind::ContainerNotFound => "The widget container could not be found.",
			WidgetErrorKind::ValidationFailed => "Please correct the highlighted fields.",
			WidgetErrorKind::SubmitFailed => {
				"Something went wrong while sending your response. Please try again."
			}
		}
	}

	/// Whether the visitor can recover without remounting.
	pub fn is_recoverable(&self) -> bool {
		matches!(
			self,
			WidgetErrorKind::ConfigFetchFailed
				| WidgetErrorKind::ValidationFailed
				| WidgetErrorKind::SubmitFailed
		)
	}
}

impl fmt::Display for WidgetErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A failed network exchange with the widget API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with a non-2xx status.
	#[error("unexpected HTTP status {0}")]
	Status(u16),
	/// The response body was not the expected JSON.
	#[error("malformed response body: {0}")]
	Decode(String),
}
