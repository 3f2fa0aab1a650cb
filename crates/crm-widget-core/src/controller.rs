//! Form submission state machine
//!
//! [`FormController`] owns the lifecycle of one mounted form. It performs no
//! I/O: the DOM driver feeds it [`FormEvent`]s (network completions and user
//! actions) and executes the [`Command`]s it returns, in order.
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Loading
//!     Loading --> Ready: config ok
//!     Loading --> ConfigFetchFailed: fetch failed
//!     Loading --> ConfigInvalid: bad config
//!     ConfigFetchFailed --> Loading: retry
//!     Ready --> Validating: submit
//!     Validating --> Ready: invalid fields
//!     Validating --> Submitting: all valid
//!     Submitting --> Success: 2xx
//!     Submitting --> SubmitFailed: network / non-2xx
//!     SubmitFailed --> Ready: edit / retry
//!     SubmitFailed --> Validating: submit
//! ```
//!
//! Every state can move to `Unmounted`, which absorbs all further events.

use std::fmt;

use serde_json::Value;

use crate::config::{FormConfig, SubmitResponse};
use crate::endpoints::ApiEndpoints;
use crate::error::{FetchError, WidgetErrorKind};
use crate::validation::{FieldErrors, validate_form};
use crate::value::{FieldValue, FormValues};
use crate::{debug_log, error_log, warn_log};

/// Lifecycle state of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
	/// Waiting for the form definition
	Loading,
	/// Fields rendered, accepting input
	Ready,
	/// Running client-side validation
	Validating,
	/// Submission in flight
	Submitting,
	/// Submission accepted; terminal
	Success,
	/// A failure the visitor is told about
	Error(WidgetErrorKind),
	/// Torn down; terminal
	Unmounted,
}

impl FormState {
	/// Whether no event can change the state any more.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			FormState::Success | FormState::Unmounted | FormState::Error(WidgetErrorKind::ConfigInvalid)
		)
	}

	/// Whether field edits are recorded in this state.
	pub fn accepts_input(&self) -> bool {
		matches!(
			self,
			FormState::Ready
				| FormState::Submitting
				| FormState::Error(WidgetErrorKind::SubmitFailed)
		)
	}
}

impl fmt::Display for FormState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FormState::Loading => f.write_str("Loading"),
			FormState::Ready => f.write_str("Ready"),
			FormState::Validating => f.write_str("Validating"),
			FormState::Submitting => f.write_str("Submitting"),
			FormState::Success => f.write_str("Success"),
			FormState::Error(kind) => write!(f, "Error({})", kind),
			FormState::Unmounted => f.write_str("Unmounted"),
		}
	}
}

/// Something that happened to the instance.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
	/// The config request completed.
	ConfigFetched(Result<Value, FetchError>),
	/// The visitor changed a control.
	FieldChanged {
		/// Id of the edited field
		field_id: String,
		/// New value
		value: FieldValue,
	},
	/// The visitor submitted the form.
	SubmitRequested,
	/// The submission request completed.
	SubmitFinished(Result<SubmitResponse, FetchError>),
	/// The visitor pressed a retry affordance.
	RetryRequested,
	/// The visitor asked to restore the initial values.
	ResetRequested,
	/// The host page unmounted the instance.
	Unmounted,
}

/// Work the DOM driver must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	/// Replace the content with a loading indicator.
	ShowLoading,
	/// Fetch the form definition and report [`FormEvent::ConfigFetched`].
	FetchConfig {
		/// Config URL
		url: String,
	},
	/// Render every field of [`FormController::config`] from
	/// [`FormController::values`].
	RenderForm,
	/// Replace all inline errors with `errors` and optionally focus a field.
	ShowFieldErrors {
		/// Invalid field id to reason
		errors: FieldErrors,
		/// The first invalid visible field
		focus: Option<String>,
	},
	/// Remove all inline errors.
	ClearFieldErrors,
	/// Toggle the busy state of the submit button.
	SetSubmitting(bool),
	/// Post the payload and report [`FormEvent::SubmitFinished`].
	PostSubmission {
		/// Submission URL
		url: String,
		/// JSON body
		payload: Value,
	},
	/// Show a form-level error message.
	ShowFormError {
		/// User-facing text
		message: String,
	},
	/// Hide the form-level error message.
	ClearFormError,
	/// Show a message with a retry affordance in place of the form.
	ShowRetry {
		/// User-facing text
		message: String,
	},
	/// Show a terminal "unavailable" message in place of the form.
	ShowUnavailable {
		/// User-facing text
		message: String,
	},
	/// Replace the form with a success message.
	ShowSuccess {
		/// User-facing text
		message: String,
	},
	/// Navigate the host page.
	Navigate {
		/// Target URL
		url: String,
	},
	/// Write [`FormController::values`] back into the rendered controls.
	SyncValues,
}

/// Sans-IO controller for one mounted form.
#[derive(Debug, Clone)]
pub struct FormController {
	form_id: String,
	endpoints: ApiEndpoints,
	state: FormState,
	config: Option<FormConfig>,
	values: FormValues,
}

impl FormController {
	/// Creates a controller in `Loading` together with the commands that
	/// start the config fetch.
	pub fn start(form_id: impl Into<String>, endpoints: ApiEndpoints) -> (Self, Vec<Command>) {
		let controller = Self {
			form_id: form_id.into(),
			endpoints,
			state: FormState::Loading,
			config: None,
			values: FormValues::default(),
		};
		let commands = controller.fetch_commands();
		(controller, commands)
	}

	/// Current state.
	pub fn state(&self) -> FormState {
		self.state
	}

	/// Id of the form this instance renders.
	pub fn form_id(&self) -> &str {
		&self.form_id
	}

	/// The parsed config, once loaded.
	pub fn config(&self) -> Option<&FormConfig> {
		self.config.as_ref()
	}

	/// Current field values.
	pub fn values(&self) -> &FormValues {
		&self.values
	}

	/// Applies one event and returns the commands to execute.
	pub fn handle(&mut self, event: FormEvent) -> Vec<Command> {
		if self.state == FormState::Unmounted {
			debug_log!("form {}: dropped {:?} after unmount", self.form_id, event);
			return Vec::new();
		}
		let before = self.state;
		let commands = match event {
			FormEvent::ConfigFetched(result) => self.on_config(result),
			FormEvent::FieldChanged { field_id, value } => self.on_field_changed(&field_id, value),
			FormEvent::SubmitRequested => self.on_submit(),
			FormEvent::SubmitFinished(result) => self.on_submit_finished(result),
			FormEvent::RetryRequested => self.on_retry(),
			FormEvent::ResetRequested => self.on_reset(),
			FormEvent::Unmounted => {
				self.state = FormState::Unmounted;
				Vec::new()
			}
		};
		if before != self.state {
			debug_log!("form {}: {} -> {}", self.form_id, before, self.state);
		}
		commands
	}

	fn fetch_commands(&self) -> Vec<Command> {
		vec![
			Command::ShowLoading,
			Command::FetchConfig {
				url: self.endpoints.form_config(&self.form_id),
			},
		]
	}

	fn fail(&mut self, kind: WidgetErrorKind) -> String {
		self.state = FormState::Error(kind);
		kind.user_message().to_string()
	}

	fn on_config(&mut self, result: Result<Value, FetchError>) -> Vec<Command> {
		if self.state != FormState::Loading {
			warn_log!("form {}: unexpected config response in {}", self.form_id, self.state);
			return Vec::new();
		}
		let payload = match result {
			Ok(payload) => payload,
			Err(err) => {
				error_log!("form {}: config fetch failed: {}", self.form_id, err);
				let message = self.fail(WidgetErrorKind::ConfigFetchFailed);
				return vec![Command::ShowRetry { message }];
			}
		};
		match FormConfig::from_json(payload) {
			Ok(config) => {
				self.values = FormValues::seeded(&config);
				self.config = Some(config);
				self.state = FormState::Ready;
				vec![Command::RenderForm]
			}
			Err(err) => {
				error_log!("form {}: invalid config: {}", self.form_id, err);
				let message = self.fail(err.kind());
				vec![Command::ShowUnavailable { message }]
			}
		}
	}

	fn on_field_changed(&mut self, field_id: &str, value: FieldValue) -> Vec<Command> {
		if !self.state.accepts_input() {
			debug_log!("form {}: ignored edit of {} in {}", self.form_id, field_id, self.state);
			return Vec::new();
		}
		if !self.values.set(field_id, value) {
			warn_log!("form {}: edit of unknown field {}", self.form_id, field_id);
			return Vec::new();
		}
		if self.state == FormState::Error(WidgetErrorKind::SubmitFailed) {
			self.state = FormState::Ready;
			return vec![Command::ClearFormError];
		}
		Vec::new()
	}

	fn on_submit(&mut self) -> Vec<Command> {
		let resubmit = match self.state {
			FormState::Ready => false,
			FormState::Error(WidgetErrorKind::SubmitFailed) => true,
			_ => {
				debug_log!("form {}: ignored submit in {}", self.form_id, self.state);
				return Vec::new();
			}
		};
		let Some(config) = self.config.as_ref() else {
			return Vec::new();
		};

		self.state = FormState::Validating;
		let errors = validate_form(config, &self.values);
		if !errors.is_empty() {
			let focus = config
				.visible_fields()
				.find(|field| errors.contains_key(&field.id))
				.map(|field| field.id.clone());
			let mut commands = Vec::new();
			if resubmit || focus.is_none() {
				commands.push(Command::ClearFormError);
			}
			if focus.is_none() {
				// Hidden fields have no error slot of their own.
				commands.push(Command::ShowFormError {
					message: WidgetErrorKind::ValidationFailed.user_message().to_string(),
				});
			}
			commands.insert(0, Command::ShowFieldErrors { errors, focus });
			self.state = FormState::Ready;
			return commands;
		}

		let payload = self.values.to_payload(config);
		self.state = FormState::Submitting;
		vec![
			Command::ClearFieldErrors,
			Command::ClearFormError,
			Command::SetSubmitting(true),
			Command::PostSubmission {
				url: self.endpoints.form_submissions(&self.form_id),
				payload,
			},
		]
	}

	fn on_submit_finished(&mut self, result: Result<SubmitResponse, FetchError>) -> Vec<Command> {
		if self.state != FormState::Submitting {
			warn_log!("form {}: unexpected submit response in {}", self.form_id, self.state);
			return Vec::new();
		}
		let response = match result {
			Ok(response) => response,
			Err(err) => {
				error_log!("form {}: submission failed: {}", self.form_id, err);
				let message = self.fail(WidgetErrorKind::SubmitFailed);
				return vec![Command::SetSubmitting(false), Command::ShowFormError { message }];
			}
		};

		self.state = FormState::Success;
		let config = self.config.as_ref();
		let redirect = response
			.redirect()
			.filter(|url| self.is_navigable(url))
			.or_else(|| {
				config
					.and_then(|c| c.redirect_url.as_deref())
					.filter(|url| self.is_navigable(url))
			})
			.map(str::to_string);
		if let Some(url) = redirect {
			return vec![Command::Navigate { url }];
		}
		let message = if response.success_message.trim().is_empty() {
			config
				.map(|c| c.success_message.clone())
				.unwrap_or_else(|| crate::config::DEFAULT_SUCCESS_MESSAGE.to_string())
		} else {
			response.success_message
		};
		vec![Command::ShowSuccess { message }]
	}

	/// Only absolute `http(s)` targets are followed; anything else would run
	/// in the host page's origin.
	fn is_navigable(&self, target: &str) -> bool {
		let ok = url::Url::parse(target).is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
		if !ok {
			warn_log!("form {}: ignored redirect to {}", self.form_id, target);
		}
		ok
	}

	fn on_retry(&mut self) -> Vec<Command> {
		match self.state {
			FormState::Error(WidgetErrorKind::ConfigFetchFailed) => {
				self.state = FormState::Loading;
				self.fetch_commands()
			}
			FormState::Error(WidgetErrorKind::SubmitFailed) => {
				self.state = FormState::Ready;
				vec![Command::ClearFormError]
			}
			_ => Vec::new(),
		}
	}

	fn on_reset(&mut self) -> Vec<Command> {
		let Some(config) = self.config.as_ref() else {
			return Vec::new();
		};
		if !matches!(
			self.state,
			FormState::Ready | FormState::Error(WidgetErrorKind::SubmitFailed)
		) {
			return Vec::new();
		}
		self.values = FormValues::seeded(config);
		self.state = FormState::Ready;
		vec![
			Command::ClearFieldErrors,
			Command::ClearFormError,
			Command::SyncValues,
		]
	}
}
