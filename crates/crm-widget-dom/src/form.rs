//! Form widget lifecycle
//!
//! [`FormWidget::mount`] builds the isolated root, starts a
//! [`FormController`] and executes its commands. DOM listeners and network
//! completions turn back into [`FormEvent`]s through [`dispatch`], which only
//! holds a `Weak` reference to the instance: once [`FormWidget::unmount`] has
//! taken the instance out, late completions find nothing and are dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crm_widget_core::{
	ApiEndpoints, Command, FieldErrors, FormController, FormEvent, FormState, WidgetVariant,
	debug_log, error_log, info_log, warn_log,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlButtonElement};

use crate::error::{MountError, describe_js};
use crate::field::{FieldRenderer, RenderedField};
use crate::http;
use crate::isolation::IsolatedRoot;
use crate::listener::ListenerRegistry;
use crate::live::{self, InstanceKey};
use crate::options::CrmFormOptions;
use crate::styles;

type Slot = RefCell<Option<Instance>>;

/// Handle to one mounted form.
#[derive(Debug, Clone)]
pub struct FormWidget {
	form_id: String,
	key: InstanceKey,
	slot: Rc<Slot>,
}

impl FormWidget {
	/// Mounts a form. On error nothing has been added to the page.
	pub fn mount(options: CrmFormOptions) -> Result<Self, MountError> {
		let CrmFormOptions {
			form_id,
			container,
			api_url,
		} = options;
		if form_id.trim().is_empty() {
			return Err(MountError::InvalidOptions("`formId` is required".to_string()));
		}
		if api_url.trim().is_empty() {
			return Err(MountError::InvalidOptions("`apiUrl` is required".to_string()));
		}

		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| MountError::Isolation("no document".to_string()))?;
		let target = container.resolve(&document).inspect_err(|err| {
			warn_log!("form {}: {}", form_id, err);
		})?;

		let root = IsolatedRoot::new(
			&document,
			WidgetVariant::Form,
			&styles::scoped(styles::FORM_STYLES),
		)?;
		let frame = root.create("div")?;
		frame.set_class_name("crm-form");
		root.append(&frame)?;
		root.attach_to(&target)?;

		let (controller, commands) = FormController::start(form_id.clone(), ApiEndpoints::new(&api_url));
		let slot: Rc<Slot> = Rc::new(RefCell::new(Some(Instance {
			controller,
			root,
			view: FormView::new(document, frame),
		})));
		let key = live::retain(slot.clone());

		let weak = Rc::downgrade(&slot);
		if let Some(instance) = slot.borrow_mut().as_mut() {
			instance.run(commands, &weak);
		}
		info_log!("mounted form {} into {}", form_id, container.describe());

		Ok(Self {
			form_id,
			key,
			slot,
		})
	}

	/// Id of the mounted form.
	pub fn form_id(&self) -> &str {
		&self.form_id
	}

	/// Current controller state; `Unmounted` after [`FormWidget::unmount`].
	pub fn state(&self) -> FormState {
		match self.slot.try_borrow() {
			Ok(guard) => guard
				.as_ref()
				.map(|instance| instance.controller.state())
				.unwrap_or(FormState::Unmounted),
			Err(_) => FormState::Unmounted,
		}
	}

	/// Restores every field to its initial value.
	pub fn reset(&self) {
		dispatch(&Rc::downgrade(&self.slot), FormEvent::ResetRequested);
	}

	/// Removes the widget and detaches its listeners. Responses still in
	/// flight are ignored when they arrive. Calling this again does nothing.
	pub fn unmount(&self) {
		let taken = match self.slot.try_borrow_mut() {
			Ok(mut guard) => guard.take(),
			Err(_) => {
				warn_log!("form {}: unmount while busy", self.form_id);
				return;
			}
		};
		let Some(mut instance) = taken else {
			return;
		};
		instance.controller.handle(FormEvent::Unmounted);
		instance.view.clear();
		instance.root.remove();
		live::release(self.key);
		info_log!("unmounted form {}", self.form_id);
	}
}

/// Feeds `event` to the instance behind `slot`, if it is still mounted.
fn dispatch(slot: &Weak<Slot>, event: FormEvent) {
	let Some(strong) = slot.upgrade() else {
		debug_log!("dropped {:?}: instance released", event);
		return;
	};
	let Ok(mut guard) = strong.try_borrow_mut() else {
		warn_log!("dropped re-entrant {:?}", event);
		return;
	};
	let Some(instance) = guard.as_mut() else {
		debug_log!("dropped {:?} after unmount", event);
		return;
	};
	let commands = instance.controller.handle(event);
	instance.run(commands, slot);
}

#[derive(Debug)]
struct Instance {
	controller: FormController,
	root: IsolatedRoot,
	view: FormView,
}

impl Instance {
	fn run(&mut self, commands: Vec<Command>, slot: &Weak<Slot>) {
		for command in commands {
			if let Err(err) = self.execute(command, slot) {
				error_log!(
					"form {}: command failed: {}",
					self.controller.form_id(),
					describe_js(&err)
				);
			}
		}
	}

	fn execute(&mut self, command: Command, slot: &Weak<Slot>) -> Result<(), JsValue> {
		match command {
			Command::ShowLoading => self.view.show_status("Loading…"),
			Command::FetchConfig { url } => {
				let slot = slot.clone();
				spawn_local(async move {
					let result = http::fetch_config(&url).await;
					dispatch(&slot, FormEvent::ConfigFetched(result));
				});
				Ok(())
			}
			Command::RenderForm => {
				let Some(config) = self.controller.config() else {
					return Ok(());
				};
				self.view
					.render_form(config, self.controller.values(), slot)
			}
			Command::ShowFieldErrors { errors, focus } => self.view.show_field_errors(&errors, focus.as_deref()),
			Command::ClearFieldErrors => self.view.show_field_errors(&FieldErrors::new(), None),
			Command::SetSubmitting(busy) => {
				self.view.set_submitting(busy);
				Ok(())
			}
			Command::PostSubmission { url, payload } => {
				let slot = slot.clone();
				spawn_local(async move {
					let result = http::post_submission(&url, &payload).await;
					dispatch(&slot, FormEvent::SubmitFinished(result));
				});
				Ok(())
			}
			Command::ShowFormError { message } => self.view.set_form_error(Some(&message)),
			Command::ClearFormError => self.view.set_form_error(None),
			Command::ShowRetry { message } => self.view.show_retry(&message, slot),
			Command::ShowUnavailable { message } => self.view.show_status(&message),
			Command::ShowSuccess { message } => self.view.show_success(&message),
			Command::Navigate { url } => {
				let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
				window.location().set_href(&url)
			}
			Command::SyncValues => {
				for field in &self.view.fields {
					if let Some(value) = self.controller.values().get(field.field_id()) {
						field.write_value(value);
					}
				}
				Ok(())
			}
		}
	}
}

/// The rendered content of one instance.
#[derive(Debug)]
struct FormView {
	document: Document,
	frame: Element,
	fields: Vec<RenderedField>,
	form_error: Option<Element>,
	submit: Option<HtmlButtonElement>,
	listeners: ListenerRegistry,
}

impl FormView {
	fn new(document: Document, frame: Element) -> Self {
		Self {
			document,
			frame,
			fields: Vec::new(),
			form_error: None,
			submit: None,
			listeners: ListenerRegistry::new(),
		}
	}

	fn clear(&mut self) {
		self.listeners.clear();
		self.fields.clear();
		self.form_error = None;
		self.submit = None;
		self.frame.set_text_content(None);
	}

	fn element(&self, tag: &str, class: &str) -> Result<Element, JsValue> {
		let element = self.document.create_element(tag)?;
		element.set_class_name(class);
		Ok(element)
	}

	fn show_status(&mut self, message: &str) -> Result<(), JsValue> {
		self.clear();
		let status = self.element("p", "crm-form__status")?;
		status.set_attribute("role", "status")?;
		status.set_text_content(Some(message));
		self.frame.append_child(&status)?;
		Ok(())
	}

	fn show_success(&mut self, message: &str) -> Result<(), JsValue> {
		self.clear();
		let success = self.element("div", "crm-form__success")?;
		success.set_attribute("role", "status")?;
		success.set_text_content(Some(message));
		self.frame.append_child(&success)?;
		Ok(())
	}

	fn show_retry(&mut self, message: &str, slot: &Weak<Slot>) -> Result<(), JsValue> {
		self.show_status(message)?;
		let button = self.element("button", "crm-form__retry")?;
		button.set_attribute("type", "button")?;
		button.set_text_content(Some("Try again"));
		self.frame.append_child(&button)?;

		let slot = slot.clone();
		self.listeners.listen(&button, "click", move |_event: Event| {
			dispatch(&slot, FormEvent::RetryRequested);
		})
	}

	fn render_form(
		&mut self,
		config: &crm_widget_core::FormConfig,
		values: &crm_widget_core::FormValues,
		slot: &Weak<Slot>,
	) -> Result<(), JsValue> {
		self.clear();

		if !config.name.trim().is_empty() {
			let title = self.element("h2", "crm-form__title")?;
			title.set_text_content(Some(&config.name));
			self.frame.append_child(&title)?;
		}
		if let Some(description) = &config.description {
			let paragraph = self.element("p", "crm-form__description")?;
			paragraph.set_text_content(Some(description));
			self.frame.append_child(&paragraph)?;
		}

		let form = self.element("form", "crm-form__form")?;
		form.set_attribute("novalidate", "")?;
		form.set_attribute("data-form-id", &config.id)?;
		let list = self.element("div", "crm-form__fields")?;

		let renderer = FieldRenderer::new(self.document.clone());
		for field in config.fields() {
			let value = values.get(&field.id).cloned().unwrap_or_default();
			let Some(rendered) = renderer.render(field, &value)? else {
				continue;
			};
			list.append_child(rendered.element())?;

			let slot = slot.clone();
			let source = rendered.clone();
			self.listeners.listen(
				rendered.control().as_html_element(),
				rendered.change_event(),
				move |_event: Event| {
					dispatch(
						&slot,
						FormEvent::FieldChanged {
							field_id: source.field_id().to_string(),
							value: source.read_value(),
						},
					);
				},
			)?;
			self.fields.push(rendered);
		}
		form.append_child(&list)?;

		let form_error = self.element("div", "crm-form__error")?;
		form_error.set_attribute("role", "alert")?;
		form_error.set_attribute("hidden", "")?;
		form.append_child(&form_error)?;

		let submit: HtmlButtonElement = self.element("button", "crm-form__submit")?.dyn_into()?;
		submit.set_type("submit");
		submit.set_text_content(Some(&config.submit_button_text));
		form.append_child(&submit)?;

		let submit_slot = slot.clone();
		self.listeners.listen(&form, "submit", move |event: Event| {
			event.prevent_default();
			dispatch(&submit_slot, FormEvent::SubmitRequested);
		})?;

		self.frame.append_child(&form)?;
		self.form_error = Some(form_error);
		self.submit = Some(submit);
		Ok(())
	}

	fn show_field_errors(&self, errors: &FieldErrors, focus: Option<&str>) -> Result<(), JsValue> {
		for field in &self.fields {
			field.set_error(errors.get(field.field_id()).map(String::as_str))?;
		}
		if let Some(focus) = focus
			&& let Some(field) = self.fields.iter().find(|f| f.field_id() == focus)
		{
			field.focus()?;
		}
		Ok(())
	}

	fn set_form_error(&self, message: Option<&str>) -> Result<(), JsValue> {
		let Some(slot) = &self.form_error else {
			return Ok(());
		};
		match message {
			Some(message) => {
				slot.set_text_content(Some(message));
				slot.remove_attribute("hidden")
			}
			None => {
				slot.set_text_content(None);
				slot.set_attribute("hidden", "")
			}
		}
	}

	fn set_submitting(&self, busy: bool) {
		if let Some(submit) = &self.submit {
			submit.set_disabled(busy);
			let _ = if busy {
				submit.set_attribute("aria-busy", "true")
			} else {
				submit.remove_attribute("aria-busy")
			};
		}
	}
}
