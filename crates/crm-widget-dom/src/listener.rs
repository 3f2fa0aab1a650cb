//! Event listeners tied to Rust lifetimes
//!
//! An [`EventListener`] removes itself from its target when dropped, so
//! dropping the [`ListenerRegistry`] of an instance detaches every handler it
//! installed. Closures are never leaked with `forget`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

/// One registered DOM event handler.
pub struct EventListener {
	target: EventTarget,
	event_type: &'static str,
	closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
	/// Adds `handler` for `event_type` on `target`.
	pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, JsValue>
	where
		F: FnMut(Event) + 'static,
	{
		let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
		target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event_type,
			closure,
		})
	}

	/// The event this listener handles.
	pub fn event_type(&self) -> &'static str {
		self.event_type
	}
}

impl Drop for EventListener {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event_type, self.closure.as_ref().unchecked_ref());
	}
}

impl std::fmt::Debug for EventListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventListener")
			.field("event_type", &self.event_type)
			.finish_non_exhaustive()
	}
}

/// Every listener installed by one widget instance.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
	listeners: Vec<EventListener>,
}

impl ListenerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Installs a listener and keeps it until [`ListenerRegistry::clear`].
	pub fn listen<F>(&mut self, target: &EventTarget, event_type: &'static str, handler: F) -> Result<(), JsValue>
	where
		F: FnMut(Event) + 'static,
	{
		self.listeners
			.push(EventListener::new(target, event_type, handler)?);
		Ok(())
	}

	/// Detaches every listener.
	pub fn clear(&mut self) {
		self.listeners.clear();
	}

	/// Number of installed listeners.
	pub fn len(&self) -> usize {
		self.listeners.len()
	}

	/// Whether no listener is installed.
	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty()
	}
}
