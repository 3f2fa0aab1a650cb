//! CRM Widget DOM - browser driver for the embeddable widgets
//!
//! Executes the commands of [`crm_widget_core::FormController`] against the
//! real DOM. Everything a widget renders lives inside the shadow root of one
//! host element it appends to the caller's container, and nothing else on the
//! page is touched.
//!
//! ## Architecture
//!
//! - [`container`]: resolving the caller-supplied mount target
//! - [`isolation`]: host element, shadow root and scoped stylesheet
//! - [`listener`]: event listeners removed when dropped
//! - [`field`]: one control per form field
//! - [`http`]: config fetch and submission transport
//! - [`options`]: reading mount options from a JS object
//! - [`form`]: the form widget lifecycle (mount, unmount, state)
//! - [`live`]: ownership of mounted instances between host calls
//! - [`styles`]: the scoped stylesheets
//! - [`error`]: mount failures
//!
//! Only [`error`] and [`styles`] are available outside `wasm32`.

#![warn(missing_docs)]

pub mod error;
pub mod styles;

#[cfg(target_arch = "wasm32")]
pub mod container;
#[cfg(target_arch = "wasm32")]
pub mod field;
#[cfg(target_arch = "wasm32")]
pub mod form;
#[cfg(target_arch = "wasm32")]
pub mod http;
#[cfg(target_arch = "wasm32")]
pub mod isolation;
#[cfg(target_arch = "wasm32")]
pub mod listener;
#[cfg(target_arch = "wasm32")]
pub mod live;
#[cfg(target_arch = "wasm32")]
pub mod options;

pub use error::MountError;

#[cfg(target_arch = "wasm32")]
pub use container::Container;
#[cfg(target_arch = "wasm32")]
pub use form::FormWidget;
#[cfg(target_arch = "wasm32")]
pub use isolation::IsolatedRoot;
#[cfg(target_arch = "wasm32")]
pub use listener::{EventListener, ListenerRegistry};
#[cfg(target_arch = "wasm32")]
pub use options::CrmFormOptions;
