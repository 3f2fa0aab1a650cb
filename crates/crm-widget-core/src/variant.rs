//! Widget variants and their packaging contract
//!
//! Each variant ships as one self-executing script that installs exactly one
//! global. The names here are shared by the entry crates, the DOM layer and
//! the bundler so they cannot drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Name of the non-enumerable marker property set on every widget global.
pub const GLOBAL_MARKER: &str = "__crmWidget";

/// Attribute set on the host element of every mounted instance.
pub const HOST_ATTRIBUTE: &str = "data-crm-widget";

/// An independently loaded widget bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetVariant {
	/// The dynamic form widget
	Form,
	/// The chat widget shell
	Chat,
}

impl WidgetVariant {
	/// Every variant.
	pub const ALL: [WidgetVariant; 2] = [WidgetVariant::Form, WidgetVariant::Chat];

	/// Short name used in manifests and on the host element.
	pub fn as_str(&self) -> &'static str {
		match self {
			WidgetVariant::Form => "form",
			WidgetVariant::Chat => "chat",
		}
	}

	/// The single global the bundle installs.
	pub fn global_name(&self) -> &'static str {
		match self {
			WidgetVariant::Form => "CrmForm",
			WidgetVariant::Chat => "CrmChat",
		}
	}

	/// File name of the packaged script.
	pub fn bundle_file_name(&self) -> &'static str {
		match self {
			WidgetVariant::Form => "crm-form.js",
			WidgetVariant::Chat => "crm-chat.js",
		}
	}

	/// Value of [`HOST_ATTRIBUTE`] on this variant's host elements.
	pub fn host_attribute_value(&self) -> &'static str {
		self.as_str()
	}

	/// The cdylib crate that provides this variant's wasm module.
	pub fn entry_crate(&self) -> &'static str {
		match self {
			WidgetVariant::Form => "crm-form-embed",
			WidgetVariant::Chat => "crm-chat-embed",
		}
	}

	/// Stem of the wasm-bindgen output files (`{stem}.js`, `{stem}_bg.wasm`).
	pub fn artifact_stem(&self) -> String {
		self.entry_crate().replace('-', "_")
	}
}

impl fmt::Display for WidgetVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown widget variant `{0}` (expected `form` or `chat`)")]
pub struct UnknownVariant(pub String);

impl FromStr for WidgetVariant {
	type Err = UnknownVariant;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
			.ok_or_else(|| UnknownVariant(s.to_string()))
	}
}
