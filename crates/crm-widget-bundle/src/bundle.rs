//! Embed script rendering
//!
//! One widget variant becomes one self-executing script:
//!
//! 1. a guard that leaves an existing global alone,
//! 2. the wasm-bindgen `no-modules` glue, whose `wasm_bindgen` binding stays
//!    local to the wrapper function,
//! 3. the wasm binary inlined as base64 and instantiated synchronously,
//! 4. a frozen `{ mount, version }` namespace installed as the one global.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crm_widget_core::WidgetVariant;
use crm_widget_core::variant::GLOBAL_MARKER;

use crate::error::{BundleError, BundleResult};

/// First four bytes of every wasm module.
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

const SOURCE_MAP_PREFIX: &str = "//# sourceMappingURL=";

/// Build profile of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildProfile {
	/// Keeps source map comments
	#[default]
	Development,
	/// Strips source map comments
	Production,
}

impl BuildProfile {
	/// Whether source map comments are stripped.
	pub fn strips_source_maps(&self) -> bool {
		matches!(self, BuildProfile::Production)
	}
}

/// Everything needed to render one variant's script.
#[derive(Debug, Clone)]
pub struct BundleInput {
	/// The variant being packed
	pub variant: WidgetVariant,
	/// wasm-bindgen `no-modules` JS glue
	pub glue: String,
	/// The compiled wasm module
	pub wasm: Vec<u8>,
	/// Version reported by the global's `version` property
	pub version: String,
}

impl BundleInput {
	/// Renders the script.
	pub fn render(&self, profile: BuildProfile) -> BundleResult<String> {
		if !defines_wasm_bindgen(&self.glue) {
			return Err(BundleError::UnsupportedGlue {
				variant: self.variant,
			});
		}

		let glue = if profile.strips_source_maps() {
			strip_source_maps(&self.glue)
		} else {
			self.glue.clone()
		};
		let encoded = STANDARD.encode(&self.wasm);

		let mut script = String::with_capacity(glue.len() + encoded.len() + 2048);
		script.push_str(&format!(
			"/*! {} v{} */\n",
			self.variant.bundle_file_name(),
			self.version
		));
		script.push_str(&prelude(self.variant));
		script.push_str(&glue);
		if !glue.ends_with('\n') {
			script.push('\n');
		}
		script.push_str(&epilogue(self.variant, &encoded, &self.version));
		Ok(script)
	}
}

/// Removes `//# sourceMappingURL=` comment lines.
pub fn strip_source_maps(js: &str) -> String {
	js.lines()
		.filter(|line| !line.trim_start().starts_with(SOURCE_MAP_PREFIX))
		.map(|line| format!("{}\n", line))
		.collect()
}

/// Whether `glue` declares the `wasm_bindgen` binding of `no-modules` output.
pub fn defines_wasm_bindgen(glue: &str) -> bool {
	["let wasm_bindgen", "var wasm_bindgen", "const wasm_bindgen"]
		.iter()
		.any(|decl| glue.contains(decl))
}

/// Whether `bytes` start with the wasm magic number.
pub fn is_wasm(bytes: &[u8]) -> bool {
	bytes.starts_with(&WASM_MAGIC)
}

fn prelude(variant: WidgetVariant) -> String {
	format!(
		r#"(function () {{
"use strict";
var NAME = "{name}";
var MARKER = "{marker}";
var root = typeof globalThis !== "undefined" ? globalThis : window;
var existing = root[NAME];
if (existing !== undefined) {{
	if (!(existing && existing[MARKER]) && typeof console !== "undefined") {{
		console.warn("[crm-widget] window." + NAME + " is already defined; the widget was not installed.");
	}}
	return;
}}
"#,
		name = variant.global_name(),
		marker = GLOBAL_MARKER,
	)
}

fn epilogue(variant: WidgetVariant, encoded_wasm: &str, version: &str) -> String {
	format!(
		r#"var binary = atob("{wasm}");
var bytes = new Uint8Array(binary.length);
for (var i = 0; i < binary.length; i++) {{
	bytes[i] = binary.charCodeAt(i);
}}
wasm_bindgen.initSync({{ module: bytes }});
var api = {{
	mount: function (options) {{
		return wasm_bindgen.mount(options);
	}},
	version: "{version}"
}};
Object.defineProperty(api, MARKER, {{ value: "{variant}", enumerable: false }});
Object.defineProperty(root, NAME, {{ value: Object.freeze(api), enumerable: true, writable: false, configurable: false }});
}})();
"#,
		wasm = encoded_wasm,
		version = version,
		variant = variant.as_str(),
	)
}
