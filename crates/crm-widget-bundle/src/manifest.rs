//! `widgets.toml` manifest
//!
//! ```toml
//! out_dir = "dist"
//! artifact_dir = "target/wasm-bindgen"
//!
//! [[widget]]
//! variant = "form"
//!
//! [[widget]]
//! variant = "chat"
//! glue = "pkg/chat/crm_chat_embed.js"
//! wasm = "pkg/chat/crm_chat_embed_bg.wasm"
//! ```
//!
//! Relative paths are resolved against the manifest's directory. `glue` and
//! `wasm` default to the wasm-bindgen output names inside `artifact_dir`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crm_widget_core::WidgetVariant;
use serde::Deserialize;

use crate::error::{BundleError, BundleResult};

/// Default file name of the manifest.
pub const DEFAULT_MANIFEST: &str = "widgets.toml";

/// Where wasm-bindgen output is looked up when a widget names no paths.
pub const DEFAULT_ARTIFACT_DIR: &str = "target/wasm-bindgen";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
	out_dir: PathBuf,
	#[serde(default)]
	artifact_dir: Option<PathBuf>,
	#[serde(default)]
	version: Option<String>,
	#[serde(default, rename = "widget")]
	widgets: Vec<RawWidget>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWidget {
	variant: WidgetVariant,
	#[serde(default)]
	glue: Option<PathBuf>,
	#[serde(default)]
	wasm: Option<PathBuf>,
}

/// One widget to pack, with resolved paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetEntry {
	/// Variant being packed
	pub variant: WidgetVariant,
	/// wasm-bindgen `no-modules` glue
	pub glue: PathBuf,
	/// The `_bg.wasm` module
	pub wasm: PathBuf,
}

/// A loaded manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleManifest {
	/// Directory the scripts are written to
	pub out_dir: PathBuf,
	/// Version stamped into each bundle
	pub version: String,
	/// Widgets in manifest order
	pub widgets: Vec<WidgetEntry>,
}

impl BundleManifest {
	/// Reads and validates the manifest at `path`.
	pub fn load(path: &Path) -> BundleResult<Self> {
		let text = fs::read_to_string(path).map_err(|e| BundleError::io(path, e))?;
		let base = path.parent().unwrap_or_else(|| Path::new("."));
		Self::parse(&text, base).map_err(|err| match err {
			ParseFailure::Toml(source) => BundleError::Manifest {
				path: path.to_path_buf(),
				source,
			},
			ParseFailure::Invalid(err) => err,
		})
	}

	fn parse(text: &str, base: &Path) -> Result<Self, ParseFailure> {
		let raw: RawManifest = toml::from_str(text).map_err(ParseFailure::Toml)?;
		if raw.widgets.is_empty() {
			return Err(ParseFailure::Invalid(BundleError::NoWidgets));
		}

		let artifact_dir = base.join(
			raw.artifact_dir
				.unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACT_DIR)),
		);
		let mut seen = HashSet::new();
		let mut widgets = Vec::with_capacity(raw.widgets.len());
		for widget in raw.widgets {
			if !seen.insert(widget.variant) {
				return Err(ParseFailure::Invalid(BundleError::DuplicateVariant(
					widget.variant,
				)));
			}
			let stem = widget.variant.artifact_stem();
			widgets.push(WidgetEntry {
				variant: widget.variant,
				glue: widget
					.glue
					.map(|p| base.join(p))
					.unwrap_or_else(|| artifact_dir.join(format!("{}.js", stem))),
				wasm: widget
					.wasm
					.map(|p| base.join(p))
					.unwrap_or_else(|| artifact_dir.join(format!("{}_bg.wasm", stem))),
			});
		}

		Ok(Self {
			out_dir: base.join(raw.out_dir),
			version: raw
				.version
				.unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
			widgets,
		})
	}

	/// The entry for `variant`, if listed.
	pub fn widget(&self, variant: WidgetVariant) -> Option<&WidgetEntry> {
		self.widgets.iter().find(|w| w.variant == variant)
	}
}

enum ParseFailure {
	Toml(toml::de::Error),
	Invalid(BundleError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	fn write_manifest(dir: &TempDir, body: &str) -> PathBuf {
		let path = dir.path().join(DEFAULT_MANIFEST);
		fs::write(&path, body).unwrap();
		path
	}

	#[rstest]
	fn test_defaults_to_wasm_bindgen_output_names() {
		let dir = TempDir::new().unwrap();
		let path = write_manifest(
			&dir,
			"out_dir = \"dist\"\n\n[[widget]]\nvariant = \"form\"\n",
		);

		let manifest = BundleManifest::load(&path).unwrap();

		assert_eq!(manifest.out_dir, dir.path().join("dist"));
		let form = manifest.widget(WidgetVariant::Form).unwrap();
		assert_eq!(
			form.glue,
			dir.path().join("target/wasm-bindgen/crm_form_embed.js")
		);
		assert_eq!(
			form.wasm,
			dir.path().join("target/wasm-bindgen/crm_form_embed_bg.wasm")
		);
		assert!(manifest.widget(WidgetVariant::Chat).is_none());
	}

	#[rstest]
	fn test_explicit_paths_and_version() {
		let dir = TempDir::new().unwrap();
		let path = write_manifest(
			&dir,
			r#"
out_dir = "public/widgets"
version = "2.3.4"

[[widget]]
variant = "chat"
glue = "pkg/chat.js"
wasm = "pkg/chat.wasm"
"#,
		);

		let manifest = BundleManifest::load(&path).unwrap();

		assert_eq!(manifest.version, "2.3.4");
		assert_eq!(
			manifest.widgets,
			vec![WidgetEntry {
				variant: WidgetVariant::Chat,
				glue: dir.path().join("pkg/chat.js"),
				wasm: dir.path().join("pkg/chat.wasm"),
			}]
		);
	}

	#[rstest]
	fn test_duplicate_variant_is_rejected() {
		let dir = TempDir::new().unwrap();
		let path = write_manifest(
			&dir,
			"out_dir = \"dist\"\n[[widget]]\nvariant = \"form\"\n[[widget]]\nvariant = \"form\"\n",
		);

		let err = BundleManifest::load(&path).unwrap_err();
		assert!(matches!(err, BundleError::DuplicateVariant(WidgetVariant::Form)));
	}

	#[rstest]
	#[case("out_dir = \"dist\"\n")]
	fn test_empty_widget_list_is_rejected(#[case] body: &str) {
		let dir = TempDir::new().unwrap();
		let path = write_manifest(&dir, body);
		assert!(matches!(
			BundleManifest::load(&path),
			Err(BundleError::NoWidgets)
		));
	}

	#[rstest]
	#[case("out_dir = \"dist\"\n[[widget]]\nvariant = \"survey\"\n")]
	#[case("[[widget]]\nvariant = \"form\"\n")]
	#[case("out_dir = \"dist\"\nminify = true\n[[widget]]\nvariant = \"form\"\n")]
	fn test_malformed_manifest(#[case] body: &str) {
		let dir = TempDir::new().unwrap();
		let path = write_manifest(&dir, body);
		assert!(matches!(
			BundleManifest::load(&path),
			Err(BundleError::Manifest { .. })
		));
	}

	#[rstest]
	fn test_missing_manifest_is_io_error() {
		let dir = TempDir::new().unwrap();
		let err = BundleManifest::load(&dir.path().join("nope.toml")).unwrap_err();
		assert!(matches!(err, BundleError::Io { .. }));
	}
}
