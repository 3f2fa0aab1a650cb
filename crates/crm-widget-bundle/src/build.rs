//! Packing every widget listed in a manifest

use std::fs;
use std::path::{Path, PathBuf};

use crm_widget_core::WidgetVariant;
use tracing::{debug, info};

use crate::bundle::{BuildProfile, BundleInput, is_wasm};
use crate::error::{BundleError, BundleResult};
use crate::manifest::{BundleManifest, WidgetEntry};

/// Options for one bundler run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
	/// Source map handling
	pub profile: BuildProfile,
	/// Replaces the manifest's `out_dir`
	pub out_dir: Option<PathBuf>,
	/// Packs only this variant
	pub only: Option<WidgetVariant>,
}

/// A written bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltBundle {
	/// Variant packed
	pub variant: WidgetVariant,
	/// Script written
	pub path: PathBuf,
	/// Script size in bytes
	pub size: usize,
}

/// Packs the selected widgets of `manifest` and writes one script per variant.
pub fn build_all(manifest: &BundleManifest, options: &BuildOptions) -> BundleResult<Vec<BuiltBundle>> {
	let out_dir = options
		.out_dir
		.clone()
		.unwrap_or_else(|| manifest.out_dir.clone());

	let selected: Vec<&WidgetEntry> = match options.only {
		Some(variant) => vec![
			manifest
				.widget(variant)
				.ok_or(BundleError::VariantNotListed(variant))?,
		],
		None => manifest.widgets.iter().collect(),
	};

	// Render everything before touching the output directory.
	let mut rendered = Vec::with_capacity(selected.len());
	for entry in selected {
		let input = read_input(entry, &manifest.version)?;
		let script = input.render(options.profile)?;
		debug!(
			variant = %entry.variant,
			wasm_bytes = input.wasm.len(),
			script_bytes = script.len(),
			"rendered bundle"
		);
		rendered.push((entry.variant, script));
	}

	fs::create_dir_all(&out_dir).map_err(|e| BundleError::io(&out_dir, e))?;
	let mut built = Vec::with_capacity(rendered.len());
	for (variant, script) in rendered {
		let path = out_dir.join(variant.bundle_file_name());
		fs::write(&path, &script).map_err(|e| BundleError::io(&path, e))?;
		info!(variant = %variant, path = %path.display(), "wrote bundle");
		built.push(BuiltBundle {
			variant,
			path,
			size: script.len(),
		});
	}
	Ok(built)
}

fn read_input(entry: &WidgetEntry, version: &str) -> BundleResult<BundleInput> {
	let glue = read_text(&entry.glue)?;
	let wasm = fs::read(&entry.wasm).map_err(|e| BundleError::io(&entry.wasm, e))?;
	if !is_wasm(&wasm) {
		return Err(BundleError::NotWasm {
			path: entry.wasm.clone(),
		});
	}
	Ok(BundleInput {
		variant: entry.variant,
		glue,
		wasm,
		version: version.to_string(),
	})
}

fn read_text(path: &Path) -> BundleResult<String> {
	fs::read_to_string(path).map_err(|e| BundleError::io(path, e))
}
