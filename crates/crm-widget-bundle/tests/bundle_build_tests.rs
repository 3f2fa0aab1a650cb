//! Bundler integration tests
//!
//! Lays out fake wasm-bindgen output in a temp dir, runs the bundler against
//! a manifest and inspects the written scripts.

use std::fs;
use std::path::Path;

use crm_widget_bundle::{BuildOptions, BuildProfile, BundleError, BundleManifest, build_all};
use crm_widget_core::WidgetVariant;
use rstest::{fixture, rstest};
use tempfile::TempDir;

const WASM: &[u8] = &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

fn glue(stem: &str) -> String {
	format!(
		"let wasm_bindgen;\n(function() {{\n  const __exports = {{}};\n  wasm_bindgen = Object.assign(function() {{}}, {{ initSync() {{}} }}, __exports);\n}})();\n//# sourceMappingURL={stem}.js.map\n"
	)
}

fn write_artifacts(dir: &Path, variant: WidgetVariant) {
	let artifacts = dir.join("target/wasm-bindgen");
	fs::create_dir_all(&artifacts).unwrap();
	let stem = variant.artifact_stem();
	fs::write(artifacts.join(format!("{stem}.js")), glue(&stem)).unwrap();
	fs::write(artifacts.join(format!("{stem}_bg.wasm")), WASM).unwrap();
}

#[fixture]
fn workspace() -> TempDir {
	let dir = TempDir::new().unwrap();
	for variant in WidgetVariant::ALL {
		write_artifacts(dir.path(), variant);
	}
	fs::write(
		dir.path().join("widgets.toml"),
		"out_dir = \"dist\"\nversion = \"1.2.3\"\n\n[[widget]]\nvariant = \"form\"\n\n[[widget]]\nvariant = \"chat\"\n",
	)
	.unwrap();
	dir
}

fn load(dir: &TempDir) -> BundleManifest {
	BundleManifest::load(&dir.path().join("widgets.toml")).unwrap()
}

// ============================================================================
// Category 1: Output layout
// ============================================================================

#[rstest]
fn test_writes_one_script_per_variant(workspace: TempDir) {
	let built = build_all(&load(&workspace), &BuildOptions::default()).unwrap();

	assert_eq!(built.len(), 2);
	let form = fs::read_to_string(workspace.path().join("dist/crm-form.js")).unwrap();
	let chat = fs::read_to_string(workspace.path().join("dist/crm-chat.js")).unwrap();

	assert!(form.contains(r#"var NAME = "CrmForm";"#));
	assert!(!form.contains("CrmChat"));
	assert!(chat.contains(r#"var NAME = "CrmChat";"#));
	assert!(!chat.contains("CrmForm"));
	assert!(form.contains(r#"version: "1.2.3""#));
}

#[rstest]
fn test_reported_size_matches_file(workspace: TempDir) {
	let built = build_all(&load(&workspace), &BuildOptions::default()).unwrap();
	for bundle in built {
		let on_disk = fs::metadata(&bundle.path).unwrap().len() as usize;
		assert_eq!(on_disk, bundle.size);
	}
}

#[rstest]
fn test_only_and_out_dir_override(workspace: TempDir) {
	let target = workspace.path().join("public/js");
	let options = BuildOptions {
		profile: BuildProfile::Production,
		out_dir: Some(target.clone()),
		only: Some(WidgetVariant::Chat),
	};

	let built = build_all(&load(&workspace), &options).unwrap();

	assert_eq!(built.len(), 1);
	assert_eq!(built[0].path, target.join("crm-chat.js"));
	assert!(!target.join("crm-form.js").exists());
	assert!(!workspace.path().join("dist").exists());
}

// ============================================================================
// Category 2: Profiles
// ============================================================================

#[rstest]
#[case(BuildProfile::Development, true)]
#[case(BuildProfile::Production, false)]
fn test_profile_controls_source_maps(
	workspace: TempDir,
	#[case] profile: BuildProfile,
	#[case] keeps_map: bool,
) {
	let options = BuildOptions {
		profile,
		..BuildOptions::default()
	};
	build_all(&load(&workspace), &options).unwrap();

	let form = fs::read_to_string(workspace.path().join("dist/crm-form.js")).unwrap();
	assert_eq!(form.contains("sourceMappingURL"), keeps_map);
}

// ============================================================================
// Category 3: Failures leave no output
// ============================================================================

#[rstest]
fn test_missing_wasm_writes_nothing(workspace: TempDir) {
	fs::remove_file(
		workspace
			.path()
			.join("target/wasm-bindgen/crm_chat_embed_bg.wasm"),
	)
	.unwrap();

	let err = build_all(&load(&workspace), &BuildOptions::default()).unwrap_err();

	assert!(matches!(err, BundleError::Io { .. }));
	assert!(!workspace.path().join("dist").exists());
}

#[rstest]
fn test_non_wasm_payload_is_rejected(workspace: TempDir) {
	fs::write(
		workspace
			.path()
			.join("target/wasm-bindgen/crm_form_embed_bg.wasm"),
		b"<!doctype html>",
	)
	.unwrap();

	let err = build_all(&load(&workspace), &BuildOptions::default()).unwrap_err();
	assert!(matches!(err, BundleError::NotWasm { .. }));
}

#[rstest]
fn test_es_module_glue_is_rejected(workspace: TempDir) {
	fs::write(
		workspace.path().join("target/wasm-bindgen/crm_form_embed.js"),
		"export function mount() {}\nexport default async function init() {}\n",
	)
	.unwrap();

	let err = build_all(&load(&workspace), &BuildOptions::default()).unwrap_err();
	assert!(matches!(
		err,
		BundleError::UnsupportedGlue {
			variant: WidgetVariant::Form
		}
	));
}

#[rstest]
fn test_only_unlisted_variant(workspace: TempDir) {
	fs::write(
		workspace.path().join("widgets.toml"),
		"out_dir = \"dist\"\n[[widget]]\nvariant = \"form\"\n",
	)
	.unwrap();
	let options = BuildOptions {
		only: Some(WidgetVariant::Chat),
		..BuildOptions::default()
	};

	let err = build_all(&load(&workspace), &options).unwrap_err();
	assert!(matches!(err, BundleError::VariantNotListed(WidgetVariant::Chat)));
}
