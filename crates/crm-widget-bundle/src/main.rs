//! CRM Widget Bundle CLI
//!
//! ## Usage
//!
//! ```bash
//! crm-widget-bundle                       # reads ./widgets.toml
//! crm-widget-bundle widgets.toml --release
//! crm-widget-bundle --only chat --out-dir public/js
//! ```

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use crm_widget_bundle::manifest::DEFAULT_MANIFEST;
use crm_widget_bundle::{BuildOptions, BuildProfile, BundleManifest, build_all};
use crm_widget_core::WidgetVariant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crm-widget-bundle")]
#[command(about = "Pack CRM widget WASM builds into embeddable scripts", long_about = None)]
#[command(version)]
struct Cli {
	/// Path to the bundle manifest
	#[arg(value_name = "MANIFEST", default_value = DEFAULT_MANIFEST)]
	manifest: PathBuf,

	/// Directory to write the scripts to (overrides `out_dir`)
	#[arg(short, long, value_name = "DIR")]
	out_dir: Option<PathBuf>,

	/// Production build: strip source map comments
	#[arg(long)]
	release: bool,

	/// Pack a single widget (`form` or `chat`)
	#[arg(long, value_name = "VARIANT")]
	only: Option<WidgetVariant>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbosity: u8,
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbosity);

	if let Err(e) = run(cli) {
		eprintln!("{}: {:#}", "Error".red(), e);
		process::exit(1);
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let manifest = BundleManifest::load(&cli.manifest)
		.with_context(|| format!("loading {}", cli.manifest.display()))?;

	let options = BuildOptions {
		profile: if cli.release {
			BuildProfile::Production
		} else {
			BuildProfile::Development
		},
		out_dir: cli.out_dir,
		only: cli.only,
	};
	let built = build_all(&manifest, &options)?;

	for bundle in &built {
		println!(
			"{} {} ({}, {})",
			"Bundled:".green(),
			bundle.path.display(),
			bundle.variant.global_name().bold(),
			human_size(bundle.size)
		);
	}
	println!(
		"{} widget script(s) written{}",
		built.len().to_string().green(),
		if cli.release { " (release)" } else { "" }
	);
	Ok(())
}

fn init_tracing(verbosity: u8) {
	let default = match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn human_size(bytes: usize) -> String {
	match bytes {
		b if b >= 1024 * 1024 => format!("{:.1} MiB", b as f64 / (1024.0 * 1024.0)),
		b if b >= 1024 => format!("{:.1} KiB", b as f64 / 1024.0),
		b => format!("{} B", b),
	}
}
