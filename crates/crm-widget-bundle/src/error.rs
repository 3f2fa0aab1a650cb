//! Bundler errors

use std::path::PathBuf;

use crm_widget_core::WidgetVariant;

/// Result alias for bundler operations
pub type BundleResult<T> = Result<T, BundleError>;

/// Why a bundle could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
	/// Reading or writing a file failed.
	#[error("{}: {source}", path.display())]
	Io {
		/// The file involved
		path: PathBuf,
		/// The underlying error
		#[source]
		source: std::io::Error,
	},
	/// The manifest is not valid TOML or has the wrong shape.
	#[error("invalid manifest {}: {source}", path.display())]
	Manifest {
		/// The manifest file
		path: PathBuf,
		/// Parser error
		#[source]
		source: toml::de::Error,
	},
	/// A variant appears more than once in the manifest.
	#[error("widget `{0}` is listed more than once")]
	DuplicateVariant(WidgetVariant),
	/// The manifest lists no widgets.
	#[error("the manifest lists no widgets")]
	NoWidgets,
	/// The requested variant is not in the manifest.
	#[error("widget `{0}` is not in the manifest")]
	VariantNotListed(WidgetVariant),
	/// The JS glue is not wasm-bindgen `no-modules` output.
	#[error("glue for `{variant}` does not define `wasm_bindgen`; build with `--target no-modules`")]
	UnsupportedGlue {
		/// The variant being packed
		variant: WidgetVariant,
	},
	/// The wasm file does not start with the wasm magic number.
	#[error("{} is not a WebAssembly module", path.display())]
	NotWasm {
		/// The offending file
		path: PathBuf,
	},
}

impl BundleError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		BundleError::Io {
			path: path.into(),
			source,
		}
	}
}
