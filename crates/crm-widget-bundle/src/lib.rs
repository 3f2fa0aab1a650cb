//! CRM Widget Bundle
//!
//! Turns the wasm-bindgen `no-modules` output of each entry crate into a
//! single `<script>`-loadable file: `crm-form.js` and `crm-chat.js`.
//!
//! ```text
//! wasm-bindgen --target no-modules --out-dir target/wasm-bindgen \
//!     target/wasm32-unknown-unknown/release/crm_form_embed.wasm
//! crm-widget-bundle widgets.toml --release
//! ```

pub mod build;
pub mod bundle;
pub mod error;
pub mod manifest;

pub use build::{BuildOptions, BuiltBundle, build_all};
pub use bundle::{BuildProfile, BundleInput, strip_source_maps};
pub use error::{BundleError, BundleResult};
pub use manifest::{BundleManifest, WidgetEntry};
