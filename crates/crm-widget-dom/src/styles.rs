//! Scoped stylesheets
//!
//! Stylesheets are injected into each instance's shadow root and never into
//! the host document. Every sheet starts from [`HOST_RESET`] so inherited host
//! styles stop at the widget boundary.

/// Reset applied to every widget host element.
pub const HOST_RESET: &str = ":host { all: initial; display: block; }";

/// Rules shared by every widget variant.
pub const BASE_STYLES: &str = r#"
* { box-sizing: border-box; }
:host {
	font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
	font-size: 14px;
	line-height: 1.5;
	color: #1f2933;
}
[hidden] { display: none !important; }
button {
	font: inherit;
	cursor: pointer;
	border: 0;
	border-radius: 6px;
	padding: 0.6em 1.2em;
	background: #2563eb;
	color: #fff;
}
button:disabled { opacity: 0.6; cursor: progress; }
"#;

/// Rules of the form widget.
pub const FORM_STYLES: &str = r#"
.crm-form { display: flex; flex-direction: column; gap: 1em; }
.crm-form__title { margin: 0; font-size: 1.25em; }
.crm-form__description { margin: 0; color: #52606d; }
.crm-form__form { display: flex; flex-direction: column; gap: 1em; }
.crm-form__fields { display: flex; flex-direction: column; gap: 0.75em; }
.crm-form__field { display: flex; flex-direction: column; gap: 0.25em; }
.crm-form__label { font-weight: 600; }
.crm-form__label--checkbox { display: flex; align-items: center; gap: 0.5em; font-weight: 400; }
.crm-form__required { color: #c81e1e; }
.crm-form__control {
	font: inherit;
	padding: 0.5em;
	border: 1px solid #cbd2d9;
	border-radius: 6px;
	background: #fff;
	color: inherit;
}
.crm-form__control[aria-invalid="true"] { border-color: #c81e1e; }
.crm-form__field-error { color: #c81e1e; font-size: 0.875em; }
.crm-form__error { padding: 0.75em; border-radius: 6px; background: #fde8e8; color: #9b1c1c; }
.crm-form__status { color: #52606d; }
.crm-form__success { padding: 1em; border-radius: 6px; background: #def7ec; color: #03543f; }
.crm-form__submit, .crm-form__retry { align-self: flex-start; }
"#;

/// Builds a complete stylesheet for one variant.
pub fn scoped(variant_styles: &str) -> String {
	let mut sheet = String::with_capacity(
		HOST_RESET.len() + BASE_STYLES.len() + variant_styles.len() + 2,
	);
	sheet.push_str(HOST_RESET);
	sheet.push('\n');
	sheet.push_str(BASE_STYLES);
	sheet.push('\n');
	sheet.push_str(variant_styles);
	sheet
}
