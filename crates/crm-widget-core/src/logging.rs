//! Logging layer shared by every widget crate
//!
//! The widgets run inside pages they do not own, so output is kept to
//! development builds and every line carries a `[crm-widget]` prefix that
//! separates it from the host page's own console traffic.
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-log` | `console.debug` | `eprintln!` |
//! | `info_log!` | Required | None | `console.info` | `eprintln!` |
//! | `warn_log!` | Required | None | `console.warn` | `eprintln!` |
//! | `error_log!` | Required | None | `console.error` | `eprintln!` |
//!
//! ```ignore
//! use crm_widget_core::{info_log, warn_log};
//!
//! info_log!("mounted form {}", form_id);
//! warn_log!("config fetch failed: {}", err);
//! ```

/// Prefix attached to every log line.
pub const LOG_PREFIX: &str = "[crm-widget]";

/// Logs a debug message (requires `debug-log` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-log", target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::debug_1(
			&format!("{} {}", $crate::logging::LOG_PREFIX, format!($($arg)*)).into(),
		);
	}};
}

/// Logs a debug message (requires `debug-log` feature + `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-log", not(target_arch = "wasm32")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		eprintln!("{} [DEBUG] {}", $crate::logging::LOG_PREFIX, format!($($arg)*));
	}};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-log")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::info_1(
			&format!("{} {}", $crate::logging::LOG_PREFIX, format!($($arg)*)).into(),
		);
	}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		eprintln!("{} [INFO] {}", $crate::logging::LOG_PREFIX, format!($($arg)*));
	}};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

/// Logs a warning (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::warn_1(
			&format!("{} {}", $crate::logging::LOG_PREFIX, format!($($arg)*)).into(),
		);
	}};
}

/// Logs a warning (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		eprintln!("{} [WARN] {}", $crate::logging::LOG_PREFIX, format!($($arg)*));
	}};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}

/// Logs an error (requires `debug_assertions`)
///
/// Errors that reach the user are always translated through
/// [`WidgetErrorKind::user_message`](crate::error::WidgetErrorKind::user_message);
/// this macro is where the technical detail goes instead.
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::__private::web_sys::console::error_1(
			&format!("{} {}", $crate::logging::LOG_PREFIX, format!($($arg)*)).into(),
		);
	}};
}

/// Logs an error (requires `debug_assertions`)
#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		eprintln!("{} [ERROR] {}", $crate::logging::LOG_PREFIX, format!($($arg)*));
	}};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		let _ = format_args!($($arg)*);
	}};
}
