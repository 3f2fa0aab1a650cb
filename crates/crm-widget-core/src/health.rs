//! Backend health check wire format
//!
//! The widgets never call `/health`; the shape lives here so the backend and
//! its tests agree on one definition.
//!
//! ```
//! use crm_widget_core::health::HealthReport;
//!
//! let report = HealthReport::from_check(false);
//! assert_eq!(report.http_status(), 503);
//! assert_eq!(
//!     serde_json::to_string(&report).unwrap(),
//!     r#"{"status":"error","db":"disconnected"}"#
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Overall service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
	/// Serving normally
	Ok,
	/// Unable to serve
	Error,
}

/// Database reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseStatus {
	/// The database answered the check
	Connected,
	/// The check failed
	Disconnected,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
	/// Overall status
	pub status: HealthStatus,
	/// Database status
	pub db: DatabaseStatus,
}

impl HealthReport {
	/// Builds the report from the outcome of a database check.
	pub fn from_check(db_reachable: bool) -> Self {
		if db_reachable {
			Self {
				status: HealthStatus::Ok,
				db: DatabaseStatus::Connected,
			}
		} else {
			Self {
				status: HealthStatus::Error,
				db: DatabaseStatus::Disconnected,
			}
		}
	}

	/// Whether the service is healthy.
	pub fn is_healthy(&self) -> bool {
		self.status == HealthStatus::Ok
	}

	/// HTTP status code the report is served with.
	pub fn http_status(&self) -> u16 {
		if self.is_healthy() { 200 } else { 503 }
	}
}
