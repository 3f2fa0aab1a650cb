//! Network transport for the widget API
//!
//! Both calls resolve to a value the controller understands; no error or
//! rejected promise escapes to the host page.

use crm_widget_core::{FetchError, SubmitResponse};
use gloo_net::http::Request;
use serde_json::Value;

/// `GET` the form definition.
///
/// Network failures, non-2xx statuses and bodies that are not JSON all fail
/// the fetch; the shape of the JSON is checked later by the config parser.
pub async fn fetch_config(url: &str) -> Result<Value, FetchError> {
	let response = Request::get(url)
		.header("Accept", "application/json")
		.send()
		.await
		.map_err(|e| FetchError::Network(e.to_string()))?;

	if !response.ok() {
		return Err(FetchError::Status(response.status()));
	}

	response
		.json::<Value>()
		.await
		.map_err(|e| FetchError::Decode(e.to_string()))
}

/// `POST` a submission payload.
///
/// Any 2xx status is an accepted submission, whatever the body holds.
pub async fn post_submission(url: &str, payload: &Value) -> Result<SubmitResponse, FetchError> {
	let response = Request::post(url)
		.header("Accept", "application/json")
		.json(payload)
		.map_err(|e| FetchError::Decode(e.to_string()))?
		.send()
		.await
		.map_err(|e| FetchError::Network(e.to_string()))?;

	if !response.ok() {
		return Err(FetchError::Status(response.status()));
	}

	let body = response.text().await.unwrap_or_default();
	Ok(SubmitResponse::from_body(&body))
}
