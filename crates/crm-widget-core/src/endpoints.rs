//! Widget API endpoints

/// URL builder for the widget API rooted at a caller-supplied base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
	base: String,
}

impl ApiEndpoints {
	/// Creates endpoints under `api_url`. Trailing slashes are dropped so
	/// `https://api.example.com/` and `https://api.example.com` behave alike.
	pub fn new(api_url: impl AsRef<str>) -> Self {
		Self {
			base: api_url.as_ref().trim().trim_end_matches('/').to_string(),
		}
	}

	/// The normalised base URL.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// `GET {api}/forms/{formId}`
	pub fn form_config(&self, form_id: &str) -> String {
		format!("{}/forms/{}", self.base, urlencoding::encode(form_id))
	}

	/// `POST {api}/forms/{formId}/submissions`
	pub fn form_submissions(&self, form_id: &str) -> String {
		format!("{}/submissions", self.form_config(form_id))
	}

	/// `GET {api}/health`
	pub fn health(&self) -> String {
		format!("{}/health", self.base)
	}
}
