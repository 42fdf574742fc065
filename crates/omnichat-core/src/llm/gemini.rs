//! Gemini (Google AI) request template
//!
//! Connects to Google's generateContent API. The key travels in the
//! query string, so request URLs must never be logged.

use super::vendor::{join_url, Vendor, VendorRequest};
use crate::types::ProviderName;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Gemini via `POST /v1beta/models/{model}:generateContent`
pub struct GeminiVendor {
    base_url: String,
    model: String,
}

impl GeminiVendor {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    pub const DEFAULT_MODEL: &'static str = "gemini-pro";

    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    /// Create with a specific base URL
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

impl Default for GeminiVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl Vendor for GeminiVendor {
    fn provider(&self) -> ProviderName {
        ProviderName::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, message: &str, api_key: &str) -> VendorRequest {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": message }] }]
        });

        let path = format!("/v1beta/models/{}:generateContent", self.model);
        VendorRequest {
            url: format!(
                "{}?key={}",
                join_url(&self.base_url, &path),
                utf8_percent_encode(api_key, QUERY_VALUE)
            ),
            headers: vec![("Content-Type", "application/json".to_string())],
            body,
        }
    }

    fn reply_pointer(&self) -> &'static str {
        "/candidates/0/content/parts/0/text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let request = GeminiVendor::new().build_request("Hello", "AIza-test");

        assert_eq!(
            request.url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent?key=AIza-test"
        );
        assert_eq!(
            request.headers,
            vec![("Content-Type", "application/json".to_string())]
        );
        assert_eq!(
            request.body,
            json!({ "contents": [{ "parts": [{ "text": "Hello" }] }] })
        );
    }

    #[test]
    fn test_extract_reply() {
        let response = json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hola" }, { "text": "ignored" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(
            GeminiVendor::new().extract_reply(&response),
            Some("Hola".to_string())
        );
    }

    #[test]
    fn test_extract_reply_blocked_prompt() {
        let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert_eq!(GeminiVendor::new().extract_reply(&response), None);
    }

    #[test]
    fn test_model_override_changes_path() {
        let request = GeminiVendor::new()
            .with_model("gemini-1.5-flash")
            .build_request("x", "k");
        assert!(request
            .url
            .contains("/v1beta/models/gemini-1.5-flash:generateContent?key=k"));
    }

    #[test]
    fn test_key_is_percent_encoded() {
        let request = GeminiVendor::new().build_request("x", "a&b#c d");
        assert!(request.url.ends_with(":generateContent?key=a%26b%23c%20d"));
    }

    #[test]
    fn test_fallback() {
        assert_eq!(GeminiVendor::new().fallback(), "Error contacting Gemini.");
    }
}
