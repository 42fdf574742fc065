//! Generic provider adapter
//!
//! One adapter type serves every vendor: the [`Vendor`] template builds
//! the request and reads the reply, the [`HttpTransport`] carries it.

use super::transport::HttpTransport;
use super::vendor::Vendor;
use super::LlmError;
use crate::types::ProviderName;
use std::fmt;
use std::sync::Arc;

/// Adapter bound to one vendor and one credential
pub struct ProviderAdapter {
    vendor: Box<dyn Vendor>,
    api_key: String,
    transport: Arc<dyn HttpTransport>,
}

impl ProviderAdapter {
    pub fn new(
        vendor: impl Vendor + 'static,
        api_key: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            vendor: Box::new(vendor),
            api_key: api_key.into(),
            transport,
        }
    }

    pub fn provider(&self) -> ProviderName {
        self.vendor.provider()
    }

    pub fn model(&self) -> &str {
        self.vendor.model()
    }

    /// Whether a non-empty credential was configured
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Send one message and return the reply text verbatim.
    ///
    /// Issues exactly one request. An empty credential is still sent; the
    /// vendor's rejection comes back as an error.
    pub fn send(&self, message: &str) -> Result<String, LlmError> {
        let request = self.vendor.build_request(message, &self.api_key);
        let response = self
            .transport
            .post_json(&request.url, &request.headers, &request.body)?;

        self.vendor.extract_reply(&response).ok_or_else(|| {
            LlmError::MalformedResponse(format!(
                "no text at {}",
                self.vendor.reply_pointer()
            ))
        })
    }

    /// Like [`send`](Self::send), but any failure becomes the fallback text
    pub fn reply(&self, message: &str) -> String {
        self.send(message).unwrap_or_else(|_| self.fallback())
    }

    pub fn fallback(&self) -> String {
        self.vendor.fallback()
    }
}

impl fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderAdapter")
            .field("provider", &self.provider())
            .field("model", &self.model())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{AnthropicVendor, GeminiVendor, OpenAiVendor, ScriptedTransport};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn adapter(vendor: impl Vendor + 'static, transport: &Arc<ScriptedTransport>) -> ProviderAdapter {
        ProviderAdapter::new(vendor, "key-123", transport.clone())
    }

    #[test]
    fn test_send_returns_reply_unmodified() {
        let transport = Arc::new(ScriptedTransport::new().with_json(json!({
            "choices": [{ "message": { "content": "  Hi there \n" } }]
        })));
        let openai = adapter(OpenAiVendor::new(), &transport);

        assert_eq!(openai.send("Hello"), Ok("  Hi there \n".to_string()));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_send_passes_credential_to_vendor() {
        let transport = Arc::new(ScriptedTransport::new().with_json(json!({
            "content": [{ "text": "ok" }]
        })));
        let claude = adapter(AnthropicVendor::new(), &transport);
        claude.send("Hello").unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.header("x-api-key"), Some("key-123"));
        assert_eq!(request.body["messages"][0]["content"], "Hello");
    }

    #[test]
    fn test_reply_falls_back_on_transport_error() {
        let transport = Arc::new(
            ScriptedTransport::new().with_error(LlmError::Connection("refused".into())),
        );
        let gemini = adapter(GeminiVendor::new(), &transport);
        assert_eq!(gemini.reply("Hello"), "Error contacting Gemini.");
    }

    #[test]
    fn test_reply_falls_back_on_status_error() {
        let transport = Arc::new(ScriptedTransport::new().with_error(LlmError::Api {
            status: 401,
            message: "Authentication failed".into(),
        }));
        let claude = adapter(AnthropicVendor::new(), &transport);
        assert_eq!(claude.reply("Hello"), "Error contacting Claude.");
    }

    #[test]
    fn test_unexpected_shape_is_malformed() {
        let transport = Arc::new(ScriptedTransport::new().with_json(json!({ "choices": [] })));
        let openai = adapter(OpenAiVendor::new(), &transport);

        let err = openai.send("Hello").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_no_caching_between_identical_sends() {
        let body = json!({ "choices": [{ "message": { "content": "again" } }] });
        let transport = Arc::new(
            ScriptedTransport::new()
                .with_json(body.clone())
                .with_json(body),
        );
        let openai = adapter(OpenAiVendor::new(), &transport);
        openai.send("same").unwrap();
        openai.send("same").unwrap();
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_has_credential() {
        let transport = Arc::new(ScriptedTransport::new());
        assert!(adapter(OpenAiVendor::new(), &transport).has_credential());
        let blank = ProviderAdapter::new(OpenAiVendor::new(), "  ", transport);
        assert!(!blank.has_credential());
    }

    #[test]
    fn test_debug_redacts_key() {
        let transport = Arc::new(ScriptedTransport::new());
        let debug = format!("{:?}", adapter(OpenAiVendor::new(), &transport));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("key-123"));
    }
}
