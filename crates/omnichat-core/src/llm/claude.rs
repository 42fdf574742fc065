//! Claude (Anthropic) request template
//!
//! Connects to Anthropic's messages API.

use super::vendor::{join_url, Vendor, VendorRequest};
use crate::types::ProviderName;

/// Claude via `POST /v1/messages`
pub struct AnthropicVendor {
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicVendor {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";
    pub const DEFAULT_MODEL: &'static str = "claude-3-opus-20240229";
    pub const DEFAULT_MAX_TOKENS: u32 = 1000;
    pub const API_VERSION: &'static str = "2023-06-01";

    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }

    /// Create with a specific base URL (for proxies)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

impl Default for AnthropicVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl Vendor for AnthropicVendor {
    fn provider(&self) -> ProviderName {
        ProviderName::Claude
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, message: &str, api_key: &str) -> VendorRequest {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{ "role": "user", "content": message }]
        });

        VendorRequest {
            url: join_url(&self.base_url, "/v1/messages"),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("x-api-key", api_key.to_string()),
                ("anthropic-version", Self::API_VERSION.to_string()),
            ],
            body,
        }
    }

    fn reply_pointer(&self) -> &'static str {
        "/content/0/text"
    }
}
