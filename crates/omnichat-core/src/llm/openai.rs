//! OpenAI (ChatGPT) request template
//!
//! Connects to OpenAI's chat completions API.

use super::vendor::{join_url, Vendor, VendorRequest};
use crate::types::ProviderName;

/// ChatGPT via `POST /v1/chat/completions`
pub struct OpenAiVendor {
    /// Base URL for the API (supports OpenAI-compatible APIs)
    base_url: String,

    /// Model sent with every request
    model: String,
}

impl OpenAiVendor {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com";
    pub const DEFAULT_MODEL: &'static str = "gpt-3.5-turbo";
    pub const SYSTEM_PROMPT: &'static str = "You are a helpful assistant.";

    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    /// Create with a specific base URL (for OpenAI-compatible APIs like Azure, local proxies)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

impl Default for OpenAiVendor {
    fn default() -> Self {
        Self::new()
    }
}

impl Vendor for OpenAiVendor {
    fn provider(&self) -> ProviderName {
        ProviderName::ChatGpt
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, message: &str, api_key: &str) -> VendorRequest {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": Self::SYSTEM_PROMPT },
                { "role": "user", "content": message }
            ]
        });

        VendorRequest {
            url: join_url(&self.base_url, "/v1/chat/completions"),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("Authorization", format!("Bearer {}", api_key)),
            ],
            body,
        }
    }

    fn reply_pointer(&self) -> &'static str {
        "/choices/0/message/content"
    }
}
