//! Vendor request templates
//!
//! Every supported vendor follows the same shape: build a payload, POST it
//! to a fixed endpoint, read the reply text at a fixed JSON path. A
//! [`Vendor`] supplies only the parts that differ.

use super::transport::Header;
use crate::types::ProviderName;
use serde_json::Value;

/// A fully built outbound request
#[derive(Debug, Clone, PartialEq)]
pub struct VendorRequest {
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Value,
}

/// Request template for one vendor
pub trait Vendor: Send + Sync {
    /// The provider this template answers for
    fn provider(&self) -> ProviderName;

    /// Active model identifier
    fn model(&self) -> &str;

    /// Build the request for a single user message
    fn build_request(&self, message: &str, api_key: &str) -> VendorRequest;

    /// JSON pointer to the reply text in a successful response
    fn reply_pointer(&self) -> &'static str;

    /// Extract the reply text, verbatim
    fn extract_reply(&self, response: &Value) -> Option<String> {
        response
            .pointer(self.reply_pointer())
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Text shown in place of a reply when the call fails
    fn fallback(&self) -> String {
        format!("Error contacting {}.", self.provider())
    }
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}
