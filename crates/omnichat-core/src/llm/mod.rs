//! LLM integration module
//!
//! Provides single-shot chat with several hosted providers.
//!
//! Supported providers:
//! - ChatGPT (OpenAI chat completions)
//! - Claude (Anthropic messages API)
//! - Gemini (Google generateContent)
//!
//! Grok (XAI) and Perplexity are selectable but have no adapter.

mod adapter;
mod claude;
mod dispatcher;
mod error;
mod gemini;
mod openai;
mod transport;
mod vendor;

pub use adapter::ProviderAdapter;
pub use dispatcher::{Dispatcher, Reply, ReplyOutcome, NOT_IMPLEMENTED_TEXT};
pub use error::{FailureKind, LlmError};
pub use transport::{Header, HttpTransport, RecordedRequest, ScriptedTransport, UreqTransport};
pub use vendor::{Vendor, VendorRequest};

// Vendor templates
pub use claude::AnthropicVendor;
pub use gemini::GeminiVendor;
pub use openai::OpenAiVendor;
