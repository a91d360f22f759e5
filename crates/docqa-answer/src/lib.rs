//! Answering questions about bill documents.
//!
//! Two independent answerers live here:
//!
//! - [`heuristic::answer`] classifies the question by keyword and fills a
//!   template with currency/date tokens pulled from the document. It never
//!   fails.
//! - [`ChatAnswerer`] sends the document and question to an OpenAI-compatible
//!   chat-completion endpoint.

pub mod chat;
pub mod error;
pub mod extract;
pub mod heuristic;
pub mod keywords;
pub mod prompt;

mod types;

pub use chat::{ChatAnswerer, ChatSettings};
pub use docqa_core::Answer;
pub use error::{ChatError, RequestContext};
pub use keywords::{classify, Intent};
