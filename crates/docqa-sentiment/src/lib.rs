//! Sentiment detection for document text via AWS Comprehend.
//!
//! [`ComprehendClient`] signs each `DetectSentiment` request with AWS
//! Signature Version 4 and returns the provider's [`SentimentResult`]
//! unmodified. Failures are logged and returned; nothing is retried.

pub mod client;
pub mod error;
pub mod types;

mod signer;

pub use client::ComprehendClient;
pub use docqa_core::AwsCredentials;
pub use error::SentimentError;
pub use types::{Sentiment, SentimentResult, SentimentScore};
