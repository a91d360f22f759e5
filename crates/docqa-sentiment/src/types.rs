use serde::{Deserialize, Serialize};

/// Overall sentiment label assigned by Comprehend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "POSITIVE"),
            Sentiment::Negative => write!(f, "NEGATIVE"),
            Sentiment::Neutral => write!(f, "NEUTRAL"),
            Sentiment::Mixed => write!(f, "MIXED"),
        }
    }
}

/// Per-label confidence scores, each in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentScore {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}

/// `DetectSentiment` response body.
///
/// Fields this crate does not model are kept in `extra` so the payload
/// round-trips to callers without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SentimentResult {
    pub sentiment: Sentiment,
    pub sentiment_score: SentimentScore,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct DetectSentimentRequest<'a> {
    pub text: &'a str,
    pub language_code: &'a str,
}

/// AWS JSON-protocol error body. Services disagree on the casing of
/// `message`, so both spellings are accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct AwsErrorBody {
    #[serde(rename = "__type", default)]
    pub error_type: Option<String>,
    #[serde(alias = "Message", default)]
    pub message: Option<String>,
}
