use serde::{Deserialize, Serialize};

/// An answer to a question about a document.
///
/// `confidence` is a fixed constant chosen by the code path that produced
/// the answer, not a score derived from evidence. It serializes as
/// `{"answer": ..., "confidence": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "answer")]
    pub text: String,
    pub confidence: f32,
}

impl Answer {
    /// Creates an answer, clamping `confidence` into `[0.0, 1.0]`.
    #[must_use]
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_answer_field_name() {
        let answer = Answer::new("The due date is 03/15/2024.", 0.7);
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["answer"], "The due date is 03/15/2024.");
        assert!((json["confidence"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(json.get("text").is_none());
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(Answer::new("x", 1.5).confidence, 1.0);
        assert_eq!(Answer::new("x", -0.2).confidence, 0.0);
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let answer: Answer =
            serde_json::from_str(r#"{"answer":"hello","confidence":0.95}"#).unwrap();
        assert_eq!(answer.text, "hello");
        assert!((answer.confidence - 0.95).abs() < f32::EPSILON);
    }
}
