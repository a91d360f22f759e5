//! Rule-based answerer: keyword intent plus regex token extraction.

use docqa_core::Answer;

use crate::extract::{extract_currency, extract_dates, kwh_quantity};
use crate::keywords::{classify, Intent, DISCLAIMER_TRIGGERS};

/// Confidence attached to any templated answer.
pub const HIT_CONFIDENCE: f32 = 0.7;

/// Confidence attached to [`FALLBACK_ANSWER`].
pub const FALLBACK_CONFIDENCE: f32 = 0.3;

pub const FALLBACK_ANSWER: &str = "I apologize, but I couldn't find specific information to answer your question. Please try rephrasing or ask something else about the document.";

const OVERCHARGE_DISCLAIMER: &str = "Based on the available information, I cannot definitively determine if this is an overcharge. Please compare with your previous bills or contact your utility provider for clarification.";

/// Answers `question` from `document_text` without any network call.
///
/// Never fails: when the intent is unknown or the document lacks the
/// needed token, returns [`FALLBACK_ANSWER`] at [`FALLBACK_CONFIDENCE`].
#[must_use]
pub fn answer(question: &str, document_text: &str) -> Answer {
    let question_lower = question.to_lowercase();
    let numbers = extract_currency(document_text);
    let dates = extract_dates(document_text);
    let intent = classify(&question_lower);

    tracing::debug!(
        ?intent,
        numbers = numbers.len(),
        dates = dates.len(),
        overcharge_concern = Intent::Overcharge.matches(&question_lower),
        "classified question"
    );

    let text = match intent {
        Some(Intent::Amount) => amount_answer(&question_lower, &numbers),
        Some(Intent::Date) => dates.first().map(|date| format!("The due date is {date}.")),
        Some(Intent::Usage) => usage_token(document_text, &numbers)
            .map(|usage| format!("The usage amount is {usage} units.")),
        Some(Intent::Overcharge) | None => None,
    };

    match text {
        Some(text) => Answer::new(text, HIT_CONFIDENCE),
        None => Answer::new(FALLBACK_ANSWER, FALLBACK_CONFIDENCE),
    }
}

/// Prefers the first `$`-prefixed token, then any numeric token.
fn amount_answer(question_lower: &str, numbers: &[&str]) -> Option<String> {
    let amount = numbers
        .iter()
        .find(|n| n.contains('$'))
        .or_else(|| numbers.first())?;

    let mut text = format!("The bill amount is {amount}. ");
    if DISCLAIMER_TRIGGERS.iter().any(|w| question_lower.contains(w)) {
        text.push_str(OVERCHARGE_DISCLAIMER);
    }
    Some(text)
}

/// Picks the usage figure.
///
/// A number written directly before `kWh` wins. Otherwise: if the document
/// mentions kWh anywhere, the first number; if not, the second number. The
/// latter can pick an unrelated figure and is kept as-is.
fn usage_token<'a>(document_text: &'a str, numbers: &[&'a str]) -> Option<&'a str> {
    if let Some(quantity) = kwh_quantity(document_text) {
        return Some(quantity);
    }
    if document_text.to_lowercase().contains("kwh") {
        numbers.first().copied()
    } else {
        numbers.get(1).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Your bill is $45.67 due 03/15/2024 for 120 kWh usage.";

    fn assert_confidence(answer: &Answer, expected: f32) {
        assert!(
            (answer.confidence - expected).abs() < f32::EPSILON,
            "expected confidence {expected}, got {}",
            answer.confidence
        );
    }

    #[test]
    fn bill_amount_from_sample() {
        let a = answer("What is the bill amount?", SAMPLE);
        assert_eq!(a.text, "The bill amount is $45.67. ");
        assert_confidence(&a, HIT_CONFIDENCE);
    }

    #[test]
    fn due_date_from_sample() {
        let a = answer("When is the due date?", SAMPLE);
        assert_eq!(a.text, "The due date is 03/15/2024.");
        assert_confidence(&a, HIT_CONFIDENCE);
    }

    #[test]
    fn usage_from_sample() {
        let a = answer("What was the usage?", SAMPLE);
        assert_eq!(a.text, "The usage amount is 120 units.");
        assert_confidence(&a, HIT_CONFIDENCE);
    }

    #[test]
    fn unrelated_question_gets_fallback() {
        let a = answer("Tell me a joke", SAMPLE);
        assert_eq!(a.text, FALLBACK_ANSWER);
        assert_confidence(&a, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn amount_priority_over_date() {
        let a = answer("what is the payment deadline amount", SAMPLE);
        assert_eq!(a.text, "The bill amount is $45.67. ");
    }

    #[test]
    fn overcharge_question_appends_disclaimer() {
        let a = answer("Why is my bill so HIGH?", SAMPLE);
        assert_eq!(
            a.text,
            format!("The bill amount is $45.67. {OVERCHARGE_DISCLAIMER}")
        );
        assert_confidence(&a, HIT_CONFIDENCE);
    }

    #[test]
    fn overcharge_word_appends_disclaimer() {
        let a = answer("Is this charge an overcharge?", SAMPLE);
        assert!(a.text.ends_with(OVERCHARGE_DISCLAIMER));
    }

    #[test]
    fn other_overcharge_keywords_do_not_add_disclaimer() {
        let a = answer("Is the cost excessive?", SAMPLE);
        assert_eq!(a.text, "The bill amount is $45.67. ");
    }

    #[test]
    fn amount_prefers_dollar_token_over_earlier_number() {
        let a = answer("what is the fee", "Account 12345 owes $99.10");
        assert_eq!(a.text, "The bill amount is $99.10. ");
    }

    #[test]
    fn amount_falls_back_to_first_number() {
        let a = answer("what is the price", "Total owed 1,250.00 by Friday");
        assert_eq!(a.text, "The bill amount is 1,250.00. ");
    }

    #[test]
    fn amount_without_numbers_gets_fallback() {
        let a = answer("what is the bill amount", "No figures here.");
        assert_eq!(a.text, FALLBACK_ANSWER);
        assert_confidence(&a, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn date_question_without_dates_gets_fallback() {
        let a = answer("When is the due date?", "Total $10.00");
        assert_eq!(a.text, FALLBACK_ANSWER);
        assert_confidence(&a, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn usage_without_kwh_uses_second_number() {
        let a = answer("How much was consumption?", "Meter 100 read 250 this month");
        assert_eq!(a.text, "The usage amount is 250 units.");
    }

    #[test]
    fn usage_with_kwh_mention_uses_first_number() {
        let a = answer("what was my usage", "Rate 12 per kWh, total 300");
        assert_eq!(a.text, "The usage amount is 12 units.");
    }

    #[test]
    fn usage_with_single_number_falls_back_without_panicking() {
        let a = answer("what was my usage", "Meter reading 42");
        assert_eq!(a.text, FALLBACK_ANSWER);
        assert_confidence(&a, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn usage_with_empty_document_falls_back() {
        let a = answer("units used?", "");
        assert_eq!(a.text, FALLBACK_ANSWER);
    }

    #[test]
    fn question_case_is_ignored() {
        let a = answer("WHEN IS THE DUE DATE", SAMPLE);
        assert_eq!(a.text, "The due date is 03/15/2024.");
    }
}
