//! Trigger phrases used to classify bill questions.
//!
//! Matching is plain substring containment against the lower-cased
//! question, so `"billing"` triggers on `"bill"`.

pub const AMOUNT_KEYWORDS: &[&str] = &[
    "amount", "bill", "charge", "payment", "cost", "price", "fee",
];

pub const DATE_KEYWORDS: &[&str] = &["due date", "deadline", "payment date", "due by"];

pub const USAGE_KEYWORDS: &[&str] = &["usage", "consumption", "used", "kwh", "units"];

pub const OVERCHARGE_KEYWORDS: &[&str] = &["overcharge", "excessive", "high", "expensive", "wrong"];

/// Words that append the overcharge disclaimer to an amount answer.
///
/// Narrower than [`OVERCHARGE_KEYWORDS`].
pub const DISCLAIMER_TRIGGERS: &[&str] = &["overcharge", "high"];

/// Topical category of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Amount,
    Date,
    Usage,
    Overcharge,
}

impl Intent {
    /// Intents tried by [`classify`], highest priority first.
    pub const PRIORITY: [Intent; 3] = [Intent::Amount, Intent::Date, Intent::Usage];

    #[must_use]
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Amount => AMOUNT_KEYWORDS,
            Intent::Date => DATE_KEYWORDS,
            Intent::Usage => USAGE_KEYWORDS,
            Intent::Overcharge => OVERCHARGE_KEYWORDS,
        }
    }

    /// Whether `question_lower` contains any of this intent's keywords.
    /// Expects an already lower-cased question.
    #[must_use]
    pub fn matches(self, question_lower: &str) -> bool {
        self.keywords().iter().any(|k| question_lower.contains(k))
    }
}

/// Returns the first intent in [`Intent::PRIORITY`] whose keywords occur in
/// the lower-cased question.
///
/// Classification is single-label: a question mentioning both an amount and
/// a deadline is an amount question. [`Intent::Overcharge`] is never
/// returned.
#[must_use]
pub fn classify(question_lower: &str) -> Option<Intent> {
    Intent::PRIORITY
        .into_iter()
        .find(|intent| intent.matches(question_lower))
}
