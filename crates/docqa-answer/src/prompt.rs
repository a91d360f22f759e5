//! Fixed prompt for the chat answerer.

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions about documents. Use the provided document text to answer questions accurately. If the information isn't in the document, say so.";

/// User turn: the whole document followed by the question. Nothing is
/// truncated.
#[must_use]
pub fn user_message(document_text: &str, question: &str) -> String {
    format!("Document text: {document_text}\n\nQuestion: {question}")
}
