//! Best-effort recovery of structured recommendations from free model text.
//!
//! Models often wrap the requested JSON in prose or code fences, so the
//! answer is scanned for the first bracket-balanced array instead of being
//! decoded whole.

use thiserror::Error;

use crate::models::Recommendation;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No JSON array found in model output")]
    NoJsonArray,

    #[error("Could not decode recommendations: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Model returned an empty recommendation list")]
    Empty,
}

/// Slice of `text` spanning the first `[` and its matching `]`.
///
/// Brackets inside JSON string literals are ignored. Returns `None` when the
/// first array never closes.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and decode the recommendation array from a model answer.
pub fn parse_model_recommendations(text: &str) -> Result<Vec<Recommendation>, ExtractionError> {
    let raw = extract_json_array(text).ok_or(ExtractionError::NoJsonArray)?;
    let recommendations: Vec<Recommendation> = serde_json::from_str(raw)?;
    if recommendations.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(recommendations)
}
