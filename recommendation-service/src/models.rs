use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A single suggestion returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub book_id: String,
    pub reason: String,
    pub confidence: f64,
}

impl Recommendation {
    pub fn new(
        id: impl Into<String>,
        book_id: impl Into<String>,
        reason: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            book_id: book_id.into(),
            reason: reason.into(),
            confidence,
        }
    }
}

/// Models are asked for string ids but sometimes answer with bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Marks responses produced by the keyword fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<RecommendationSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Query is required")]
    MissingQuery,
}

/// Pull the `query` field out of a raw request body.
///
/// Anything other than a JSON object carrying a non-empty string `query`
/// counts as a missing query. Whitespace is a query like any other and is
/// returned untouched.
pub fn parse_query(body: &[u8]) -> Result<String, InputError> {
    let payload: Value = serde_json::from_slice(body).map_err(|_| InputError::MissingQuery)?;
    match payload.get("query").and_then(Value::as_str) {
        Some(query) if !query.is_empty() => Ok(query.to_string()),
        _ => Err(InputError::MissingQuery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_query() {
        assert_eq!(
            parse_query(br#"{"query":"I want something scary"}"#).unwrap(),
            "I want something scary"
        );
        assert_eq!(parse_query(b"{}"), Err(InputError::MissingQuery));
        assert_eq!(parse_query(br#"{"query":""}"#), Err(InputError::MissingQuery));
        assert_eq!(parse_query(br#"{"query":"   "}"#).unwrap(), "   ");
        assert_eq!(parse_query(br#"{"query":42}"#), Err(InputError::MissingQuery));
        assert_eq!(parse_query(b"not json"), Err(InputError::MissingQuery));
        assert_eq!(parse_query(b""), Err(InputError::MissingQuery));
    }

    #[test]
    fn test_recommendation_accepts_numeric_ids() {
        let rec: Recommendation = serde_json::from_value(json!({
            "id": 1,
            "bookId": 18,
            "reason": "dark",
            "confidence": 0.9
        }))
        .unwrap();
        assert_eq!(rec.id, "1");
        assert_eq!(rec.book_id, "18");
    }

    #[test]
    fn test_response_omits_source_on_model_path() {
        let response = RecommendationResponse {
            recommendations: vec![Recommendation::new("1", "2", "space", 0.95)],
            query: "space".into(),
            source: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("source").is_none());
        assert_eq!(value["recommendations"][0]["bookId"], "2");

        let response = RecommendationResponse {
            source: Some(RecommendationSource::Fallback),
            ..response
        };
        assert_eq!(serde_json::to_value(&response).unwrap()["source"], "fallback");
    }
}
