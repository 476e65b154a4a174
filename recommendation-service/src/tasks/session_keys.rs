//! Context keys shared by the recommendation tasks.

/// Original user query, as received
pub const QUERY: &str = "query";
/// Raw text answer of the generative backend
pub const MODEL_OUTPUT: &str = "model_output";
/// Current recommendation list, model or fallback
pub const RECOMMENDATIONS: &str = "recommendations";
/// Set by the validation task, read by its outgoing edge
pub const VALIDATION_PASSED: &str = "validation_passed";
/// Why the workflow left the model path
pub const FALLBACK_REASON: &str = "fallback_reason";
/// Whether the response carries the fallback marker
pub const MARK_FALLBACK: &str = "mark_fallback";
