use async_trait::async_trait;
use book_flow::{Context, NextAction, Result, Task, TaskResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::session_keys;
use crate::config::FallbackMarkerPolicy;
use crate::fallback::fallback_recommendations;

/// Why a request ended up on the keyword fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    BackendUnavailable,
    MalformedOutput,
    NoValidRecommendations,
    WorkflowFailure,
}

impl FallbackReason {
    /// Whether a response produced for this reason carries `source: "fallback"`.
    pub fn marks_response(self, policy: FallbackMarkerPolicy) -> bool {
        match policy {
            FallbackMarkerPolicy::Always => true,
            FallbackMarkerPolicy::BackendOnly => {
                matches!(self, Self::BackendUnavailable | Self::WorkflowFailure)
            }
        }
    }
}

/// Record `reason` and jump to the fallback task.
pub async fn route_to_fallback(context: &Context, reason: FallbackReason) -> Result<TaskResult> {
    context.set(session_keys::FALLBACK_REASON, reason).await?;
    Ok(TaskResult::new_with_status(
        NextAction::GoTo(FallbackTask::task_id()),
        format!("Falling back: {reason:?}"),
    ))
}

/// Task that answers from the keyword table. Always succeeds.
pub struct FallbackTask {
    policy: FallbackMarkerPolicy,
}

impl FallbackTask {
    pub fn new(policy: FallbackMarkerPolicy) -> Self {
        Self { policy }
    }

    pub fn task_id() -> String {
        std::any::type_name::<Self>().to_string()
    }
}

#[async_trait]
impl Task for FallbackTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let query: String = context.require(session_keys::QUERY).await?;
        let reason = context
            .get::<FallbackReason>(session_keys::FALLBACK_REASON)
            .await
            .unwrap_or(FallbackReason::WorkflowFailure);

        let recommendations = fallback_recommendations(&query);
        warn!(
            reason = ?reason,
            count = recommendations.len(),
            "Using keyword fallback recommendations"
        );

        context
            .set(session_keys::RECOMMENDATIONS, recommendations)
            .await?;
        context
            .set(session_keys::MARK_FALLBACK, reason.marks_response(self.policy))
            .await?;

        Ok(TaskResult::new_with_status(NextAction::End, "Fallback delivered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recommendation;

    #[test]
    fn test_marker_policy() {
        use FallbackMarkerPolicy::*;
        use FallbackReason::*;

        assert!(BackendUnavailable.marks_response(BackendOnly));
        assert!(WorkflowFailure.marks_response(BackendOnly));
        assert!(!MalformedOutput.marks_response(BackendOnly));
        assert!(!NoValidRecommendations.marks_response(BackendOnly));
        assert!(MalformedOutput.marks_response(Always));
        assert!(NoValidRecommendations.marks_response(Always));
    }

    #[tokio::test]
    async fn test_fallback_task_answers_from_keywords() {
        let context = Context::new();
        context.set(session_keys::QUERY, "I want something scary").await.unwrap();
        context
            .set(session_keys::FALLBACK_REASON, FallbackReason::BackendUnavailable)
            .await
            .unwrap();

        let result = FallbackTask::new(FallbackMarkerPolicy::BackendOnly)
            .run(context.clone())
            .await
            .unwrap();

        assert_eq!(result.next_action, NextAction::End);
        let recs: Vec<Recommendation> = context.get(session_keys::RECOMMENDATIONS).await.unwrap();
        assert_eq!(recs[0].book_id, "18");
        assert_eq!(recs[0].confidence, 0.90);
        assert_eq!(context.get::<bool>(session_keys::MARK_FALLBACK).await, Some(true));
    }
}
