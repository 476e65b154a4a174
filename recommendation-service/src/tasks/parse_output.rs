use async_trait::async_trait;
use book_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::{info, warn};

use super::fallback::{FallbackReason, route_to_fallback};
use super::session_keys;
use crate::extraction::parse_model_recommendations;

/// Task that recovers the recommendation array from the model's free text
pub struct ParseModelOutputTask;

#[async_trait]
impl Task for ParseModelOutputTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let output: String = context.require(session_keys::MODEL_OUTPUT).await?;

        match parse_model_recommendations(&output) {
            Ok(recommendations) => {
                info!(count = recommendations.len(), "Parsed model recommendations");
                context
                    .set(session_keys::RECOMMENDATIONS, recommendations)
                    .await?;
                Ok(TaskResult::new(NextAction::Continue))
            }
            Err(e) => {
                warn!(error = %e, raw = %output, "Failed to parse model output");
                route_to_fallback(&context, FallbackReason::MalformedOutput).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recommendation;
    use crate::tasks::FallbackTask;

    #[tokio::test]
    async fn test_parses_embedded_array() {
        let context = Context::new();
        context
            .set(
                session_keys::MODEL_OUTPUT,
                r#"Here you go: [{"id":"1","bookId":"7","reason":"Epic.","confidence":0.93}] Enjoy."#,
            )
            .await
            .unwrap();

        let result = ParseModelOutputTask.run(context.clone()).await.unwrap();

        assert_eq!(result.next_action, NextAction::Continue);
        let recs: Vec<Recommendation> = context.get(session_keys::RECOMMENDATIONS).await.unwrap();
        assert_eq!(recs, vec![Recommendation::new("1", "7", "Epic.", 0.93)]);
    }

    #[tokio::test]
    async fn test_prose_only_routes_to_fallback() {
        let context = Context::new();
        context
            .set(session_keys::MODEL_OUTPUT, "I would suggest Dune.")
            .await
            .unwrap();

        let result = ParseModelOutputTask.run(context.clone()).await.unwrap();

        assert_eq!(result.next_action, NextAction::GoTo(FallbackTask::task_id()));
        assert_eq!(
            context.get::<FallbackReason>(session_keys::FALLBACK_REASON).await,
            Some(FallbackReason::MalformedOutput)
        );
    }
}
