use async_trait::async_trait;
use book_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::session_keys;
use crate::models::Recommendation;

/// Task to deliver the validated model recommendations
pub struct DeliveryTask;

#[async_trait]
impl Task for DeliveryTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let recommendations: Vec<Recommendation> =
            context.require(session_keys::RECOMMENDATIONS).await?;

        info!(count = recommendations.len(), "Delivering model recommendations");
        context.set(session_keys::MARK_FALLBACK, false).await?;

        Ok(TaskResult::new_with_status(NextAction::End, "Model recommendations delivered"))
    }
}
