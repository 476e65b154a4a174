use std::sync::Arc;

use async_trait::async_trait;
use book_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::{error, info};

use super::fallback::{FallbackReason, route_to_fallback};
use super::session_keys;
use crate::backend::GenerativeBackend;
use crate::catalog::Catalog;
use crate::prompt::build_prompt;

/// Task that asks the generative backend for recommendations.
///
/// Single attempt, no retries: any backend failure routes straight to the
/// fallback task.
pub struct InvokeModelTask {
    backend: Arc<dyn GenerativeBackend>,
    catalog: Catalog,
}

impl InvokeModelTask {
    pub fn new(backend: Arc<dyn GenerativeBackend>, catalog: Catalog) -> Self {
        Self { backend, catalog }
    }
}

#[async_trait]
impl Task for InvokeModelTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let query: String = context.require(session_keys::QUERY).await?;
        let prompt = build_prompt(&self.catalog, &query);

        info!(backend = %self.backend.name(), query = %query, "Invoking generative backend");

        match self.backend.complete(&prompt).await {
            Ok(answer) => {
                info!(chars = answer.len(), "Backend answered");
                context.set(session_keys::MODEL_OUTPUT, answer).await?;
                Ok(TaskResult::new_with_status(
                    NextAction::Continue,
                    "Model answered",
                ))
            }
            Err(e) => {
                error!(backend = %self.backend.name(), error = %e, "Generative backend failed");
                route_to_fallback(&context, FallbackReason::BackendUnavailable).await
            }
        }
    }
}
