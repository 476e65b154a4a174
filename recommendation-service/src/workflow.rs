use std::sync::Arc;

use book_flow::{Graph, GraphBuilder, Task};

use crate::backend::GenerativeBackend;
use crate::catalog::Catalog;
use crate::config::RecommenderOptions;
use crate::tasks::{
    DeliveryTask, FallbackTask, InvokeModelTask, ParseModelOutputTask, ValidationTask,
    session_keys,
};

pub const RECOMMENDATION_GRAPH_ID: &str = "recommendation_flow";

/// invoke -> parse -> validate -> deliver, with every failure jumping to
/// the keyword fallback.
pub fn build_recommendation_workflow(
    backend: Arc<dyn GenerativeBackend>,
    catalog: Catalog,
    options: RecommenderOptions,
) -> Graph {
    let invoke_task: Arc<dyn Task> = Arc::new(InvokeModelTask::new(backend, catalog));
    let parse_task: Arc<dyn Task> = Arc::new(ParseModelOutputTask);
    let validate_task: Arc<dyn Task> =
        Arc::new(ValidationTask::new(catalog, options.validate_book_ids));
    let deliver_task: Arc<dyn Task> = Arc::new(DeliveryTask);
    let fallback_task: Arc<dyn Task> = Arc::new(FallbackTask::new(options.marker_policy));

    let invoke_id = invoke_task.id().to_string();
    let parse_id = parse_task.id().to_string();
    let validate_id = validate_task.id().to_string();
    let deliver_id = deliver_task.id().to_string();
    let fallback_id = fallback_task.id().to_string();

    GraphBuilder::new(RECOMMENDATION_GRAPH_ID)
        .add_task(invoke_task)
        .add_task(parse_task)
        .add_task(validate_task)
        .add_task(deliver_task)
        .add_task(fallback_task)
        .add_edge(invoke_id, parse_id.clone())
        .add_edge(parse_id, validate_id.clone())
        .add_conditional_edge(
            validate_id,
            |ctx| {
                ctx.get_sync::<bool>(session_keys::VALIDATION_PASSED)
                    .unwrap_or(false)
            },
            deliver_id,
            fallback_id,
        )
        .build()
}
