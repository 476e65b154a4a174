use std::sync::Arc;

use book_flow::{Context, Graph};
use tracing::{error, info, instrument};

use crate::backend::GenerativeBackend;
use crate::catalog::Catalog;
use crate::config::RecommenderOptions;
use crate::fallback::fallback_recommendations;
use crate::models::{Recommendation, RecommendationResponse, RecommendationSource};
use crate::tasks::{FallbackReason, session_keys};
use crate::workflow::build_recommendation_workflow;

/// Turns a free-text query into recommendations.
///
/// Stateless per request: each call gets a fresh context and only reads the
/// shared graph, so concurrent calls need no coordination.
pub struct Recommender {
    graph: Arc<Graph>,
    options: RecommenderOptions,
}

impl Recommender {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        catalog: Catalog,
        options: RecommenderOptions,
    ) -> Self {
        Self::from_graph(build_recommendation_workflow(backend, catalog, options), options)
    }

    /// Serve requests with a prebuilt graph. It must leave `recommendations`
    /// in the context; if it does not, the request falls back.
    pub fn from_graph(graph: Graph, options: RecommenderOptions) -> Self {
        Self {
            graph: Arc::new(graph),
            options,
        }
    }

    /// Never fails: anything going wrong inside the workflow ends in the
    /// keyword fallback.
    #[instrument(skip(self))]
    pub async fn recommend(&self, query: &str) -> RecommendationResponse {
        match self.run_workflow(query).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Recommendation workflow failed, using keyword fallback");
                let reason = FallbackReason::WorkflowFailure;
                RecommendationResponse {
                    recommendations: fallback_recommendations(query),
                    query: query.to_string(),
                    source: reason
                        .marks_response(self.options.marker_policy)
                        .then_some(RecommendationSource::Fallback),
                }
            }
        }
    }

    async fn run_workflow(&self, query: &str) -> book_flow::Result<RecommendationResponse> {
        let context = Context::new();
        context.set(session_keys::QUERY, query).await?;

        let execution = self.graph.execute(context.clone()).await?;
        info!(path = ?execution.path, "Recommendation workflow finished");

        let recommendations: Vec<Recommendation> =
            context.require(session_keys::RECOMMENDATIONS).await?;
        let marked = context
            .get::<bool>(session_keys::MARK_FALLBACK)
            .await
            .unwrap_or(false);

        Ok(RecommendationResponse {
            recommendations,
            query: query.to_string(),
            source: marked.then_some(RecommendationSource::Fallback),
        })
    }
}
