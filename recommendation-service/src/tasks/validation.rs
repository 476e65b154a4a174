use std::collections::HashSet;

use async_trait::async_trait;
use book_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::{info, warn};

use super::fallback::FallbackReason;
use super::session_keys;
use crate::catalog::Catalog;
use crate::fallback::MAX_RECOMMENDATIONS;
use crate::models::Recommendation;

/// Task that keeps only model suggestions pointing at real catalog books.
///
/// Sets `validation_passed`; the outgoing conditional edge sends an emptied
/// list to the fallback task.
pub struct ValidationTask {
    catalog: Catalog,
    enabled: bool,
}

impl ValidationTask {
    pub fn new(catalog: Catalog, enabled: bool) -> Self {
        Self { catalog, enabled }
    }

    /// Drop dangling, duplicate or out-of-range entries, order by descending
    /// confidence, cap the list and renumber ids from 1.
    pub fn sanitize(&self, recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
        let mut seen = HashSet::new();
        let mut kept: Vec<Recommendation> = recommendations
            .into_iter()
            .filter(|rec| {
                let known = self.catalog.contains(&rec.book_id);
                if !known {
                    warn!(book_id = %rec.book_id, "Dropping recommendation for unknown book");
                }
                known
                    && !rec.reason.trim().is_empty()
                    && (0.0..=1.0).contains(&rec.confidence)
                    && seen.insert(rec.book_id.clone())
            })
            .collect();

        // Stable, so equal confidences keep the model's order
        kept.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        kept.into_iter()
            .take(MAX_RECOMMENDATIONS)
            .enumerate()
            .map(|(index, rec)| Recommendation {
                id: (index + 1).to_string(),
                ..rec
            })
            .collect()
    }
}

#[async_trait]
impl Task for ValidationTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let recommendations: Vec<Recommendation> =
            context.require(session_keys::RECOMMENDATIONS).await?;

        if !self.enabled {
            context.set(session_keys::VALIDATION_PASSED, true).await?;
            return Ok(TaskResult::new_with_status(
                NextAction::Continue,
                "Validation disabled",
            ));
        }

        let received = recommendations.len();
        let valid = self.sanitize(recommendations);
        let passed = !valid.is_empty();
        info!(received, kept = valid.len(), "Validated model recommendations");

        context.set(session_keys::VALIDATION_PASSED, passed).await?;
        if passed {
            context.set(session_keys::RECOMMENDATIONS, valid).await?;
        } else {
            context
                .set(
                    session_keys::FALLBACK_REASON,
                    FallbackReason::NoValidRecommendations,
                )
                .await?;
        }

        Ok(TaskResult::new(NextAction::Continue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, book_id: &str, confidence: f64) -> Recommendation {
        Recommendation::new(id, book_id, "Because.", confidence)
    }

    #[test]
    fn test_sanitize() {
        let task = ValidationTask::new(Catalog::builtin(), true);
        let kept = task.sanitize(vec![
            rec("a", "999", 0.95),
            rec("b", "18", 0.92),
            rec("c", "18", 0.90),
            rec("d", "2", 1.5),
            Recommendation::new("e", "7", "  ", 0.8),
            rec("f", "7", 0.8),
        ]);

        assert_eq!(kept, vec![rec("1", "18", 0.92), rec("2", "7", 0.8)]);
    }

    #[test]
    fn test_sanitize_orders_by_confidence() {
        let task = ValidationTask::new(Catalog::builtin(), true);
        let kept = task.sanitize(vec![
            rec("1", "5", 0.8),
            rec("2", "21", 0.95),
            rec("3", "14", 0.8),
        ]);

        assert_eq!(
            kept,
            vec![rec("1", "21", 0.95), rec("2", "5", 0.8), rec("3", "14", 0.8)]
        );
    }

    #[test]
    fn test_sanitize_caps_length() {
        let task = ValidationTask::new(Catalog::builtin(), true);
        let many = (1..=8).map(|i| rec("x", &i.to_string(), 0.8)).collect();
        assert_eq!(task.sanitize(many).len(), MAX_RECOMMENDATIONS);
    }

    #[tokio::test]
    async fn test_all_unknown_fails_validation() {
        let context = Context::new();
        context
            .set(session_keys::RECOMMENDATIONS, vec![rec("1", "404", 0.9)])
            .await
            .unwrap();

        ValidationTask::new(Catalog::builtin(), true)
            .run(context.clone())
            .await
            .unwrap();

        assert_eq!(context.get::<bool>(session_keys::VALIDATION_PASSED).await, Some(false));
        assert_eq!(
            context.get::<FallbackReason>(session_keys::FALLBACK_REASON).await,
            Some(FallbackReason::NoValidRecommendations)
        );
    }

    #[tokio::test]
    async fn test_disabled_passes_everything_through() {
        let context = Context::new();
        context
            .set(session_keys::RECOMMENDATIONS, vec![rec("1", "404", 0.9)])
            .await
            .unwrap();

        ValidationTask::new(Catalog::builtin(), false)
            .run(context.clone())
            .await
            .unwrap();

        assert_eq!(context.get::<bool>(session_keys::VALIDATION_PASSED).await, Some(true));
        let recs: Vec<Recommendation> = context.get(session_keys::RECOMMENDATIONS).await.unwrap();
        assert_eq!(recs[0].book_id, "404");
    }
}
