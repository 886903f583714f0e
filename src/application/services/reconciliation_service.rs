//! Deduplication analysis and source comparison service.

use std::sync::Arc;

use crate::domain::reconciliation::{
    AnalysisReport, ComparisonReport, SourceSets, analyze, compare,
};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

/// Runs the reconciliation engine over a fresh store snapshot.
///
/// Reports are never cached: each call reads the store once and recomputes
/// everything, so a call following an upload or clear always sees it.
pub struct ReconciliationService<R: CustomerRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> ReconciliationService<R> {
    /// Creates a new reconciliation service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Counts unique customers and duplicates across every source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Integrity`] if the snapshot holds a record the
    /// engine cannot place in a source set.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn analyze(&self) -> Result<AnalysisReport, AppError> {
        let sets = self.source_sets().await?;
        let report = analyze(&sets);
        metrics::counter!("reconciliation_runs_total", "kind" => "analyze").increment(1);

        tracing::debug!(
            total_records = report.total_records,
            unique_customers = report.unique_customers,
            duplicates_found = report.duplicates_found,
            "Deduplication analysis computed"
        );
        Ok(report)
    }

    /// Compares the id sets of every source with each other.
    ///
    /// # Errors
    ///
    /// See [`Self::analyze`].
    pub async fn compare(&self) -> Result<ComparisonReport, AppError> {
        let sets = self.source_sets().await?;
        let report = compare(&sets);
        metrics::counter!("reconciliation_runs_total", "kind" => "compare").increment(1);

        tracing::debug!(
            in_all_sources = report.in_all_sources.len(),
            partially_shared = report.partially_shared.len(),
            "Source comparison computed"
        );
        Ok(report)
    }

    async fn source_sets(&self) -> Result<SourceSets, AppError> {
        let snapshot = self.repository.snapshot().await?;
        Ok(SourceSets::build(&snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SourceSystem;
    use crate::domain::reconciliation::fixtures::scenario;
    use crate::domain::repositories::MockCustomerRepository;
    use serde_json::json;

    #[tokio::test]
    async fn test_analyze_scenario() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_snapshot()
            .times(1)
            .returning(|| Ok(scenario()));

        let service = ReconciliationService::new(Arc::new(mock_repo));

        let report = service.analyze().await.unwrap();

        assert_eq!(report.total_records, 12);
        assert_eq!(report.unique_customers, 8);
        assert_eq!(report.duplicates_found, 4);
        assert_eq!(report.unique_customer_ids, (101..=108).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_analyze_empty_store() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_snapshot()
            .times(1)
            .returning(|| Ok(vec![]));

        let service = ReconciliationService::new(Arc::new(mock_repo));

        assert_eq!(service.analyze().await.unwrap(), AnalysisReport::default());
    }

    #[tokio::test]
    async fn test_compare_scenario() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_snapshot()
            .times(1)
            .returning(|| Ok(scenario()));

        let service = ReconciliationService::new(Arc::new(mock_repo));

        let report = service.compare().await.unwrap();

        assert!(report.in_all_sources.is_empty());
        assert_eq!(report.source(SourceSystem::Salesforce).unwrap().only_in, vec![101]);
        assert_eq!(report.source(SourceSystem::Hubspot).unwrap().only_in, vec![106]);
        assert_eq!(
            report.source(SourceSystem::Internal).unwrap().only_in,
            vec![107, 108]
        );
    }

    #[tokio::test]
    async fn test_each_call_reads_a_fresh_snapshot() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_snapshot()
            .times(2)
            .returning(|| Ok(scenario()));

        let service = ReconciliationService::new(Arc::new(mock_repo));

        let first = service.analyze().await.unwrap();
        let second = service.analyze().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let mut mock_repo = MockCustomerRepository::new();

        mock_repo
            .expect_snapshot()
            .times(1)
            .returning(|| Err(AppError::internal("Database error", json!({}))));

        let service = ReconciliationService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.compare().await.unwrap_err(),
            AppError::Internal { .. }
        ));
    }
}
