// Dashboard service - Use case for building the sales dashboard
use crate::application::dashboard_composer::DashboardComposer;
use crate::application::sales_repository::SalesRepository;
use crate::domain::figure::Figure;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn SalesRepository>,
    composer: DashboardComposer,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn SalesRepository>, composer: DashboardComposer) -> Self {
        Self {
            repository,
            composer,
        }
    }

    pub async fn get_dashboard(&self) -> anyhow::Result<Figure> {
        let series = self
            .repository
            .sales_series()
            .await
            .context("Failed to load sales series")?;

        let figure = self
            .composer
            .compose_series(&series)
            .context("Failed to compose sales dashboard")?;

        tracing::debug!(
            "Composed dashboard: {} periods on a {}x{} grid, {} gauges, {} bar series, gauge ceiling {}",
            series.len(),
            figure.grid().rows(),
            figure.grid().cols(),
            figure.gauges().count(),
            figure.bar_series().count(),
            figure
                .gauges()
                .next()
                .map(|g| g.gauge.axis.range[1])
                .unwrap_or_default()
        );

        for (period, pair) in series.pairs() {
            tracing::trace!(
                "{}: actual {} vs target {} (delta {})",
                period,
                pair.actual,
                pair.target,
                pair.delta()
            );
        }

        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ComposeError;
    use crate::domain::sales::SalesSeries;
    use async_trait::async_trait;

    struct FixedRepository(SalesSeries);

    #[async_trait]
    impl SalesRepository for FixedRepository {
        async fn sales_series(&self) -> anyhow::Result<SalesSeries> {
            Ok(self.0.clone())
        }
    }

    struct FailingRepository;

    #[async_trait]
    impl SalesRepository for FailingRepository {
        async fn sales_series(&self) -> anyhow::Result<SalesSeries> {
            anyhow::bail!("source unavailable")
        }
    }

    fn service(repository: impl SalesRepository + 'static) -> DashboardService {
        DashboardService::new(Arc::new(repository), DashboardComposer::default())
    }

    #[tokio::test]
    async fn test_get_dashboard() {
        let series = SalesSeries::new(
            vec!["Jan".to_string(), "Feb".to_string()],
            vec![100.0, 200.0],
            vec![90.0, 210.0],
        );
        let figure = service(FixedRepository(series)).get_dashboard().await.unwrap();
        assert_eq!(figure.gauges().count(), 2);
        assert_eq!(figure.bar_series().count(), 2);
    }

    #[tokio::test]
    async fn test_get_dashboard_propagates_compose_error() {
        let series = SalesSeries::new(vec!["Jan".to_string(), "Feb".to_string()], vec![100.0], vec![90.0, 95.0]);
        let err = service(FixedRepository(series)).get_dashboard().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComposeError>(),
            Some(ComposeError::LengthMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_dashboard_propagates_repository_error() {
        let err = service(FailingRepository).get_dashboard().await.unwrap_err();
        assert!(format!("{:#}", err).contains("source unavailable"));
    }
}
