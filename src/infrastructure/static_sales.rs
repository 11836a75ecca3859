// Sales repository backed by the configured dataset
use crate::application::sales_repository::SalesRepository;
use crate::domain::sales::SalesSeries;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct StaticSalesRepository {
    series: SalesSeries,
}

impl StaticSalesRepository {
    pub fn new(series: SalesSeries) -> Self {
        Self { series }
    }
}

#[async_trait]
impl SalesRepository for StaticSalesRepository {
    async fn sales_series(&self) -> anyhow::Result<SalesSeries> {
        Ok(self.series.clone())
    }
}
