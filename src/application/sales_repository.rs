// Repository trait for sales data access
use crate::domain::sales::SalesSeries;
use async_trait::async_trait;

#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Periods with their target and actual figures, in display order
    async fn sales_series(&self) -> anyhow::Result<SalesSeries>;
}
