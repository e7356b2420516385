//! Market data source abstraction

use crate::core::security::{HistoricalPoint, HistoryPeriod, Security};
use anyhow::Result;
use async_trait::async_trait;

/// Supplies security records and price history.
///
/// `lookup` returns `Ok(None)` when the symbol is unknown; errors are reserved
/// for the source itself failing.
#[async_trait]
pub trait StockCatalog: Send + Sync {
    async fn lookup(&self, symbol: &str) -> Result<Option<Security>>;

    /// Securities whose symbol or name contains `query`, ignoring case.
    async fn search(&self, query: &str) -> Result<Vec<Security>>;

    async fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<HistoricalPoint>>;

    /// Every security the catalog knows about.
    async fn all(&self) -> Result<Vec<Security>> {
        self.search("").await
    }
}
