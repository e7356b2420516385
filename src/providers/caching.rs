use crate::core::cache::Cache;
use crate::core::catalog::StockCatalog;
use crate::core::security::{HistoricalPoint, HistoryPeriod, Security};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Memoizes `lookup` results of the wrapped catalog, including misses.
/// Failed lookups are not cached.
pub struct CachingCatalog<T: StockCatalog> {
    inner: T,
    cache: Arc<Cache<String, Option<Security>>>,
}

impl<T: StockCatalog> CachingCatalog<T> {
    pub fn new(inner: T, cache: Arc<Cache<String, Option<Security>>>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<T: StockCatalog> StockCatalog for CachingCatalog<T> {
    async fn lookup(&self, symbol: &str) -> Result<Option<Security>> {
        let key = symbol.to_string();
        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }
        let result = self.inner.lookup(symbol).await?;
        debug!("Caching lookup for {}", symbol);
        self.cache.put(key, result.clone()).await;
        Ok(result)
    }

    async fn search(&self, query: &str) -> Result<Vec<Security>> {
        self.inner.search(query).await
    }

    async fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<HistoricalPoint>> {
        self.inner.history(symbol, period).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl StockCatalog for CountingCatalog {
        async fn lookup(&self, symbol: &str) -> Result<Option<Security>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            match symbol {
                "AAPL" => Ok(Some(Security::new("AAPL", "Apple Inc.", 172.40))),
                "FAIL" => Err(anyhow!("source unavailable")),
                _ => Ok(None),
            }
        }

        async fn search(&self, _query: &str) -> Result<Vec<Security>> {
            Ok(Vec::new())
        }

        async fn history(
            &self,
            _symbol: &str,
            _period: HistoryPeriod,
        ) -> Result<Vec<HistoricalPoint>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_caching_catalog() {
        let catalog = CachingCatalog::new(
            CountingCatalog {
                call_count: AtomicUsize::new(0),
            },
            Arc::new(Cache::new()),
        );
        let calls = || catalog.inner.call_count.load(Ordering::SeqCst);

        // First call - should hit inner catalog
        let first = catalog.lookup("AAPL").await.unwrap().unwrap();
        assert_eq!(first.price, 172.40);
        assert_eq!(calls(), 1);

        // Second call - should be cached
        catalog.lookup("AAPL").await.unwrap();
        assert_eq!(calls(), 1);

        // Misses are cached too
        assert!(catalog.lookup("ZZZZ").await.unwrap().is_none());
        assert!(catalog.lookup("ZZZZ").await.unwrap().is_none());
        assert_eq!(calls(), 2);

        // Errors are retried
        assert!(catalog.lookup("FAIL").await.is_err());
        assert!(catalog.lookup("FAIL").await.is_err());
        assert_eq!(calls(), 4);
    }
}
