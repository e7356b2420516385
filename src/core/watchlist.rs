//! Durable, ordered set of watched symbols.
use crate::core::catalog::StockCatalog;
use crate::core::error::StoreError;
use crate::core::security::Security;
use crate::core::storage::{KeyValueCollection, get_json, put_json};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const WATCHLIST_COLLECTION: &str = "watchlist";
const SYMBOLS_KEY: &str = "symbols";

pub struct WatchlistStore {
    collection: Arc<dyn KeyValueCollection>,
}

impl WatchlistStore {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self { collection }
    }

    async fn read(&self) -> Result<Vec<String>, StoreError> {
        Ok(get_json(self.collection.as_ref(), SYMBOLS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Adds `symbol` exactly as given. Returns `false` if it was already
    /// present, in which case nothing is written.
    pub async fn add(&self, symbol: &str) -> Result<bool, StoreError> {
        let _guard = self.collection.write_lock().lock().await;
        let mut symbols = self.read().await?;
        if symbols.iter().any(|s| s == symbol) {
            debug!("{} already in watchlist", symbol);
            return Ok(false);
        }

        symbols.push(symbol.to_string());
        put_json(self.collection.as_ref(), SYMBOLS_KEY, &symbols).await?;
        info!("Added {} to watchlist", symbol);
        Ok(true)
    }

    /// Removes `symbol`. Returns `false` if it was not present.
    pub async fn remove(&self, symbol: &str) -> Result<bool, StoreError> {
        let _guard = self.collection.write_lock().lock().await;
        let mut symbols = self.read().await?;
        let before = symbols.len();
        symbols.retain(|s| s != symbol);
        if symbols.len() == before {
            debug!("{} not in watchlist", symbol);
            return Ok(false);
        }

        put_json(self.collection.as_ref(), SYMBOLS_KEY, &symbols).await?;
        info!("Removed {} from watchlist", symbol);
        Ok(true)
    }

    /// Drops every watched symbol.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.collection.write_lock().lock().await;
        self.collection.clear().await?;
        info!("Cleared watchlist");
        Ok(())
    }

    /// Symbols in insertion order. Unreadable storage yields an empty list.
    pub async fn list(&self) -> Vec<String> {
        match self.read().await {
            Ok(symbols) => symbols,
            Err(e) => {
                warn!("Failed to read watchlist: {}", e);
                Vec::new()
            }
        }
    }

    /// Looks every watched symbol up in `catalog`, keeping list order and
    /// silently skipping symbols that no longer resolve.
    pub async fn resolve(&self, catalog: &dyn StockCatalog) -> Vec<Security> {
        self.resolve_with_progress(catalog, &|| ()).await
    }

    pub async fn resolve_with_progress(
        &self,
        catalog: &dyn StockCatalog,
        update_callback: &(dyn Fn() + Sync),
    ) -> Vec<Security> {
        let symbols = self.list().await;
        let lookups = symbols.iter().map(|symbol| async move {
            let result = catalog.lookup(symbol).await;
            update_callback();
            (symbol, result)
        });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(symbol, result)| match result {
                Ok(Some(security)) => Some(security),
                Ok(None) => {
                    debug!("Watched symbol {} not found in catalog", symbol);
                    None
                }
                Err(e) => {
                    warn!("Lookup failed for watched symbol {}: {}", symbol, e);
                    None
                }
            })
            .collect()
    }
}
