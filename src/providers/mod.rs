pub mod caching;
pub mod static_catalog;

use crate::core::cache::Cache;
use crate::core::config::AppConfig;
use anyhow::Result;
use caching::CachingCatalog;
use static_catalog::StaticCatalog;
use std::sync::Arc;

/// Builds the catalog described by `config`, with cached lookups.
pub fn catalog_from_config(config: &AppConfig) -> Result<CachingCatalog<StaticCatalog>> {
    let catalog = match &config.providers.catalog {
        Some(provider) => StaticCatalog::from_path(&provider.path)?,
        None => StaticCatalog::builtin(),
    };
    Ok(CachingCatalog::new(catalog, Arc::new(Cache::new())))
}
