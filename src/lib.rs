pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::alerts::AlertsAction;
use crate::cli::watchlist::WatchlistAction;
use crate::core::alerts::{ALERTS_COLLECTION, AlertBook};
use crate::core::config::AppConfig;
use crate::core::security::HistoryPeriod;
use crate::core::storage::{KeyValueCollection, Store};
use crate::core::watchlist::{WATCHLIST_COLLECTION, WatchlistStore};
use crate::store::KeyValueStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Search(String),
    Show {
        symbol: String,
        period: Option<HistoryPeriod>,
    },
    Recommend,
    Watchlist(WatchlistAction),
    Alerts(AlertsAction),
}

fn open_collection(store: &KeyValueStore, name: &str) -> Result<Arc<dyn KeyValueCollection>> {
    store
        .get_collection(name, true)
        .with_context(|| format!("Failed to open {name} storage"))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("moat starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = providers::catalog_from_config(&config)?;

    match command {
        AppCommand::Search(query) => cli::search::run(&catalog, &query).await,
        AppCommand::Show { symbol, period } => {
            let symbol = crate::core::error::normalize_symbol(&symbol)?;
            let period = period.unwrap_or(config.default_period);
            cli::show::run(&catalog, &symbol, period).await
        }
        AppCommand::Recommend => cli::recommend::run(&catalog).await,
        AppCommand::Watchlist(action) => {
            let store = KeyValueStore::open(&config.default_data_path()?)?;
            let watchlist = WatchlistStore::new(open_collection(&store, WATCHLIST_COLLECTION)?);
            cli::watchlist::run(action, &watchlist, &catalog).await
        }
        AppCommand::Alerts(action) => {
            let store = KeyValueStore::open(&config.default_data_path()?)?;
            let book = AlertBook::new(open_collection(&store, ALERTS_COLLECTION)?);
            cli::alerts::run(action, &book, &catalog).await
        }
    }
}
