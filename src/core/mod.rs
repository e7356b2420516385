//! Core business logic abstractions

pub mod alerts;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod log;
pub mod recommend;
pub mod score;
pub mod security;
pub mod storage;
pub mod watchlist;

// Re-export main types for cleaner imports
pub use catalog::StockCatalog;
pub use error::{StoreError, ValidationError};
pub use score::{ScoreBand, detailed_score, quick_score};
pub use security::{HistoricalPoint, HistoryPeriod, Security};
pub use storage::{KeyValueCollection, Store};
pub use watchlist::WatchlistStore;
