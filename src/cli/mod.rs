pub mod alerts;
pub mod recommend;
pub mod search;
pub mod setup;
pub mod show;
pub mod ui;
pub mod watchlist;
