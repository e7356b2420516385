use super::ui;
use crate::core::error::normalize_symbol;
use crate::core::{StockCatalog, WatchlistStore};
use anyhow::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum WatchlistAction {
    Add(String),
    Remove(String),
    List,
    Clear,
}

pub async fn run(
    action: WatchlistAction,
    store: &WatchlistStore,
    catalog: &dyn StockCatalog,
) -> Result<()> {
    match action {
        WatchlistAction::Add(symbol) => {
            let symbol = normalize_symbol(&symbol)?;
            if catalog.lookup(&symbol).await?.is_none() {
                println!(
                    "{}",
                    ui::style_text(
                        &format!("Note: {symbol} is not in the catalog"),
                        ui::StyleType::Subtle
                    )
                );
            }
            if store.add(&symbol).await? {
                println!("Added {symbol} to watchlist");
            } else {
                println!("{symbol} is already in your watchlist");
            }
        }
        WatchlistAction::Remove(symbol) => {
            let symbol = normalize_symbol(&symbol)?;
            if store.remove(&symbol).await? {
                println!("Removed {symbol} from watchlist");
            } else {
                println!("{symbol} was not in your watchlist");
            }
        }
        WatchlistAction::Clear => {
            store.clear().await?;
            println!("Watchlist cleared");
        }
        WatchlistAction::List => {
            let watched = store.list().await.len();
            if watched == 0 {
                println!(
                    "{}",
                    ui::style_text("Your watchlist is empty", ui::StyleType::Subtle)
                );
                return Ok(());
            }

            let pb = ui::new_progress_bar(watched as u64, true);
            pb.set_message("Fetching watchlist...");
            let securities = store
                .resolve_with_progress(catalog, &|| pb.inc(1))
                .await;
            pb.finish_and_clear();

            println!(
                "{}\n",
                ui::style_text("Your Watchlist", ui::StyleType::Title)
            );
            println!("{}", ui::securities_table(&securities));
            if securities.len() < watched {
                println!(
                    "{}",
                    ui::style_text(
                        &format!(
                            "{} watched symbol(s) could not be found",
                            watched - securities.len()
                        ),
                        ui::StyleType::Subtle
                    )
                );
            }
        }
    }
    Ok(())
}
