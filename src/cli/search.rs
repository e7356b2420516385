use super::ui;
use crate::core::StockCatalog;
use anyhow::Result;

pub async fn run(catalog: &dyn StockCatalog, query: &str) -> Result<()> {
    let results = catalog.search(query).await?;
    if results.is_empty() {
        println!(
            "{}",
            ui::style_text(&format!("No stocks match '{query}'"), ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!("{}", ui::securities_table(&results));
    Ok(())
}
