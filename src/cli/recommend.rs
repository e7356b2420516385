use super::ui;
use crate::core::StockCatalog;
use crate::core::recommend::recommend;
use anyhow::Result;

pub async fn run(catalog: &dyn StockCatalog) -> Result<()> {
    let universe = catalog.all().await?;
    let picks = recommend(&universe);

    println!(
        "{}\n",
        ui::style_text("Value-Style Recommendations", ui::StyleType::Title)
    );
    if picks.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("None of the {} screened stocks qualify", universe.len()),
                ui::StyleType::Subtle
            )
        );
        return Ok(());
    }

    println!("{}", ui::securities_table(&picks));
    Ok(())
}
