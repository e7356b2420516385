use super::ui;
use crate::core::StockCatalog;
use crate::core::alerts::{AlertBook, AlertRule};
use anyhow::Result;
use comfy_table::{Cell, Color};

#[derive(Debug, Clone, PartialEq)]
pub enum AlertsAction {
    Add {
        symbol: String,
        kind: String,
        condition: String,
        value: String,
    },
    Remove(u64),
    List,
    Check,
}

fn status_cell(status: Option<Option<bool>>) -> Cell {
    match status {
        None => Cell::new("Not found").fg(Color::Red),
        Some(None) => Cell::new("N/A").fg(Color::DarkGrey),
        Some(Some(true)) => Cell::new("Triggered").fg(Color::Green),
        Some(Some(false)) => Cell::new("Waiting"),
    }
}

async fn render_rules(book: &AlertBook, catalog: &dyn StockCatalog, check: bool) -> Result<()> {
    let rules = book.list().await;
    if rules.is_empty() {
        println!(
            "{}",
            ui::style_text("You don't have any alerts set up yet", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    let mut header = vec![
        ui::header_cell("ID"),
        ui::header_cell("Symbol"),
        ui::header_cell("Alert"),
    ];
    if check {
        header.push(ui::header_cell("Status"));
    }
    table.set_header(header);

    for rule in &rules {
        let mut row = vec![
            Cell::new(rule.id),
            Cell::new(&rule.symbol),
            Cell::new(rule.describe()),
        ];
        if check {
            // Outer None: symbol not in catalog; inner None: metric unavailable
            let status = catalog
                .lookup(&rule.symbol)
                .await?
                .map(|security| rule.evaluate(&security));
            row.push(status_cell(status));
        }
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

pub async fn run(action: AlertsAction, book: &AlertBook, catalog: &dyn StockCatalog) -> Result<()> {
    match action {
        AlertsAction::Add {
            symbol,
            kind,
            condition,
            value,
        } => {
            let rule = AlertRule::parse(&symbol, &kind, &condition, &value)?;
            let rule = book.add(rule).await?;
            println!("Alert {} created for {}", rule.id, rule.symbol);
        }
        AlertsAction::Remove(id) => {
            if book.remove(id).await? {
                println!("Alert {id} removed");
            } else {
                println!("No alert with id {id}");
            }
        }
        AlertsAction::List => render_rules(book, catalog, false).await?,
        AlertsAction::Check => render_rules(book, catalog, true).await?,
    }
    Ok(())
}
