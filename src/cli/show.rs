use super::ui;
use crate::core::security::{HistoricalPoint, HistoryPeriod, Security};
use crate::core::{ScoreBand, StockCatalog, detailed_score, quick_score};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

/// Summary statistics over a price series.
#[derive(Debug, PartialEq)]
pub struct HistorySummary {
    pub first: HistoricalPoint,
    pub last: HistoricalPoint,
    pub low: f64,
    pub high: f64,
    pub change_percent: f64,
}

impl HistorySummary {
    pub fn from_points(points: &[HistoricalPoint]) -> Option<Self> {
        let first = points.first()?.clone();
        let last = points.last()?.clone();
        let low = points.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
        let high = points
            .iter()
            .map(|p| p.close)
            .fold(f64::NEG_INFINITY, f64::max);
        let change_percent = if first.close > 0.0 {
            (last.close - first.close) / first.close * 100.0
        } else {
            0.0
        };

        Some(HistorySummary {
            first,
            last,
            low,
            high,
            change_percent,
        })
    }
}

pub fn render_details(
    security: &Security,
    period: HistoryPeriod,
    history: &[HistoricalPoint],
) -> String {
    let mut output = format!(
        "{} ({})\n",
        ui::style_text(&security.name, ui::StyleType::Title),
        security.symbol
    );
    let sign = if security.change >= 0.0 { "+" } else { "" };
    output.push_str(&format!(
        "${:.2}  {sign}{:.2} ({:.2}%)   Market cap: {}\n\n",
        security.price,
        security.change,
        security.change_percent,
        ui::format_market_cap(security.market_cap)
    ));

    let mut ratios = ui::new_styled_table();
    ratios.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
    let rows = [
        ("P/E Ratio", ui::format_optional_cell(security.pe_ratio, |v| format!("{v:.2}"))),
        ("EPS", ui::format_optional_cell(security.eps, |v| format!("${v:.2}"))),
        (
            "Dividend Yield",
            ui::format_optional_cell(security.dividend_yield, |v| format!("{v:.2}%")),
        ),
        (
            "Debt/Equity",
            ui::format_optional_cell(security.debt_to_equity, |v| format!("{v:.2}")),
        ),
        (
            "Return on Equity",
            ui::format_optional_cell(security.return_on_equity, |v| format!("{v:.2}%")),
        ),
        (
            "Price/Book",
            ui::format_optional_cell(security.price_to_book, |v| format!("{v:.2}")),
        ),
    ];
    for (label, value) in rows {
        ratios.add_row(vec![Cell::new(label), value]);
    }
    ratios.add_row(vec![
        Cell::new("Quick Score"),
        ui::score_cell(quick_score(security)),
    ]);
    let detailed = detailed_score(security);
    ratios.add_row(vec![Cell::new("Detailed Score"), ui::score_cell(detailed)]);
    output.push_str(&ratios.to_string());

    output.push_str(&format!(
        "\n\n{}\n",
        ui::style_text(ScoreBand::from_score(detailed).label(), ui::StyleType::Label)
    ));

    output.push_str(&format!(
        "\n{}\n",
        ui::style_text(&format!("Price history ({period})"), ui::StyleType::Title)
    ));
    match HistorySummary::from_points(history) {
        Some(summary) => {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("From"),
                ui::header_cell("To"),
                ui::header_cell("Low"),
                ui::header_cell("High"),
                ui::header_cell("Change"),
            ]);
            table.add_row(vec![
                Cell::new(format!("{} ${:.2}", summary.first.date, summary.first.close)),
                Cell::new(format!("{} ${:.2}", summary.last.date, summary.last.close)),
                Cell::new(format!("${:.2}", summary.low)).set_alignment(CellAlignment::Right),
                Cell::new(format!("${:.2}", summary.high)).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.2}%", summary.change_percent))
                    .set_alignment(CellAlignment::Right),
            ]);
            output.push_str(&table.to_string());
        }
        None => output.push_str(&ui::style_text(
            "No price history available",
            ui::StyleType::Subtle,
        )),
    }

    output
}

pub async fn run(catalog: &dyn StockCatalog, symbol: &str, period: HistoryPeriod) -> Result<()> {
    let Some(security) = catalog.lookup(symbol).await? else {
        println!(
            "{}",
            ui::style_text(
                &format!("Stock with symbol {symbol} not found"),
                ui::StyleType::Error
            )
        );
        return Ok(());
    };

    let history = catalog.history(symbol, period).await?;
    println!("{}", render_details(&security, period, &history));
    Ok(())
}
