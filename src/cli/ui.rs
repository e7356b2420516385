use crate::core::score::{ScoreBand, quick_score};
use crate::core::security::Security;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Label,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Label => style(text).bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an `Option<T>` into a `Cell`. `None` is displayed as "N/A".
pub fn format_optional_cell<T>(value: Option<T>, format_fn: impl Fn(T) -> String) -> Cell {
    value.map_or(
        Cell::new("N/A")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |v| Cell::new(format_fn(v)).set_alignment(CellAlignment::Right),
    )
}

/// Creates a cell for a daily change with color coding.
pub fn change_cell(change: f64, change_percent: f64) -> Cell {
    let sign = if change >= 0.0 { "+" } else { "" };
    let text = format!("{sign}{change:.2} ({change_percent:.2}%)");
    let color = if change >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    Cell::new(text).fg(color).set_alignment(CellAlignment::Right)
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Strong => Color::Green,
        ScoreBand::Moderate => Color::Yellow,
        ScoreBand::Weak => Color::Red,
    }
}

/// Creates a `score/10` cell colored by its band.
pub fn score_cell(score: u8) -> Cell {
    Cell::new(format!("{score}/10"))
        .fg(band_color(ScoreBand::from_score(score)))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Formats a dollar amount with a T/B/M suffix.
pub fn format_market_cap(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${value:.2}")
    }
}

/// Renders securities with their key ratios and quick score.
pub fn securities_table(securities: &[Security]) -> Table {
    let mut table = new_styled_table();
    table.set_header(vec![
        header_cell("Symbol"),
        header_cell("Name"),
        header_cell("Price"),
        header_cell("Change"),
        header_cell("P/E"),
        header_cell("ROE"),
        header_cell("Debt/Equity"),
        header_cell("Dividend"),
        header_cell("Score"),
    ]);

    for security in securities {
        table.add_row(vec![
            Cell::new(&security.symbol).add_attribute(Attribute::Bold),
            Cell::new(&security.name),
            Cell::new(format!("${:.2}", security.price)).set_alignment(CellAlignment::Right),
            change_cell(security.change, security.change_percent),
            format_optional_cell(security.pe_ratio, |v| format!("{v:.2}")),
            format_optional_cell(security.return_on_equity, |v| format!("{v:.2}%")),
            format_optional_cell(security.debt_to_equity, |v| format!("{v:.2}")),
            format_optional_cell(security.dividend_yield, |v| format!("{v:.2}%")),
            score_cell(quick_score(security)),
        ]);
    }
    table
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    if let Ok(bar_style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(bar_style.progress_chars("#>-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_market_cap() {
        assert_eq!(format_market_cap(2_680_000_000_000.0), "$2.68T");
        assert_eq!(format_market_cap(899_000_000_000.0), "$899.00B");
        assert_eq!(format_market_cap(1_200_000.0), "$1.20M");
        assert_eq!(format_market_cap(12.0), "$12.00");
    }

    #[test]
    fn test_securities_table_shows_na_for_absent_ratios() {
        let security = Security::new("NEW", "Newco", 10.0);
        let rendered = securities_table(&[security]).to_string();
        assert!(rendered.contains("NEW"));
        assert!(rendered.contains("N/A"));
        assert!(rendered.contains("0/10"));
    }
}
