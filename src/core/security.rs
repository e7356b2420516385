//! Security records and price history types

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A snapshot of an equity's market data and fundamental ratios.
///
/// Ratios are `None` when they are not meaningful or not reported, which is
/// distinct from a reported value of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub market_cap: f64,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    #[serde(default)]
    pub price_to_book: Option<f64>,
}

impl Security {
    /// Creates a record with the given identity and no ratios reported.
    pub fn new(symbol: &str, name: &str, price: f64) -> Self {
        Security {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price,
            change: 0.0,
            change_percent: 0.0,
            market_cap: 0.0,
            pe_ratio: None,
            eps: None,
            dividend_yield: None,
            debt_to_equity: None,
            return_on_equity: None,
            price_to_book: None,
        }
    }
}

/// A single daily close in a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum HistoryPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    FiveYears,
}

impl HistoryPeriod {
    pub const ALL: [HistoryPeriod; 5] = [
        HistoryPeriod::OneMonth,
        HistoryPeriod::ThreeMonths,
        HistoryPeriod::SixMonths,
        HistoryPeriod::OneYear,
        HistoryPeriod::FiveYears,
    ];

    /// First calendar day included in the period ending on `today`.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let months = match self {
            HistoryPeriod::OneMonth => 1,
            HistoryPeriod::ThreeMonths => 3,
            HistoryPeriod::SixMonths => 6,
            HistoryPeriod::OneYear => 12,
            HistoryPeriod::FiveYears => 60,
        };
        today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Display for HistoryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HistoryPeriod::OneMonth => "1mo",
                HistoryPeriod::ThreeMonths => "3mo",
                HistoryPeriod::SixMonths => "6mo",
                HistoryPeriod::OneYear => "1y",
                HistoryPeriod::FiveYears => "5y",
            }
        )
    }
}

impl FromStr for HistoryPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1mo" | "1m" => Ok(HistoryPeriod::OneMonth),
            "3mo" | "3m" => Ok(HistoryPeriod::ThreeMonths),
            "6mo" | "6m" => Ok(HistoryPeriod::SixMonths),
            "1y" => Ok(HistoryPeriod::OneYear),
            "5y" => Ok(HistoryPeriod::FiveYears),
            _ => Err(anyhow::anyhow!("Invalid history period: {}", s)),
        }
    }
}

impl TryFrom<String> for HistoryPeriod {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HistoryPeriod> for String {
    fn from(period: HistoryPeriod) -> Self {
        period.to_string()
    }
}
