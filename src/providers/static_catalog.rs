use crate::core::catalog::StockCatalog;
use crate::core::security::{HistoricalPoint, HistoryPeriod, Security};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, instrument};

const HISTORY_DAYS: u64 = 365;
const UNKNOWN_BASE_PRICE: f64 = 100.0;
const STEADY_COMPOUNDERS: [&str; 3] = ["BRK.B", "AAPL", "KO"];

fn builtin_securities() -> Vec<Security> {
    vec![
        Security {
            change: 2.35,
            change_percent: 1.38,
            market_cap: 2_680_000_000_000.0,
            pe_ratio: Some(28.4),
            eps: Some(6.07),
            dividend_yield: Some(0.55),
            debt_to_equity: Some(1.76),
            return_on_equity: Some(33.21),
            price_to_book: Some(32.12),
            ..Security::new("AAPL", "Apple Inc.", 172.40)
        },
        Security {
            change: -1.23,
            change_percent: -0.30,
            market_cap: 3_050_000_000_000.0,
            pe_ratio: Some(34.9),
            eps: Some(11.78),
            dividend_yield: Some(0.72),
            debt_to_equity: Some(0.42),
            return_on_equity: Some(38.41),
            price_to_book: Some(11.83),
            ..Security::new("MSFT", "Microsoft Corporation", 410.34)
        },
        Security {
            change: 3.67,
            change_percent: 0.90,
            market_cap: 899_000_000_000.0,
            pe_ratio: Some(10.2),
            eps: Some(40.48),
            debt_to_equity: Some(0.25),
            return_on_equity: Some(14.73),
            price_to_book: Some(1.47),
            ..Security::new("BRK.B", "Berkshire Hathaway Inc.", 412.87)
        },
        Security {
            change: 0.45,
            change_percent: 0.72,
            market_cap: 271_000_000_000.0,
            pe_ratio: Some(25.1),
            eps: Some(2.50),
            dividend_yield: Some(2.90),
            debt_to_equity: Some(1.82),
            return_on_equity: Some(33.80),
            price_to_book: Some(10.56),
            ..Security::new("KO", "The Coca-Cola Company", 62.80)
        },
        Security {
            change: -2.14,
            change_percent: -1.15,
            market_cap: 1_910_000_000_000.0,
            pe_ratio: Some(51.3),
            eps: Some(3.60),
            debt_to_equity: Some(0.68),
            return_on_equity: Some(12.18),
            price_to_book: Some(8.42),
            ..Security::new("AMZN", "Amazon.com, Inc.", 184.72)
        },
    ]
}

fn symbol_seed(symbol: &str) -> u64 {
    symbol
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        })
}

/// Catalog backed by an in-process list of securities.
pub struct StaticCatalog {
    securities: Vec<Security>,
}

impl StaticCatalog {
    /// The built-in securities.
    pub fn builtin() -> Self {
        Self {
            securities: builtin_securities(),
        }
    }

    /// Builds a catalog from `securities`, rejecting duplicate symbols.
    pub fn new(securities: Vec<Security>) -> Result<Self> {
        let mut seen = HashSet::new();
        for s in &securities {
            if !seen.insert(s.symbol.as_str()) {
                bail!("Duplicate symbol in catalog: {}", s.symbol);
            }
        }
        Ok(Self { securities })
    }

    /// Built-in securities overlaid with the records in a YAML file. A record
    /// with a built-in symbol replaces the built-in one.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let extra: Vec<Security> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        let extra = Self::new(extra)?.securities;
        debug!("Loaded {} securities from {}", extra.len(), path.display());

        let mut securities = builtin_securities();
        for record in extra {
            match securities.iter_mut().find(|s| s.symbol == record.symbol) {
                Some(existing) => *existing = record,
                None => securities.push(record),
            }
        }
        Ok(Self { securities })
    }

    /// Daily closes for the trailing year ending on `today`, filtered to
    /// `period`. The series is deterministic per symbol.
    pub fn history_as_of(
        &self,
        symbol: &str,
        period: HistoryPeriod,
        today: NaiveDate,
    ) -> Vec<HistoricalPoint> {
        let base_price = self
            .securities
            .iter()
            .find(|s| s.symbol == symbol)
            .map_or(UNKNOWN_BASE_PRICE, |s| s.price);
        let yearly_drift = if STEADY_COMPOUNDERS.contains(&symbol) {
            0.10
        } else {
            0.05
        };
        let start = period.start_date(today);
        let mut rng = StdRng::seed_from_u64(symbol_seed(symbol));

        (0..=HISTORY_DAYS)
            .rev()
            .filter_map(|days_ago| {
                // Draw even for skipped days so every period sees the same series
                let noise: f64 = rng.gen_range(0.95..1.05);
                let date = today.checked_sub_days(Days::new(days_ago))?;
                if date < start {
                    return None;
                }
                let trend = 1.0 - yearly_drift * days_ago as f64 / HISTORY_DAYS as f64;
                let close = (base_price * trend * noise * 100.0).round() / 100.0;
                Some(HistoricalPoint { date, close })
            })
            .collect()
    }
}

#[async_trait]
impl StockCatalog for StaticCatalog {
    #[instrument(name = "CatalogLookup", skip(self), fields(symbol = %symbol))]
    async fn lookup(&self, symbol: &str) -> Result<Option<Security>> {
        let found = self.securities.iter().find(|s| s.symbol == symbol).cloned();
        if found.is_none() {
            debug!("Security not found");
        }
        Ok(found)
    }

    async fn search(&self, query: &str) -> Result<Vec<Security>> {
        let query = query.to_lowercase();
        Ok(self
            .securities
            .iter()
            .filter(|s| {
                s.symbol.to_lowercase().contains(&query) || s.name.to_lowercase().contains(&query)
            })
            .cloned()
            .collect())
    }

    async fn history(&self, symbol: &str, period: HistoryPeriod) -> Result<Vec<HistoricalPoint>> {
        Ok(self.history_as_of(symbol, period, Utc::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_lookup() {
        let catalog = StaticCatalog::builtin();
        let brk = catalog.lookup("BRK.B").await.unwrap().unwrap();
        assert_eq!(brk.name, "Berkshire Hathaway Inc.");
        assert!(brk.dividend_yield.is_none());
        assert!(catalog.lookup("ZZZZ").await.unwrap().is_none());
        // Lookups are exact
        assert!(catalog.lookup("aapl").await.unwrap().is_none());
    }

    #[test]
    fn test_builtin_ratios() {
        let builtin = builtin_securities();
        let symbols: Vec<_> = builtin.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "BRK.B", "KO", "AMZN"]);

        let ko = &builtin[3];
        assert_eq!(ko.price, 62.80);
        assert_eq!(ko.market_cap, 271_000_000_000.0);
        assert_eq!(ko.pe_ratio, Some(25.1));
        assert_eq!(ko.eps, Some(2.50));
        assert_eq!(ko.dividend_yield, Some(2.90));
        assert_eq!(ko.debt_to_equity, Some(1.82));
        assert_eq!(ko.return_on_equity, Some(33.80));
        assert_eq!(ko.price_to_book, Some(10.56));

        let amzn = &builtin[4];
        assert_eq!(amzn.change, -2.14);
        assert!(amzn.dividend_yield.is_none());
        assert_eq!(amzn.return_on_equity, Some(12.18));
    }

    #[tokio::test]
    async fn test_search_matches_symbol_or_name() {
        let catalog = StaticCatalog::builtin();

        let by_name: Vec<_> = catalog
            .search("coca")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        assert_eq!(by_name, vec!["KO"]);

        let by_symbol: Vec<_> = catalog
            .search("ms")
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        assert_eq!(by_symbol, vec!["MSFT"]);

        assert_eq!(catalog.all().await.unwrap().len(), 5);
        assert!(catalog.search("nothing-like-this").await.unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let result = StaticCatalog::new(vec![
            Security::new("X", "X One", 1.0),
            Security::new("X", "X Two", 2.0),
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_from_path_merges_over_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
- symbol: KO
  name: "The Coca-Cola Company"
  price: 70.0
  change: 0.0
  changePercent: 0.0
  marketCap: 300000000000
  peRatio: 18.0
- symbol: JNJ
  name: "Johnson & Johnson"
  price: 155.0
  change: 1.0
  changePercent: 0.65
  marketCap: 373000000000
  peRatio: 15.2
  returnOnEquity: 20.4
  debtToEquity: 0.45
  dividendYield: 3.1
"#
        )
        .unwrap();

        let catalog = StaticCatalog::from_path(file.path()).unwrap();
        let all = catalog.all().await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all.last().unwrap().symbol, "JNJ");

        let ko = catalog.lookup("KO").await.unwrap().unwrap();
        assert_eq!(ko.price, 70.0);
        assert!(ko.return_on_equity.is_none());
    }

    #[test]
    fn test_history_periods() {
        let catalog = StaticCatalog::builtin();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let year = catalog.history_as_of("AAPL", HistoryPeriod::OneYear, today);
        assert_eq!(year.first().unwrap().date, NaiveDate::from_ymd_opt(2023, 6, 16).unwrap());
        assert_eq!(year.last().unwrap().date, today);
        assert!(year.windows(2).all(|w| w[0].date < w[1].date));

        let month = catalog.history_as_of("AAPL", HistoryPeriod::OneMonth, today);
        assert_eq!(month.first().unwrap().date, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
        assert_eq!(month.len(), 32);
        // Shorter periods are a suffix of the same series
        assert_eq!(&year[year.len() - month.len()..], month.as_slice());

        let five_years = catalog.history_as_of("AAPL", HistoryPeriod::FiveYears, today);
        assert_eq!(five_years.len(), HISTORY_DAYS as usize + 1);
    }

    #[test]
    fn test_history_is_deterministic_and_positive() {
        let catalog = StaticCatalog::builtin();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let first = catalog.history_as_of("KO", HistoryPeriod::SixMonths, today);
        let second = catalog.history_as_of("KO", HistoryPeriod::SixMonths, today);
        assert_eq!(first, second);
        assert!(first.iter().all(|p| p.close > 0.0));

        let unknown = catalog.history_as_of("ZZZZ", HistoryPeriod::OneMonth, today);
        assert!(!unknown.is_empty());
        assert!(unknown.iter().all(|p| p.close > 80.0 && p.close < 110.0));
    }
}
