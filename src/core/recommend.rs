//! Recommendation gate over a set of securities.
//!
//! This is a plain boolean filter and does not use the scores in
//! [`crate::core::score`]. Its debt/equity cutoff is looser than the quick
//! score's and it has no dividend criterion.
use crate::core::security::Security;

/// Whether a security passes every recommendation threshold.
pub fn passes(security: &Security) -> bool {
    security.pe_ratio.is_some_and(|pe| pe < 20.0)
        && security.return_on_equity.is_some_and(|roe| roe > 15.0)
        && security.debt_to_equity.is_some_and(|de| de < 2.0)
}

/// Returns the securities that pass, in their original order.
pub fn recommend(securities: &[Security]) -> Vec<Security> {
    securities.iter().filter(|s| passes(s)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security(
        symbol: &str,
        pe_ratio: Option<f64>,
        return_on_equity: Option<f64>,
        debt_to_equity: Option<f64>,
    ) -> Security {
        Security {
            pe_ratio,
            return_on_equity,
            debt_to_equity,
            ..Security::new(symbol, symbol, 50.0)
        }
    }

    #[test]
    fn test_excludes_high_pe() {
        let apple_like = security("AAPL", Some(28.4), Some(33.21), Some(1.76));
        assert!(recommend(&[apple_like]).is_empty());
    }

    #[test]
    fn test_excludes_low_roe() {
        let berkshire_like = security("BRK.B", Some(10.2), Some(14.73), Some(0.25));
        assert!(recommend(&[berkshire_like]).is_empty());
    }

    #[test]
    fn test_absent_ratio_fails() {
        assert!(!passes(&security("A", None, Some(20.0), Some(0.5))));
        assert!(!passes(&security("B", Some(10.0), None, Some(0.5))));
        assert!(!passes(&security("C", Some(10.0), Some(20.0), None)));
    }

    #[test]
    fn test_debt_cutoff_is_looser_than_quick_score() {
        // Rejected by the quick score's debt rule but still recommended
        let leveraged = security("LEV", Some(12.0), Some(18.0), Some(1.5));
        assert!(passes(&leveraged));
        assert!(!passes(&security("MAX", Some(12.0), Some(18.0), Some(2.0))));
    }

    #[test]
    fn test_dividend_yield_is_ignored() {
        let mut no_dividend = security("ND", Some(12.0), Some(18.0), Some(0.3));
        no_dividend.dividend_yield = None;
        assert!(passes(&no_dividend));
    }

    #[test]
    fn test_preserves_input_order() {
        let input = vec![
            security("ONE", Some(10.0), Some(20.0), Some(0.5)),
            security("TWO", Some(30.0), Some(20.0), Some(0.5)),
            security("THREE", Some(15.0), Some(16.0), Some(1.9)),
            security("FOUR", Some(5.0), Some(25.0), Some(3.0)),
            security("FIVE", Some(19.9), Some(15.1), Some(0.0)),
        ];

        let symbols: Vec<_> = recommend(&input)
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        assert_eq!(symbols, vec!["ONE", "THREE", "FIVE"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(recommend(&[]).is_empty());
    }
}
