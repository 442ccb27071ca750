//! Year-month period codec.
//!
//! Contract files are keyed by a `YYYYMM` integer (e.g. `202403` for March
//! 2024). That encoding is convenient for filenames but useless for spacing
//! arithmetic, so the gap engine works in "absolute month" space instead:
//! a flat count of `year * 12 + month`. This module is the bidirectional,
//! lossless bridge between the two.

use serde::{Deserialize, Serialize};

/// A flat month count (`year * 12 + month`), strictly increasing iff the
/// corresponding `YearMonth` sequence is.
pub type AbsoluteMonth = u32;

/// A calendar month identifier encoded as `YYYYMM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearMonth(pub u32);

impl YearMonth {
    /// Convert to an absolute month count.
    ///
    /// The month component is not range-checked here: identifiers come from
    /// filename parsing, which only admits six-digit values, and a month
    /// outside `[1, 12]` yields an arithmetically consistent but meaningless
    /// count rather than an error.
    pub fn to_absolute(self) -> AbsoluteMonth {
        let year = self.0 / 100;
        let month = self.0 % 100;
        year * 12 + month
    }

    /// Convert an absolute month count back to `YYYYMM` form.
    ///
    /// The remainder of `abs / 12` is zero for December, so that case folds
    /// back to month 12 of the previous quotient year.
    pub fn from_absolute(abs: AbsoluteMonth) -> Self {
        let mut year = abs / 12;
        let mut month = abs % 12;
        if month == 0 {
            year -= 1;
            month = 12;
        }
        YearMonth(year * 100 + month)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_absolute_basic() {
        assert_eq!(YearMonth(202403).to_absolute(), 2024 * 12 + 3);
        assert_eq!(YearMonth(202412).to_absolute(), 2024 * 12 + 12);
        assert_eq!(YearMonth(202501).to_absolute(), 2025 * 12 + 1);
    }

    #[test]
    fn december_remainder_folds_back() {
        // 2024*12 + 12 divides evenly, so the naive remainder is 0.
        let dec = YearMonth(202412).to_absolute();
        assert_eq!(YearMonth::from_absolute(dec), YearMonth(202412));
        assert_eq!(YearMonth::from_absolute(dec + 1), YearMonth(202501));
    }

    #[test]
    fn round_trip_all_months() {
        for year in 1900..=2100u32 {
            for month in 1..=12u32 {
                let ym = YearMonth(year * 100 + month);
                assert_eq!(YearMonth::from_absolute(ym.to_absolute()), ym);
            }
        }
    }

    #[test]
    fn round_trip_range_bounds() {
        for ym in [YearMonth(190001), YearMonth(999912)] {
            assert_eq!(YearMonth::from_absolute(ym.to_absolute()), ym);
        }
    }

    #[test]
    fn absolute_order_matches_year_month_order() {
        let months = [
            YearMonth(202311),
            YearMonth(202312),
            YearMonth(202401),
            YearMonth(202406),
        ];
        for pair in months.windows(2) {
            assert!(pair[0].to_absolute() < pair[1].to_absolute());
        }
    }
}
