//! Missing-contract inference over one sorted series.
//!
//! Given the `YYYYMM` identifiers observed for a single instrument and
//! frequency, the engine:
//!
//! 1. converts them to absolute months,
//! 2. histograms the spacings between adjacent contracts,
//! 3. takes the most common spacing as the series' expected cadence,
//! 4. enumerates every identifier the cadence implies inside an oversized
//!    gap but which the series lacks.
//!
//! The engine is a pure function of its input: no I/O, no state carried
//! between calls. Gaps are only ever inferred *between* observed contracts;
//! nothing is extrapolated before the first or after the last one.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::period::YearMonth;

/// Outcome of gap inference over one sorted series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapReport {
    /// Contracts implied by the expected cadence but absent from the input,
    /// in ascending order.
    pub missing: Vec<YearMonth>,
    /// The most common spacing (months) between adjacent contracts.
    ///
    /// When several spacings tie for the highest count, the smallest one
    /// wins; this keeps the result deterministic and biases toward reporting
    /// *more* candidate holes rather than silently widening the cadence.
    /// `0` when the input has fewer than two elements.
    pub expected_gap: u32,
    /// Occurrence count per distinct spacing value.
    pub histogram: BTreeMap<u32, usize>,
}

impl GapReport {
    fn empty() -> Self {
        Self {
            missing: Vec::new(),
            expected_gap: 0,
            histogram: BTreeMap::new(),
        }
    }
}

/// Infer missing contracts for a series sorted ascending.
///
/// Preconditions: `sorted_contracts` is ascending. Duplicates are tolerated
/// and surface as a histogram entry for spacing `0`, never as missing
/// contracts. A non-ascending input violates the contract and produces
/// meaningless spacings.
///
/// Fewer than two elements carry no spacing information and yield the empty
/// report (this is a defined degenerate case, not an error).
pub fn infer(sorted_contracts: &[YearMonth]) -> GapReport {
    if sorted_contracts.len() < 2 {
        return GapReport::empty();
    }

    let abs_months: Vec<u32> = sorted_contracts.iter().map(|ym| ym.to_absolute()).collect();

    let mut histogram: BTreeMap<u32, usize> = BTreeMap::new();
    for pair in abs_months.windows(2) {
        let gap = pair[1] - pair[0];
        *histogram.entry(gap).or_insert(0) += 1;
    }

    // Majority vote. Ascending key order plus the strict `>` means ties
    // resolve to the smallest gap value.
    let mut expected_gap = 0u32;
    let mut best_count = 0usize;
    for (&gap, &count) in &histogram {
        if count > best_count {
            expected_gap = gap;
            best_count = count;
        }
    }

    let mut missing = Vec::new();
    // expected_gap can only be 0 when every input is a duplicate of the
    // first; there is no cadence to walk, so report nothing as missing.
    if expected_gap > 0 {
        for pair in abs_months.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if next - current > expected_gap {
                let mut m = current + expected_gap;
                while m < next {
                    missing.push(YearMonth::from_absolute(m));
                    m += expected_gap;
                }
            }
        }
    }

    GapReport {
        missing,
        expected_gap,
        histogram,
    }
}
