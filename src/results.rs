//! Result aggregation: the per-measurement records and the two tables they are collected into.

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::AxisScale;
use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::HashMap;
use std::f64::consts::LOG10_2;
use std::slice;

/// A single measurement: one strategy evaluated at one `n`.
#[derive(Debug, Clone, PartialEq)]
pub struct FibResult {
    pub n: u64,
    pub value: BigUint,
    /// Primitive recurrence operations the strategy performed.
    pub steps: u64,
    /// Elapsed wall-clock time in milliseconds. Only meaningful for relative comparisons.
    pub time_ms: f64,
    pub algo: Algorithm,
}

impl FibResult {
    /// Number of decimal digits in `value`.
    pub fn digits(&self) -> u64 {
        digits(&self.value)
    }
}

/// Returns the number of decimal digits in `value`, i.e. `floor(log10(value)) + 1`, with zero
/// counted as one digit.
pub fn digits(value: &BigUint) -> u64 {
    if value.is_zero() {
        return 1;
    }

    // 2^(bits - 1) <= value < 2^bits, so the estimate is at most one digit off.
    let mut count = ((value.bits() - 1) as f64 * LOG10_2) as u32 + 1;
    let ten = BigUint::from(10u8);
    while *value >= ten.pow(count) {
        count += 1;
    }
    while count > 1 && *value < ten.pow(count - 1) {
        count -= 1;
    }
    u64::from(count)
}

/// Which of the two tables produced by a run a result set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Small inputs, every strategy, raw values exported.
    Small,
    /// Large inputs, tractable strategies only, values exported as digit counts.
    Large,
}

impl TableKind {
    pub fn name(self) -> &'static str {
        match self {
            TableKind::Small => "small",
            TableKind::Large => "large",
        }
    }

    /// File name stem shared by every export of this table.
    pub fn file_stem(self) -> &'static str {
        match self {
            TableKind::Small => "fib_small",
            TableKind::Large => "fib_large",
        }
    }

    /// Whether exports carry the raw value. The large table replaces it with the digit count.
    pub fn keeps_values(self) -> bool {
        matches!(self, TableKind::Small)
    }

    /// Scales of the (n, measurement) axes when the table is charted.
    pub fn axis_scales(self) -> (AxisScale, AxisScale) {
        match self {
            TableKind::Small => (AxisScale::Linear, AxisScale::Logarithmic),
            TableKind::Large => (AxisScale::Logarithmic, AxisScale::Logarithmic),
        }
    }
}

/// Exported row of the small table.
#[derive(Debug, Serialize)]
pub struct SmallRow {
    pub n: u64,
    pub value: String,
    pub steps: u64,
    pub time_ms: f64,
    pub algo: Algorithm,
}

/// Exported row of the large table.
#[derive(Debug, Serialize)]
pub struct LargeRow {
    pub n: u64,
    pub steps: u64,
    pub time_ms: f64,
    pub algo: Algorithm,
    pub digits: u64,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Row {
    Small(SmallRow),
    Large(LargeRow),
}

/// An insertion-ordered table of results: one block per strategy, one row per input within a
/// block.
#[derive(Debug, Clone)]
pub struct ResultSet {
    kind: TableKind,
    results: Vec<FibResult>,
}

impl ResultSet {
    pub fn new(kind: TableKind) -> ResultSet {
        ResultSet {
            kind,
            results: Vec::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Appends the output of one harness invocation, preserving its order.
    pub fn extend<I: IntoIterator<Item = FibResult>>(&mut self, results: I) {
        self.results.extend(results);
    }

    pub fn iter(&self) -> slice::Iter<'_, FibResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the result of `algorithm` at `n`, if it was measured.
    pub fn get(&self, algorithm: Algorithm, n: u64) -> Option<&FibResult> {
        self.results
            .iter()
            .find(|result| result.algo == algorithm && result.n == n)
    }

    /// Splits the table into its per-strategy blocks, in insertion order.
    pub fn series(&self) -> Vec<(Algorithm, Vec<&FibResult>)> {
        let series = self
            .results
            .iter()
            .chunk_by(|result| result.algo)
            .into_iter()
            .map(|(algo, block)| (algo, block.collect()))
            .collect();
        series
    }

    /// Checks that every strategy computed the same value wherever two of them were evaluated at
    /// the same `n`.
    pub fn check_agreement(&self) -> Result<()> {
        let mut seen: HashMap<u64, &FibResult> = HashMap::new();
        for result in &self.results {
            match seen.get(&result.n) {
                Some(first) if first.value != result.value => {
                    return Err(Error::ValueMismatch {
                        n: result.n,
                        first: (first.algo.name(), first.value.clone()),
                        second: (result.algo.name(), result.value.clone()),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(result.n, result);
                }
            }
        }
        Ok(())
    }

    /// Export rows for this table. The large table drops the raw value in favour of its digit
    /// count.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        let kind = self.kind;
        self.results.iter().map(move |result| match kind {
            TableKind::Small => Row::Small(SmallRow {
                n: result.n,
                value: result.value.to_string(),
                steps: result.steps,
                time_ms: result.time_ms,
                algo: result.algo,
            }),
            TableKind::Large => Row::Large(LargeRow {
                n: result.n,
                steps: result.steps,
                time_ms: result.time_ms,
                algo: result.algo,
                digits: result.digits(),
            }),
        })
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a FibResult;
    type IntoIter = slice::Iter<'a, FibResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
