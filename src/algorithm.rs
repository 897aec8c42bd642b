//! The Fibonacci strategies being compared.
//!
//! Every strategy maps `n` to `(fib(n), steps)`, where `steps` counts the primitive recurrence
//! operations (additions and base cases) the strategy performed. Values are arbitrary-precision
//! because the large-n table reaches hundreds of thousands of decimal digits.
//!
//! Step counts are deterministic. They are comparable within one strategy across different `n`,
//! or across strategies at the same `n` as a relative cost signal; they are not a unit of time.

use crate::error::Error;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;
use std::mem;
use std::str::FromStr;

/// Identifies one of the strategies. The `Display` form is the label used in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Naive double recursion, exponential in `n`.
    Recursive,
    /// Running pair accumulation, linear in `n`.
    Iterative,
    /// Halving recursion over the doubling identities, logarithmic in `n`.
    FastDoubling,
}

impl Algorithm {
    /// All strategies, in the order their blocks appear in a table.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Recursive,
        Algorithm::Iterative,
        Algorithm::FastDoubling,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Recursive => "recursive",
            Algorithm::Iterative => "iterative",
            Algorithm::FastDoubling => "fast_doubling",
        }
    }

    /// Computes `(fib(n), steps)` with this strategy.
    pub fn compute(self, n: u64) -> (BigUint, u64) {
        match self {
            Algorithm::Recursive => recursive(n),
            Algorithm::Iterative => iterative(n),
            Algorithm::FastDoubling => fast_doubling(n),
        }
    }

    /// Returns true if the cost of the strategy grows exponentially with `n`. Callers are
    /// expected to bound `n` for such strategies.
    pub fn is_exponential(self) -> bool {
        matches!(self, Algorithm::Recursive)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" => Ok(Algorithm::Recursive),
            "iterative" => Ok(Algorithm::Iterative),
            "fast_doubling" | "fast-doubling" => Ok(Algorithm::FastDoubling),
            other => Err(Error::UnknownAlgorithm(other.to_owned())),
        }
    }
}

/// Naive recursion: `fib(n) = fib(n - 1) + fib(n - 2)`.
///
/// The step count is the number of nodes in the recursion tree: one per base case plus one per
/// addition. It grows like `fib(n)` itself. There is no memoization and the call depth is `n`,
/// so this must only be called with small `n`.
pub fn recursive(n: u64) -> (BigUint, u64) {
    if n < 2 {
        return (BigUint::from(n), 1);
    }

    let (v1, s1) = recursive(n - 1);
    let (v2, s2) = recursive(n - 2);
    (v1 + v2, s1 + s2 + 1)
}

/// Iterative accumulation of the pair `(fib(k - 1), fib(k))` for `k` from 1 to `n`.
///
/// Takes one step for `n < 2` and `n` steps otherwise.
pub fn iterative(n: u64) -> (BigUint, u64) {
    if n < 2 {
        return (BigUint::from(n), 1);
    }

    let mut a = BigUint::zero();
    let mut b = BigUint::one();
    let mut steps = 1;
    for _ in 2..=n {
        let next = &a + &b;
        a = mem::replace(&mut b, next);
        steps += 1;
    }
    (b, steps)
}

/// Fast doubling, using
///
/// ```text
/// F(2k)     = F(k) * (2 * F(k + 1) - F(k))
/// F(2k + 1) = F(k)^2 + F(k + 1)^2
/// ```
///
/// The recursion halves `n` at every level and bottoms out at `k = 0`, which yields
/// `(F(0), F(1)) = (0, 1)` and counts as one step. Every further level adds one step, so the
/// step count is the bit length of `n` plus one: `fast_doubling(0)` takes 1 step and
/// `fast_doubling(1)` takes 2.
pub fn fast_doubling(n: u64) -> (BigUint, u64) {
    let (f_n, _, steps) = doubling(n);
    (f_n, steps)
}

// Returns (F(k), F(k + 1), steps).
fn doubling(k: u64) -> (BigUint, BigUint, u64) {
    if k == 0 {
        return (BigUint::zero(), BigUint::one(), 1);
    }

    let (f_k, f_k1, steps) = doubling(k >> 1);
    // F(k + 1) >= F(k), so the subtraction never underflows.
    let c = &f_k * ((&f_k1 << 1usize) - &f_k);
    let d = &f_k * &f_k + &f_k1 * &f_k1;
    if k & 1 == 1 {
        let next = &c + &d;
        (d, next, steps + 1)
    } else {
        (c, d, steps + 1)
    }
}
