//! Timing harness: applies one strategy over a sequence of inputs.

use crate::algorithm::Algorithm;
use crate::measurement::Measurement;
use crate::results::FibResult;

/// Computes `fib(n)` with `algorithm` for every `n` in `inputs`, in order, timing each call
/// separately with `measurement`. Performs no I/O.
///
/// Exponential strategies are not bounded here; the caller decides which inputs are tractable.
pub fn run_and_time<M: Measurement>(
    measurement: &M,
    algorithm: Algorithm,
    inputs: &[u64],
) -> Vec<FibResult> {
    inputs
        .iter()
        .map(|&n| {
            let start = measurement.start();
            let (value, steps) = algorithm.compute(n);
            let elapsed = measurement.end(start);

            FibResult {
                n,
                value,
                steps,
                time_ms: measurement.to_millis(&elapsed),
                algo: algorithm,
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::measurement::{ValueFormatter, WallTime};
    use num_bigint::BigUint;
    use std::cell::Cell;

    struct Ticks;
    impl ValueFormatter for Ticks {
        fn format_value(&self, ms: f64) -> String {
            format!("{} ticks", ms)
        }
    }

    /// A clock that advances by one tick every time it is read.
    struct TickClock {
        now: Cell<u64>,
    }
    impl Measurement for TickClock {
        type Intermediate = u64;
        type Value = u64;

        fn start(&self) -> u64 {
            self.now.set(self.now.get() + 1);
            self.now.get()
        }
        fn end(&self, start: u64) -> u64 {
            self.now.set(self.now.get() + 1);
            self.now.get() - start
        }
        fn to_millis(&self, value: &u64) -> f64 {
            *value as f64
        }
        fn formatter(&self) -> &dyn ValueFormatter {
            &Ticks
        }
    }

    #[test]
    fn one_result_per_input_in_order() {
        let inputs = [0, 1, 2, 3, 5, 8, 10];
        let results = run_and_time(&WallTime, Algorithm::Iterative, &inputs);

        assert_eq!(results.len(), inputs.len());
        for (result, &n) in results.iter().zip(inputs.iter()) {
            assert_eq!(result.n, n);
            assert_eq!(result.algo, Algorithm::Iterative);
            assert_eq!(result.steps, n.max(1));
            assert!(result.time_ms >= 0.0);
        }
        assert_eq!(results[6].value, BigUint::from(55u32));
    }

    #[test]
    fn times_each_call_with_the_given_clock() {
        let clock = TickClock { now: Cell::new(0) };
        let results = run_and_time(&clock, Algorithm::FastDoubling, &[10, 20, 30]);

        assert!(results.iter().all(|r| r.time_ms == 1.0));
        assert_eq!(clock.now.get(), 6);
        assert_eq!(clock.formatter().format_value(1.0), "1 ticks");
    }

    #[test]
    fn empty_inputs() {
        assert!(run_and_time(&WallTime, Algorithm::Recursive, &[]).is_empty());
    }
}
