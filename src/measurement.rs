//! This module defines the traits used to plug a clock into the timing harness, and the
//! [WallTime](struct.WallTime.html) struct which provides the default monotonic wall-clock
//! measurement.
//!
//! Measured values are always reported in milliseconds. Elapsed times depend on machine load and
//! must only be used for relative comparisons, never as a correctness check.

use crate::format;
use crate::DurationExt;
use std::time::{Duration, Instant};

/// Trait providing functions to format measured values (in milliseconds) to strings so that they
/// can be displayed on the command line.
pub trait ValueFormatter {
    /// Format the value (with appropriate unit) and return it as a string.
    fn format_value(&self, ms: f64) -> String;
}

/// Trait for all clocks the harness can time a strategy with.
///
/// `start` is called right before the strategy is invoked to produce some intermediate value (for
/// example, the instant the call began) and `end` is called right after it returns, with the
/// value returned by `start`.
pub trait Measurement {
    /// Intermediate value produced by `start` and consumed by `end`.
    type Intermediate;

    /// The measured value, eg. the elapsed time between the `start` and `end` calls.
    type Value;

    /// Called immediately before the strategy runs.
    fn start(&self) -> Self::Intermediate;

    /// Called immediately after the strategy returns to get the measured value.
    fn end(&self, i: Self::Intermediate) -> Self::Value;

    /// Converts the measured value to milliseconds.
    fn to_millis(&self, value: &Self::Value) -> f64;

    /// Return a trait-object reference to the value formatter for this measurement.
    fn formatter(&self) -> &dyn ValueFormatter;
}

pub(crate) struct DurationFormatter;
impl ValueFormatter for DurationFormatter {
    fn format_value(&self, ms: f64) -> String {
        format::time(ms)
    }
}

/// `WallTime` is the default measurement. It reads a monotonic high-resolution clock before and
/// after each call.
pub struct WallTime;
impl Measurement for WallTime {
    type Intermediate = Instant;
    type Value = Duration;

    fn start(&self) -> Self::Intermediate {
        Instant::now()
    }
    fn end(&self, i: Self::Intermediate) -> Self::Value {
        i.elapsed()
    }
    fn to_millis(&self, val: &Self::Value) -> f64 {
        val.to_millis_f64()
    }
    fn formatter(&self) -> &dyn ValueFormatter {
        &DurationFormatter
    }
}
