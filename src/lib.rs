//! Compares three ways of computing the n-th Fibonacci number:
//!
//! * naive recursion, which takes a number of steps exponential in `n`,
//! * iterative accumulation, linear in `n`,
//! * fast doubling, logarithmic in `n`.
//!
//! Every strategy reports its value and how many primitive recurrence steps it performed. The
//! [`FibBench`](struct.FibBench.html) runner times each call over a small and a large set of
//! inputs, checks that the strategies agree on every value, and hands the two resulting tables to
//! the reports: a console summary, CSV and JSON exports and SVG line charts.
//!
//! ```no_run
//! use fib_efficiency::FibBench;
//!
//! let summary = FibBench::default()
//!     .output_directory("target/fib")
//!     .large_inputs(vec![10, 100, 1_000])
//!     .run()
//!     .unwrap();
//! assert_eq!(summary.small.kind(), fib_efficiency::TableKind::Small);
//! ```

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros_private;

pub mod algorithm;
pub mod cli;
#[cfg(feature = "csv_output")]
mod csv_report;
mod error;
mod format;
mod fs;
pub mod harness;
pub mod measurement;
#[cfg(feature = "plotters")]
mod plot;
mod report;
pub mod results;

use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::report::{CliReport, Report, ReportContext, Reports};

pub use crate::algorithm::Algorithm;
pub use crate::error::{Error, Result};
pub use crate::measurement::{Measurement, ValueFormatter, WallTime};
pub use crate::report::CliVerbosity;
pub use crate::results::{FibResult, ResultSet, TableKind};

/// Inputs of the small-n table.
pub const DEFAULT_SMALL_INPUTS: [u64; 12] = [0, 1, 2, 3, 5, 8, 10, 15, 20, 25, 30, 35];

/// Inputs of the large-n table.
pub const DEFAULT_LARGE_INPUTS: [u64; 6] = [10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// Largest `n` the recursive strategy is run with.
pub const DEFAULT_RECURSIVE_LIMIT: u64 = 35;

trait DurationExt {
    fn to_millis_f64(&self) -> f64;
}

impl DurationExt for Duration {
    fn to_millis_f64(&self) -> f64 {
        self.as_nanos() as f64 / 1e6
    }
}

/// Axis scaling type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    /// Axes scale linearly
    Linear,

    /// Axes scale logarithmically
    Logarithmic,
}

impl Default for AxisScale {
    fn default() -> Self {
        AxisScale::Linear
    }
}

/// The two tables produced by [`FibBench::run`](struct.FibBench.html#method.run).
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub small: ResultSet,
    pub large: ResultSet,
}

/// The benchmark manager
///
/// `FibBench` lets you configure which inputs and strategies are measured, where the reports go
/// and which reports are produced, then runs the whole comparison.
pub struct FibBench<M: Measurement = WallTime> {
    measurement: M,
    small_inputs: Vec<u64>,
    large_inputs: Vec<u64>,
    small_algorithms: Vec<Algorithm>,
    large_algorithms: Vec<Algorithm>,
    recursive_limit: u64,
    filter: Option<Regex>,
    output_directory: PathBuf,
    report: Reports,
}

impl Default for FibBench {
    /// Creates a runner with the default inputs, every report enabled except JSON, and the
    /// current directory as output directory.
    fn default() -> FibBench {
        let reports = Reports {
            cli_enabled: true,
            cli: CliReport::new(false, CliVerbosity::Normal),
            csv_enabled: true,
            json_enabled: false,
            plots_enabled: true,
        };

        FibBench {
            measurement: WallTime,
            small_inputs: DEFAULT_SMALL_INPUTS.to_vec(),
            large_inputs: DEFAULT_LARGE_INPUTS.to_vec(),
            small_algorithms: Algorithm::ALL.to_vec(),
            large_algorithms: vec![Algorithm::Iterative, Algorithm::FastDoubling],
            recursive_limit: DEFAULT_RECURSIVE_LIMIT,
            filter: None,
            output_directory: PathBuf::from("."),
            report: reports,
        }
    }
}

impl<M: Measurement> FibBench<M> {
    /// Changes the measurement used to time each call.
    pub fn with_measurement<M2: Measurement>(self, m: M2) -> FibBench<M2> {
        FibBench {
            measurement: m,
            small_inputs: self.small_inputs,
            large_inputs: self.large_inputs,
            small_algorithms: self.small_algorithms,
            large_algorithms: self.large_algorithms,
            recursive_limit: self.recursive_limit,
            filter: self.filter,
            output_directory: self.output_directory,
            report: self.report,
        }
    }

    /// Changes the directory the CSV, JSON and chart files are written to.
    #[must_use]
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> FibBench<M> {
        self.output_directory = path.as_ref().to_owned();
        self
    }

    /// Changes the inputs of the small-n table.
    #[must_use]
    pub fn small_inputs(mut self, inputs: Vec<u64>) -> FibBench<M> {
        self.small_inputs = inputs;
        self
    }

    /// Changes the inputs of the large-n table.
    #[must_use]
    pub fn large_inputs(mut self, inputs: Vec<u64>) -> FibBench<M> {
        self.large_inputs = inputs;
        self
    }

    /// Changes the strategies measured in the small-n table. Defaults to all three.
    #[must_use]
    pub fn small_algorithms(mut self, algorithms: Vec<Algorithm>) -> FibBench<M> {
        self.small_algorithms = algorithms;
        self
    }

    /// Changes the strategies measured in the large-n table. Defaults to iterative and fast
    /// doubling; the recursive strategy is intractable there.
    #[must_use]
    pub fn large_algorithms(mut self, algorithms: Vec<Algorithm>) -> FibBench<M> {
        self.large_algorithms = algorithms;
        self
    }

    /// Changes the largest `n` exponential strategies are run with. Inputs above the limit are
    /// skipped for those strategies only.
    #[must_use]
    pub fn recursive_limit(mut self, limit: u64) -> FibBench<M> {
        self.recursive_limit = limit;
        self
    }

    /// Only measure the strategies whose name matches the given regular expression.
    #[must_use]
    pub fn with_filter(mut self, filter: Regex) -> FibBench<M> {
        self.filter = Some(filter);
        self
    }

    /// Enables the SVG charts. Has no effect unless the `plotters` feature is enabled.
    #[must_use]
    pub fn with_plots(mut self) -> FibBench<M> {
        self.report.plots_enabled = true;
        self
    }

    /// Disables the SVG charts.
    #[must_use]
    pub fn without_plots(mut self) -> FibBench<M> {
        self.report.plots_enabled = false;
        self
    }

    /// Enables the JSON exports.
    #[must_use]
    pub fn with_json(mut self) -> FibBench<M> {
        self.report.json_enabled = true;
        self
    }

    /// Disables the CSV exports.
    #[must_use]
    pub fn without_csv(mut self) -> FibBench<M> {
        self.report.csv_enabled = false;
        self
    }

    /// Changes how much the console report prints.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: CliVerbosity) -> FibBench<M> {
        self.report.cli.verbosity = verbosity;
        self
    }

    /// Enables or disables coloured console output.
    #[must_use]
    pub fn with_coloring(mut self, enabled: bool) -> FibBench<M> {
        self.report.cli.enable_text_coloring = enabled;
        self
    }

    /// Applies parsed command-line arguments on top of the current configuration.
    #[must_use]
    pub fn configure_from_args(mut self, args: cli::Args) -> FibBench<M> {
        if let Some(dir) = args.output_directory {
            self = self.output_directory(dir);
        }
        if let Some(inputs) = args.small_inputs {
            self = self.small_inputs(inputs);
        }
        if let Some(inputs) = args.large_inputs {
            self = self.large_inputs(inputs);
        }
        if let Some(limit) = args.recursive_limit {
            self = self.recursive_limit(limit);
        }
        if let Some(filter) = args.filter {
            self = self.with_filter(filter);
        }
        if args.no_plot {
            self = self.without_plots();
        }
        if args.no_csv {
            self = self.without_csv();
        }
        if args.json {
            self = self.with_json();
        }
        self.with_verbosity(args.verbosity)
            .with_coloring(args.color.enabled())
    }

    fn algorithms(&self, kind: TableKind) -> Vec<Algorithm> {
        let algorithms = match kind {
            TableKind::Small => &self.small_algorithms,
            TableKind::Large => &self.large_algorithms,
        };
        algorithms
            .iter()
            .copied()
            .filter(|algorithm| match &self.filter {
                Some(filter) => filter.is_match(algorithm.name()),
                None => true,
            })
            .collect()
    }

    fn inputs(&self, kind: TableKind, algorithm: Algorithm) -> Vec<u64> {
        let inputs = match kind {
            TableKind::Small => &self.small_inputs,
            TableKind::Large => &self.large_inputs,
        };
        if !algorithm.is_exponential() {
            return inputs.clone();
        }

        let (kept, skipped): (Vec<u64>, Vec<u64>) = inputs
            .iter()
            .partition(|&&n| n <= self.recursive_limit);
        if !skipped.is_empty() {
            info!(
                "Skipping {} for n > {} ({} inputs)",
                algorithm,
                self.recursive_limit,
                skipped.len()
            );
        }
        kept
    }

    /// Measures one table: one harness invocation per strategy, concatenated in order. Performs
    /// no I/O beyond logging.
    pub fn measure(&self, kind: TableKind) -> ResultSet {
        let mut results = ResultSet::new(kind);
        for algorithm in self.algorithms(kind) {
            let inputs = self.inputs(kind, algorithm);
            info!(
                "Measuring {} over {} {}-n inputs",
                algorithm,
                inputs.len(),
                kind.name()
            );
            let block = harness::run_and_time(&self.measurement, algorithm, &inputs);
            for result in &block {
                debug!(
                    "{}/{}: {} steps in {} ms",
                    result.algo, result.n, result.steps, result.time_ms
                );
            }
            results.extend(block);
        }
        results
    }

    fn run_table(&self, kind: TableKind, context: &ReportContext) -> Result<ResultSet> {
        let formatter = self.measurement.formatter();

        self.report.table_start(kind, context);
        let results = self.measure(kind);
        for result in &results {
            self.report
                .measurement_complete(kind, result, context, formatter);
        }
        results.check_agreement()?;
        self.report.table_complete(&results, context, formatter);

        Ok(results)
    }

    /// Runs the whole comparison: measures the small-n and large-n tables, verifies that every
    /// strategy agrees on every shared input, and writes the enabled reports.
    ///
    /// Fails if the output directory cannot be created or if two strategies disagree. Failures
    /// while writing individual reports are logged and do not abort the run.
    pub fn run(&self) -> Result<RunSummary> {
        fs::mkdirp(&self.output_directory)?;
        let context = ReportContext {
            output_directory: self.output_directory.clone(),
        };

        let small = self.run_table(TableKind::Small, &context)?;
        let large = self.run_table(TableKind::Large, &context)?;
        self.report.final_summary(&context);

        Ok(RunSummary { small, large })
    }
}
