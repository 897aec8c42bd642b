#[cfg(feature = "csv_output")]
use crate::csv_report::FileCsvReport;
#[cfg(feature = "plotters")]
use crate::plot::PlotReport;

use crate::format;
use crate::fs;
use crate::measurement::ValueFormatter;
use crate::results::{FibResult, ResultSet, TableKind};
use anes::{Attribute, Color, ResetAttributes, SetAttribute, SetForegroundColor};
use std::path::PathBuf;

/// Values with more digits than this are summarized by their digit count on the console.
const MAX_PRINTED_DIGITS: u64 = 20;

#[derive(Debug, Clone)]
pub(crate) struct ReportContext {
    pub output_directory: PathBuf,
}
impl ReportContext {
    /// Path of an export of the given table, e.g. `fib_small.csv` or `fib_large_time.svg`.
    pub fn report_path(&self, kind: TableKind, suffix: &str) -> PathBuf {
        self.output_directory
            .join(format!("{}{}", kind.file_stem(), suffix))
    }
}

pub(crate) trait Report {
    fn table_start(&self, _kind: TableKind, _context: &ReportContext) {}
    fn measurement_complete(
        &self,
        _kind: TableKind,
        _result: &FibResult,
        _context: &ReportContext,
        _formatter: &dyn ValueFormatter,
    ) {
    }
    fn table_complete(
        &self,
        _results: &ResultSet,
        _context: &ReportContext,
        _formatter: &dyn ValueFormatter,
    ) {
    }
    fn final_summary(&self, _context: &ReportContext) {}
}

pub(crate) struct Reports {
    pub(crate) cli_enabled: bool,
    pub(crate) cli: CliReport,
    #[cfg_attr(not(feature = "csv_output"), allow(dead_code))]
    pub(crate) csv_enabled: bool,
    pub(crate) json_enabled: bool,
    #[cfg_attr(not(feature = "plotters"), allow(dead_code))]
    pub(crate) plots_enabled: bool,
}
macro_rules! reports_impl {
    (fn $name:ident(&self, $($argn:ident: $argt:ty),*)) => {
        fn $name(&self, $($argn: $argt),* ) {
            if self.cli_enabled {
                self.cli.$name($($argn),*);
            }
            #[cfg(feature = "csv_output")]
            if self.csv_enabled {
                FileCsvReport.$name($($argn),*);
            }
            if self.json_enabled {
                FileJsonReport.$name($($argn),*);
            }
            #[cfg(feature = "plotters")]
            if self.plots_enabled {
                PlotReport.$name($($argn),*);
            }
        }
    };
}

impl Report for Reports {
    reports_impl!(fn table_start(&self, kind: TableKind, context: &ReportContext));
    reports_impl!(
    fn measurement_complete(
        &self,
        kind: TableKind,
        result: &FibResult,
        context: &ReportContext,
        formatter: &dyn ValueFormatter
    ));
    reports_impl!(
    fn table_complete(
        &self,
        results: &ResultSet,
        context: &ReportContext,
        formatter: &dyn ValueFormatter
    ));
    reports_impl!(fn final_summary(&self, context: &ReportContext));
}

/// How much the console report prints.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CliVerbosity {
    /// Only the per-strategy totals of each table.
    Quiet,
    /// Every measurement, with long values summarized by their digit count.
    Normal,
    /// Every measurement with its full value.
    Verbose,
}
impl Default for CliVerbosity {
    fn default() -> Self {
        CliVerbosity::Normal
    }
}

pub(crate) struct CliReport {
    pub enable_text_coloring: bool,
    pub verbosity: CliVerbosity,
}
impl CliReport {
    pub fn new(enable_text_coloring: bool, verbosity: CliVerbosity) -> CliReport {
        CliReport {
            enable_text_coloring,
            verbosity,
        }
    }

    fn with_color(&self, color: Color, s: &str) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetForegroundColor(color), s, ResetAttributes)
        } else {
            String::from(s)
        }
    }

    fn green(&self, s: &str) -> String {
        self.with_color(Color::DarkGreen, s)
    }

    fn bold(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Bold), s, ResetAttributes)
        } else {
            s
        }
    }

    fn faint(&self, s: String) -> String {
        if self.enable_text_coloring {
            format!("{}{}{}", SetAttribute(Attribute::Faint), s, ResetAttributes)
        } else {
            s
        }
    }

    fn describe_value(&self, kind: TableKind, result: &FibResult) -> String {
        let digits = result.digits();
        if kind.keeps_values()
            && (digits <= MAX_PRINTED_DIGITS || self.verbosity == CliVerbosity::Verbose)
        {
            result.value.to_string()
        } else {
            format::digits(digits)
        }
    }

    fn measurement_lines(
        &self,
        kind: TableKind,
        result: &FibResult,
        formatter: &dyn ValueFormatter,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        let mut id = format!("{}/{}", result.algo, result.n);

        if id.len() > 23 {
            lines.push(self.green(&id));
            id.clear();
        }
        let id_len = id.len();

        lines.push(format!(
            "{}{}time:   {}",
            self.green(&id),
            " ".repeat(24 - id_len),
            self.bold(formatter.format_value(result.time_ms)),
        ));
        lines.push(format!(
            "{}steps:  {}",
            " ".repeat(24),
            format::integer(result.steps)
        ));
        lines.push(format!(
            "{}value:  {}",
            " ".repeat(24),
            self.faint(self.describe_value(kind, result))
        ));
        lines
    }

    fn total_lines(&self, results: &ResultSet, formatter: &dyn ValueFormatter) -> Vec<String> {
        results
            .series()
            .into_iter()
            .map(|(algorithm, block)| {
                let time: f64 = block.iter().map(|result| result.time_ms).sum();
                let steps = block
                    .iter()
                    .fold(0u64, |total, result| total.saturating_add(result.steps));
                let label = format!("{} total", algorithm);
                format!(
                    "{}{}time:   {} over {} inputs, {} steps",
                    self.green(&label),
                    " ".repeat(24usize.saturating_sub(label.len())),
                    self.bold(formatter.format_value(time)),
                    block.len(),
                    format::integer(steps)
                )
            })
            .collect()
    }
}
impl Report for CliReport {
    fn table_start(&self, kind: TableKind, _: &ReportContext) {
        if self.verbosity != CliVerbosity::Quiet {
            println!("{}", self.bold(format!("Fibonacci, {} n", kind.name())));
        }
    }

    fn measurement_complete(
        &self,
        kind: TableKind,
        result: &FibResult,
        _: &ReportContext,
        formatter: &dyn ValueFormatter,
    ) {
        if self.verbosity == CliVerbosity::Quiet {
            return;
        }
        for line in self.measurement_lines(kind, result, formatter) {
            println!("{}", line);
        }
    }

    fn table_complete(
        &self,
        results: &ResultSet,
        _: &ReportContext,
        formatter: &dyn ValueFormatter,
    ) {
        for line in self.total_lines(results, formatter) {
            println!("{}", line);
        }
        println!();
    }

    fn final_summary(&self, context: &ReportContext) {
        if self.verbosity != CliVerbosity::Quiet {
            println!(
                "Reports written to {}",
                self.faint(context.output_directory.display().to_string())
            );
        }
    }
}

pub(crate) struct FileJsonReport;
impl Report for FileJsonReport {
    fn table_complete(
        &self,
        results: &ResultSet,
        context: &ReportContext,
        _: &dyn ValueFormatter,
    ) {
        let path = context.report_path(results.kind(), ".json");
        let rows: Vec<_> = results.rows().collect();
        log_if_err!(fs::save(&rows, &path));
    }
}
