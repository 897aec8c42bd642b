use crate::error::Result;
use crate::measurement::ValueFormatter;
use crate::report::{Report, ReportContext};
use crate::results::{FibResult, ResultSet, TableKind};
use crate::AxisScale;
use std::ops::Range;

mod plotters_backend;

/// The measured quantity drawn on the y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Metric {
    Time,
    Steps,
}
impl Metric {
    const ALL: [Metric; 2] = [Metric::Time, Metric::Steps];

    fn name(self) -> &'static str {
        match self {
            Metric::Time => "Time",
            Metric::Steps => "Steps",
        }
    }

    fn file_suffix(self) -> &'static str {
        match self {
            Metric::Time => "_time.svg",
            Metric::Steps => "_steps.svg",
        }
    }

    fn axis_desc(self) -> &'static str {
        match self {
            Metric::Time => "Time (ms)",
            Metric::Steps => "Steps",
        }
    }

    fn value(self, result: &FibResult) -> f64 {
        match self {
            Metric::Time => result.time_ms,
            Metric::Steps => cast::f64(result.steps),
        }
    }
}

pub(crate) struct Figure {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_scale: AxisScale,
    pub y_scale: AxisScale,
}
impl Figure {
    fn new(results: &ResultSet, metric: Metric) -> Figure {
        let (x_scale, y_scale) = results.kind().axis_scales();
        let title = match results.kind() {
            TableKind::Small => {
                let max_n = results.iter().map(|result| result.n).max().unwrap_or(0);
                format!("{} vs n (up to {})", metric.name(), max_n)
            }
            TableKind::Large => format!("{} (large n)", metric.name()),
        };

        Figure {
            title,
            x_desc: axis_desc("n", x_scale),
            y_desc: axis_desc(metric.axis_desc(), y_scale),
            x_scale,
            y_scale,
        }
    }
}

fn axis_desc(desc: &str, scale: AxisScale) -> String {
    match scale {
        AxisScale::Linear => desc.to_owned(),
        AxisScale::Logarithmic => format!("{} [log]", desc),
    }
}

/// One line of a chart: a strategy and its (n, value) points.
pub(crate) struct Curve {
    pub name: &'static str,
    pub points: Vec<(f64, f64)>,
}

fn plottable(value: f64, scale: AxisScale) -> bool {
    value.is_finite() && (scale == AxisScale::Linear || value > 0.0)
}

// Log axes cannot show non-positive values, so those points are dropped.
fn curves(results: &ResultSet, metric: Metric, figure: &Figure) -> Vec<Curve> {
    results
        .series()
        .into_iter()
        .filter_map(|(algorithm, block)| {
            let total = block.len();
            let points: Vec<_> = block
                .into_iter()
                .map(|result| (cast::f64(result.n), metric.value(result)))
                .filter(|&(x, y)| plottable(x, figure.x_scale) && plottable(y, figure.y_scale))
                .collect();

            if points.len() < total {
                warn!(
                    "Dropped {} of {} points of {} from \"{}\": not representable on a log axis",
                    total - points.len(),
                    total,
                    algorithm,
                    figure.title
                );
            }
            if points.is_empty() {
                None
            } else {
                Some(Curve {
                    name: algorithm.name(),
                    points,
                })
            }
        })
        .collect()
}

/// Range covering `values`, widened when every value is the same.
fn axis_range<I: Iterator<Item = f64>>(values: I, scale: AxisScale) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
        (min.min(v), max.max(v))
    });
    if min > max {
        return match scale {
            AxisScale::Linear => 0.0..1.0,
            AxisScale::Logarithmic => 1.0..10.0,
        };
    }

    if min < max {
        min..max
    } else {
        match scale {
            AxisScale::Linear => (min - 1.0)..(max + 1.0),
            AxisScale::Logarithmic => (min / 2.0)..(max * 2.0),
        }
    }
}

pub(crate) struct PlotReport;
impl PlotReport {
    fn plot(&self, results: &ResultSet, metric: Metric, context: &ReportContext) -> Result<()> {
        let path = context.report_path(results.kind(), metric.file_suffix());
        let figure = Figure::new(results, metric);
        let curves = curves(results, metric, &figure);
        if curves.is_empty() {
            debug!("Nothing to plot in {:?}", path);
            return Ok(());
        }

        let x_range = axis_range(
            curves.iter().flat_map(|c| c.points.iter().map(|p| p.0)),
            figure.x_scale,
        );
        let y_range = axis_range(
            curves.iter().flat_map(|c| c.points.iter().map(|p| p.1)),
            figure.y_scale,
        );
        plotters_backend::line_comparison(&figure, &curves, x_range, y_range, &path)
    }
}

impl Report for PlotReport {
    fn table_complete(
        &self,
        results: &ResultSet,
        context: &ReportContext,
        _formatter: &dyn ValueFormatter,
    ) {
        for &metric in Metric::ALL.iter() {
            log_if_err!(elapsed!(
                format!("Plotting {} of the {} table", metric.name(), results.kind().name()),
                self.plot(results, metric, context)
            ));
        }
    }
}
