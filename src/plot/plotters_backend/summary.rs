use super::*;
use crate::error::{Error, Result};
use crate::AxisScale;
use plotters::coord::{
    ranged1d::{AsRangedCoord, ValueFormatter as PlottersValueFormatter},
    Shift,
};
use std::error::Error as StdError;
use std::ops::Range;
use std::path::Path;

type DrawResult = std::result::Result<(), Box<dyn StdError>>;

const NUM_COLORS: usize = 8;
static COMPARISON_COLORS: [RGBColor; NUM_COLORS] = [
    RGBColor(178, 34, 34),
    RGBColor(46, 139, 87),
    RGBColor(0, 139, 139),
    RGBColor(255, 215, 0),
    RGBColor(0, 0, 139),
    RGBColor(220, 20, 60),
    RGBColor(139, 0, 139),
    RGBColor(0, 255, 127),
];

/// Draws one line per curve, with point markers and a legend, into an SVG file at `path`.
pub(crate) fn line_comparison(
    figure: &Figure,
    curves: &[Curve],
    x_range: Range<f64>,
    y_range: Range<f64>,
    path: &Path,
) -> Result<()> {
    draw(figure, curves, x_range, y_range, path).map_err(|e| Error::PlotError {
        path: path.to_owned(),
        message: e.to_string(),
    })
}

fn draw(
    figure: &Figure,
    curves: &[Curve],
    x_range: Range<f64>,
    y_range: Range<f64>,
    path: &Path,
) -> DrawResult {
    let root_area = SVGBackend::new(path, SIZE).into_drawing_area();
    root_area.fill(&WHITE)?;
    let root_area = root_area.titled(&figure.title, (DEFAULT_FONT, 20))?;

    match (figure.x_scale, figure.y_scale) {
        (AxisScale::Linear, AxisScale::Linear) => {
            draw_line_comparison_figure(&root_area, figure, x_range, y_range, curves)?
        }
        (AxisScale::Linear, AxisScale::Logarithmic) => draw_line_comparison_figure(
            &root_area,
            figure,
            x_range,
            y_range.log_scale(),
            curves,
        )?,
        (AxisScale::Logarithmic, AxisScale::Linear) => draw_line_comparison_figure(
            &root_area,
            figure,
            x_range.log_scale(),
            y_range,
            curves,
        )?,
        (AxisScale::Logarithmic, AxisScale::Logarithmic) => draw_line_comparison_figure(
            &root_area,
            figure,
            x_range.log_scale(),
            y_range.log_scale(),
            curves,
        )?,
    }

    root_area.present()?;
    Ok(())
}

fn draw_line_comparison_figure<XR: AsRangedCoord<Value = f64>, YR: AsRangedCoord<Value = f64>>(
    root_area: &DrawingArea<SVGBackend<'_>, Shift>,
    figure: &Figure,
    x_range: XR,
    y_range: YR,
    curves: &[Curve],
) -> DrawResult
where
    XR::CoordDescType: PlottersValueFormatter<f64>,
    YR::CoordDescType: PlottersValueFormatter<f64>,
{
    let mut chart = ChartBuilder::on(root_area)
        .margin((5).percent())
        .set_label_area_size(LabelAreaPosition::Left, (5).percent_width().min(60))
        .set_label_area_size(LabelAreaPosition::Bottom, (5).percent_height().min(40))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(figure.x_desc.as_str())
        .y_desc(figure.y_desc.as_str())
        .draw()?;

    for (id, curve) in (0..).zip(curves) {
        let color = COMPARISON_COLORS[id % NUM_COLORS];
        chart
            .draw_series(
                LineSeries::new(curve.points.iter().copied(), color.filled())
                    .point_size(POINT_SIZE),
            )?
            .label(curve.name)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled())
            });
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
