use super::{extent, PlotError, PlotResult, Series};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1000, 600);

/// Linear line chart with a faint y = 0 reference line.
pub fn line_svg(
    points: &[(f64, f64)],
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> PlotResult {
    if points.is_empty() {
        return Err(PlotError::Empty(title.to_string()));
    }
    let (x_range, y_range) = padded_ranges(points);
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;
    draw_zero_line(&mut chart, &x_range)?;
    chart
        .draw_series(LineSeries::new(points.iter().copied(), RED.stroke_width(2)))?
        .label(y_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Several series on logarithmic axes. Non-positive samples are skipped.
pub fn loglog_svg(
    series: &[Series],
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> PlotResult {
    let logged: Vec<(&str, Vec<(f64, f64)>)> = series
        .iter()
        .map(|s| (s.label.as_str(), s.log_points()))
        .filter(|(_, pts)| !pts.is_empty())
        .collect();
    if logged.is_empty() {
        return Err(PlotError::Empty(title.to_string()));
    }
    let (x_min, x_max) = extent(logged.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let (y_min, y_max) = extent(logged.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)));

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(
            (x_min..x_max).log_scale(),
            (y_min / 2.0..y_max * 2.0).log_scale(),
        )?;
    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .y_label_formatter(&|v| format!("{v:.0e}"))
        .x_label_formatter(&|v| format!("{v:.0e}"))
        .draw()?;

    for (idx, (label, pts)) in logged.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(pts.iter().copied(), color.stroke_width(2)))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn padded_ranges(points: &[(f64, f64)]) -> ((f64, f64), (f64, f64)) {
    let (x_min, x_max) = extent(points.iter().map(|p| p.0));
    let (y_min, y_max) = extent(points.iter().map(|p| p.1));
    let y_min = y_min.min(0.0);
    let y_pad = (y_max - y_min).abs() * 0.05 + 1e-6;
    ((x_min, x_max.max(x_min + 1e-6)), (y_min - y_pad, y_max + y_pad))
}

fn draw_zero_line<DB: DrawingBackend>(
    chart: &mut ChartContext<DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x_range: &(f64, f64),
) -> PlotResult
where
    DB::ErrorType: 'static,
{
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x_range.0, 0.0), (x_range.1, 0.0)],
        BLACK.mix(0.3).stroke_width(1),
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_ranges_include_zero() {
        let ((x0, x1), (y0, y1)) = padded_ranges(&[(0.0, 5.0), (100.0, 215.0)]);
        assert_eq!((x0, x1), (0.0, 100.0));
        assert!(y0 < 0.0);
        assert!(y1 > 215.0);
    }

    #[test]
    fn empty_inputs_are_rejected_before_drawing() {
        let path = Path::new("never-written.svg");
        assert!(matches!(
            line_svg(&[], path, "Growth", "h", "m"),
            Err(PlotError::Empty(_))
        ));
        let flat = [Series::new("Forward", vec![(1.0, 0.0)])];
        assert!(matches!(
            loglog_svg(&flat, path, "Errors", "h", "e"),
            Err(PlotError::Empty(_))
        ));
        assert!(!path.exists());
    }
}
