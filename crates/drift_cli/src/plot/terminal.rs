use super::Series;
use textplots::{Chart, Plot, Shape};

const WIDTH: u32 = 120;
const HEIGHT: u32 = 40;

/// Line chart of `points` rendered as braille text.
pub fn line_terminal(points: &[(f64, f64)], title: &str, x_label: &str, y_label: &str) -> String {
    if points.is_empty() {
        return format!("{title}\n  (no data)\n");
    }
    let f32_pts = to_f32_points(points);
    let (xmin, xmax) = f32_extent(f32_pts.iter().map(|p| p.0));
    let shape = Shape::Lines(&f32_pts);
    let mut chart = Chart::new(WIDTH, HEIGHT, xmin, xmax);
    let rendered = chart.lineplot(&shape);
    rendered.axis();
    rendered.figures();
    format!("{title}\n  {y_label} vs {x_label}\n{rendered}")
}

/// Several series on log10 axes. Axis figures are decades.
pub fn loglog_terminal(series: &[Series], title: &str, x_label: &str, y_label: &str) -> String {
    let logged: Vec<(&str, Vec<(f32, f32)>)> = series
        .iter()
        .map(|s| {
            let pts = s
                .log_points()
                .into_iter()
                .map(|(x, y)| (x.log10() as f32, y.log10() as f32))
                .collect();
            (s.label.as_str(), pts)
        })
        .filter(|(_, pts): &(&str, Vec<(f32, f32)>)| !pts.is_empty())
        .collect();
    if logged.is_empty() {
        return format!("{title}\n  (no data)\n");
    }

    let (xmin, xmax) = f32_extent(logged.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
    let shapes: Vec<Shape> = logged.iter().map(|(_, pts)| Shape::Lines(pts)).collect();

    let mut chart = Chart::new(WIDTH, HEIGHT, xmin, xmax);
    let mut rendered = &mut chart;
    for shape in &shapes {
        rendered = rendered.lineplot(shape);
    }
    rendered.axis();
    rendered.figures();

    let legend: Vec<&str> = logged.iter().map(|(label, _)| *label).collect();
    format!(
        "{title}\n  log10({y_label}) vs log10({x_label}); series: {}\n{rendered}",
        legend.join(", ")
    )
}

fn to_f32_points(points: &[(f64, f64)]) -> Vec<(f32, f32)> {
    points.iter().map(|&(x, y)| (x as f32, y as f32)).collect()
}

fn f32_extent(iter: impl Iterator<Item = f32>) -> (f32, f32) {
    let (lo, hi) = iter.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if (hi - lo).abs() < 1e-6 {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}
