pub mod svg;
pub mod terminal;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("nothing to plot: {0}")]
    Empty(String),

    #[error("drawing error: {0}")]
    Drawing(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PlotError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

pub type PlotResult = std::result::Result<(), PlotError>;

/// A named line for multi-series charts.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Points that can sit on logarithmic axes.
    pub fn log_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .copied()
            .filter(|&(x, y)| x > 0.0 && y > 0.0 && x.is_finite() && y.is_finite())
            .collect()
    }
}

pub(crate) fn extent(iter: impl Iterator<Item = f64>) -> (f64, f64) {
    iter.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_points_drop_non_positive_values() {
        let series = Series::new(
            "Central",
            vec![(1e-3, 0.0), (1e-2, 1e-8), (0.0, 1.0), (1.0, f64::NAN), (1.0, 2.0)],
        );
        assert_eq!(series.log_points(), vec![(1e-2, 1e-8), (1.0, 2.0)]);
    }

    #[test]
    fn extent_of_values() {
        assert_eq!(extent([3.0, -1.0, 2.0].into_iter()), (-1.0, 3.0));
    }
}
