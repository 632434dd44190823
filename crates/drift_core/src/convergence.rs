//! Step-size sweeps and convergence-order estimates for the stencils.

use crate::{grid::logspace, stencil::Stencil, traits::Profile};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Step sizes tabulated by default.
pub const DEFAULT_STEPS: [f64; 5] = [1.0, 0.5, 0.1, 0.05, 0.01];

/// A base-10 logarithmic range of step sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogRange {
    pub start_exp: f64,
    pub end_exp: f64,
    pub count: usize,
}

impl LogRange {
    pub fn points(&self) -> Vec<f64> {
        logspace(self.start_exp, self.end_exp, self.count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSettings {
    pub x0: f64,
    /// Dense sweep for the error plot.
    pub plot_range: LogRange,
    /// Coarse sweep used for order estimation.
    pub convergence_range: LogRange,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            x0: crate::profile::DEFAULT_X0,
            plot_range: LogRange {
                start_exp: -4.0,
                end_exp: 0.0,
                count: 100,
            },
            convergence_range: LogRange {
                start_exp: -6.0,
                end_exp: 0.0,
                count: 20,
            },
        }
    }
}

/// Which local slopes of a sweep count toward the order estimate.
///
/// Slopes are indexed from the smallest step. The first `skip_smallest` are dropped,
/// and so is any slope whose endpoint errors sit at or below `noise_floor`, where
/// round-off rather than truncation dominates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceWindow {
    pub skip_smallest: usize,
    pub noise_floor: f64,
}

impl Default for ConvergenceWindow {
    fn default() -> Self {
        Self {
            skip_smallest: 10,
            noise_floor: 1e-10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StencilEstimate {
    pub stencil: Stencil,
    pub estimate: f64,
    pub error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRow {
    pub step: f64,
    pub exact: f64,
    pub estimates: Vec<StencilEstimate>,
}

impl StepRow {
    pub fn estimate(&self, stencil: Stencil) -> Option<&StencilEstimate> {
        self.estimates.iter().find(|e| e.stencil == stencil)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorSeries {
    pub stencil: Stencil,
    pub errors: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorSweep {
    /// Ascending step sizes.
    pub steps: Vec<f64>,
    pub series: Vec<ErrorSeries>,
}

impl ErrorSweep {
    pub fn series(&self, stencil: Stencil) -> Option<&ErrorSeries> {
        self.series.iter().find(|s| s.stencil == stencil)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderEstimate {
    pub stencil: Stencil,
    /// |mean| of the windowed local log-log slopes.
    pub mean_order: f64,
    /// |slope| of a least-squares line through the windowed log-log points.
    pub fitted_order: Option<f64>,
    /// Number of local slopes averaged.
    pub samples: usize,
}

/// Every stencil's estimate and absolute error at `x0` for each step size.
pub fn step_table<P: Profile<f64>>(profile: &P, x0: f64, steps: &[f64]) -> Vec<StepRow> {
    let exact = profile.derivative(x0);
    steps
        .iter()
        .map(|&step| StepRow {
            step,
            exact,
            estimates: Stencil::ALL
                .iter()
                .map(|&stencil| {
                    let estimate = stencil.apply(|x| profile.value(x), x0, step);
                    StencilEstimate {
                        stencil,
                        estimate,
                        error: (estimate - exact).abs(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Absolute error of every stencil over `steps`, which should be ascending.
pub fn error_sweep<P: Profile<f64>>(profile: &P, x0: f64, steps: Vec<f64>) -> ErrorSweep {
    let exact = profile.derivative(x0);
    let series = Stencil::ALL
        .iter()
        .map(|&stencil| ErrorSeries {
            stencil,
            errors: steps
                .iter()
                .map(|&h| (stencil.apply(|x| profile.value(x), x0, h) - exact).abs())
                .collect(),
        })
        .collect();
    ErrorSweep { steps, series }
}

/// Slope of log(error) against log(step) between consecutive samples.
pub fn local_orders(steps: &[f64], errors: &[f64]) -> Vec<f64> {
    steps
        .windows(2)
        .zip(errors.windows(2))
        .map(|(h, e)| (e[1].ln() - e[0].ln()) / (h[1].ln() - h[0].ln()))
        .collect()
}

/// Estimates the observed convergence order of one error series.
///
/// Returns `None` when the window leaves no usable slope.
pub fn estimate_order(
    steps: &[f64],
    series: &ErrorSeries,
    window: ConvergenceWindow,
) -> Option<OrderEstimate> {
    let errors = &series.errors;
    let orders = local_orders(steps, errors);
    let usable = |e: f64| e.is_finite() && e > window.noise_floor;

    let selected: Vec<usize> = (window.skip_smallest..orders.len())
        .filter(|&i| usable(errors[i]) && usable(errors[i + 1]) && orders[i].is_finite())
        .collect();
    if selected.is_empty() {
        return None;
    }

    let mean = selected.iter().map(|&i| orders[i]).sum::<f64>() / selected.len() as f64;

    let mut points: Vec<usize> = selected.iter().flat_map(|&i| [i, i + 1]).collect();
    points.dedup();
    let log_steps: Vec<f64> = points.iter().map(|&i| steps[i].ln()).collect();
    let log_errors: Vec<f64> = points.iter().map(|&i| errors[i].ln()).collect();

    Some(OrderEstimate {
        stencil: series.stencil,
        mean_order: mean.abs(),
        fitted_order: fit_slope(&log_steps, &log_errors).map(f64::abs),
        samples: selected.len(),
    })
}

/// Order estimates for every series of a sweep, in sweep order.
pub fn convergence_orders(
    sweep: &ErrorSweep,
    window: ConvergenceWindow,
) -> Vec<(Stencil, Option<OrderEstimate>)> {
    sweep
        .series
        .iter()
        .map(|series| (series.stencil, estimate_order(&sweep.steps, series, window)))
        .collect()
}

/// Least-squares slope of y against x via the normal equations.
fn fit_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }
    let mut design = DMatrix::from_element(x.len(), 2, 1.0);
    for (row, &value) in x.iter().enumerate() {
        design[(row, 1)] = value;
    }
    let rhs = DVector::from_column_slice(y);
    let normal = design.transpose() * &design;
    let projected = design.transpose() * rhs;
    normal.lu().solve(&projected).map(|coeffs| coeffs[1])
}
