//! Report assembly for both demonstrations.
//!
//! Each report is a serializable snapshot of one run. `render_text` produces the
//! console layout; the JSON format serializes the same struct.

use crate::table::{fixed, Table};
use drift_core::{
    cancellation::{cancellation_table, CancellationRow, CancellationSettings},
    convergence::{
        convergence_orders, step_table, ConvergenceWindow, ErrorSweep, OrderEstimate, StepRow,
    },
    profile::HeatProfile,
    stencil::Stencil,
    timing::{InterceptWindow, TimingErrorRow, TimingModel},
    traits::Profile,
};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct TimingReport {
    pub tick: String,
    pub bits: usize,
    pub binary: String,
    pub error_per_tick: f64,
    pub rows: Vec<TimingErrorRow>,
    pub incident: InterceptWindow,
    pub cancellation: Vec<CancellationRow>,
}

impl TimingReport {
    pub fn build(
        model: &TimingModel,
        hours: &[f64],
        incident_hours: f64,
        cancellation: CancellationSettings,
    ) -> Self {
        Self {
            tick: model.settings().tick.clone(),
            bits: model.settings().bits,
            binary: model.truncation().binary.to_string(),
            error_per_tick: model.error_per_tick(),
            rows: model.table(hours),
            incident: model.intercept_window(incident_hours),
            cancellation: cancellation_table(cancellation),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "Patriot Missile System Error Analysis");
        let _ = writeln!(
            out,
            "\nBinary representation of {} seconds ({} bits):",
            self.tick, self.bits
        );
        let _ = writeln!(out, "{}", self.binary);

        let mut table = Table::new([
            "Hours of Operation",
            "Time Error (seconds)",
            "Position Error (meters)",
        ]);
        for row in &self.rows {
            table.push_row(vec![
                row.hours.to_string(),
                fixed(row.accumulated_error, 6),
                fixed(row.position_error, 6),
            ]);
        }
        let _ = writeln!(out, "\nError Accumulation Analysis:");
        out.push_str(&table.render());

        let incident = &self.incident;
        let _ = writeln!(
            out,
            "\nDhahran Incident Analysis (after {} hours of operation):",
            incident.hours
        );
        let _ = writeln!(out, "Time error: {:.6} seconds", incident.time_error);
        let _ = writeln!(out, "Position error: {:.2} meters", incident.position_error);
        let _ = writeln!(out, "\nCritical Analysis:");
        let _ = writeln!(
            out,
            "Time window for successful interception: \u{b1}{:.6} seconds",
            incident.critical_time
        );
        let _ = writeln!(
            out,
            "Actual error exceeded this by: {:.1}x",
            incident.exceedance
        );

        out.push('\n');
        out.push_str(&render_cancellation(&self.cancellation));
        out
    }
}

pub fn render_cancellation(rows: &[CancellationRow]) -> String {
    let mut out = String::new();
    heading(&mut out, "Catastrophic Cancellation in Trajectory Calculations");
    let mut table = Table::new([
        "Bits",
        "Direct Result",
        "Indirect Result",
        "Absolute Error",
        "Relative Error (%)",
    ]);
    for row in rows {
        table.push_row(vec![
            row.bits.to_string(),
            fixed(row.direct, 10),
            fixed(row.indirect, 10),
            fixed(row.absolute_error, 10),
            fixed(row.relative_error_percent, 10),
        ]);
    }
    let _ = writeln!(out, "\nPrecision Loss Analysis:");
    out.push_str(&table.render());
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderLine {
    pub stencil: Stencil,
    pub estimate: Option<OrderEstimate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FiniteDiffReport {
    pub x0: f64,
    pub exact: f64,
    pub steps: Vec<StepRow>,
    pub window: ConvergenceWindow,
    pub orders: Vec<OrderLine>,
}

impl FiniteDiffReport {
    pub fn build(
        profile: &HeatProfile,
        x0: f64,
        steps: &[f64],
        convergence: &ErrorSweep,
        window: ConvergenceWindow,
    ) -> Self {
        Self {
            x0,
            exact: profile.derivative(x0),
            steps: step_table(profile, x0, steps),
            window,
            orders: convergence_orders(convergence, window)
                .into_iter()
                .map(|(stencil, estimate)| OrderLine { stencil, estimate })
                .collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        heading(&mut out, "1. Heat Sink Temperature Profile Analysis");

        let mut headers = vec!["Step h".to_string()];
        for stencil in Stencil::ALL {
            headers.push(stencil.label().to_string());
            headers.push(format!("{} Error", stencil.label()));
        }
        let mut table = Table::new(headers);
        for row in &self.steps {
            let mut cells = vec![fixed(row.step, 8)];
            for estimate in &row.estimates {
                cells.push(fixed(estimate.estimate, 8));
                cells.push(fixed(estimate.error, 8));
            }
            table.push_row(cells);
        }
        let _ = writeln!(
            out,
            "\nTemperature Gradient Approximation Analysis (x0 = {}, exact = {:.8}):",
            self.x0, self.exact
        );
        out.push_str(&table.render());

        out.push('\n');
        heading(&mut out, "2. Convergence Analysis");
        let _ = writeln!(out, "\nConvergence Rates Analysis:");
        for line in &self.orders {
            match &line.estimate {
                Some(estimate) => {
                    let fitted = estimate
                        .fitted_order
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or_else(|| "n/a".to_string());
                    let _ = writeln!(
                        out,
                        "{}: Order {:.2} (least squares {}, {} slopes)",
                        line.stencil.label(),
                        estimate.mean_order,
                        fitted,
                        estimate.samples
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "{}: no slopes above the noise floor ({:e})",
                        line.stencil.label(),
                        self.window.noise_floor
                    );
                }
            }
        }
        out
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_core::{
        convergence::{error_sweep, SweepSettings, DEFAULT_STEPS},
        timing::{TimingSettings, DEFAULT_HOURS, INCIDENT_HOURS},
    };

    fn timing_report() -> TimingReport {
        let model = TimingModel::new(TimingSettings::default()).unwrap();
        TimingReport::build(
            &model,
            &DEFAULT_HOURS,
            INCIDENT_HOURS,
            CancellationSettings::default(),
        )
    }

    fn finite_diff_report() -> FiniteDiffReport {
        let profile = HeatProfile::default();
        let settings = SweepSettings::default();
        let sweep = error_sweep(&profile, settings.x0, settings.convergence_range.points());
        FiniteDiffReport::build(
            &profile,
            settings.x0,
            &DEFAULT_STEPS,
            &sweep,
            ConvergenceWindow::default(),
        )
    }

    #[test]
    fn timing_text_contains_known_figures() {
        let text = timing_report().render_text();
        assert!(text.contains("0.000110011001100110011001"));
        assert!(text.contains("Time error: 0.128746 seconds"));
        assert!(text.contains("Position error: 215.78 meters"));
        assert!(text.contains("\u{b1}0.011933 seconds"));
        assert!(text.contains("exceeded this by: 10.8x"));
        assert!(text.contains("Precision Loss Analysis:"));
    }

    #[test]
    fn timing_table_has_one_line_per_hour() {
        let report = timing_report();
        assert_eq!(report.rows.len(), DEFAULT_HOURS.len());
        let text = report.render_text();
        let hundred = text
            .lines()
            .find(|line| line.trim_start().starts_with("100 "))
            .expect("row for 100 hours");
        assert!(hundred.contains("0.128746"));
        assert!(hundred.contains("215.778"));
    }

    #[test]
    fn cancellation_rows_render() {
        let text = render_cancellation(&timing_report().cancellation);
        assert!(text.contains("100.0000000000"));
        assert!(text.lines().any(|line| line.trim_start().starts_with("64 ")));
    }

    #[test]
    fn timing_report_serializes() {
        let json = serde_json::to_value(timing_report()).expect("report serializes");
        assert_eq!(json["bits"], 24);
        assert_eq!(json["binary"], "0.000110011001100110011001");
        assert_eq!(json["rows"].as_array().map(|r| r.len()), Some(7));
        assert_eq!(json["cancellation"][0]["bits"], 32);
    }

    #[test]
    fn finite_diff_text_lists_orders() {
        let text = finite_diff_report().render_text();
        assert!(text.contains("Fourth Order Error"));
        assert!(text.contains("Forward: Order "));
        assert!(text.contains("Central: Order 2.00"));
        assert!(text.contains("Fourth Order: Order"));
        assert_eq!(
            text.lines()
                .filter(|line| line.trim_start().starts_with("0.0"))
                .count(),
            2
        );
    }

    #[test]
    fn missing_estimate_is_reported() {
        let mut report = finite_diff_report();
        report.orders[2].estimate = None;
        let text = report.render_text();
        assert!(text.contains("Fourth Order: no slopes above the noise floor (1e-10)"));
    }

    #[test]
    fn finite_diff_report_serializes() {
        let json = serde_json::to_value(finite_diff_report()).expect("report serializes");
        assert_eq!(json["steps"].as_array().map(|s| s.len()), Some(5));
        assert_eq!(json["orders"][1]["stencil"], "Central");
        assert_eq!(json["window"]["skip_smallest"], 10);
    }
}
