//! finite-diff: forward, central and fourth-order stencils on the heat profile,
//! with error tables and observed convergence orders.

use anyhow::{Context, Result};
use clap::Parser;
use drift_cli::{
    cli::{OutputArgs, OutputFormat},
    logging,
    plot::{svg::loglog_svg, terminal::loglog_terminal, Series},
    report::FiniteDiffReport,
};
use drift_core::{
    convergence::{error_sweep, ConvergenceWindow, ErrorSweep, SweepSettings, DEFAULT_STEPS},
    profile::HeatProfile,
};
use std::path::Path;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "finite-diff")]
#[command(about = "Convergence of finite-difference derivatives on a heat profile")]
struct Cli {
    /// Evaluation point
    #[arg(long)]
    x0: Option<f64>,

    /// Comma-separated step sizes to tabulate
    #[arg(long, value_delimiter = ',')]
    steps: Option<Vec<f64>>,

    /// Smallest-step slopes dropped from the order estimate
    #[arg(long)]
    skip: Option<usize>,

    /// Errors at or below this are treated as round-off noise
    #[arg(long)]
    noise_floor: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

impl Cli {
    fn sweep_settings(&self) -> SweepSettings {
        let defaults = SweepSettings::default();
        SweepSettings {
            x0: self.x0.unwrap_or(defaults.x0),
            ..defaults
        }
    }

    fn window(&self) -> ConvergenceWindow {
        let defaults = ConvergenceWindow::default();
        ConvergenceWindow {
            skip_smallest: self.skip.unwrap_or(defaults.skip_smallest),
            noise_floor: self.noise_floor.unwrap_or(defaults.noise_floor),
        }
    }

    fn steps(&self) -> Vec<f64> {
        self.steps
            .clone()
            .unwrap_or_else(|| DEFAULT_STEPS.to_vec())
    }
}

fn to_series(sweep: &ErrorSweep) -> Vec<Series> {
    sweep
        .series
        .iter()
        .map(|s| {
            Series::new(
                s.stencil.label(),
                sweep.steps.iter().copied().zip(s.errors.iter().copied()).collect(),
            )
        })
        .collect()
}

fn write_chart(dir: &Path, file: &str, series: &[Series], title: &str) -> Result<()> {
    let path = dir.join(file);
    loglog_svg(series, &path, title, "Step Size (h)", "Absolute Error")
        .with_context(|| format!("Failed to render {}", path.display()))?;
    info!(path = %path.display(), "Wrote chart");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.output.verbose);

    let profile = HeatProfile::default();
    let settings = cli.sweep_settings();
    let window = cli.window();
    info!(x0 = settings.x0, "Sweeping step sizes");

    let dense = error_sweep(&profile, settings.x0, settings.plot_range.points());
    let coarse = error_sweep(&profile, settings.x0, settings.convergence_range.points());
    debug!(
        dense = dense.steps.len(),
        coarse = coarse.steps.len(),
        "Sweeps evaluated"
    );
    let report = FiniteDiffReport::build(&profile, settings.x0, &cli.steps(), &coarse, window);

    match cli.output.format {
        OutputFormat::Table => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    let dense_series = to_series(&dense);
    let coarse_series = to_series(&coarse);
    let dense_title = "Error Convergence in Temperature Gradient Calculation";
    let coarse_title = "Convergence Analysis";
    if cli.output.terminal_plots() {
        for (series, title) in [(&dense_series, dense_title), (&coarse_series, coarse_title)] {
            println!();
            print!(
                "{}",
                loglog_terminal(series, title, "Step Size (h)", "Absolute Error")
            );
        }
    }
    if let Some(dir) = &cli.output.svg_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        write_chart(dir, "gradient_error.svg", &dense_series, dense_title)?;
        write_chart(dir, "convergence.svg", &coarse_series, coarse_title)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_reproduce_defaults() {
        let cli = Cli::try_parse_from(["finite-diff"]).expect("no arguments is valid");
        assert_eq!(cli.sweep_settings(), SweepSettings::default());
        assert_eq!(cli.window(), ConvergenceWindow::default());
        assert_eq!(cli.steps(), DEFAULT_STEPS.to_vec());
    }

    #[test]
    fn flags_override_window_and_point() {
        let cli = Cli::try_parse_from([
            "finite-diff",
            "--x0",
            "2.5",
            "--skip",
            "4",
            "--noise-floor",
            "1e-12",
            "--steps",
            "0.2,0.1",
        ])
        .expect("flags are valid");
        assert_eq!(cli.sweep_settings().x0, 2.5);
        assert_eq!(
            cli.window(),
            ConvergenceWindow {
                skip_smallest: 4,
                noise_floor: 1e-12,
            }
        );
        assert_eq!(cli.steps(), vec![0.2, 0.1]);
    }

    #[test]
    fn series_pair_steps_with_errors() {
        let profile = HeatProfile::default();
        let sweep = error_sweep(&profile, 5.0, vec![0.1, 1.0]);
        let series = to_series(&sweep);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].label, "Forward");
        assert_eq!(series[1].points[1].0, 1.0);
        assert_eq!(series[1].points[1].1, sweep.series[1].errors[1]);
    }
}
