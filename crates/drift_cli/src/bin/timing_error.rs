//! timing-error: clock-quantization drift of a truncated tick, plus the
//! catastrophic-cancellation comparison.

use anyhow::{Context, Result};
use clap::Parser;
use drift_cli::{
    cli::{OutputArgs, OutputFormat},
    logging,
    plot::{svg::line_svg, terminal::line_terminal},
    report::TimingReport,
};
use drift_core::{
    cancellation::CancellationSettings,
    decimal::DecimalContext,
    timing::{TimingModel, TimingSettings, DEFAULT_HOURS, INCIDENT_HOURS},
};
use tracing::info;

const GROWTH_SAMPLES: usize = 100;

#[derive(Parser)]
#[command(name = "timing-error")]
#[command(about = "Clock drift from a truncated fixed-point tick")]
struct Cli {
    /// Tick length in seconds, as a decimal literal
    #[arg(long)]
    tick: Option<String>,

    /// Fractional bits kept by the tick register
    #[arg(long)]
    bits: Option<usize>,

    /// Target velocity in m/s
    #[arg(long)]
    velocity: Option<f64>,

    /// Maximum fractional decimal digits accepted for the tick
    #[arg(long)]
    precision: Option<u32>,

    /// Comma-separated operating hours to tabulate
    #[arg(long, value_delimiter = ',')]
    hours: Option<Vec<f64>>,

    /// Uptime used for the intercept analysis and the growth plot
    #[arg(long, default_value_t = INCIDENT_HOURS)]
    incident_hours: f64,

    #[command(flatten)]
    output: OutputArgs,
}

impl Cli {
    fn timing_settings(&self) -> TimingSettings {
        let defaults = TimingSettings::default();
        TimingSettings {
            tick: self.tick.clone().unwrap_or(defaults.tick),
            bits: self.bits.unwrap_or(defaults.bits),
            target_velocity: self.velocity.unwrap_or(defaults.target_velocity),
            precision: self
                .precision
                .map(|precision| DecimalContext { precision })
                .unwrap_or(defaults.precision),
            critical_distance: defaults.critical_distance,
        }
    }

    fn hours(&self) -> Vec<f64> {
        self.hours
            .clone()
            .unwrap_or_else(|| DEFAULT_HOURS.to_vec())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.output.verbose);

    let settings = cli.timing_settings();
    info!(tick = %settings.tick, bits = settings.bits, "Building timing model");
    let model = TimingModel::new(settings)?;
    let report = TimingReport::build(
        &model,
        &cli.hours(),
        cli.incident_hours,
        CancellationSettings::default(),
    );

    match cli.output.format {
        OutputFormat::Table => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    let curve = model.growth_curve(cli.incident_hours, GROWTH_SAMPLES);
    let title = "Position Error Growth Over Time";
    if cli.output.terminal_plots() {
        println!();
        print!(
            "{}",
            line_terminal(&curve, title, "Hours of Operation", "Position Error (meters)")
        );
    }
    if let Some(dir) = &cli.output.svg_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join("position_error_growth.svg");
        line_svg(
            &curve,
            &path,
            title,
            "Hours of Operation",
            "Position Error (meters)",
        )
        .with_context(|| format!("Failed to render {}", path.display()))?;
        info!(path = %path.display(), "Wrote growth chart");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_reproduce_defaults() {
        let cli = Cli::try_parse_from(["timing-error"]).expect("no arguments is valid");
        assert_eq!(cli.timing_settings(), TimingSettings::default());
        assert_eq!(cli.hours(), DEFAULT_HOURS.to_vec());
        assert_eq!(cli.incident_hours, INCIDENT_HOURS);
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::try_parse_from([
            "timing-error",
            "--tick",
            "0.2",
            "--bits",
            "16",
            "--velocity",
            "900",
            "--precision",
            "5",
            "--hours",
            "1,2,3",
        ])
        .expect("flags are valid");
        let settings = cli.timing_settings();
        assert_eq!(settings.tick, "0.2");
        assert_eq!(settings.bits, 16);
        assert_eq!(settings.target_velocity, 900.0);
        assert_eq!(settings.precision.precision, 5);
        assert_eq!(cli.hours(), vec![1.0, 2.0, 3.0]);
    }
}
