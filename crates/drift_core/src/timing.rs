//! Clock drift accumulated from a truncated tick.
//!
//! The tick is counted by a fixed-point register that holds only `bits` fractional
//! binary digits. Every tick loses the same small amount, so the elapsed-time error
//! grows linearly with the number of ticks and the position error grows linearly
//! with the time error.

use crate::{
    decimal::{DecimalContext, ExactFraction},
    grid::linspace,
    truncation::{binary_expansion, Truncation, DEFAULT_BITS},
};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Operating durations tabulated by default.
pub const DEFAULT_HOURS: [f64; 7] = [0.0, 8.0, 16.0, 24.0, 48.0, 72.0, 100.0];

/// Uptime of the Dhahran battery when the intercept failed.
pub const INCIDENT_HOURS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Tick length in seconds, as a decimal literal.
    pub tick: String,
    /// Fractional bits kept by the tick register.
    pub bits: usize,
    /// Closing speed of the target in m/s.
    pub target_velocity: f64,
    pub precision: DecimalContext,
    /// Target size in meters; the intercept window is this distance at target speed.
    pub critical_distance: f64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            tick: "0.1".to_string(),
            bits: DEFAULT_BITS,
            target_velocity: 1676.0,
            precision: DecimalContext::default(),
            critical_distance: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingErrorRow {
    pub hours: f64,
    pub ticks: f64,
    pub error_per_tick: f64,
    pub accumulated_error: f64,
    pub position_error: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InterceptWindow {
    pub hours: f64,
    pub time_error: f64,
    pub position_error: f64,
    /// Time the target needs to cross the critical distance.
    pub critical_time: f64,
    /// How many intercept windows the time error spans.
    pub exceedance: f64,
}

#[derive(Debug, Clone)]
pub struct TimingModel {
    settings: TimingSettings,
    tick: ExactFraction,
    truncation: Truncation,
    error_per_tick: f64,
    ticks_per_second: f64,
}

impl TimingModel {
    pub fn new(settings: TimingSettings) -> Result<Self> {
        if settings.bits == 0 {
            bail!("bits must be greater than zero.");
        }
        if !settings.target_velocity.is_finite() || settings.target_velocity <= 0.0 {
            bail!("target_velocity must be positive and finite.");
        }
        if !settings.critical_distance.is_finite() || settings.critical_distance <= 0.0 {
            bail!("critical_distance must be positive and finite.");
        }

        let tick = ExactFraction::parse(&settings.tick, settings.precision)
            .with_context(|| format!("Invalid clock tick \"{}\".", settings.tick))?;
        if tick.is_zero() {
            bail!("Clock tick must be non-zero.");
        }

        let truncation = binary_expansion(&tick, settings.bits);
        let error_per_tick = tick.to_f64() - truncation.binary.to_f64();
        let ticks_per_second = tick.per_unit();
        debug!(
            tick = %tick,
            binary = %truncation.binary,
            error_per_tick,
            ticks_per_second,
            "Timing model constructed"
        );

        Ok(Self {
            settings,
            tick,
            truncation,
            error_per_tick,
            ticks_per_second,
        })
    }

    pub fn settings(&self) -> &TimingSettings {
        &self.settings
    }

    pub fn tick(&self) -> ExactFraction {
        self.tick
    }

    pub fn truncation(&self) -> &Truncation {
        &self.truncation
    }

    pub fn error_per_tick(&self) -> f64 {
        self.error_per_tick
    }

    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    /// Drift after `hours` of continuous operation.
    pub fn error_at(&self, hours: f64) -> TimingErrorRow {
        let ticks = hours * SECONDS_PER_HOUR * self.ticks_per_second;
        let accumulated_error = self.error_per_tick * ticks;
        TimingErrorRow {
            hours,
            ticks,
            error_per_tick: self.error_per_tick,
            accumulated_error,
            position_error: accumulated_error * self.settings.target_velocity,
        }
    }

    pub fn table(&self, hours: &[f64]) -> Vec<TimingErrorRow> {
        hours.iter().map(|&h| self.error_at(h)).collect()
    }

    /// `(hours, position_error)` samples evenly spaced over `[0, max_hours]`.
    pub fn growth_curve(&self, max_hours: f64, samples: usize) -> Vec<(f64, f64)> {
        linspace(0.0, max_hours, samples)
            .into_iter()
            .map(|h| (h, self.error_at(h).position_error))
            .collect()
    }

    pub fn intercept_window(&self, hours: f64) -> InterceptWindow {
        let row = self.error_at(hours);
        let critical_time = self.settings.critical_distance / self.settings.target_velocity;
        InterceptWindow {
            hours,
            time_error: row.accumulated_error,
            position_error: row.position_error,
            critical_time,
            exceedance: (row.accumulated_error / critical_time).abs(),
        }
    }
}
