//! Catastrophic cancellation in `(x + dx) - x`.
//!
//! Adding a small offset to a large magnitude and subtracting the magnitude again
//! should return the offset. At single precision the offset is partially or
//! entirely lost to the spacing of representable values around `x`.

use crate::traits::{constant, widen, Scalar};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CancellationSettings {
    /// Large magnitude, e.g. a 1000 km target distance in meters.
    pub target_distance: f64,
    /// Small adjustment added to and recovered from the magnitude.
    pub delta: f64,
}

impl Default for CancellationSettings {
    fn default() -> Self {
        Self {
            target_distance: 1_000_000.0,
            delta: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CancellationRow {
    pub bits: u32,
    /// `(x + dx) - x`
    pub direct: f64,
    /// `dx`
    pub indirect: f64,
    pub absolute_error: f64,
    pub relative_error_percent: f64,
}

/// Evaluates the cancellation at the precision of `T`. All arithmetic happens in
/// `T`; results are widened to f64 only for reporting.
pub fn cancellation<T: Scalar>(target_distance: f64, delta: f64) -> CancellationRow {
    let x: T = constant(target_distance);
    let dx: T = constant(delta);
    let hundred: T = constant(100.0);

    let direct = x + dx - x;
    let indirect = dx;
    let deviation = (direct - indirect).abs();

    CancellationRow {
        bits: T::bits(),
        direct: widen(direct),
        indirect: widen(indirect),
        absolute_error: widen(deviation),
        relative_error_percent: widen(deviation / dx * hundred),
    }
}

/// Single precision row followed by double precision.
pub fn cancellation_table(settings: CancellationSettings) -> Vec<CancellationRow> {
    vec![
        cancellation::<f32>(settings.target_distance, settings.delta),
        cancellation::<f64>(settings.target_distance, settings.delta),
    ]
}
