use crate::traits::{constant, Profile, Scalar};
use serde::{Deserialize, Serialize};

/// Point of interest on the heat sink (cm from the source).
pub const DEFAULT_X0: f64 = 5.0;

/// Temperature along a heat sink: `amplitude * exp(-decay * x) + ambient`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatProfile {
    pub amplitude: f64,
    pub decay: f64,
    pub ambient: f64,
}

impl Default for HeatProfile {
    fn default() -> Self {
        Self {
            amplitude: 80.0,
            decay: 0.1,
            ambient: 25.0,
        }
    }
}

impl<T: Scalar> Profile<T> for HeatProfile {
    fn value(&self, x: T) -> T {
        let amplitude: T = constant(self.amplitude);
        let decay: T = constant(self.decay);
        amplitude * (-decay * x).exp() + constant(self.ambient)
    }

    fn derivative(&self, x: T) -> T {
        let amplitude: T = constant(self.amplitude);
        let decay: T = constant(self.decay);
        -(amplitude * decay) * (-decay * x).exp()
    }
}
