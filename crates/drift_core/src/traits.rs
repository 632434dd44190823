use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// A trait for types that can be used as scalars in the numeric models.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {
    /// Storage width of the type in bits.
    fn bits() -> u32 {
        (std::mem::size_of::<Self>() * 8) as u32
    }
}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Converts an f64 constant into `T`. Values the type cannot hold become NaN.
pub fn constant<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Widens a scalar back to f64 for reporting.
pub fn widen<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// A one-dimensional function with a known analytic derivative.
pub trait Profile<T: Scalar> {
    /// Evaluates the function at x.
    fn value(&self, x: T) -> T;

    /// Evaluates the exact first derivative at x.
    fn derivative(&self, x: T) -> T;
}
