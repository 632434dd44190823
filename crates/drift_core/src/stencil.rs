//! Finite-difference stencils for the first derivative.
//!
//! The stencils are pure and deliberately unguarded: a zero step divides by zero
//! and yields NaN or infinity like any other float expression.

use crate::traits::{constant, Scalar};
use serde::{Deserialize, Serialize};

/// `(f(x + h) - f(x)) / h`, first-order accurate.
pub fn forward_difference<T: Scalar>(f: impl Fn(T) -> T, x: T, h: T) -> T {
    (f(x + h) - f(x)) / h
}

/// `(f(x + h) - f(x - h)) / 2h`, second-order accurate.
pub fn central_difference<T: Scalar>(f: impl Fn(T) -> T, x: T, h: T) -> T {
    let two: T = constant(2.0);
    (f(x + h) - f(x - h)) / (two * h)
}

/// `(-f(x + 2h) + 8f(x + h) - 8f(x - h) + f(x - 2h)) / 12h`, fourth-order accurate.
pub fn fourth_order_central<T: Scalar>(f: impl Fn(T) -> T, x: T, h: T) -> T {
    let two: T = constant(2.0);
    let eight: T = constant(8.0);
    let twelve: T = constant(12.0);
    (-f(x + two * h) + eight * f(x + h) - eight * f(x - h) + f(x - two * h)) / (twelve * h)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stencil {
    Forward,
    Central,
    FourthOrderCentral,
}

impl Stencil {
    pub const ALL: [Stencil; 3] = [
        Stencil::Forward,
        Stencil::Central,
        Stencil::FourthOrderCentral,
    ];

    pub fn apply<T: Scalar>(self, f: impl Fn(T) -> T, x: T, h: T) -> T {
        match self {
            Stencil::Forward => forward_difference(f, x, h),
            Stencil::Central => central_difference(f, x, h),
            Stencil::FourthOrderCentral => fourth_order_central(f, x, h),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stencil::Forward => "Forward",
            Stencil::Central => "Central",
            Stencil::FourthOrderCentral => "Fourth Order",
        }
    }

    /// Exponent of h in the leading truncation error term.
    pub fn nominal_order(self) -> u32 {
        match self {
            Stencil::Forward => 1,
            Stencil::Central => 2,
            Stencil::FourthOrderCentral => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stencils_are_exact_on_low_degree_polynomials() {
        let linear = |x: f64| 3.0 * x + 1.0;
        assert!((forward_difference(linear, 2.0, 0.5) - 3.0).abs() < 1e-12);

        let quadratic = |x: f64| x * x;
        assert!((central_difference(quadratic, 2.0, 0.5) - 4.0).abs() < 1e-12);
        assert!((forward_difference(quadratic, 2.0, 0.5) - 4.5).abs() < 1e-12);

        let quartic = |x: f64| x.powi(4);
        assert!((fourth_order_central(quartic, 1.0, 0.25) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn apply_dispatches_to_formula() {
        let cubic = |x: f64| x * x * x;
        for stencil in Stencil::ALL {
            let expected = match stencil {
                Stencil::Forward => forward_difference(cubic, 1.0, 0.1),
                Stencil::Central => central_difference(cubic, 1.0, 0.1),
                Stencil::FourthOrderCentral => fourth_order_central(cubic, 1.0, 0.1),
            };
            assert_eq!(stencil.apply(cubic, 1.0, 0.1), expected);
        }
    }

    #[test]
    fn zero_step_is_not_guarded() {
        let square = |x: f64| x * x;
        assert!(forward_difference(square, 1.0, 0.0).is_nan());
        assert!(central_difference(square, 1.0, 0.0).is_nan());
        assert!(fourth_order_central(square, 1.0, 0.0).is_nan());
    }

    #[test]
    fn works_in_single_precision() {
        let square = |x: f32| x * x;
        let estimate = central_difference(square, 3.0f32, 0.125f32);
        assert_eq!(estimate, 6.0f32);
    }

    #[test]
    fn labels_and_orders() {
        let orders: Vec<u32> = Stencil::ALL.iter().map(|s| s.nominal_order()).collect();
        assert_eq!(orders, vec![1, 2, 4]);
        assert_eq!(Stencil::FourthOrderCentral.label(), "Fourth Order");
    }
}
