//! Fixed-point binary truncation of decimal fractions.

use crate::decimal::ExactFraction;
use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;

/// Register width of the classic 24-bit timing system.
pub const DEFAULT_BITS: usize = 24;

/// Fractional binary digits after the point, most significant first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryFraction {
    bits: Vec<bool>,
}

impl BinaryFraction {
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Parses a string of `0`/`1` digits (without the leading `0.`).
    pub fn parse(digits: &str) -> Result<Self> {
        let mut bits = Vec::with_capacity(digits.len());
        for c in digits.chars() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                other => bail!("Invalid binary digit '{}'.", other),
            }
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Sum of 2^-(i+1) over every set bit i.
    pub fn to_f64(&self) -> f64 {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &bit)| bit)
            .map(|(i, _)| 2f64.powi(-(i as i32 + 1)))
            .sum()
    }

    pub fn digits(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for BinaryFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0.{}", self.digits())
    }
}

/// Result of truncating an exact fraction to a fixed number of bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Truncation {
    pub binary: BinaryFraction,
    /// What was dropped, scaled by 2^bits: `fraction * 2^bits - floor(fraction * 2^bits)`.
    pub residual: ExactFraction,
}

impl Truncation {
    /// True when the expansion ended inside the bit budget.
    pub fn is_exact(&self) -> bool {
        self.residual.is_zero()
    }

    /// Dropped value, `residual * 2^-bits`, computed without cancellation.
    pub fn dropped_value(&self) -> f64 {
        self.residual.to_f64() * 2f64.powi(-(self.binary.len() as i32))
    }
}

/// Expands `fraction` into exactly `bits` binary digits by repeated doubling.
///
/// Each step doubles the remaining value; reaching one emits a `1` and subtracts
/// one, otherwise a `0` is emitted. Bits beyond the budget are dropped, never rounded.
pub fn binary_expansion(fraction: &ExactFraction, bits: usize) -> Truncation {
    let denominator = fraction.denominator();
    let mut remainder = fraction.numerator();
    let mut digits = Vec::with_capacity(bits);
    for _ in 0..bits {
        remainder *= 2;
        if remainder >= denominator {
            digits.push(true);
            remainder -= denominator;
        } else {
            digits.push(false);
        }
    }
    Truncation {
        binary: BinaryFraction::from_bits(digits),
        residual: ExactFraction::reduced(remainder, denominator),
    }
}

/// The same doubling procedure carried out in f64 arithmetic.
pub fn binary_expansion_f64(value: f64, bits: usize) -> BinaryFraction {
    let mut remainder = value;
    let mut digits = Vec::with_capacity(bits);
    for _ in 0..bits {
        remainder *= 2.0;
        if remainder >= 1.0 {
            digits.push(true);
            remainder -= 1.0;
        } else {
            digits.push(false);
        }
    }
    BinaryFraction::from_bits(digits)
}

/// Difference between the fraction and its truncated `bits`-bit representation.
pub fn quantization_error(fraction: &ExactFraction, bits: usize) -> f64 {
    let truncation = binary_expansion(fraction, bits);
    fraction.to_f64() - truncation.binary.to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::DecimalContext;

    fn fraction(literal: &str) -> ExactFraction {
        ExactFraction::parse(literal, DecimalContext::default()).expect("literal should parse")
    }

    #[test]
    fn tenth_in_24_bits() {
        let tenth = fraction("0.1");
        let truncation = binary_expansion(&tenth, DEFAULT_BITS);
        assert_eq!(truncation.binary.digits(), "000110011001100110011001");
        assert_eq!(truncation.binary.to_string(), "0.000110011001100110011001");
        assert_eq!(truncation.binary.to_f64(), 1_677_721.0 / 16_777_216.0);
        assert!(!truncation.is_exact());
        // 0.1 * 2^24 = 1677721.6, so 0.6 is dropped.
        assert_eq!(truncation.residual, ExactFraction::new(3, 5).unwrap());
    }

    #[test]
    fn tenth_error_is_the_known_value() {
        let error = quantization_error(&fraction("0.1"), DEFAULT_BITS);
        let expected = 3.576_278_686_523_437_5e-8;
        assert!((error - expected).abs() / expected < 1e-9, "error = {error}");
        assert_eq!(error, quantization_error(&fraction("0.1"), DEFAULT_BITS));

        let dropped = binary_expansion(&fraction("0.1"), DEFAULT_BITS).dropped_value();
        assert!((dropped - expected).abs() / expected < 1e-15);
    }

    #[test]
    fn representable_fractions_have_zero_error() {
        for literal in ["0.5", "0.25", "0.375", "0"] {
            let value = fraction(literal);
            let truncation = binary_expansion(&value, DEFAULT_BITS);
            assert!(truncation.is_exact(), "{literal} should terminate");
            assert_eq!(quantization_error(&value, DEFAULT_BITS), 0.0);
        }
        let half = binary_expansion(&fraction("0.5"), 4);
        assert_eq!(half.binary.digits(), "1000");
    }

    #[test]
    fn more_bits_shrink_the_error() {
        let tenth = fraction("0.1");
        let coarse = quantization_error(&tenth, 8);
        let fine = quantization_error(&tenth, 24);
        assert!(coarse > fine);
        assert!(fine > 0.0);
    }

    #[test]
    fn zero_bits_drop_everything() {
        let tenth = fraction("0.1");
        let truncation = binary_expansion(&tenth, 0);
        assert!(truncation.binary.is_empty());
        assert_eq!(truncation.binary.to_f64(), 0.0);
        assert_eq!(quantization_error(&tenth, 0), 0.1);
    }

    #[test]
    fn f64_expansion_matches_exact_for_short_budgets() {
        for literal in ["0.1", "0.3", "0.7"] {
            let value = fraction(literal);
            let exact = binary_expansion(&value, DEFAULT_BITS).binary;
            let float = binary_expansion_f64(value.to_f64(), DEFAULT_BITS);
            assert_eq!(exact, float, "{literal}");
        }
    }

    #[test]
    fn parse_round_trips_digits() {
        let binary = BinaryFraction::parse("0101").expect("valid digits");
        assert_eq!(binary.to_f64(), 0.25 + 0.0625);
        assert_eq!(binary.digits(), "0101");
        assert!(BinaryFraction::parse("012").is_err());
    }
}
