//! Exact decimal fractions.
//!
//! Clock ticks are written as decimal literals (`"0.1"`). Parsing them into an
//! exact rational keeps the binary expansion free of any floating-point rounding
//! until the very last step, where the caller decides how to compare.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported number of fractional decimal digits.
pub const MAX_PRECISION: u32 = 28;

/// Decimal arithmetic context passed explicitly to parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalContext {
    /// Maximum number of significant fractional digits a literal may carry.
    pub precision: u32,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self {
            precision: MAX_PRECISION,
        }
    }
}

/// A proper fraction `numerator / denominator` in [0, 1), kept in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExactFraction {
    numerator: u128,
    denominator: u128,
}

impl ExactFraction {
    pub fn new(numerator: u128, denominator: u128) -> Result<Self> {
        if denominator == 0 {
            bail!("Denominator must be non-zero.");
        }
        // Doubling the numerator must stay inside u128.
        if denominator > u128::MAX / 2 {
            bail!("Denominator {} is too large.", denominator);
        }
        if numerator >= denominator {
            bail!(
                "Fraction {}/{} is not a proper fraction in [0, 1).",
                numerator,
                denominator
            );
        }
        Ok(Self::reduced(numerator, denominator))
    }

    pub(crate) fn reduced(numerator: u128, denominator: u128) -> Self {
        let divisor = gcd(numerator, denominator);
        Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }

    /// Parses a decimal literal such as `"0.1"`, `".25"` or `"0.500"`.
    pub fn parse(literal: &str, ctx: DecimalContext) -> Result<Self> {
        if ctx.precision > MAX_PRECISION {
            bail!(
                "Decimal precision {} exceeds the supported maximum of {}.",
                ctx.precision,
                MAX_PRECISION
            );
        }
        let literal = literal.trim();
        if literal.is_empty() {
            bail!("Empty decimal literal.");
        }

        let (integer, fraction) = match literal.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (literal, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            bail!("Decimal literal \"{}\" has no digits.", literal);
        }
        if let Some(c) = integer
            .chars()
            .chain(fraction.chars())
            .find(|c| !c.is_ascii_digit())
        {
            bail!(
                "Unexpected character '{}' in decimal literal \"{}\".",
                c,
                literal
            );
        }
        if integer.chars().any(|c| c != '0') {
            bail!(
                "Decimal literal \"{}\" is not a proper fraction in [0, 1).",
                literal
            );
        }

        let digits = fraction.trim_end_matches('0');
        if digits.len() > ctx.precision as usize {
            bail!(
                "Decimal literal \"{}\" has {} fractional digits; precision is {}.",
                literal,
                digits.len(),
                ctx.precision
            );
        }
        if digits.is_empty() {
            return Ok(Self {
                numerator: 0,
                denominator: 1,
            });
        }

        let mut numerator = 0u128;
        for c in digits.bytes() {
            numerator = numerator * 10 + u128::from(c - b'0');
        }
        let denominator = 10u128.pow(digits.len() as u32);
        Ok(Self::reduced(numerator, denominator))
    }

    pub fn numerator(&self) -> u128 {
        self.numerator
    }

    pub fn denominator(&self) -> u128 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Nearest f64 to the fraction (exact for small terms, single rounding of the quotient).
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// How many of these fit in one unit, e.g. ticks per second for a tick length.
    pub fn per_unit(&self) -> f64 {
        self.denominator as f64 / self.numerator as f64
    }
}

impl fmt::Display for ExactFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}
