//! Logarithm approximation for [`Decimal`] values
//!
//! The natural logarithm is computed from the identity
//! `ln(x) = 2 * atanh((x - 1) / (x + 1))` expanded as the series
//! `2 * sum(b^(2i+1) / (2i+1))` with `b = (x - 1) / (x + 1)`, summed over a
//! fixed number of terms. The error is bounded by the term count rather than
//! the requested output precision: convergence degrades as `|b|` approaches
//! one, i.e. for arguments near zero or very large.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::decimal::{truncate_rational, Decimal, DecimalError, DecimalResult};

/// Default number of series terms used by [`Decimal::ln`] and
/// [`Decimal::log`]
pub const LN_ITERATIONS: u32 = 100;

impl Decimal {
    /// Natural logarithm, using [`LN_ITERATIONS`] series terms
    ///
    /// # Errors
    /// Returns [`DecimalError::DomainError`] for non-positive arguments.
    pub fn ln(&self) -> DecimalResult<Decimal> {
        self.ln_with_iterations(LN_ITERATIONS)
    }

    /// Natural logarithm with an explicit series term count
    ///
    /// A lower count trades accuracy for speed; the default is
    /// [`LN_ITERATIONS`].
    pub fn ln_with_iterations(&self, iterations: u32) -> DecimalResult<Decimal> {
        if !self.as_rational().is_positive() {
            return Err(DecimalError::DomainError(format!(
                "ln of non-positive value {}",
                self
            )));
        }

        let scale = self.scale();
        let one = BigRational::one();
        let value = self.as_rational();

        // b = (x - 1) / (x + 1), always in (-1, 1) for x > 0
        let base = truncate_rational(&((value - &one) / (value + &one)), scale);
        let base_squared = truncate_rational(&(&base * &base), scale);

        // Running odd power of b; each term is b^(2i+1) / (2i+1)
        let mut power = base;
        let mut sum = BigRational::zero();
        for i in 0..iterations {
            let divisor = BigRational::from_integer(BigInt::from(2 * u64::from(i) + 1));
            sum += truncate_rational(&(&power / &divisor), scale);
            power = truncate_rational(&(&power * &base_squared), scale);
        }

        let result = sum * BigRational::from_integer(BigInt::from(2));
        Ok(Decimal::from_quantity(result, scale))
    }

    /// Logarithm to an arbitrary base, as `ln(self) / ln(base)`
    ///
    /// # Errors
    /// Returns [`DecimalError::DomainError`] if either the value or the base
    /// is non-positive, and [`DecimalError::DivisionByZero`] for base one
    /// (whose logarithm is zero).
    pub fn log(&self, base: &Decimal) -> DecimalResult<Decimal> {
        self.log_with_iterations(base, LN_ITERATIONS)
    }

    /// Logarithm to an arbitrary base with an explicit series term count
    pub fn log_with_iterations(&self, base: &Decimal, iterations: u32) -> DecimalResult<Decimal> {
        let numerator = self.ln_with_iterations(iterations)?;
        let denominator = base.ln_with_iterations(iterations)?;
        numerator.div(&denominator)
    }
}
