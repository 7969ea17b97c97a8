//! Exact arbitrary-precision decimal arithmetic for counters and metrics
//!
//! This crate provides an immutable [`Decimal`] type backed by `BigRational`
//! for exact fixed-scale arithmetic, so values round-trip through decimal
//! strings without binary-float error. On top of the arithmetic core it
//! offers natural/arbitrary-base logarithms, rounding and truncation,
//! thousands-grouped formatting and magnitude-scaled ("human") rendering
//! with K/M/G/T/P/E unit suffixes.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod decimal;
pub mod formatting;
pub mod transcendental;

// Re-export main types
pub use decimal::{Accumulator, Decimal, DecimalError, DecimalResult, Precision, DEFAULT_SCALE};
pub use formatting::{format_grouped, human_unit_index};
pub use transcendental::LN_ITERATIONS;

// Re-export for convenience
pub use num_bigint::BigInt;
pub use num_rational::BigRational;
