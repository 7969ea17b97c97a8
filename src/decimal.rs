//! Decimal module providing exact fixed-scale arbitrary precision arithmetic
//!
//! This module implements the Decimal type which uses BigRational for exact
//! arithmetic, truncating every operation result to a per-value decimal scale
//! so that values behave like canonical decimal strings rather than binary
//! floats.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Precision type for tracking decimal scale and display digits
pub type Precision = u16;

/// Number of fractional digits retained by every operation unless a value
/// was constructed with an explicit scale
pub const DEFAULT_SCALE: Precision = 20;

/// Errors that can occur during decimal operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    /// Division or remainder by a zero divisor, or a negative power of zero
    #[error("Division by zero")]
    DivisionByZero,
    /// The input string was not a valid decimal number
    #[error("Cannot parse decimal from string: {0}")]
    ParseError(String),
    /// A logarithm was requested for a value outside its domain
    #[error("Value outside function domain: {0}")]
    DomainError(String),
    /// A conversion to or from a native numeric type was not possible
    #[error("Invalid numeric conversion: {0}")]
    InvalidConversion(String),
}

/// Result type for decimal operations
pub type DecimalResult<T> = Result<T, DecimalError>;

/// An immutable arbitrary-precision decimal number
///
/// Internally the value is an exact `BigRational` whose denominator always
/// divides `10^scale`, i.e. the value is already truncated to its scale.
/// Every operation returns a new `Decimal`; for compound-assignment
/// ergonomics see [`Accumulator`].
///
/// The canonical string form (`Display`) is `[-]digits[.digits]` with
/// trailing fractional zeros and a dangling decimal point stripped. Input
/// may additionally carry a scientific-notation suffix (`1.5E3`, `2e-2`),
/// which is resolved at construction time.
#[derive(Clone)]
pub struct Decimal {
    /// The exact rational value, truncated to `scale` fractional digits
    quantity: BigRational,

    /// Number of fractional digits retained by operations on this value
    scale: Precision,
}

/// 10^places as a BigInt
pub(crate) fn ten_pow(places: Precision) -> BigInt {
    BigInt::from(10).pow(places as u32)
}

/// Truncate a rational toward zero to `scale` fractional digits
pub(crate) fn truncate_rational(value: &BigRational, scale: Precision) -> BigRational {
    let factor = ten_pow(scale);
    let scaled = value * &BigRational::from_integer(factor.clone());
    BigRational::new(scaled.to_integer(), factor)
}

impl Decimal {
    /// Create a decimal from an already-computed rational, truncating it to
    /// the given scale
    pub(crate) fn from_quantity(quantity: BigRational, scale: Precision) -> Self {
        Self { quantity: truncate_rational(&quantity, scale), scale }
    }

    /// The value zero at the default scale
    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    /// The value one at the default scale
    pub fn one() -> Self {
        Self::from_i64(1)
    }

    /// Create a decimal from an integer
    pub fn from_i64(value: i64) -> Self {
        Self { quantity: BigRational::from_integer(BigInt::from(value)), scale: DEFAULT_SCALE }
    }

    /// Parse a decimal from a string at the default scale
    ///
    /// Accepts `[-]digits[.digits]` with an optional trailing `E`/`e` and an
    /// optionally-signed integer exponent. Whitespace and a leading `+` are
    /// rejected.
    pub fn parse(value_str: &str) -> DecimalResult<Self> {
        Self::parse_with_scale(value_str, DEFAULT_SCALE)
    }

    /// Parse a decimal from a string, retaining `scale` fractional digits
    pub fn parse_with_scale(value_str: &str, scale: Precision) -> DecimalResult<Self> {
        let mut parts = value_str.split(['E', 'e']);
        let mantissa = parts.next().unwrap_or_default();
        let exponent = parts.next();
        if parts.next().is_some() {
            return Err(DecimalError::ParseError(format!(
                "multiple exponent markers in {:?}",
                value_str
            )));
        }

        let mut quantity = parse_plain(mantissa)?;
        if let Some(exponent) = exponent {
            let digits = exponent.strip_prefix('+').unwrap_or(exponent);
            let power: i32 = digits.parse().map_err(|_| {
                DecimalError::ParseError(format!("invalid exponent {:?} in {:?}", exponent, value_str))
            })?;
            quantity *= BigRational::from_integer(BigInt::from(10)).pow(power);
        }

        Ok(Self::from_quantity(quantity, scale))
    }

    /// Resolve scientific notation into a canonical plain decimal string
    ///
    /// `"1.5E3"` becomes `"1500"` and `"2E-2"` becomes `"0.02"`. Exponent-free
    /// input is not passed through verbatim: it is validated and returned in
    /// canonical trimmed form, so `"1.50"` becomes `"1.5"` and `"abc"` is a
    /// [`DecimalError::ParseError`].
    pub fn normalize(raw: &str) -> DecimalResult<String> {
        Ok(Self::parse(raw)?.to_string())
    }

    /// Create a decimal from a `rust_decimal::Decimal`
    pub fn from_decimal(value: rust_decimal::Decimal) -> Self {
        let numerator = BigInt::from(value.mantissa());
        let denominator = ten_pow(value.scale() as Precision);
        Self::from_quantity(BigRational::new(numerator, denominator), DEFAULT_SCALE)
    }

    /// Create a decimal from a double
    ///
    /// The conversion goes through `rust_decimal` so the result is the exact
    /// decimal rendering of the float, not its binary expansion.
    pub fn from_f64(value: f64) -> DecimalResult<Self> {
        if !value.is_finite() {
            return Err(DecimalError::InvalidConversion(format!(
                "Cannot create decimal from non-finite value: {}",
                value
            )));
        }

        let decimal = rust_decimal::Decimal::try_from(value)
            .map_err(|e| DecimalError::InvalidConversion(e.to_string()))?;
        Ok(Self::from_decimal(decimal))
    }

    /// Get the number of fractional digits this value retains
    pub fn scale(&self) -> Precision {
        self.scale
    }

    /// Get a reference to the exact underlying rational
    pub fn as_rational(&self) -> &BigRational {
        &self.quantity
    }

    /// Check if this value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Check if this value is strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.quantity.is_positive()
    }

    /// Check if this value is strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.quantity.is_negative()
    }

    /// Check if this value has no fractional part
    pub fn is_integer(&self) -> bool {
        self.quantity.is_integer()
    }

    /// Get the sign of this value as -1, 0, or 1
    pub fn sign(&self) -> i32 {
        if self.quantity.is_zero() {
            0
        } else if self.quantity.is_positive() {
            1
        } else {
            -1
        }
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self { quantity: self.quantity.abs(), scale: self.scale }
    }

    /// Get the negated value
    pub fn negated(&self) -> Self {
        Self { quantity: -self.quantity.clone(), scale: self.scale }
    }

    /// Combine two operands into a result value at the larger of their scales
    fn combine(&self, other: &Self, quantity: BigRational) -> Self {
        let scale = self.scale.max(other.scale);
        Self { quantity: truncate_rational(&quantity, scale), scale }
    }

    /// Add another decimal to this one
    pub fn add(&self, other: &Decimal) -> Decimal {
        self.combine(other, &self.quantity + &other.quantity)
    }

    /// Subtract another decimal from this one
    pub fn sub(&self, other: &Decimal) -> Decimal {
        self.combine(other, &self.quantity - &other.quantity)
    }

    /// Multiply this decimal by another, truncating to the result scale
    pub fn mul(&self, other: &Decimal) -> Decimal {
        self.combine(other, &self.quantity * &other.quantity)
    }

    /// Divide this decimal by another, truncating to the result scale
    pub fn div(&self, other: &Decimal) -> DecimalResult<Decimal> {
        if other.quantity.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(self.combine(other, &self.quantity / &other.quantity))
    }

    /// Remainder of truncated division; the sign follows the dividend
    pub fn rem(&self, other: &Decimal) -> DecimalResult<Decimal> {
        if other.quantity.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        let whole = (&self.quantity / &other.quantity).trunc();
        Ok(self.combine(other, &self.quantity - whole * &other.quantity))
    }

    /// Raise this decimal to a power
    ///
    /// The exponent operand is truncated toward zero to an integer before
    /// use. A negative exponent inverts the result and fails with
    /// [`DecimalError::DivisionByZero`] when the base is zero; exponent zero
    /// yields one.
    pub fn pow(&self, exponent: &Decimal) -> DecimalResult<Decimal> {
        let whole = exponent.quantity.to_integer();
        let power = whole.to_i32().ok_or_else(|| {
            DecimalError::InvalidConversion(format!("exponent {} out of range", whole))
        })?;
        if power < 0 && self.quantity.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(self.combine(exponent, self.quantity.pow(power)))
    }

    /// Add one to this value
    pub fn inc(&self) -> Decimal {
        let one = Self { quantity: BigRational::one(), scale: self.scale };
        self.add(&one)
    }

    /// Subtract one from this value
    pub fn dec(&self) -> Decimal {
        let one = Self { quantity: BigRational::one(), scale: self.scale };
        self.sub(&one)
    }

    /// Greatest integer less than or equal to this value
    pub fn floored(&self) -> Self {
        Self { quantity: self.quantity.floor(), scale: self.scale }
    }

    /// Least integer greater than or equal to this value
    pub fn ceilinged(&self) -> Self {
        Self { quantity: self.quantity.ceil(), scale: self.scale }
    }

    /// Discard fractional digits beyond `places` without rounding
    pub fn truncated(&self, places: Precision) -> Self {
        let places = places.min(self.scale);
        Self { quantity: truncate_rational(&self.quantity, places), scale: self.scale }
    }

    /// Round half-away-from-zero to `places` fractional digits
    ///
    /// Implemented by biasing with `0.5 * 10^-places` toward the value's
    /// sign and then truncating, rather than inspecting the dropped digit.
    pub fn rounded(&self, places: Precision) -> Self {
        let places = places.min(self.scale);
        let half = BigRational::new(BigInt::one(), BigInt::from(2) * ten_pow(places));
        let biased = if self.quantity.is_negative() {
            &self.quantity - half
        } else {
            &self.quantity + half
        };
        Self { quantity: truncate_rational(&biased, places), scale: self.scale }
    }

    /// Convert to i64 if the value is an integer that fits
    pub fn to_i64(&self) -> DecimalResult<i64> {
        if self.quantity.is_integer() {
            self.quantity.to_integer().to_i64().ok_or_else(|| {
                DecimalError::InvalidConversion("Value too large for i64".to_string())
            })
        } else {
            Err(DecimalError::InvalidConversion("Value is not an integer".to_string()))
        }
    }

    /// Convert to f64 - may lose precision
    pub fn to_f64(&self) -> DecimalResult<f64> {
        self.quantity.to_f64().ok_or_else(|| {
            DecimalError::InvalidConversion("Cannot convert value to f64".to_string())
        })
    }

    /// Render the full-scale digits as the canonical trimmed string
    fn canonical_string(&self) -> String {
        let factor = BigRational::from_integer(ten_pow(self.scale));
        let scaled = (&self.quantity * &factor).to_integer();
        let negative = scaled.is_negative();

        let mut digits = scaled.magnitude().to_string();
        while digits.len() <= self.scale as usize {
            digits = format!("0{}", digits);
        }

        let split_pos = digits.len() - self.scale as usize;
        let (integer_part, fraction_part) = digits.split_at(split_pos);
        let fraction_part = fraction_part.trim_end_matches('0');

        let mut result = String::new();
        if negative {
            result.push('-');
        }
        result.push_str(integer_part);
        if !fraction_part.is_empty() {
            result.push('.');
            result.push_str(fraction_part);
        }
        result
    }

    /// Render with exactly `places` fractional digits, rounding first
    fn fixed_string(&self, places: Precision) -> String {
        let canonical = self.rounded(places).canonical_string();
        if places == 0 {
            return canonical;
        }

        let (integer_part, fraction_part) = match canonical.find('.') {
            Some(pos) => (&canonical[..pos], &canonical[pos + 1..]),
            None => (canonical.as_str(), ""),
        };
        format!(
            "{}.{:0<width$}",
            integer_part,
            fraction_part,
            width = places as usize
        )
    }
}

/// Parse a plain `[-]digits[.digits]` string into an exact rational
fn parse_plain(value_str: &str) -> DecimalResult<BigRational> {
    let (negative, body) = match value_str.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value_str),
    };

    let (integer_str, fraction_str) = match body.find('.') {
        Some(pos) => (&body[..pos], &body[pos + 1..]),
        None => (body, ""),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if integer_str.is_empty() && fraction_str.is_empty() {
        return Err(DecimalError::ParseError(format!("empty number in {:?}", value_str)));
    }
    if !all_digits(integer_str) || !all_digits(fraction_str) {
        return Err(DecimalError::ParseError(format!(
            "invalid character in {:?}",
            value_str
        )));
    }

    // Digits beyond the maximum representable scale can never survive
    // truncation, so cap the fraction before building the rational
    let fraction_str = &fraction_str[..fraction_str.len().min(Precision::MAX as usize)];

    let mut numerator: BigInt = format!("{}{}", integer_str, fraction_str)
        .parse()
        .map_err(|_| DecimalError::ParseError(format!("invalid digits in {:?}", value_str)))?;
    if negative {
        numerator = -numerator;
    }
    let denominator = ten_pow(fraction_str.len() as Precision);
    Ok(BigRational::new(numerator, denominator))
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.quantity == other.quantity
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.quantity.cmp(&other.quantity)
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // The rational is always reduced, so numerator/denominator hashing
        // is consistent with equality across scales
        self.quantity.numer().hash(state);
        self.quantity.denom().hash(state);
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(places) => {
                // Saturate rather than wrap for absurd formatter precisions
                let places = places.min(Precision::MAX as usize) as Precision;
                f.write_str(&self.fixed_string(places))
            }
            None => f.write_str(&self.canonical_string()),
        }
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)?;
        if f.alternate() {
            write!(f, " [scale:{}, raw:{}]", self.scale, self.quantity)?;
        }
        Ok(())
    }
}

// Implement From traits for infallible conversions
impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self {
            quantity: BigRational::from_integer(BigInt::from(value)),
            scale: DEFAULT_SCALE,
        }
    }
}

impl From<rust_decimal::Decimal> for Decimal {
    fn from(value: rust_decimal::Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl TryFrom<f64> for Decimal {
    type Error = DecimalError;

    fn try_from(value: f64) -> DecimalResult<Self> {
        Self::from_f64(value)
    }
}

impl TryFrom<&str> for Decimal {
    type Error = DecimalError;

    fn try_from(value: &str) -> DecimalResult<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Decimal {
    type Error = DecimalError;

    fn try_from(value: String) -> DecimalResult<Self> {
        Self::parse(&value)
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Arithmetic operator implementations. Addition, subtraction and
// multiplication are total; division and remainder keep their fallible
// result type, matching the named methods.
impl Add for Decimal {
    type Output = Decimal;

    fn add(self, other: Decimal) -> Self::Output {
        Decimal::add(&self, &other)
    }
}

impl Add<&Decimal> for Decimal {
    type Output = Decimal;

    fn add(self, other: &Decimal) -> Self::Output {
        Decimal::add(&self, other)
    }
}

impl Add<Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, other: Decimal) -> Self::Output {
        Decimal::add(self, &other)
    }
}

impl Add<&Decimal> for &Decimal {
    type Output = Decimal;

    fn add(self, other: &Decimal) -> Self::Output {
        Decimal::add(self, other)
    }
}

impl Sub for Decimal {
    type Output = Decimal;

    fn sub(self, other: Decimal) -> Self::Output {
        Decimal::sub(&self, &other)
    }
}

impl Sub<&Decimal> for Decimal {
    type Output = Decimal;

    fn sub(self, other: &Decimal) -> Self::Output {
        Decimal::sub(&self, other)
    }
}

impl Sub<Decimal> for &Decimal {
    type Output = Decimal;

    fn sub(self, other: Decimal) -> Self::Output {
        Decimal::sub(self, &other)
    }
}

impl Sub<&Decimal> for &Decimal {
    type Output = Decimal;

    fn sub(self, other: &Decimal) -> Self::Output {
        Decimal::sub(self, other)
    }
}

impl Mul for Decimal {
    type Output = Decimal;

    fn mul(self, other: Decimal) -> Self::Output {
        Decimal::mul(&self, &other)
    }
}

impl Mul<&Decimal> for Decimal {
    type Output = Decimal;

    fn mul(self, other: &Decimal) -> Self::Output {
        Decimal::mul(&self, other)
    }
}

impl Mul<Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, other: Decimal) -> Self::Output {
        Decimal::mul(self, &other)
    }
}

impl Mul<&Decimal> for &Decimal {
    type Output = Decimal;

    fn mul(self, other: &Decimal) -> Self::Output {
        Decimal::mul(self, other)
    }
}

impl Div for Decimal {
    type Output = DecimalResult<Decimal>;

    fn div(self, other: Decimal) -> Self::Output {
        Decimal::div(&self, &other)
    }
}

impl Div<&Decimal> for Decimal {
    type Output = DecimalResult<Decimal>;

    fn div(self, other: &Decimal) -> Self::Output {
        Decimal::div(&self, other)
    }
}

impl Div<Decimal> for &Decimal {
    type Output = DecimalResult<Decimal>;

    fn div(self, other: Decimal) -> Self::Output {
        Decimal::div(self, &other)
    }
}

impl Div<&Decimal> for &Decimal {
    type Output = DecimalResult<Decimal>;

    fn div(self, other: &Decimal) -> Self::Output {
        Decimal::div(self, other)
    }
}

impl Rem for Decimal {
    type Output = DecimalResult<Decimal>;

    fn rem(self, other: Decimal) -> Self::Output {
        Decimal::rem(&self, &other)
    }
}

impl Rem<&Decimal> for Decimal {
    type Output = DecimalResult<Decimal>;

    fn rem(self, other: &Decimal) -> Self::Output {
        Decimal::rem(&self, other)
    }
}

impl Rem<Decimal> for &Decimal {
    type Output = DecimalResult<Decimal>;

    fn rem(self, other: Decimal) -> Self::Output {
        Decimal::rem(self, &other)
    }
}

impl Rem<&Decimal> for &Decimal {
    type Output = DecimalResult<Decimal>;

    fn rem(self, other: &Decimal) -> Self::Output {
        Decimal::rem(self, other)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

// Serialize as the canonical string so serialized values round-trip exactly.
// Deserializing restores the default scale.
impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Decimal::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Mutable accumulation wrapper around [`Decimal`]
///
/// `Decimal` itself is immutable; this type is the one documented mutation
/// surface, intended for compound-assignment ergonomics such as running
/// counters. Infallible operations return `&mut Self` for chaining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator {
    total: Decimal,
}

impl Accumulator {
    /// Start accumulating from an initial value
    pub fn new(initial: Decimal) -> Self {
        Self { total: initial }
    }

    // The inherent methods are named like the by-value operator traits, so
    // these calls must be fully qualified to borrow the total instead of
    // moving it.

    /// Add a value to the running total
    pub fn add(&mut self, other: &Decimal) -> &mut Self {
        self.total = Decimal::add(&self.total, other);
        self
    }

    /// Subtract a value from the running total
    pub fn sub(&mut self, other: &Decimal) -> &mut Self {
        self.total = Decimal::sub(&self.total, other);
        self
    }

    /// Multiply the running total by a value
    pub fn mul(&mut self, other: &Decimal) -> &mut Self {
        self.total = Decimal::mul(&self.total, other);
        self
    }

    /// Divide the running total by a value
    pub fn div(&mut self, other: &Decimal) -> DecimalResult<&mut Self> {
        self.total = Decimal::div(&self.total, other)?;
        Ok(self)
    }

    /// Replace the running total with its remainder modulo a value
    pub fn rem(&mut self, other: &Decimal) -> DecimalResult<&mut Self> {
        self.total = Decimal::rem(&self.total, other)?;
        Ok(self)
    }

    /// Raise the running total to a power
    pub fn pow(&mut self, exponent: &Decimal) -> DecimalResult<&mut Self> {
        self.total = self.total.pow(exponent)?;
        Ok(self)
    }

    /// Borrow the current total
    pub fn value(&self) -> &Decimal {
        &self.total
    }

    /// Consume the accumulator and return the total
    pub fn into_value(self) -> Decimal {
        self.total
    }
}

impl From<Decimal> for Accumulator {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}
