//! Display formatting for decimals
//!
//! This module provides thousands-grouped rendering and magnitude-scaled
//! ("human") rendering with power-of-ten unit suffixes. Separators are fixed
//! ASCII: `,` for grouping and `.` for the decimal point.

use num_rational::BigRational;

use crate::decimal::{ten_pow, truncate_rational, Decimal, Precision};

/// Decimal-digit thresholds paired with their magnitude unit symbols
///
/// The index is the power of ten the value is divided by; magnitudes past
/// the last entry stay on `E`.
const HUMAN_UNITS: [(u32, &str); 6] =
    [(3, "K"), (6, "M"), (9, "G"), (12, "T"), (15, "P"), (18, "E")];

/// Format a decimal with comma-grouped integer digits
///
/// The value is rounded (half-away-from-zero) to `decimals` fractional
/// digits first; when `decimals > 0` the fraction is right-padded with
/// zeros to exactly that width.
pub fn format_grouped(value: &Decimal, decimals: Precision) -> String {
    let rounded = value.rounded(decimals);
    let canonical = rounded.abs().to_string();
    let (integer_part, fraction_part) = match canonical.find('.') {
        Some(pos) => (&canonical[..pos], &canonical[pos + 1..]),
        None => (canonical.as_str(), ""),
    };

    let mut result = String::new();
    if rounded.is_negative() {
        result.push('-');
    }

    let digits: Vec<char> = integer_part.chars().collect();
    for (i, &ch) in digits.iter().enumerate() {
        result.push(ch);
        let remaining = digits.len() - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            result.push(',');
        }
    }

    if decimals > 0 {
        result.push('.');
        result.push_str(fraction_part);
        for _ in fraction_part.len()..decimals as usize {
            result.push('0');
        }
    }

    result
}

/// Pick the human-unit scale index for a value
///
/// The index is the largest tabulated threshold not exceeding the number of
/// integer digits of `floor(abs(value))` minus one; values below one
/// thousand map to index zero (no unit).
pub fn human_unit_index(value: &Decimal) -> u32 {
    // The canonical string of a floored absolute value is bare digits
    let digit_count = value.abs().floored().to_string().len() as u32;

    let mut index = 0;
    for (threshold, _) in HUMAN_UNITS {
        if digit_count - 1 < threshold {
            break;
        }
        index = threshold;
    }
    index
}

impl Decimal {
    /// Render with comma-grouped integer digits and a fixed-width fraction
    ///
    /// `Decimal::parse("1234567.891")?.format(2)` yields `"1,234,567.89"`.
    pub fn format(&self, decimals: Precision) -> String {
        format_grouped(self, decimals)
    }

    /// The value scaled down by the power of ten chosen for its magnitude
    ///
    /// Pairs with [`Decimal::human_unit`]: `1500000` becomes `1.5` with
    /// unit `M`.
    pub fn human_value(&self) -> Decimal {
        let divisor = BigRational::from_integer(ten_pow(human_unit_index(self) as Precision));
        let scaled = truncate_rational(&(self.as_rational() / divisor), self.scale());
        Decimal::from_quantity(scaled, self.scale())
    }

    /// The unit symbol matching [`Decimal::human_value`]
    ///
    /// Empty for values below one thousand; magnitudes past `10^18` stay
    /// on `"E"`.
    pub fn human_unit(&self) -> &'static str {
        let index = human_unit_index(self);
        HUMAN_UNITS
            .iter()
            .find(|(threshold, _)| *threshold == index)
            .map(|(_, unit)| *unit)
            .unwrap_or("")
    }

    /// Scaled value and unit symbol in one call
    pub fn to_human(&self) -> (Decimal, &'static str) {
        (self.human_value(), self.human_unit())
    }
}
