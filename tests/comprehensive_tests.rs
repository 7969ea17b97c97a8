// Comprehensive tests for decimal-math covering normalization, arithmetic,
// comparison, rounding and logarithms through the public API.

use decimal_math::{Accumulator, Decimal, DecimalError};

fn dec(s: &str) -> Decimal {
    Decimal::parse(s).unwrap()
}

#[cfg(test)]
mod normalization_tests {
    use super::*;

    #[test]
    fn test_scientific_notation_round_trip() {
        assert_eq!(Decimal::normalize("1.5E3").unwrap(), "1500");
        assert_eq!(Decimal::normalize("2E-2").unwrap(), "0.02");
        assert_eq!(Decimal::normalize("42").unwrap(), "42");
        assert_eq!(Decimal::normalize("-3.25E2").unwrap(), "-325");
    }

    #[test]
    fn test_construction_from_scientific_input() {
        assert_eq!(dec("1.5E3"), dec("1500"));
        assert_eq!(dec("2E-2").add(&dec("0.98")).to_string(), "1");
    }

    #[test]
    fn test_canonical_form_strips_trailing_zeros() {
        assert_eq!(dec("2.5000").to_string(), "2.5");
        assert_eq!(dec("3.000").to_string(), "3");
        assert_eq!(dec("0.0100").to_string(), "0.01");
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        for input in ["", "1E2E3", "1.5E", "abc", "1,5", " 1", "1 ", "+1", "--1"] {
            assert!(
                matches!(Decimal::parse(input), Err(DecimalError::ParseError(_))),
                "expected ParseError for {:?}",
                input
            );
        }
    }
}

#[cfg(test)]
mod arithmetic_tests {
    use super::*;

    #[test]
    fn test_exact_decimal_addition() {
        // The classic binary-float failure case is exact here
        assert_eq!(dec("0.1").add(&dec("0.2")).to_string(), "0.3");
    }

    #[test]
    fn test_division_at_internal_scale() {
        let third = dec("1").div(&dec("3")).unwrap();
        assert_eq!(third.to_string(), "0.33333333333333333333");
        assert!(third.to_string().starts_with("0.333333333333333333"));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(dec("5").div(&dec("0")), Err(DecimalError::DivisionByZero));
        assert_eq!(dec("5").rem(&dec("0.000")), Err(DecimalError::DivisionByZero));
    }

    #[test]
    fn test_zero_divisor_detected_after_normalization() {
        // 0E5 normalizes to zero
        assert_eq!(dec("5").div(&dec("0E5")), Err(DecimalError::DivisionByZero));
    }

    #[test]
    fn test_pow_integer_semantics() {
        assert_eq!(dec("2").pow(&dec("10")).unwrap().to_string(), "1024");
        assert_eq!(dec("2").pow(&dec("-2")).unwrap().to_string(), "0.25");
        assert_eq!(dec("2").pow(&dec("2.9")).unwrap(), dec("4"));
        assert_eq!(dec("17").pow(&dec("0")).unwrap().to_string(), "1");
    }

    #[test]
    fn test_large_values_stay_exact() {
        let big = dec("123456789012345678901234567890");
        assert_eq!((&big + &dec("1")).to_string(), "123456789012345678901234567891");
        assert_eq!(
            (&big * &dec("10")).to_string(),
            "1234567890123456789012345678900"
        );
    }

    #[test]
    fn test_accumulator_running_counter() {
        let mut counter = Accumulator::new(Decimal::zero());
        for _ in 0..10 {
            counter.add(&dec("0.1"));
        }
        assert_eq!(counter.value().to_string(), "1");
        assert_eq!(counter.into_value(), dec("1"));
    }
}

#[cfg(test)]
mod comparison_tests {
    use super::*;

    #[test]
    fn test_tri_state_compare() {
        assert!(dec("1.5") < dec("2"));
        assert!(dec("2") > dec("1.5"));
        assert_eq!(dec("2.0"), dec("2"));
        assert!(dec("-1") < dec("0"));
    }

    #[test]
    fn test_derived_predicates() {
        assert!(dec("1") <= dec("1"));
        assert!(dec("1") >= dec("1"));
        assert!(dec("-0.001").is_negative());
        assert!(dec("0.001").is_positive());
        assert!(!dec("0").is_negative());
        assert!(!dec("0").is_positive());
    }

    #[test]
    fn test_compare_normalizes_operands() {
        assert_eq!(dec("1500"), dec("1.5E3"));
        assert!(dec("0.02") < dec("3E-2"));
    }

    #[test]
    fn test_ordering_is_total() {
        let mut values = vec![dec("3"), dec("-1.5"), dec("0"), dec("2.25"), dec("-10")];
        values.sort();
        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, ["-10", "-1.5", "0", "2.25", "3"]);
    }
}

#[cfg(test)]
mod rounding_tests {
    use super::*;

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(dec("2.345").rounded(2).to_string(), "2.35");
        assert_eq!(dec("-2.345").rounded(2).to_string(), "-2.35");
    }

    #[test]
    fn test_floor_and_ceil_on_negatives() {
        assert_eq!(dec("-1.2").floored().to_string(), "-2");
        assert_eq!(dec("-1.2").ceilinged().to_string(), "-1");
    }

    #[test]
    fn test_floor_and_ceil_idempotent_on_integers() {
        for input in ["-3", "0", "7", "1000"] {
            let value = dec(input);
            assert_eq!(value.floored(), value);
            assert_eq!(value.ceilinged(), value);
        }
    }

    #[test]
    fn test_truncate_never_rounds() {
        assert_eq!(dec("2.999").truncated(2).to_string(), "2.99");
        assert_eq!(dec("-2.999").truncated(0).to_string(), "-2");
    }
}

#[cfg(test)]
mod logarithm_tests {
    use super::*;

    fn assert_close(value: &Decimal, expected: &str) {
        let diff = value.sub(&dec(expected)).abs();
        assert!(
            diff < dec("0.000000000000001"),
            "expected {} near {}, diff {}",
            value,
            expected,
            diff
        );
    }

    #[test]
    fn test_ln_of_e_is_one() {
        let e = dec("2.71828182845904523536");
        assert_close(&e.ln().unwrap(), "1");
    }

    #[test]
    fn test_log_derives_from_ln() {
        assert_close(&dec("8").log(&dec("2")).unwrap(), "3");
    }

    #[test]
    fn test_ln_fails_fast_outside_domain() {
        assert!(matches!(dec("0").ln(), Err(DecimalError::DomainError(_))));
        assert!(matches!(
            dec("5").log(&dec("-2")),
            Err(DecimalError::DomainError(_))
        ));
    }
}
