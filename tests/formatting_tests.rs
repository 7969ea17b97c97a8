// Formatting tests: grouped rendering and human-unit scaling.

use decimal_math::{format_grouped, human_unit_index, Decimal};

fn dec(s: &str) -> Decimal {
    Decimal::parse(s).unwrap()
}

#[test]
fn test_grouped_integer() {
    assert_eq!(dec("1234567").format(0), "1,234,567");
    assert_eq!(dec("1234567.891").format(2), "1,234,567.89");
}

#[test]
fn test_grouped_small_values() {
    assert_eq!(dec("0").format(0), "0");
    assert_eq!(dec("999").format(0), "999");
    assert_eq!(dec("-999").format(0), "-999");
}

#[test]
fn test_grouped_pads_fraction() {
    assert_eq!(dec("7").format(3), "7.000");
    assert_eq!(dec("7.5").format(3), "7.500");
}

#[test]
fn test_grouped_rounds_before_grouping() {
    // 999.995 carries into a new group at 2 decimals
    assert_eq!(dec("999.995").format(2), "1,000.00");
}

#[test]
fn test_free_function_matches_method() {
    let value = dec("1234567.891");
    assert_eq!(format_grouped(&value, 2), value.format(2));
}

#[test]
fn test_human_units_table() {
    let cases = [
        ("999", "999", ""),
        ("1500", "1.5", "K"),
        ("1500000", "1.5", "M"),
        ("2000000000", "2", "G"),
        ("3500000000000", "3.5", "T"),
        ("4000000000000000", "4", "P"),
        ("5000000000000000000", "5", "E"),
    ];
    for (input, value, unit) in cases {
        let decimal = dec(input);
        assert_eq!(decimal.human_value().to_string(), value, "value for {}", input);
        assert_eq!(decimal.human_unit(), unit, "unit for {}", input);
    }
}

#[test]
fn test_human_unit_index_boundaries() {
    assert_eq!(human_unit_index(&dec("999.999")), 0);
    assert_eq!(human_unit_index(&dec("1000")), 3);
    assert_eq!(human_unit_index(&dec("999999.5")), 3);
    assert_eq!(human_unit_index(&dec("1000000")), 6);
}

#[test]
fn test_human_value_keeps_fraction() {
    let (value, unit) = dec("1234500").to_human();
    assert_eq!(value.to_string(), "1.2345");
    assert_eq!(unit, "M");
}

#[test]
fn test_human_unit_saturates_at_e() {
    let huge = dec("7E21");
    assert_eq!(huge.human_unit(), "E");
    assert_eq!(huge.human_value().to_string(), "7000");
}
