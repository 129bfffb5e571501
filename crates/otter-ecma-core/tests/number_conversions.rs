//! Property tests for the primitive number conversions.

use otter_ecma_core::number::{
    number_to_string, string_to_number, to_int32, to_uint16, to_uint32,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn finite_numbers_survive_to_string(n in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let back = string_to_number(&number_to_string(n));
        // -0 prints as "0"
        prop_assert!(back == n, "{} -> {:?} -> {}", n, number_to_string(n), back);
    }

    #[test]
    fn int32_matches_uint32_bits(n in any::<f64>()) {
        prop_assert_eq!(to_int32(n) as u32, to_uint32(n));
    }

    #[test]
    fn integral_values_in_range_are_preserved(n in 0u32..=u32::MAX) {
        prop_assert_eq!(to_uint32(n as f64), n);
        prop_assert_eq!(to_uint16(n as f64), n as u16);
    }

    #[test]
    fn padded_integers_parse(n in any::<i32>(), pad in "[ \t\n]{0,3}") {
        let text = format!("{pad}{n}{pad}");
        prop_assert_eq!(string_to_number(&text), n as f64);
    }
}
