//! Canonical decimal rendering of [`crate::Number`] values.
//!
//! Canonical form (spec.md §4.2): no leading zeros except a bare `0`, no
//! trailing fractional zeros, never scientific notation, and no `-0` — both
//! zero signs render as `0`. `NaN` and `±Infinity` have no canonical number
//! form at all; they collapse to the `null` literal at the call site, never
//! passing through this module as a `Number`.

use crate::value::Number;

/// Renders an integer in canonical decimal form.
pub fn canonical_integer(value: i64) -> String {
    let mut buf = itoa::Buffer::new();
    buf.format(value).to_string()
}

/// Renders a float in canonical decimal form, or `None` if it has no
/// canonical number form (`NaN`/`±Infinity` — the caller must emit `null`
/// instead).
pub fn canonical_float(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        // Collapses +0.0 and -0.0 to the same canonical text.
        return Some("0".to_string());
    }
    // f64's Display never uses scientific notation and already omits
    // trailing fractional zeros (3.5, not 3.50; 3.0 prints as "3").
    Some(format!("{}", value))
}

/// Renders a [`Number`] in canonical form, or `None` for a non-finite float.
pub fn canonical(number: &Number) -> Option<String> {
    match number {
        Number::Integer(i) => Some(canonical_integer(*i)),
        Number::Float(f) => canonical_float(*f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_render_plain() {
        assert_eq!(canonical_integer(0), "0");
        assert_eq!(canonical_integer(42), "42");
        assert_eq!(canonical_integer(-42), "-42");
        assert_eq!(canonical_integer(i64::MIN), i64::MIN.to_string());
    }

    #[test]
    fn floats_trim_trailing_zeros_and_collapse_negative_zero() {
        assert_eq!(canonical_float(3.5).unwrap(), "3.5");
        assert_eq!(canonical_float(3.0).unwrap(), "3");
        assert_eq!(canonical_float(0.0).unwrap(), "0");
        assert_eq!(canonical_float(-0.0).unwrap(), "0");
    }

    #[test]
    fn never_emits_scientific_notation() {
        let rendered = canonical_float(1_000_000.0).unwrap();
        assert!(!rendered.contains('e') && !rendered.contains('E'));
        assert_eq!(rendered, "1000000");
    }

    #[test]
    fn non_finite_has_no_canonical_form() {
        assert_eq!(canonical_float(f64::NAN), None);
        assert_eq!(canonical_float(f64::INFINITY), None);
        assert_eq!(canonical_float(f64::NEG_INFINITY), None);
    }

    #[test]
    fn dispatches_on_number_variant() {
        assert_eq!(canonical(&Number::Integer(7)).unwrap(), "7");
        assert_eq!(canonical(&Number::Float(7.0)).unwrap(), "7");
        assert_eq!(canonical(&Number::Float(f64::NAN)), None);
    }
}
