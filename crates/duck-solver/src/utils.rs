//! Number and property-name helpers shared by the solver and enum crates.

use crate::intern::TypeInterner;
use crate::types::TypeId;
use duck_common::interner::Atom;

/// Whether a property name is the canonical string form of a number.
pub fn is_numeric_property_name(interner: &TypeInterner, name: Atom) -> bool {
    is_numeric_literal_name(&interner.resolve_atom(name))
}

/// Returns `true` for `NaN`, `Infinity`, `-Infinity`, and strings that
/// round-trip through JavaScript's number-to-string conversion.
pub fn is_numeric_literal_name(name: &str) -> bool {
    if name == "NaN" || name == "Infinity" || name == "-Infinity" {
        return true;
    }

    let value: f64 = match name.parse() {
        Ok(value) => value,
        Err(_) => return false,
    };
    if !value.is_finite() {
        return false;
    }

    js_number_to_string(value) == name
}

/// `Number.prototype.toString()` for a JavaScript number.
pub fn js_number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() {
            "-Infinity".to_string()
        } else {
            "Infinity".to_string()
        };
    }

    let abs = value.abs();
    if !(1e-6..1e21).contains(&abs) {
        let formatted = format!("{value:e}");
        let Some(split) = formatted.find('e') else {
            return formatted;
        };
        let (mantissa, exp) = formatted.split_at(split);
        let exp_digits = &exp[1..];
        let (sign, digits) = match exp_digits.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exp_digits),
        };
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        return format!("{mantissa}e{sign}{digits}");
    }

    value.to_string()
}

/// Element type of an array type; the type itself otherwise.
pub fn array_element_type(interner: &TypeInterner, type_id: TypeId) -> TypeId {
    match interner.lookup(type_id) {
        Some(crate::types::TypeData::Array(element)) => element,
        _ => type_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_literal_name() {
        assert!(is_numeric_literal_name("NaN"));
        assert!(is_numeric_literal_name("Infinity"));
        assert!(is_numeric_literal_name("0"));
        assert!(is_numeric_literal_name("42"));
        assert!(is_numeric_literal_name("-1"));
        assert!(is_numeric_literal_name("3.14"));

        assert!(!is_numeric_literal_name("foo"));
        assert!(!is_numeric_literal_name(""));
        assert!(!is_numeric_literal_name("01"));
        assert!(!is_numeric_literal_name("1.0"));
    }

    #[test]
    fn test_js_number_to_string() {
        assert_eq!(js_number_to_string(1.0), "1");
        assert_eq!(js_number_to_string(-0.0), "0");
        assert_eq!(js_number_to_string(0.5), "0.5");
        assert_eq!(js_number_to_string(f64::NAN), "NaN");
        assert_eq!(js_number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(js_number_to_string(1e21), "1e+21");
        assert_eq!(js_number_to_string(1e-7), "1e-7");
        assert_eq!(js_number_to_string(4294967295.0), "4294967295");
    }
}
