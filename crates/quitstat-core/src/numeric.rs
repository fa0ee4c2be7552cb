//! Numeric helpers shared by the calculators
//!
//! Everything the engine returns goes through [`finite_or_zero`], so callers
//! never see NaN, infinities or a negative zero.

use serde_json::Value;

/// Collapse NaN, infinities and `-0.0` to `0.0`; pass everything else through.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

/// Read a loosely typed JSON value as a finite number.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace is
/// ignored). Booleans, nulls, objects, empty strings and anything that
/// parses to a non-finite value yield `None`.
pub fn loose_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    number.is_finite().then_some(number)
}

/// Percentage of `value` against `target`, clamped to `[0, 100]`.
///
/// Returns `0.0` when the target is not a positive finite number or the
/// value is negative or not finite.
pub fn clamped_percent(value: f64, target: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || !target.is_finite() || target <= 0.0 {
        return 0.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(12.5), 12.5);
        assert_eq!(finite_or_zero(-3.0), -3.0);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
        assert!(finite_or_zero(-0.0).is_sign_positive());
    }

    #[test]
    fn test_loose_number() {
        assert_eq!(loose_number(&json!(20)), Some(20.0));
        assert_eq!(loose_number(&json!(7.25)), Some(7.25));
        assert_eq!(loose_number(&json!(" 12.5 ")), Some(12.5));
        assert_eq!(loose_number(&json!("")), None);
        assert_eq!(loose_number(&json!("twenty")), None);
        assert_eq!(loose_number(&json!("NaN")), None);
        assert_eq!(loose_number(&json!("inf")), None);
        assert_eq!(loose_number(&json!(null)), None);
        assert_eq!(loose_number(&json!(true)), None);
        assert_eq!(loose_number(&json!({"value": 3})), None);
    }

    #[test]
    fn test_clamped_percent() {
        assert_eq!(clamped_percent(10.0, 20.0), 50.0);
        assert_eq!(clamped_percent(40.0, 20.0), 100.0);
        assert_eq!(clamped_percent(-5.0, 20.0), 0.0);
        assert_eq!(clamped_percent(5.0, 0.0), 0.0);
        assert_eq!(clamped_percent(f64::NAN, 20.0), 0.0);
    }
}
