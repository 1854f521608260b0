// ABOUTME: Pure unit and category normalization for health-profile values
// ABOUTME: Converts raw form input into the canonical units the prediction contract expects
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unit/Value Normalizer
//!
//! Pure, total, deterministic functions that map loosely-typed form input
//! into the canonical numeric units and categorical tokens used by the
//! rest of the system. Nothing here touches I/O, the clock, or randomness.
//!
//! Height is stored in feet at rest; every consumer that needs centimeters
//! goes through [`convert_feet_to_cm`] so the whole codebase shares one
//! conversion rule.

use serde_json::Value;

/// Feet to meters conversion factor
pub const FEET_TO_METERS: f64 = 0.3048;

/// Feet to centimeters conversion factor
pub const FEET_TO_CM: f64 = 30.48;

/// Compute BMI from height in feet and weight in kilograms.
///
/// Returns `round(weight / height_m^2, 2)` when both inputs are strictly
/// positive, `None` otherwise. Total - non-numeric input is expected to have
/// been coerced to `None` upstream via [`coerce_number`].
#[must_use]
pub fn compute_bmi(height_ft: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height_ft = height_ft.filter(|h| h.is_finite() && *h > 0.0)?;
    let weight_kg = weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;

    let height_m = height_ft * FEET_TO_METERS;
    Some(round2(weight_kg / (height_m * height_m)))
}

/// Convert a height in feet to whole centimeters.
///
/// Canonical rule: pure linear scaling `feet * 30.48`, rounded to the
/// nearest centimeter. The fractional part is fractional feet, not inches:
/// `5.5` means five and a half feet.
#[must_use]
pub fn convert_feet_to_cm(height_ft: f64) -> f64 {
    (height_ft * FEET_TO_CM).round()
}

/// Normalize a categorical value against a yes/no vocabulary.
///
/// Trims the value, folds the recognized synonym tokens (`"Non-smoker"`,
/// `"Never"`) to `"No"`, passes other non-empty values through unchanged,
/// and substitutes `fallback` for absent or empty input.
#[must_use]
pub fn normalize_category(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        None | Some("") => fallback.to_owned(),
        Some("Non-smoker" | "Never") => "No".to_owned(),
        Some(other) => other.to_owned(),
    }
}

/// Total numeric defaulting: absent or non-finite values become `fallback`.
#[must_use]
pub fn safe_number(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

/// Total numeric parse for loosely-typed JSON input.
///
/// Numbers pass through, strings are trimmed and parsed, and everything
/// else - null, empty string, unparseable text, booleans - maps to `None`.
/// Never errors.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// One declarative defaulting rule for a categorical payload field
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    /// Payload field name
    pub field: &'static str,
    /// Default substituted for absent/empty input
    pub default: &'static str,
    /// Whether the field's vocabulary is yes/no, enabling synonym folding.
    /// Fields like `exercise_frequency` keep "Never" as a legitimate value.
    pub yes_no: bool,
}

/// Declarative categorical defaulting table, consumed uniformly by
/// [`normalize_field`]. One row per categorical field of the prediction
/// payload.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        field: "gender",
        default: "Male",
        yes_no: false,
    },
    CategoryRule {
        field: "chronic_disease",
        default: "No Disease",
        yes_no: false,
    },
    CategoryRule {
        field: "genetic_risk_factor",
        default: "No",
        yes_no: true,
    },
    CategoryRule {
        field: "allergies",
        default: "No",
        yes_no: true,
    },
    CategoryRule {
        field: "food_aversion",
        default: "No",
        yes_no: true,
    },
    CategoryRule {
        field: "exercise_frequency",
        default: "Never",
        yes_no: false,
    },
    CategoryRule {
        field: "alcohol_consumption",
        default: "No",
        yes_no: true,
    },
    CategoryRule {
        field: "smoking_habit",
        default: "No",
        yes_no: true,
    },
    CategoryRule {
        field: "dietary_habits",
        default: "Balanced",
        yes_no: false,
    },
    CategoryRule {
        field: "preferred_cuisine",
        default: "Indian",
        yes_no: false,
    },
];

/// Look up the defaulting rule for a payload field
#[must_use]
pub fn category_rule(field: &str) -> Option<&'static CategoryRule> {
    CATEGORY_RULES.iter().find(|rule| rule.field == field)
}

/// Normalize a categorical field through its table rule.
///
/// Yes/no fields go through [`normalize_category`]; other fields only
/// receive trimming and defaulting. Unknown fields trim and pass through
/// with an empty-string default.
#[must_use]
pub fn normalize_field(field: &str, value: Option<&str>) -> String {
    let Some(rule) = category_rule(field) else {
        return value.map(str::trim).unwrap_or_default().to_owned();
    };

    if rule.yes_no {
        return normalize_category(value, rule.default);
    }

    match value.map(str::trim) {
        None | Some("") => rule.default.to_owned(),
        Some(other) => other.to_owned(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compute_bmi_formula() {
        // 5.5 ft = 1.6764 m, 65 kg -> 65 / 1.6764^2 = 23.13
        let bmi = compute_bmi(Some(5.5), Some(65.0)).unwrap();
        assert!((bmi - 23.13).abs() < f64::EPSILON);

        let height_m = 6.0 * FEET_TO_METERS;
        let expected = ((80.0 / (height_m * height_m)) * 100.0).round() / 100.0;
        assert_eq!(compute_bmi(Some(6.0), Some(80.0)), Some(expected));
    }

    #[test]
    fn test_compute_bmi_non_positive_input() {
        assert_eq!(compute_bmi(Some(0.0), Some(65.0)), None);
        assert_eq!(compute_bmi(Some(-5.5), Some(65.0)), None);
        assert_eq!(compute_bmi(Some(5.5), Some(0.0)), None);
        assert_eq!(compute_bmi(None, Some(65.0)), None);
        assert_eq!(compute_bmi(Some(5.5), None), None);
        assert_eq!(compute_bmi(Some(f64::NAN), Some(65.0)), None);
    }

    #[test]
    fn test_convert_feet_to_cm_is_linear() {
        assert_eq!(convert_feet_to_cm(5.0), 152.0); // 152.4 rounds down
        assert_eq!(convert_feet_to_cm(5.5), 168.0); // 167.64 rounds up
        assert_eq!(convert_feet_to_cm(6.0), 183.0); // 182.88
        assert_eq!(convert_feet_to_cm(0.0), 0.0);
    }

    #[test]
    fn test_normalize_category_synonyms() {
        assert_eq!(normalize_category(Some("Non-smoker"), "No"), "No");
        assert_eq!(normalize_category(Some("Never"), "No"), "No");
        assert_eq!(normalize_category(Some("  Non-smoker  "), "No"), "No");
    }

    #[test]
    fn test_normalize_category_fallback_and_passthrough() {
        assert_eq!(normalize_category(Some(""), "Balanced"), "Balanced");
        assert_eq!(normalize_category(Some("   "), "Balanced"), "Balanced");
        assert_eq!(normalize_category(None, "Balanced"), "Balanced");
        assert_eq!(normalize_category(Some("Keto"), "No"), "Keto");
        assert_eq!(normalize_category(Some("  Vegan "), "No"), "Vegan");
    }

    #[test]
    fn test_safe_number() {
        assert_eq!(safe_number(Some(7.5), 0.0), 7.5);
        assert_eq!(safe_number(None, 6.0), 6.0);
        assert_eq!(safe_number(Some(f64::NAN), 6.0), 6.0);
        assert_eq!(safe_number(Some(f64::INFINITY), 0.0), 0.0);
    }

    #[test]
    fn test_coerce_number_total() {
        assert_eq!(coerce_number(&json!(120)), Some(120.0));
        assert_eq!(coerce_number(&json!(72.5)), Some(72.5));
        assert_eq!(coerce_number(&json!("72.5")), Some(72.5));
        assert_eq!(coerce_number(&json!("  110 ")), Some(110.0));
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("high")), None);
        assert_eq!(coerce_number(&Value::Null), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!({"nested": 1})), None);
    }

    #[test]
    fn test_category_table_covers_payload_fields() {
        for field in [
            "gender",
            "chronic_disease",
            "genetic_risk_factor",
            "allergies",
            "food_aversion",
            "exercise_frequency",
            "alcohol_consumption",
            "smoking_habit",
            "dietary_habits",
            "preferred_cuisine",
        ] {
            assert!(category_rule(field).is_some(), "missing rule for {field}");
        }
        assert!(category_rule("blood_type").is_none());
    }

    #[test]
    fn test_normalize_field_scopes_synonym_folding() {
        // Yes/no vocabulary: folding applies
        assert_eq!(normalize_field("smoking_habit", Some("Non-smoker")), "No");
        assert_eq!(normalize_field("alcohol_consumption", Some("Never")), "No");

        // Frequency vocabulary: "Never" is a real value and survives
        assert_eq!(normalize_field("exercise_frequency", Some("Never")), "Never");
        assert_eq!(normalize_field("exercise_frequency", None), "Never");

        // Defaults come from the table
        assert_eq!(normalize_field("chronic_disease", None), "No Disease");
        assert_eq!(normalize_field("dietary_habits", Some("")), "Balanced");
        assert_eq!(normalize_field("preferred_cuisine", None), "Indian");
    }
}
