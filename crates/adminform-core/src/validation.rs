//! Field validators.
//!
//! A validator maps the current field value (and all form values) to an
//! optional [`ValidationError`]. Errors are translation keys plus named
//! arguments, resolved for display by a [`crate::i18n::Translator`].
//!
//! ```
//! use adminform_core::validation::{required, Validator};
//! use serde_json::{json, Value};
//!
//! let v = required();
//! assert_eq!(v.validate(&Value::Null, &json!({})).map(|e| e.key), Some("ra.validation.required".into()));
//! assert!(v.validate(&json!("2010-01-04"), &json!({})).is_none());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Key used by [`Required`].
pub const REQUIRED_KEY: &str = "ra.validation.required";
/// Key used by [`MinValue`].
pub const MIN_VALUE_KEY: &str = "ra.validation.minValue";
/// Key used by [`MaxValue`].
pub const MAX_VALUE_KEY: &str = "ra.validation.maxValue";

/// A failed validation: translation key plus interpolation arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Translation key, e.g. `ra.validation.required`
    pub key: String,
    /// Named arguments, e.g. `min`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,
}

impl ValidationError {
    /// Error with no arguments.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: BTreeMap::new(),
        }
    }

    /// Attach a named argument.
    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// A field validator.
pub trait Validator: Send + Sync {
    /// Validate `value`; `all_values` is the whole form value map.
    fn validate(&self, value: &Value, all_values: &Value) -> Option<ValidationError>;

    /// Short name, for logging.
    fn name(&self) -> &str;

    /// Whether this validator makes the field mandatory.
    fn is_required(&self) -> bool {
        false
    }
}

/// True for `null`, `""` and `[]`.
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// Rejects empty values.
#[derive(Debug, Clone)]
pub struct Required {
    key: String,
}

impl Required {
    /// Required validator with the standard key.
    pub fn new() -> Self {
        Self {
            key: REQUIRED_KEY.to_string(),
        }
    }

    /// Required validator with a custom message key.
    pub fn with_message(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for Required {
    fn validate(&self, value: &Value, _all_values: &Value) -> Option<ValidationError> {
        is_empty_value(value).then(|| ValidationError::new(&self.key))
    }

    fn name(&self) -> &str {
        "required"
    }

    fn is_required(&self) -> bool {
        true
    }
}

/// Shorthand for [`Required::new`].
pub fn required() -> Required {
    Required::new()
}

/// Ordering used by the bound validators: calendar strings compare
/// lexically (`YYYY-MM-DD` sorts chronologically), numbers numerically.
fn compare(value: &Value, bound: &Value) -> Option<std::cmp::Ordering> {
    match (value, bound) {
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        _ => None,
    }
}

fn display_bound(bound: &Value) -> String {
    match bound {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Rejects values lower than a bound. Empty values pass.
#[derive(Debug, Clone)]
pub struct MinValue {
    min: Value,
}

impl MinValue {
    /// Lower bound, inclusive.
    pub fn new(min: impl Into<Value>) -> Self {
        Self { min: min.into() }
    }
}

impl Validator for MinValue {
    fn validate(&self, value: &Value, _all_values: &Value) -> Option<ValidationError> {
        if is_empty_value(value) {
            return None;
        }
        (compare(value, &self.min) == Some(std::cmp::Ordering::Less)).then(|| {
            ValidationError::new(MIN_VALUE_KEY).with_arg("min", display_bound(&self.min))
        })
    }

    fn name(&self) -> &str {
        "minValue"
    }
}

/// Rejects values greater than a bound. Empty values pass.
#[derive(Debug, Clone)]
pub struct MaxValue {
    max: Value,
}

impl MaxValue {
    /// Upper bound, inclusive.
    pub fn new(max: impl Into<Value>) -> Self {
        Self { max: max.into() }
    }
}

impl Validator for MaxValue {
    fn validate(&self, value: &Value, _all_values: &Value) -> Option<ValidationError> {
        if is_empty_value(value) {
            return None;
        }
        (compare(value, &self.max) == Some(std::cmp::Ordering::Greater)).then(|| {
            ValidationError::new(MAX_VALUE_KEY).with_arg("max", display_bound(&self.max))
        })
    }

    fn name(&self) -> &str {
        "maxValue"
    }
}

/// Custom function validator.
pub struct Custom<F>
where
    F: Fn(&Value, &Value) -> Option<ValidationError> + Send + Sync,
{
    validator: F,
    name: String,
}

impl<F> Custom<F>
where
    F: Fn(&Value, &Value) -> Option<ValidationError> + Send + Sync,
{
    /// Wrap a closure as a validator.
    pub fn new(name: &str, validator: F) -> Self {
        Self {
            validator,
            name: name.to_string(),
        }
    }
}

impl<F> Validator for Custom<F>
where
    F: Fn(&Value, &Value) -> Option<ValidationError> + Send + Sync,
{
    fn validate(&self, value: &Value, all_values: &Value) -> Option<ValidationError> {
        (self.validator)(value, all_values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for Custom<F>
where
    F: Fn(&Value, &Value) -> Option<ValidationError> + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish()
    }
}

/// Several validators run in order; the first error wins.
#[derive(Default)]
pub struct Composed {
    validators: Vec<Box<dyn Validator>>,
}

impl Composed {
    /// Empty composition (always valid).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator.
    #[must_use]
    pub fn and<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True when no validator was added.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for Composed {
    fn validate(&self, value: &Value, all_values: &Value) -> Option<ValidationError> {
        self.validators
            .iter()
            .find_map(|v| v.validate(value, all_values))
    }

    fn name(&self) -> &str {
        "composed"
    }

    fn is_required(&self) -> bool {
        self.validators.iter().any(|v| v.is_required())
    }
}

impl fmt::Debug for Composed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.validators.iter().map(|v| v.name()).collect();
        f.debug_struct("Composed").field("validators", &names).finish()
    }
}

/// Compose validators from a list of boxed validators.
pub fn compose(validators: Vec<Box<dyn Validator>>) -> Composed {
    Composed { validators }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(v: &dyn Validator, value: Value) -> Option<ValidationError> {
        v.validate(&value, &json!({}))
    }

    #[test]
    fn test_required_rejects_empty_values() {
        let v = required();
        assert_eq!(v.name(), "required");
        assert!(v.is_required());
        assert_eq!(run(&v, Value::Null), Some(ValidationError::new(REQUIRED_KEY)));
        assert_eq!(run(&v, json!("")), Some(ValidationError::new(REQUIRED_KEY)));
        assert_eq!(run(&v, json!([])), Some(ValidationError::new(REQUIRED_KEY)));
        assert_eq!(run(&v, json!("2010-01-04")), None);
        assert_eq!(run(&v, json!(0)), None);
    }

    #[test]
    fn test_required_custom_message() {
        let v = Required::with_message("myapp.validation.date_needed");
        assert_eq!(
            run(&v, Value::Null).map(|e| e.key),
            Some("myapp.validation.date_needed".to_string())
        );
    }

    #[test]
    fn test_min_value_on_dates() {
        let v = MinValue::new("2010-01-01");
        assert_eq!(run(&v, json!("2010-01-01")), None);
        assert_eq!(run(&v, json!("2011-06-30")), None);
        assert_eq!(
            run(&v, json!("2009-12-31")),
            Some(ValidationError::new(MIN_VALUE_KEY).with_arg("min", "2010-01-01"))
        );
        assert_eq!(run(&v, Value::Null), None);
    }

    #[test]
    fn test_max_value_on_numbers() {
        let v = MaxValue::new(10);
        assert_eq!(run(&v, json!(10)), None);
        assert_eq!(
            run(&v, json!(11)),
            Some(ValidationError::new(MAX_VALUE_KEY).with_arg("max", "10"))
        );
    }

    #[test]
    fn test_bound_ignores_mismatched_types() {
        let v = MinValue::new("2010-01-01");
        assert_eq!(run(&v, json!(5)), None);
    }

    #[test]
    fn test_custom_sees_all_values() {
        let v = Custom::new("afterCreated", |value, all| {
            let created = all.get("createdAt")?.as_str()?;
            (value.as_str()? < created).then(|| ValidationError::new("app.validation.beforeCreated"))
        });
        let all = json!({ "createdAt": "2010-01-10" });
        assert!(v.validate(&json!("2010-01-04"), &all).is_some());
        assert!(v.validate(&json!("2010-01-12"), &all).is_none());
        assert_eq!(v.name(), "afterCreated");
    }

    #[test]
    fn test_composed_first_error_wins() {
        let v = Composed::new()
            .and(required())
            .and(MinValue::new("2010-01-01"));
        assert_eq!(v.len(), 2);
        assert!(v.is_required());
        assert_eq!(run(&v, Value::Null).map(|e| e.key), Some(REQUIRED_KEY.into()));
        assert_eq!(
            run(&v, json!("2000-01-01")).map(|e| e.key),
            Some(MIN_VALUE_KEY.into())
        );
        assert_eq!(run(&v, json!("2020-01-01")), None);
    }

    #[test]
    fn test_compose_from_boxes() {
        let v = compose(vec![Box::new(MaxValue::new("2020-12-31"))]);
        assert!(!v.is_required());
        assert!(run(&v, json!("2021-01-01")).is_some());
        assert!(Composed::new().is_empty());
    }

    #[test]
    fn test_validation_error_display_is_key() {
        let e = ValidationError::new(REQUIRED_KEY).with_arg("x", "y");
        assert_eq!(e.to_string(), REQUIRED_KEY);
    }
}
