//! Form-state container.
//!
//! A [`FormHandle`] is a cheap, cloneable handle to one form's state: the
//! current values, the initial values they are compared against, and the
//! per-field interaction flags (visited, touched, blurred). Inputs share the
//! handle; every mutation goes through it.
//!
//! ```
//! use adminform_core::config::FormConfig;
//! use adminform_core::form::FormHandle;
//! use serde_json::json;
//!
//! let form = FormHandle::with_record(&json!({ "publishedAt": "2010-01-01" }), FormConfig::new())
//!     .expect("object record");
//! form.register_field("publishedAt", None).expect("valid path");
//! assert!(!form.get_state().dirty);
//!
//! form.change("publishedAt", json!("2010-01-04")).expect("valid path");
//! assert!(form.get_state().dirty);
//! assert_eq!(form.value("publishedAt"), Some(json!("2010-01-04")));
//! ```

use crate::config::{FormConfig, ValidateOn};
use crate::error::{FormError, FormResult};
use crate::path::FieldPath;
use crate::validation::{ValidationError, Validator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared validator reference.
pub type SharedValidator = Arc<dyn Validator>;

type Subscriber = Arc<dyn Fn(&FormState) + Send + Sync>;

/// Snapshot of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
    /// Dotted path of the field
    pub name: String,
    /// Current value (`null` when unset)
    pub value: Value,
    /// Initial value (`null` when unset)
    pub initial: Value,
    /// Value differs from the initial value
    pub dirty: bool,
    /// Inverse of `dirty`
    pub pristine: bool,
    /// Blurred after having been focused
    pub touched: bool,
    /// Focused at least once
    pub visited: bool,
    /// Received at least one blur
    pub blurred: bool,
    /// Currently focused
    pub active: bool,
    /// No current error
    pub valid: bool,
    /// Current validation error
    pub error: Option<ValidationError>,
    /// A validator is attached
    pub has_validator: bool,
    /// The attached validator makes the field mandatory
    pub required: bool,
}

/// Snapshot of the whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// Current values
    pub values: Value,
    /// Values the form was initialized with
    pub initial_values: Value,
    /// Any registered field is dirty
    pub dirty: bool,
    /// Inverse of `dirty`
    pub pristine: bool,
    /// No registered field has an error
    pub valid: bool,
    /// The submit callback is running
    pub submitting: bool,
    /// Number of submit attempts
    pub submit_count: u32,
    /// Current errors by field path
    pub errors: BTreeMap<String, ValidationError>,
}

/// Identifies a subscription for [`FormHandle::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct FieldRecord {
    path: FieldPath,
    validator: Option<SharedValidator>,
    default_value: Option<Value>,
    registrations: usize,
    visited: bool,
    touched: bool,
    blurred: bool,
    error: Option<ValidationError>,
}

impl FieldRecord {
    fn new(path: FieldPath) -> Self {
        Self {
            path,
            validator: None,
            default_value: None,
            registrations: 0,
            visited: false,
            touched: false,
            blurred: false,
            error: None,
        }
    }

    fn clear_interaction(&mut self) {
        self.visited = false;
        self.touched = false;
        self.blurred = false;
    }
}

struct FormInner {
    config: FormConfig,
    values: Value,
    initial_values: Value,
    fields: BTreeMap<String, FieldRecord>,
    active: Option<String>,
    submitting: bool,
    submit_count: u32,
}

impl FormInner {
    fn new(config: FormConfig) -> Self {
        Self {
            config,
            values: Value::Object(Map::new()),
            initial_values: Value::Object(Map::new()),
            fields: BTreeMap::new(),
            active: None,
            submitting: false,
            submit_count: 0,
        }
    }

    fn field_mut(&mut self, path: &str) -> FormResult<&mut FieldRecord> {
        self.fields
            .get_mut(path)
            .ok_or_else(|| FormError::UnknownField(path.to_string()))
    }

    fn is_field_dirty(&self, record: &FieldRecord) -> bool {
        !same_value(
            record.path.get(&self.values),
            record.path.get(&self.initial_values),
        )
    }

    fn validate_field(&self, record: &FieldRecord) -> Option<ValidationError> {
        let validator = record.validator.as_ref()?;
        let value = record.path.get(&self.values).unwrap_or(&Value::Null);
        validator.validate(value, &self.values)
    }

    /// Recompute every field error. Validators see all values, so a change
    /// to one field can affect another's result.
    fn validate_all(&mut self) {
        let errors: Vec<(String, Option<ValidationError>)> = self
            .fields
            .iter()
            .map(|(name, record)| (name.clone(), self.validate_field(record)))
            .collect();
        for (name, error) in errors {
            if let Some(record) = self.fields.get_mut(&name) {
                record.error = error;
            }
        }
    }

    /// Seed a field default into both value maps when the record lacks it.
    fn apply_default(&mut self, path: &FieldPath, default: &Value) -> FormResult<()> {
        if path.get(&self.initial_values).map_or(true, Value::is_null) {
            path.set(&mut self.initial_values, default.clone())?;
            if path.get(&self.values).map_or(true, Value::is_null) {
                path.set(&mut self.values, default.clone())?;
            }
        }
        Ok(())
    }

    fn field_state(&self, name: &str, record: &FieldRecord) -> FieldState {
        let value = record.path.get(&self.values).cloned().unwrap_or(Value::Null);
        let initial = record
            .path
            .get(&self.initial_values)
            .cloned()
            .unwrap_or(Value::Null);
        let dirty = self.is_field_dirty(record);
        FieldState {
            name: name.to_string(),
            value,
            initial,
            dirty,
            pristine: !dirty,
            touched: record.touched,
            visited: record.visited,
            blurred: record.blurred,
            active: self.active.as_deref() == Some(name),
            valid: record.error.is_none(),
            error: record.error.clone(),
            has_validator: record.validator.is_some(),
            required: record.validator.as_ref().is_some_and(|v| v.is_required()),
        }
    }

    fn snapshot(&self) -> FormState {
        let dirty = self.fields.values().any(|r| self.is_field_dirty(r));
        let errors: BTreeMap<String, ValidationError> = self
            .fields
            .iter()
            .filter_map(|(name, r)| r.error.clone().map(|e| (name.clone(), e)))
            .collect();
        FormState {
            values: self.values.clone(),
            initial_values: self.initial_values.clone(),
            dirty,
            pristine: !dirty,
            valid: errors.is_empty(),
            submitting: self.submitting,
            submit_count: self.submit_count,
            errors,
        }
    }
}

/// Missing and `null` compare equal.
fn same_value(a: Option<&Value>, b: Option<&Value>) -> bool {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    a == b
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Cloneable handle to a form's state.
#[derive(Clone)]
pub struct FormHandle {
    inner: Arc<RwLock<FormInner>>,
    subscribers: Arc<RwLock<Vec<(SubscriptionId, Subscriber)>>>,
    next_subscription: Arc<AtomicU64>,
}

impl FormHandle {
    /// Empty form.
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(FormInner::new(config))),
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_subscription: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Form initialized from a record.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::RecordNotAnObject`] unless `record` is an object
    /// or `null`.
    pub fn with_record(record: &Value, config: FormConfig) -> FormResult<Self> {
        let form = Self::new(config);
        form.initialize(record)?;
        Ok(form)
    }

    fn read(&self) -> RwLockReadGuard<'_, FormInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FormInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> FormConfig {
        self.read().config
    }

    /// Replace both the values and the initial values with `record`.
    ///
    /// Field defaults are re-applied; the form is pristine afterwards.
    /// Interaction flags survive, so re-initializing with the same record
    /// changes nothing observable.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::RecordNotAnObject`] unless `record` is an object
    /// or `null`.
    pub fn initialize(&self, record: &Value) -> FormResult<()> {
        let record = match record {
            Value::Null => Value::Object(Map::new()),
            Value::Object(_) => record.clone(),
            other => return Err(FormError::RecordNotAnObject(json_type(other))),
        };
        {
            let mut inner = self.write();
            inner.initial_values = record.clone();
            inner.values = record;
            let defaults: Vec<(FieldPath, Value)> = inner
                .fields
                .values()
                .filter_map(|r| r.default_value.clone().map(|d| (r.path.clone(), d)))
                .collect();
            for (path, default) in &defaults {
                inner.apply_default(path, default)?;
            }
            if inner.config.validate_on == ValidateOn::Change {
                inner.validate_all();
            }
            log::debug!("form initialized with {} field(s) registered", inner.fields.len());
        }
        self.notify();
        Ok(())
    }

    /// Register an input for `path`. Registering the same path again adds a
    /// registration and, when given, replaces the validator.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidPath`] for a malformed path.
    pub fn register_field(
        &self,
        path: &str,
        validator: Option<SharedValidator>,
    ) -> FormResult<FieldPath> {
        let parsed = FieldPath::parse(path)?;
        {
            let mut inner = self.write();
            let validate_now = inner.config.validate_on == ValidateOn::Change;
            let record = inner
                .fields
                .entry(path.to_string())
                .or_insert_with(|| FieldRecord::new(parsed.clone()));
            record.registrations += 1;
            if let Some(validator) = validator {
                log::debug!("field {path:?} registered with validator {}", validator.name());
                record.validator = Some(validator);
            } else {
                log::debug!("field {path:?} registered");
            }
            if validate_now {
                inner.validate_all();
            }
        }
        self.notify();
        Ok(parsed)
    }

    /// Drop one registration of `path`. The field record goes away with
    /// its last registration, along with its value when
    /// `destroy_on_unregister` is set.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `path` is not registered.
    pub fn unregister_field(&self, path: &str) -> FormResult<()> {
        {
            let mut inner = self.write();
            let record = inner.field_mut(path)?;
            record.registrations = record.registrations.saturating_sub(1);
            if record.registrations == 0 {
                if let Some(record) = inner.fields.remove(path) {
                    if inner.config.destroy_on_unregister {
                        record.path.remove(&mut inner.values);
                    }
                }
                if inner.active.as_deref() == Some(path) {
                    inner.active = None;
                }
                log::debug!("field {path:?} unregistered");
            }
        }
        self.notify();
        Ok(())
    }

    /// Attach or replace the validator of a registered field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `path` is not registered.
    pub fn set_field_validator(&self, path: &str, validator: SharedValidator) -> FormResult<()> {
        {
            let mut inner = self.write();
            let validate_now = inner.config.validate_on == ValidateOn::Change;
            inner.field_mut(path)?.validator = Some(validator);
            if validate_now {
                inner.validate_all();
            }
        }
        self.notify();
        Ok(())
    }

    /// Seed the initial value of a registered field when the record has
    /// none. The form stays pristine.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `path` is not registered, or a
    /// path error if the value cannot be placed.
    pub fn set_field_default(&self, path: &str, default: Value) -> FormResult<()> {
        {
            let mut inner = self.write();
            let record = inner.field_mut(path)?;
            record.default_value = Some(default.clone());
            let field_path = record.path.clone();
            inner.apply_default(&field_path, &default)?;
            if inner.config.validate_on == ValidateOn::Change {
                inner.validate_all();
            }
        }
        self.notify();
        Ok(())
    }

    /// Write a value. `null` and `""` clear the field.
    ///
    /// # Errors
    ///
    /// Returns a path error if `path` is malformed or crosses a non-object.
    pub fn change(&self, path: &str, value: Value) -> FormResult<()> {
        let parsed = FieldPath::parse(path)?;
        {
            let mut inner = self.write();
            let clears = value.is_null() || value.as_str().is_some_and(str::is_empty);
            if clears {
                parsed.remove(&mut inner.values);
                log::debug!("field {path:?} cleared");
            } else {
                log::debug!("field {path:?} changed to {value}");
                parsed.set(&mut inner.values, value)?;
            }
            if inner.config.validate_on == ValidateOn::Change {
                inner.validate_all();
            }
        }
        self.notify();
        Ok(())
    }

    /// Mark a field focused.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `path` is not registered.
    pub fn focus(&self, path: &str) -> FormResult<()> {
        {
            let mut inner = self.write();
            inner.field_mut(path)?.visited = true;
            inner.active = Some(path.to_string());
            log::debug!("field {path:?} focused");
        }
        self.notify();
        Ok(())
    }

    /// Mark a field blurred; a field that was focused becomes touched.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] if `path` is not registered.
    pub fn blur(&self, path: &str) -> FormResult<()> {
        {
            let mut inner = self.write();
            let record = inner.field_mut(path)?;
            record.blurred = true;
            if record.visited {
                record.touched = true;
            }
            if inner.active.as_deref() == Some(path) {
                inner.active = None;
            }
            if inner.config.validate_on == ValidateOn::Blur {
                inner.validate_all();
            }
            log::debug!("field {path:?} blurred");
        }
        self.notify();
        Ok(())
    }

    /// Snapshot of a registered field.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<FieldState> {
        let inner = self.read();
        let record = inner.fields.get(path)?;
        Some(inner.field_state(path, record))
    }

    /// Current value at `path`, registered or not.
    #[must_use]
    pub fn value(&self, path: &str) -> Option<Value> {
        let parsed = FieldPath::parse(path).ok()?;
        parsed.get(&self.read().values).cloned()
    }

    /// Snapshot of the whole form.
    #[must_use]
    pub fn get_state(&self) -> FormState {
        self.read().snapshot()
    }

    /// Names of registered fields, sorted.
    #[must_use]
    pub fn registered_fields(&self) -> Vec<String> {
        self.read().fields.keys().cloned().collect()
    }

    /// Validate every field, mark every field touched and count the attempt.
    /// When the form is valid, `on_submit` runs with the current values.
    ///
    /// Returns whether the form was valid.
    pub fn submit<F>(&self, on_submit: F) -> bool
    where
        F: FnOnce(&Value),
    {
        let values = {
            let mut inner = self.write();
            inner.validate_all();
            for record in inner.fields.values_mut() {
                record.touched = true;
            }
            inner.submit_count += 1;
            let invalid = inner.fields.values().filter(|r| r.error.is_some()).count();
            if invalid > 0 {
                log::debug!("submit #{} rejected: {invalid} invalid field(s)", inner.submit_count);
                None
            } else {
                log::debug!("submit #{} accepted", inner.submit_count);
                inner.submitting = true;
                Some(inner.values.clone())
            }
        };
        self.notify();

        let Some(values) = values else {
            return false;
        };
        on_submit(&values);
        self.write().submitting = false;
        self.notify();
        true
    }

    /// Restore the initial values and clear interaction flags.
    pub fn reset(&self) {
        {
            let mut inner = self.write();
            inner.values = inner.initial_values.clone();
            inner.active = None;
            for record in inner.fields.values_mut() {
                record.clear_interaction();
                record.error = None;
            }
            if inner.config.validate_on == ValidateOn::Change {
                inner.validate_all();
            }
            log::debug!("form reset");
        }
        self.notify();
    }

    /// Call `callback` with a fresh snapshot after every mutation.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&FormState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Run subscribers without holding any lock, so they may call back
    /// into the form.
    fn notify(&self) {
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();
        if subscribers.is_empty() {
            return;
        }
        let state = self.get_state();
        log::trace!("notifying {} subscriber(s)", subscribers.len());
        for subscriber in subscribers {
            subscriber(&state);
        }
    }
}

impl Default for FormHandle {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl fmt::Debug for FormHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("FormHandle")
            .field("values", &inner.values)
            .field("fields", &inner.fields.keys().collect::<Vec<_>>())
            .field("config", &inner.config)
            .finish_non_exhaustive()
    }
}
