//! Pluggable field validation.
//!
//! Handlers call the configured [`ContactValidator`] after parsing the body
//! and before touching the store. Swapping the validator tightens or loosens
//! what is accepted without changing handler control flow.

use serde_json::Value;

use super::error::ContactError;
use super::model::ContactFields;

/// Capability interface for checking contact fields.
pub trait ContactValidator: Send + Sync {
    /// Checks the fields of a contact about to be created.
    fn validate_new(&self, fields: &ContactFields) -> Result<(), ContactError>;

    /// Checks the fields of a partial update. Defaults to the create rules,
    /// which only ever look at supplied fields.
    fn validate_patch(&self, fields: &ContactFields) -> Result<(), ContactError> {
        self.validate_new(fields)
    }
}

/// Accepts anything. The non-empty body check in the handlers is the only
/// enforcement.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresenceOnly;

impl ContactValidator for PresenceOnly {
    fn validate_new(&self, _fields: &ContactFields) -> Result<(), ContactError> {
        Ok(())
    }
}

/// Rejects supplied fields of the wrong JSON type: `name`, `email` and
/// `address` must be strings, `age` a non-negative number.
#[derive(Clone, Copy, Debug, Default)]
pub struct TypedFields;

impl ContactValidator for TypedFields {
    fn validate_new(&self, fields: &ContactFields) -> Result<(), ContactError> {
        for (key, value) in fields.iter() {
            let ok = match key {
                "age" => value.as_f64().is_some_and(|age| age >= 0.0),
                _ => matches!(value, Value::String(_)),
            };
            if !ok {
                let expected = if key == "age" { "a non-negative number" } else { "a string" };
                return Err(ContactError::Invalid(format!("{key} must be {expected}")));
            }
        }
        Ok(())
    }
}
