//! Request payload validation.
//!
//! Request bodies deserialize into loose shapes (every field optional) and are
//! then checked field by field, so a 400 response can list every problem at
//! once instead of failing on the first missing key.

use std::collections::BTreeMap;

use models::errors::ModelError;
use serde::Serialize;

pub const MISSING: &str = "Missing data for required field.";
pub const NULL: &str = "Field may not be null.";

/// Field name -> messages, serialized as the `errors` object of a 400.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self { Self::default() }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errs = Self::new();
        errs.add(field, message);
        errs
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    /// Record a model-level check under `field`.
    pub fn check(&mut self, field: &str, res: Result<(), ModelError>) {
        if let Err(e) = res {
            self.add(field, e.to_string());
        }
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn get(&self, field: &str) -> Option<&[String]> { self.0.get(field).map(Vec::as_slice) }

    /// `Ok(value)` when nothing was recorded.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// Turns a raw request shape into the payload a service accepts.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, FieldErrors>;
}

/// A required field: absent or `null` is an error.
pub fn required<T>(errs: &mut FieldErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errs.add(field, MISSING);
    }
    value
}

/// A field that may be omitted from a PATCH but not set to `null`.
pub fn not_null<T>(errs: &mut FieldErrors, field: &str, value: Option<Option<T>>) -> Option<T> {
    match value {
        Some(None) => {
            errs.add(field, NULL);
            None
        }
        Some(v) => v,
        None => None,
    }
}
