//! Serde helpers shared by request payloads.

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null` in PATCH bodies.
///
/// Use together with `#[serde(default)]` on an `Option<Option<T>>` field:
/// missing key -> `None`, `null` -> `Some(None)`, value -> `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
