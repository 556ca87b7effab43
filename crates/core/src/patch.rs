//! Three-state field wrapper for partial updates.
//!
//! A PATCH payload must tell "key omitted" apart from "key sent as null" and
//! from "key sent with a value", even when that value is the type's zero
//! value (`""`, `[]`). Declare such fields as `#[serde(default)] Patch<T>`:
//! an omitted key falls back to [`Patch::Missing`], while a present key goes
//! through [`Deserialize`] and becomes [`Patch::Null`] or [`Patch::Value`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The key was not in the payload.
    Missing,
    /// The key was present with a JSON `null`.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    /// Whether the key appeared in the payload at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Patch::Missing)
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(value) => Some(value),
            Patch::Missing | Patch::Null => None,
        }
    }

    /// `None` when missing, `Some(None)` when null, `Some(Some(v))` otherwise.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Patch::Missing => None,
            Patch::Null => Some(None),
            Patch::Value(value) => Some(Some(value)),
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}
