//! Explicit "unknown" marker for typed fields.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A typed field whose source cell may have been absent or unreadable.
///
/// Persisted as the plain value, or `null` when unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field<T> {
    Known(T),
    #[default]
    Unknown,
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Field::Known(v),
            None => Field::Unknown,
        }
    }
}

impl<T> From<Field<T>> for Option<T> {
    fn from(value: Field<T>) -> Self {
        match value {
            Field::Known(v) => Some(v),
            Field::Unknown => None,
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Known(v) => serializer.serialize_some(v),
            Field::Unknown => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Field::from)
    }
}
