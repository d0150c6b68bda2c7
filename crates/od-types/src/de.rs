//! Lenient field deserializers for OpenDota payloads.
//!
//! OpenDota sends `null` for counters it has not computed yet. Pair with
//! `#[serde(default)]` so a missing field and a null one both land on the
//! type's default.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
