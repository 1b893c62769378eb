use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value as Json;

/// CMS payloads send `null` for empty lists and groups; treat it like absence.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Select fields come back as `""` when nothing was picked, and old entries can
/// hold options that no longer exist. Anything that does not decode is `None`.
pub(crate) fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Json>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}
