//! Serde glue shared by the wire types.

use serde::de::DeserializeOwned;

use crate::Result;

/// Calendar dates on the wire: `YYYY-MM-DD`, no time of day, no offset.
///
/// Attach per field with `#[serde(with = "crate::serde_helpers::calendar_date")]`.
pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{Deserialize as _, Deserializer, Serializer};

    use crate::Result;

    pub const FORMAT: &str = "%Y-%m-%d";

    #[must_use]
    pub fn encode(date: NaiveDate) -> String {
        date.format(FORMAT).to_string()
    }

    pub fn decode(value: &str) -> Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(value, FORMAT)?)
    }

    pub fn serialize<S: Serializer>(
        date: &NaiveDate,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDate, D::Error> {
        let value = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Deserializes `bytes`, reporting the JSON path of a failing field and logging
/// fields the target type does not know about.
#[cfg(feature = "tracing")]
pub(crate) fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut unknown = Vec::new();
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
    let mut track = |path: serde_ignored::Path<'_>| unknown.push(path.to_string());
    let ignoring = serde_ignored::Deserializer::new(deserializer, &mut track);
    let value = serde_path_to_error::deserialize(ignoring)?;

    if !unknown.is_empty() {
        tracing::debug!(
            fields = ?unknown,
            target_type = std::any::type_name::<T>(),
            "ignored unknown fields while decoding"
        );
    }

    Ok(value)
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}
