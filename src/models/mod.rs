pub mod anime;
pub mod release;

pub use anime::{MediaFormat, TitleEntry};
pub use release::{Release, ReleaseStatus};

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
