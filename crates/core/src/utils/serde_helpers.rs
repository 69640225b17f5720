//! Serde utility helpers for case-insensitive deserialization of settings enums

/// Macro to implement case-insensitive deserialization for unit-only enums
///
/// Settings files are edited by hand, so `"merge"`, `"Merge"` and `"MERGE"`
/// must all be accepted.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     EnvMode,
///     Merge => "merge",
///     Replace => "replace"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:literal),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                match s.to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}
