//! Options controlling how a class schema treats its input.

use serde::Deserialize;

/// Options for running a [`ClassSchema`](super::ClassSchema).
///
/// Deserializable so it can live in a configuration file; missing keys take
/// their defaults.
///
/// ```rust
/// use verdict::class::ClassValidatorOptions;
///
/// let options: ClassValidatorOptions =
///     serde_json::from_str(r#"{ "forbid_non_whitelisted": true }"#).unwrap();
/// assert!(options.whitelist);
/// assert!(options.forbid_non_whitelisted);
/// assert!(!options.skip_missing_properties);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassValidatorOptions {
    /// Drop input properties the schema does not declare.
    pub whitelist: bool,
    /// Report undeclared input properties instead of dropping them. Only
    /// applies with `whitelist`.
    pub forbid_non_whitelisted: bool,
    /// Skip the rules of properties that are `null` or absent.
    pub skip_missing_properties: bool,
}

impl Default for ClassValidatorOptions {
    fn default() -> Self {
        Self {
            whitelist: true,
            forbid_non_whitelisted: false,
            skip_missing_properties: false,
        }
    }
}
