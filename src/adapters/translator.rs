// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in key translators for environment variables and process properties.
//!
//! Two policies are provided:
//!
//! - [`DefaultTranslator`]: `APP_DATABASE_URL` becomes `database.url`, and a
//!   doubled underscore stands for a literal one (`APP_MY__NAME` becomes
//!   `my_name`).
//! - [`HexTranslator`]: the remainder after the prefix is hex-encoded bytes, so
//!   any key spelling survives environments that only allow `[A-Z0-9_]` names
//!   (`APP_6D792E6B6579` becomes `my.key`).

use crate::domain::{ConfigError, Result};
use crate::ports::KeyTranslator;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Strips the prefix, maps `_` to `.` and `__` to `_`, then lower-cases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultTranslator;

impl KeyTranslator for DefaultTranslator {
    fn translate(&self, key: &str, prefix: &str) -> Result<Option<String>> {
        let Some(trimmed) = key.strip_prefix(prefix) else {
            return Ok(None);
        };

        let translated = trimmed
            .replace("__", "\u{0}")
            .replace('_', ".")
            .replace('\u{0}', "_")
            .to_lowercase();

        Ok(Some(translated))
    }
}

/// Strips the prefix and decodes the remainder as hex pairs, one character per
/// byte. Case is preserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HexTranslator;

impl HexTranslator {
    /// Hex-encodes `key` so that [`HexTranslator`] maps it back.
    ///
    /// Only characters up to U+00FF can be represented; others are rejected.
    pub fn encode(key: &str) -> Result<String> {
        key.chars()
            .map(|c| {
                u8::try_from(u32::from(c))
                    .map(|b| format!("{:02X}", b))
                    .map_err(|_| {
                        ConfigError::invalid_argument(format!(
                            "Character {:?} in {:?} cannot be hex-encoded as a single byte",
                            c, key
                        ))
                    })
            })
            .collect()
    }

    fn decode(hex: &str) -> Result<String> {
        if hex.len() % 2 != 0 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::invalid_argument(format!("Invalid hex string: {}", hex)));
        }

        hex.as_bytes()
            .chunks(2)
            .map(|pair| {
                let digits = std::str::from_utf8(pair)
                    .map_err(|_| ConfigError::invalid_argument(format!("Invalid hex string: {}", hex)))?;
                u8::from_str_radix(digits, 16)
                    .map(char::from)
                    .map_err(|_| ConfigError::invalid_argument(format!("Invalid hex string: {}", hex)))
            })
            .collect()
    }
}

impl KeyTranslator for HexTranslator {
    fn translate(&self, key: &str, prefix: &str) -> Result<Option<String>> {
        match key.strip_prefix(prefix) {
            Some(hex) => Self::decode(hex).map(Some),
            None => Ok(None),
        }
    }
}

/// Selects one of the built-in translators by name.
///
/// # Examples
///
/// ```rust
/// use envaware::adapters::TranslatorFlavor;
///
/// assert_eq!(TranslatorFlavor::from_name(Some("HEX")), TranslatorFlavor::Hex);
/// assert_eq!(TranslatorFlavor::from_name(Some("whatever")), TranslatorFlavor::Default);
/// assert_eq!(TranslatorFlavor::from_name(None), TranslatorFlavor::Default);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TranslatorFlavor {
    /// [`DefaultTranslator`]
    #[default]
    Default,
    /// [`HexTranslator`]
    Hex,
}

impl TranslatorFlavor {
    /// `"hex"` in any case selects [`TranslatorFlavor::Hex`]; anything else,
    /// including no name, selects [`TranslatorFlavor::Default`].
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) if name.eq_ignore_ascii_case("hex") => TranslatorFlavor::Hex,
            _ => TranslatorFlavor::Default,
        }
    }

    /// Returns a translator implementing this flavor.
    pub fn translator(self) -> Box<dyn KeyTranslator> {
        match self {
            TranslatorFlavor::Default => Box::new(DefaultTranslator),
            TranslatorFlavor::Hex => Box::new(HexTranslator),
        }
    }
}

impl FromStr for TranslatorFlavor {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_name(Some(s)))
    }
}

impl fmt::Display for TranslatorFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslatorFlavor::Default => write!(f, "default"),
            TranslatorFlavor::Hex => write!(f, "hex"),
        }
    }
}

/// Translates every name in `vars` that starts with `prefix`.
///
/// Names without the prefix are skipped. The first translation failure aborts
/// the whole operation.
pub fn translate_all<'a, I>(vars: I, prefix: &str, translator: &dyn KeyTranslator) -> Result<HashMap<String, String>>
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut translated = HashMap::new();
    for (name, value) in vars {
        if let Some(key) = translator.translate(name, prefix)? {
            tracing::trace!("Translated '{}' to '{}'", name, key);
            translated.insert(key, value.clone());
        }
    }
    Ok(translated)
}
