//! ISO 4217 currency codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CurrencyCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyCodeError {
    /// The code is not exactly three characters long.
    #[error("currency code must be exactly 3 characters (got {0})")]
    Length(usize),
    /// The code contains something other than ASCII letters.
    #[error("currency code must contain only ASCII letters")]
    NotAlphabetic,
}

/// A three-letter currency code such as `PHP` or `USD`.
///
/// Stored uppercase regardless of the case Loyverse sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// Parse a currency code.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyCodeError`] unless the input is three ASCII letters.
    pub fn parse(s: &str) -> Result<Self, CurrencyCodeError> {
        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| CurrencyCodeError::Length(s.chars().count()))?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(CurrencyCodeError::NotAlphabetic);
        }
        Ok(Self(bytes.map(|b| b.to_ascii_uppercase())))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Constructed only from ASCII letters.
        core::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.as_str().to_owned()
    }
}
