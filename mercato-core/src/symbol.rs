use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// Case-normalized ticker identifier.
///
/// Construction trims surrounding whitespace and upper-cases the input. Market
/// suffixes (`RELIANCE.NS`) and index carets (`^GSPC`) are kept verbatim; each
/// connector translates the symbol into its own convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Normalize and validate a raw symbol.
    ///
    /// # Errors
    /// Returns `InvalidArg` for empty input or input containing whitespace or
    /// control characters.
    pub fn new(raw: &str) -> Result<Self, MercatoError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MercatoError::InvalidArg("symbol must not be empty".into()));
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(MercatoError::InvalidArg(format!(
                "symbol contains whitespace: {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Borrow the normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = MercatoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(s: Symbol) -> Self {
        s.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
