//! Primitive newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully qualified screener symbol, `EXCHANGE:TICKER`.
///
/// The string is kept verbatim; [`exchange`](Symbol::exchange) and
/// [`ticker`](Symbol::ticker) only split it.
///
/// # Example
///
/// ```
/// use tvscreener::Symbol;
///
/// let symbol = Symbol::new("NASDAQ:AAPL");
/// assert_eq!(symbol.exchange(), Some("NASDAQ"));
/// assert_eq!(symbol.ticker(), "AAPL");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exchange prefix, if the symbol is qualified.
    pub fn exchange(&self) -> Option<&str> {
        self.0.split_once(':').map(|(exchange, _)| exchange)
    }

    /// Ticker without the exchange prefix.
    pub fn ticker(&self) -> &str {
        self.0.split_once(':').map_or(&self.0, |(_, ticker)| ticker)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
