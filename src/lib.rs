//! # tvscreener
//!
//! A typed Rust client for the TradingView market screener.
//!
//! Build a screen from typed fields and filters, send it to the public scan
//! endpoint and read the answer back as a table.
//!
//! ## Features
//!
//! - **Typed registry**: every stock and forex field is a constant with its
//!   value kind and allowed operators
//! - **Local validation**: malformed filters fail before any network access
//! - **Scope selectors**: symbol types, markets, countries, exchanges,
//!   sub-markets, free-text search and the technical time interval
//! - **Result tables**: display, two-level and technical-only column layouts
//!   over one fetched buffer
//! - **Async-first**: built on Tokio and reqwest, with retries on transient
//!   failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tvscreener::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> tvscreener::Result<()> {
//!     let mut screener = Screener::stock()?;
//!     screener
//!         .add_filter(StockField::COUNTRY, FilterOperator::Equal, Country::Argentina)?
//!         .add_filter(StockField::MARKET_CAPITALIZATION, FilterOperator::Above, 1e9)?
//!         .set_symbol_types([SymbolType::CommonStock]);
//!
//!     let table = screener.get().await?;
//!     for symbol in table.symbols() {
//!         println!("{}", symbol);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Forex by Region
//!
//! ```rust,no_run
//! use tvscreener::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> tvscreener::Result<()> {
//!     let mut screener = Screener::forex()?;
//!     screener.add_filter(ForexField::REGION, FilterOperator::Equal, Region::Africa)?;
//!
//!     let mut table = screener
//!         .get_with(FetchOptions::new().with_time_interval(TimeInterval::OneHour))
//!         .await?;
//!     table.set_technical_columns(true);
//!     println!("{:?}", table.columns());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use api::{FetchOptions, Screener};
pub use client::{ClientConfig, HttpTransport, RetryConfig, Transport};
pub use error::{Error, Result};
pub use models::{InstrumentClass, ResultTable, Symbol, TimeInterval};

/// Prelude module for convenient imports.
///
/// ```rust
/// use tvscreener::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{FetchOptions, Screener};
    pub use crate::client::{ClientConfig, HttpTransport, RetryConfig, Transport};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Registry
        ExtraFilter, Field, ForexField, StockField,
        // Classification
        Country, Exchange, Market, Region, SubMarket, SymbolType,
        // Enums
        FilterOperator, InstrumentClass, SortOrder, TimeInterval,
        // Filters and results
        Cell, ColumnLabel, ColumnLayout, Filter, FilterValue, ResultTable, Symbol,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_class_is_stock() {
        assert_eq!(InstrumentClass::default(), InstrumentClass::Stock);
    }

    #[test]
    fn test_default_interval_has_no_suffix() {
        assert_eq!(TimeInterval::default(), TimeInterval::OneDay);
        assert_eq!(TimeInterval::default().suffix(), None);
    }

    #[test]
    fn test_symbol_creation() {
        let symbol = Symbol::new("NYSE:YPF");
        assert_eq!(symbol.as_str(), "NYSE:YPF");
    }
}
