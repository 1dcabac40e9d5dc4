//! Data models for the screener API.
//!
//! Models are organized by concern:
//!
//! - [`primitives`] - The `EXCHANGE:TICKER` symbol newtype
//! - [`enums`] - Instrument classes, value kinds, operators, intervals
//! - [`classification`] - Regions, markets, countries, exchanges, symbol types
//! - [`field`] - The static field registry
//! - [`filter`] - Filters and their validation
//! - [`request`] - Screener configuration and the request builder
//! - [`response`] - Scan response rows
//! - [`table`] - Result table projection

pub mod primitives;
pub mod enums;
pub mod classification;
pub mod field;
pub mod filter;
pub mod request;
pub mod response;
pub mod table;

// Re-export commonly used types
pub use primitives::*;
pub use enums::*;
pub use classification::*;
pub use field::*;
pub use filter::*;
pub use request::*;
pub use response::*;
pub use table::*;
