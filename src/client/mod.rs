//! Transport layer for the scan endpoint.
//!
//! [`Transport`] is the seam the [`Screener`](crate::Screener) sends
//! requests through. [`HttpTransport`] talks to the public scanner.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tvscreener::{ClientConfig, HttpTransport, InstrumentClass, Screener};
//!
//! # async fn example() -> tvscreener::Result<()> {
//! let transport = HttpTransport::with_config(
//!     ClientConfig::default().with_timeout(Duration::from_secs(10)),
//! )?;
//! let screener = Screener::with_transport(InstrumentClass::Stock, transport);
//! let table = screener.get().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod transport;

pub use config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL};
pub use http::HttpTransport;
pub use transport::Transport;
