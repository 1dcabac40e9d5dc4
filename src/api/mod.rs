//! Screener facade.
//!
//! [`Screener`] accumulates filters and scope selectors for one instrument
//! class and runs them against a [`Transport`](crate::client::Transport).

mod screener;

pub use screener::{FetchOptions, Screener};
