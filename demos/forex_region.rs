//! Forex screening example.
//!
//! Fetches African currency pairs sorted by daily change.
//!
//! Run with: cargo run --example forex_region

use tvscreener::prelude::*;

#[tokio::main]
async fn main() -> tvscreener::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut screener = Screener::forex()?;
    screener
        .add_filter(ForexField::REGION, FilterOperator::Equal, Region::Africa)?
        .select_columns([ForexField::PRICE, ForexField::CHANGE_PERCENT, ForexField::RSI])?
        .sort_by(ForexField::CHANGE_PERCENT, SortOrder::Desc)?;

    let table = screener.get().await?;
    println!("Found {} African pairs", table.len());

    for index in table.index() {
        let symbol = table.cell(index, "Symbol").map(ToString::to_string).unwrap_or_default();
        let price = table.cell(index, "Price").and_then(Cell::as_f64);
        let change = table.cell(index, "Change %").and_then(Cell::as_f64);
        println!("  {:<16} price={:?} change={:?}", symbol, price, change);
    }

    Ok(())
}
