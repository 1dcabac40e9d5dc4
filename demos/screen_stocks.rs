//! Stock screening example.
//!
//! Lists large Argentine and Bermudan common stocks with their 4-hour
//! technicals, then prints the same rows in the technical-only layout.
//!
//! Run with: cargo run --example screen_stocks

use tvscreener::prelude::*;

#[tokio::main]
async fn main() -> tvscreener::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut screener = Screener::stock()?;
    screener
        .add_filter(StockField::COUNTRY, FilterOperator::Equal, Country::Argentina)?
        .add_filter(StockField::COUNTRY, FilterOperator::Equal, Country::Bermuda)?
        .add_filter(StockField::MARKET_CAPITALIZATION, FilterOperator::Above, 1e9)?
        .set_symbol_types([SymbolType::CommonStock])
        .select_columns([
            StockField::COUNTRY,
            StockField::PRICE,
            StockField::MARKET_CAPITALIZATION,
            StockField::RSI,
            StockField::TECHNICAL_RATING,
        ])?
        .set_range(0, 25)?;

    let options = FetchOptions::new()
        .with_time_interval(TimeInterval::FourHours)
        .with_print_request(true);
    let mut table = screener.get_with(options).await?;

    println!(
        "\n{} of {} matching stocks:",
        table.len(),
        table.total_count()
    );
    print_table(&table);

    table.set_technical_columns(true);
    println!("\nTechnical view:");
    print_table(&table);

    Ok(())
}

fn print_table(table: &ResultTable) {
    let header: Vec<String> = table.columns().iter().map(ToString::to_string).collect();
    println!("{}", header.join(" | "));
    for row in table.rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("{}", cells.join(" | "));
    }
}
