//! The screener facade.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::client::{HttpTransport, Transport};
use crate::models::{
    field, filter, Country, Exchange, Field, Filter, FilterOperator, FilterValue, InstrumentClass,
    Market, RequestEnvelope, ResultTable, ScreenerConfiguration, SortOrder, SubMarket, SymbolType,
    TimeInterval,
};
use crate::{Error, Result};

/// Per-fetch options for [`Screener::get_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Interval the technical fields are computed over
    pub time_interval: TimeInterval,
    /// Write the request JSON to the screener's echo writer before sending
    pub print_request: bool,
}

impl FetchOptions {
    /// Options with a one-day interval and no echo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time interval.
    pub fn with_time_interval(mut self, interval: TimeInterval) -> Self {
        self.time_interval = interval;
        self
    }

    /// Echo the request body before sending it.
    pub fn with_print_request(mut self, print: bool) -> Self {
        self.print_request = print;
        self
    }
}

/// Configures and runs screens for one instrument class.
///
/// Filters and scope selectors accumulate until [`get`](Screener::get)
/// builds a fresh request, sends it through the transport and projects the
/// response into a [`ResultTable`]. Validation failures surface before the
/// transport is touched.
///
/// # Example
///
/// ```no_run
/// use tvscreener::prelude::*;
///
/// # async fn example() -> tvscreener::Result<()> {
/// let mut screener = Screener::stock()?;
/// screener
///     .add_filter(StockField::COUNTRY, FilterOperator::Equal, Country::Argentina)?
///     .add_filter(StockField::COUNTRY, FilterOperator::Equal, Country::Bermuda)?
///     .set_symbol_types([SymbolType::CommonStock]);
///
/// let table = screener
///     .get_with(FetchOptions::new().with_time_interval(TimeInterval::FourHours))
///     .await?;
/// println!("{} of {} matches", table.len(), table.total_count());
/// # Ok(())
/// # }
/// ```
pub struct Screener<T = HttpTransport> {
    class: InstrumentClass,
    transport: T,
    config: ScreenerConfiguration,
    echo: Mutex<Box<dyn Write + Send>>,
}

impl Screener<HttpTransport> {
    /// Create a screener backed by the public scan endpoint.
    pub fn new(class: InstrumentClass) -> Result<Self> {
        Ok(Self::with_transport(class, HttpTransport::new()?))
    }

    /// Stock screener with default settings.
    pub fn stock() -> Result<Self> {
        Self::new(InstrumentClass::Stock)
    }

    /// Forex screener with default settings.
    pub fn forex() -> Result<Self> {
        Self::new(InstrumentClass::Forex)
    }
}

impl<T: Transport> Screener<T> {
    /// Create a screener that sends its requests through `transport`.
    pub fn with_transport(class: InstrumentClass, transport: T) -> Self {
        Self {
            class,
            transport,
            config: ScreenerConfiguration::default(),
            echo: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Replace the writer that receives request echoes (stdout by default).
    pub fn with_echo(mut self, writer: impl Write + Send + 'static) -> Self {
        self.echo = Mutex::new(Box::new(writer));
        self
    }

    /// Instrument class this screener queries.
    pub fn class(&self) -> InstrumentClass {
        self.class
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current filters and selectors.
    pub fn configuration(&self) -> &ScreenerConfiguration {
        &self.config
    }

    /// Add a filter. Repeating a field OR-combines its clauses; different
    /// fields are AND-combined.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] if the field is not part of this screener's
    /// catalog, [`Error::MalformedRequest`] if the operator or value does not
    /// fit the field. The configuration is unchanged on error.
    pub fn add_filter(
        &mut self,
        field: Field,
        operator: FilterOperator,
        value: impl Into<FilterValue>,
    ) -> Result<&mut Self> {
        self.ensure_registered(&field)?;
        let value = value.into();
        filter::validate(&field, operator, &value)?;
        self.config.filters.push(Filter::new(field, operator, value));
        Ok(self)
    }

    /// Append pre-built filters. They are validated when the request is built.
    pub fn extend_filters(&mut self, filters: impl IntoIterator<Item = Filter>) -> &mut Self {
        self.config.filters.extend(filters);
        self
    }

    /// Restrict the screen to these symbol types. Repeated calls add to the
    /// set; an empty set means every type. Symbol types exist only for
    /// stocks, so a forex screen with types set fails with
    /// [`Error::UnknownField`] when the request is built.
    pub fn set_symbol_types(&mut self, types: impl IntoIterator<Item = SymbolType>) -> &mut Self {
        for symbol_type in types {
            if !self.config.symbol_types.contains(&symbol_type) {
                self.config.symbol_types.push(symbol_type);
            }
        }
        self
    }

    /// Replace the markets. Equivalent to filtering on
    /// [`ExtraFilter::MARKET`](crate::models::ExtraFilter::MARKET).
    pub fn set_markets(&mut self, markets: impl IntoIterator<Item = Market>) -> &mut Self {
        self.config.markets = Some(markets.into_iter().collect());
        self
    }

    /// Replace the country selector.
    pub fn set_countries(&mut self, countries: impl IntoIterator<Item = Country>) -> &mut Self {
        self.config.countries = countries.into_iter().collect();
        self
    }

    /// Replace the exchange selector.
    pub fn set_exchanges(&mut self, exchanges: impl IntoIterator<Item = Exchange>) -> &mut Self {
        self.config.exchanges = exchanges.into_iter().collect();
        self
    }

    /// Replace the sub-market selector.
    pub fn set_submarkets(&mut self, submarkets: impl IntoIterator<Item = SubMarket>) -> &mut Self {
        self.config.submarkets = submarkets.into_iter().collect();
        self
    }

    /// Match symbols whose name or description contains `text`. An empty
    /// string clears the search.
    pub fn search(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        self.config.search = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    /// Request only these columns (after name and description) instead of
    /// the whole catalog.
    pub fn select_columns(&mut self, columns: impl IntoIterator<Item = Field>) -> Result<&mut Self> {
        let columns: Vec<Field> = columns.into_iter().collect();
        for column in &columns {
            self.ensure_registered(column)?;
        }
        self.config.columns = Some(columns);
        Ok(self)
    }

    /// Sort the results by a field.
    pub fn sort_by(&mut self, field: Field, order: SortOrder) -> Result<&mut Self> {
        self.ensure_registered(&field)?;
        self.config.sort = Some((field, order));
        Ok(self)
    }

    /// Select the half-open row window `[from, to)`.
    pub fn set_range(&mut self, from: u32, to: u32) -> Result<&mut Self> {
        if from >= to {
            return Err(Error::InvalidInput(format!(
                "range start {} must be below its end {}",
                from, to
            )));
        }
        self.config.range = (from, to);
        Ok(self)
    }

    /// Build the request that [`get_with`](Screener::get_with) would send.
    pub fn request(&self, interval: TimeInterval) -> Result<RequestEnvelope> {
        let request = self.config.build(self.class, interval)?;
        tracing::debug!(
            class = %self.class,
            interval = ?interval,
            clauses = request.clauses().len(),
            columns = request.columns().len(),
            "built scan request"
        );
        Ok(request)
    }

    /// Run the screen with a one-day interval.
    pub async fn get(&self) -> Result<ResultTable> {
        self.get_with(FetchOptions::default()).await
    }

    /// Run the screen.
    ///
    /// # Errors
    ///
    /// Validation errors are returned before any network access. Transport
    /// and backend failures are passed through; see
    /// [`Error::is_request_failure`].
    pub async fn get_with(&self, options: FetchOptions) -> Result<ResultTable> {
        let request = self.request(options.time_interval)?;

        if options.print_request {
            self.echo(&request);
        }

        let response = self.transport.scan(&request).await?;
        ResultTable::project(response, request.projection())
    }

    fn ensure_registered(&self, field: &Field) -> Result<()> {
        if field::is_registered(self.class, field) {
            Ok(())
        } else {
            Err(Error::UnknownField {
                class: self.class,
                key: field.key().to_string(),
            })
        }
    }

    /// Diagnostic only: failures are logged and never reach the caller.
    fn echo(&self, request: &RequestEnvelope) {
        let json = match request.to_pretty_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "could not render request echo");
                return;
            }
        };

        let mut writer = self.echo.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(writer, "{}", json).and_then(|()| writer.flush()) {
            tracing::warn!(error = %err, "could not write request echo");
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Screener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screener")
            .field("class", &self.class)
            .field("transport", &self.transport)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
