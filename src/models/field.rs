//! Field registry.
//!
//! Every selectable attribute of an instrument is a [`Field`]: a wire key,
//! a display label, a value kind and the operators it accepts. The catalog
//! is static; [`StockField`], [`ForexField`] and [`ExtraFilter`] expose the
//! fields as associated constants and [`fields_for`] / [`lookup`] resolve
//! them per instrument class.
//!
//! # Example
//!
//! ```
//! use tvscreener::models::{lookup, InstrumentClass, StockField};
//!
//! let field = lookup(InstrumentClass::Stock, "country").unwrap();
//! assert_eq!(*field, StockField::COUNTRY);
//! assert_eq!(field.label(), "Country");
//! ```

use std::borrow::Cow;

use super::classification::Dimension;
use super::enums::{FieldCategory, FilterOperator, InstrumentClass, TimeInterval, ValueKind};
use crate::{Error, Result};

/// Where a field's filter clauses end up in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// A `{left, operation, right}` clause
    Clause,
    /// The request-level `markets` list
    Markets,
}

/// Immutable descriptor of a screener field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    key: &'static str,
    label: &'static str,
    kind: ValueKind,
    category: FieldCategory,
    operators: &'static [FilterOperator],
    dimension: Option<Dimension>,
    interval: bool,
    placement: Placement,
}

impl Field {
    /// Symbol column (`EXCHANGE:TICKER`), delivered with every row.
    pub const SYMBOL: Field = Field::text("symbol", "Symbol");

    const fn new(
        key: &'static str,
        label: &'static str,
        kind: ValueKind,
        category: FieldCategory,
        operators: &'static [FilterOperator],
    ) -> Self {
        Self {
            key,
            label,
            kind,
            category,
            operators,
            dimension: None,
            interval: false,
            placement: Placement::Clause,
        }
    }

    /// Descriptive free-text field.
    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, ValueKind::Text, FieldCategory::Descriptive, FilterOperator::TEXT)
    }

    /// Descriptive multi-valued text field, filtered with HAS / HAS_NONE_OF.
    pub const fn tags(key: &'static str, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            ValueKind::Text,
            FieldCategory::Descriptive,
            FilterOperator::MULTI_VALUED,
        )
    }

    /// Technical numeric field.
    pub const fn number(key: &'static str, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            ValueKind::Number,
            FieldCategory::Technical,
            FilterOperator::NUMERIC,
        )
    }

    /// Descriptive boolean field.
    pub const fn boolean(key: &'static str, label: &'static str) -> Self {
        Self::new(
            key,
            label,
            ValueKind::Boolean,
            FieldCategory::Descriptive,
            FilterOperator::BOOLEAN,
        )
    }

    /// Descriptive field whose values come from a classification set.
    pub const fn enumerated(key: &'static str, label: &'static str, dimension: Dimension) -> Self {
        let mut field = Self::new(
            key,
            label,
            ValueKind::Enumerated,
            FieldCategory::Descriptive,
            FilterOperator::ENUMERATED,
        );
        field.dimension = Some(dimension);
        field
    }

    /// Marks the field as computed per time interval.
    pub const fn per_interval(self) -> Self {
        Self {
            interval: true,
            ..self
        }
    }

    /// Replaces the allowed operator set.
    pub const fn with_operators(self, operators: &'static [FilterOperator]) -> Self {
        Self { operators, ..self }
    }

    const fn placed(self, placement: Placement) -> Self {
        Self { placement, ..self }
    }

    /// Wire key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Human-readable column label.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Declared value kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Technical or descriptive.
    pub fn category(&self) -> FieldCategory {
        self.category
    }

    /// Returns `true` for price/indicator fields.
    pub fn is_technical(&self) -> bool {
        self.category == FieldCategory::Technical
    }

    /// Allowed operators.
    pub fn operators(&self) -> &'static [FilterOperator] {
        self.operators
    }

    /// Returns `true` if `op` may be used with this field.
    pub fn allows(&self, op: FilterOperator) -> bool {
        self.operators.contains(&op)
    }

    /// Classification set of an enumerated field.
    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    /// Returns `true` if the backend computes this field per time interval.
    pub fn is_interval_dependent(&self) -> bool {
        self.interval
    }

    /// Where filter clauses on this field are placed in the request.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Requested column name for an interval, e.g. `RSI|240`.
    pub fn column(&self, interval: TimeInterval) -> Cow<'static, str> {
        match interval.suffix() {
            Some(suffix) if self.interval => Cow::Owned(format!("{}|{}", self.key, suffix)),
            _ => Cow::Borrowed(self.key),
        }
    }
}

/// Fields of the stock screener.
pub struct StockField;

impl StockField {
    /// Ticker without exchange prefix
    pub const NAME: Field = Field::text("name", "Name");
    /// Company name
    pub const DESCRIPTION: Field = Field::text("description", "Description");
    /// Security type (`stock`, `fund`, `dr`, ...)
    pub const TYPE: Field = Field::text("type", "Type");
    /// Security subtype
    pub const SUBTYPE: Field = Field::text("subtype", "Subtype");
    /// Type qualifiers (`common`, `etf`, ...)
    pub const TYPESPECS: Field = Field::tags("typespecs", "Type Specs");
    /// Listing exchange
    pub const EXCHANGE: Field = Field::enumerated("exchange", "Exchange", Dimension::Exchange);
    /// Issuer country
    pub const COUNTRY: Field = Field::enumerated("country", "Country", Dimension::Country);
    /// OTC tier
    pub const SUBMARKET: Field = Field::enumerated("submarket", "Submarket", Dimension::SubMarket);
    /// Sector
    pub const SECTOR: Field = Field::text("sector", "Sector");
    /// Industry
    pub const INDUSTRY: Field = Field::text("industry", "Industry");
    /// Trading currency
    pub const CURRENCY: Field = Field::text("currency", "Currency");

    /// Last price
    pub const PRICE: Field = Field::number("close", "Price").per_interval();
    /// Change in percent
    pub const CHANGE_PERCENT: Field = Field::number("change", "Change %").per_interval();
    /// Absolute change
    pub const CHANGE: Field = Field::number("change_abs", "Change").per_interval();
    /// Open
    pub const OPEN: Field = Field::number("open", "Open").per_interval();
    /// High
    pub const HIGH: Field = Field::number("high", "High").per_interval();
    /// Low
    pub const LOW: Field = Field::number("low", "Low").per_interval();
    /// Volume
    pub const VOLUME: Field = Field::number("volume", "Volume").per_interval();
    /// Volume relative to its 10-day average
    pub const RELATIVE_VOLUME: Field =
        Field::number("relative_volume_10d_calc", "Relative Volume").per_interval();
    /// 10-day average volume
    pub const AVERAGE_VOLUME_10D: Field =
        Field::number("average_volume_10d_calc", "Average Volume (10 day)");
    /// Market capitalization
    pub const MARKET_CAPITALIZATION: Field =
        Field::number("market_cap_basic", "Market Capitalization");
    /// Price to earnings (TTM)
    pub const PRICE_TO_EARNINGS: Field =
        Field::number("price_earnings_ttm", "Price to Earnings Ratio (TTM)");
    /// Basic EPS (TTM)
    pub const EPS_TTM: Field = Field::number("earnings_per_share_basic_ttm", "Basic EPS (TTM)");
    /// Forward dividend yield
    pub const DIVIDEND_YIELD: Field =
        Field::number("dividend_yield_recent", "Dividend Yield Forward");
    /// One-year beta
    pub const BETA_1Y: Field = Field::number("beta_1_year", "1-Year Beta");
    /// Number of employees
    pub const EMPLOYEES: Field = Field::number("number_of_employees", "Number of Employees");
    /// Total revenue (FY)
    pub const TOTAL_REVENUE: Field = Field::number("total_revenue", "Total Revenue (FY)");
    /// Gross margin (TTM)
    pub const GROSS_MARGIN: Field = Field::number("gross_margin", "Gross Margin (TTM)");
    /// 52-week high
    pub const HIGH_52W: Field = Field::number("price_52_week_high", "52 Week High");
    /// 52-week low
    pub const LOW_52W: Field = Field::number("price_52_week_low", "52 Week Low");
    /// One-week performance
    pub const PERF_WEEK: Field = Field::number("Perf.W", "Weekly Performance");
    /// One-month performance
    pub const PERF_MONTH: Field = Field::number("Perf.1M", "Monthly Performance");
    /// One-year performance
    pub const PERF_YEAR: Field = Field::number("Perf.Y", "Yearly Performance");
    /// Year-to-date performance
    pub const PERF_YTD: Field = Field::number("Perf.YTD", "YTD Performance");
    /// Daily volatility
    pub const VOLATILITY_DAY: Field = Field::number("Volatility.D", "Volatility");
    /// RSI (14)
    pub const RSI: Field = Field::number("RSI", "Relative Strength Index (14)").per_interval();
    /// MACD level
    pub const MACD_LEVEL: Field = Field::number("MACD.macd", "MACD Level (12, 26)").per_interval();
    /// MACD signal
    pub const MACD_SIGNAL: Field =
        Field::number("MACD.signal", "MACD Signal (12, 26)").per_interval();
    /// Stochastic %K
    pub const STOCH_K: Field = Field::number("Stoch.K", "Stochastic %K (14, 3, 3)").per_interval();
    /// ADX (14)
    pub const ADX: Field = Field::number("ADX", "Average Directional Index (14)").per_interval();
    /// ATR (14)
    pub const ATR: Field = Field::number("ATR", "Average True Range (14)").per_interval();
    /// EMA (20)
    pub const EMA_20: Field = Field::number("EMA20", "Exponential Moving Average (20)").per_interval();
    /// SMA (50)
    pub const SMA_50: Field = Field::number("SMA50", "Simple Moving Average (50)").per_interval();
    /// SMA (200)
    pub const SMA_200: Field = Field::number("SMA200", "Simple Moving Average (200)").per_interval();
    /// Summary technical rating
    pub const TECHNICAL_RATING: Field = Field::number("Recommend.All", "Technical Rating").per_interval();
    /// Moving averages rating
    pub const MA_RATING: Field = Field::number("Recommend.MA", "Moving Averages Rating").per_interval();
    /// Oscillators rating
    pub const OSCILLATORS_RATING: Field =
        Field::number("Recommend.Other", "Oscillators Rating").per_interval();
}

/// Fields of the forex screener.
pub struct ForexField;

impl ForexField {
    /// Pair without exchange prefix
    pub const NAME: Field = StockField::NAME;
    /// Pair description
    pub const DESCRIPTION: Field = StockField::DESCRIPTION;
    /// Region of the pair
    pub const REGION: Field = Field::enumerated("region", "Region", Dimension::Region);
    /// Base currency
    pub const BASE_CURRENCY: Field = Field::text("base_currency", "Base Currency");
    /// Quote currency
    pub const QUOTE_CURRENCY: Field = Field::text("currency", "Quote Currency");
    /// Quote source
    pub const EXCHANGE: Field = Field::text("exchange", "Exchange");

    /// Last price
    pub const PRICE: Field = StockField::PRICE;
    /// Change in percent
    pub const CHANGE_PERCENT: Field = StockField::CHANGE_PERCENT;
    /// Absolute change
    pub const CHANGE: Field = StockField::CHANGE;
    /// Bid
    pub const BID: Field = Field::number("bid", "Bid");
    /// Ask
    pub const ASK: Field = Field::number("ask", "Ask");
    /// Open
    pub const OPEN: Field = StockField::OPEN;
    /// High
    pub const HIGH: Field = StockField::HIGH;
    /// Low
    pub const LOW: Field = StockField::LOW;
    /// 52-week high
    pub const HIGH_52W: Field = StockField::HIGH_52W;
    /// 52-week low
    pub const LOW_52W: Field = StockField::LOW_52W;
    /// One-week performance
    pub const PERF_WEEK: Field = StockField::PERF_WEEK;
    /// One-month performance
    pub const PERF_MONTH: Field = StockField::PERF_MONTH;
    /// One-year performance
    pub const PERF_YEAR: Field = StockField::PERF_YEAR;
    /// Year-to-date performance
    pub const PERF_YTD: Field = StockField::PERF_YTD;
    /// Daily volatility
    pub const VOLATILITY_DAY: Field = StockField::VOLATILITY_DAY;
    /// RSI (14)
    pub const RSI: Field = StockField::RSI;
    /// MACD level
    pub const MACD_LEVEL: Field = StockField::MACD_LEVEL;
    /// MACD signal
    pub const MACD_SIGNAL: Field = StockField::MACD_SIGNAL;
    /// Stochastic %K
    pub const STOCH_K: Field = StockField::STOCH_K;
    /// ADX (14)
    pub const ADX: Field = StockField::ADX;
    /// ATR (14)
    pub const ATR: Field = StockField::ATR;
    /// EMA (20)
    pub const EMA_20: Field = StockField::EMA_20;
    /// SMA (50)
    pub const SMA_50: Field = StockField::SMA_50;
    /// SMA (200)
    pub const SMA_200: Field = StockField::SMA_200;
    /// Summary technical rating
    pub const TECHNICAL_RATING: Field = StockField::TECHNICAL_RATING;
    /// Moving averages rating
    pub const MA_RATING: Field = StockField::MA_RATING;
    /// Oscillators rating
    pub const OSCILLATORS_RATING: Field = StockField::OSCILLATORS_RATING;
}

/// Filter-only fields, valid for every instrument class and never projected.
pub struct ExtraFilter;

impl ExtraFilter {
    /// Primary listing of the instrument
    pub const PRIMARY: Field = Field::boolean("is_primary", "Primary Listing");
    /// Traded during the current session
    pub const CURRENT_TRADING_DAY: Field = Field::boolean("active_symbol", "Current Trading Day");
    /// Substring search over name and description
    pub const SEARCH: Field =
        Field::text("name,description", "Search").with_operators(&[FilterOperator::Match]);
    /// Market restriction, sent as the request-level `markets` list
    pub const MARKET: Field = Field::enumerated("markets", "Market", Dimension::Market)
        .with_operators(&[FilterOperator::Equal, FilterOperator::InRange])
        .placed(Placement::Markets);
}

static STOCK_FIELDS: &[Field] = &[
    StockField::NAME,
    StockField::DESCRIPTION,
    StockField::TYPE,
    StockField::SUBTYPE,
    StockField::TYPESPECS,
    StockField::EXCHANGE,
    StockField::COUNTRY,
    StockField::SUBMARKET,
    StockField::SECTOR,
    StockField::INDUSTRY,
    StockField::CURRENCY,
    StockField::PRICE,
    StockField::CHANGE_PERCENT,
    StockField::CHANGE,
    StockField::OPEN,
    StockField::HIGH,
    StockField::LOW,
    StockField::VOLUME,
    StockField::RELATIVE_VOLUME,
    StockField::AVERAGE_VOLUME_10D,
    StockField::MARKET_CAPITALIZATION,
    StockField::PRICE_TO_EARNINGS,
    StockField::EPS_TTM,
    StockField::DIVIDEND_YIELD,
    StockField::BETA_1Y,
    StockField::EMPLOYEES,
    StockField::TOTAL_REVENUE,
    StockField::GROSS_MARGIN,
    StockField::HIGH_52W,
    StockField::LOW_52W,
    StockField::PERF_WEEK,
    StockField::PERF_MONTH,
    StockField::PERF_YEAR,
    StockField::PERF_YTD,
    StockField::VOLATILITY_DAY,
    StockField::RSI,
    StockField::MACD_LEVEL,
    StockField::MACD_SIGNAL,
    StockField::STOCH_K,
    StockField::ADX,
    StockField::ATR,
    StockField::EMA_20,
    StockField::SMA_50,
    StockField::SMA_200,
    StockField::TECHNICAL_RATING,
    StockField::MA_RATING,
    StockField::OSCILLATORS_RATING,
];

static FOREX_FIELDS: &[Field] = &[
    ForexField::NAME,
    ForexField::DESCRIPTION,
    ForexField::REGION,
    ForexField::BASE_CURRENCY,
    ForexField::QUOTE_CURRENCY,
    ForexField::EXCHANGE,
    ForexField::PRICE,
    ForexField::CHANGE_PERCENT,
    ForexField::CHANGE,
    ForexField::BID,
    ForexField::ASK,
    ForexField::OPEN,
    ForexField::HIGH,
    ForexField::LOW,
    ForexField::HIGH_52W,
    ForexField::LOW_52W,
    ForexField::PERF_WEEK,
    ForexField::PERF_MONTH,
    ForexField::PERF_YEAR,
    ForexField::PERF_YTD,
    ForexField::VOLATILITY_DAY,
    ForexField::RSI,
    ForexField::MACD_LEVEL,
    ForexField::MACD_SIGNAL,
    ForexField::STOCH_K,
    ForexField::ADX,
    ForexField::ATR,
    ForexField::EMA_20,
    ForexField::SMA_50,
    ForexField::SMA_200,
    ForexField::TECHNICAL_RATING,
    ForexField::MA_RATING,
    ForexField::OSCILLATORS_RATING,
];

static EXTRA_FILTERS: &[Field] = &[
    ExtraFilter::PRIMARY,
    ExtraFilter::CURRENT_TRADING_DAY,
    ExtraFilter::SEARCH,
    ExtraFilter::MARKET,
];

/// Ordered field catalog of an instrument class.
pub fn fields_for(class: InstrumentClass) -> &'static [Field] {
    match class {
        InstrumentClass::Stock => STOCK_FIELDS,
        InstrumentClass::Forex => FOREX_FIELDS,
    }
}

/// Filter-only fields shared by every class.
pub fn extra_filters() -> &'static [Field] {
    EXTRA_FILTERS
}

/// Resolve a field of `class` (or an extra filter) by wire key.
///
/// # Errors
///
/// Returns [`Error::UnknownField`] if no such field exists for the class.
pub fn lookup(class: InstrumentClass, key: &str) -> Result<&'static Field> {
    fields_for(class)
        .iter()
        .chain(EXTRA_FILTERS)
        .find(|field| field.key == key)
        .ok_or_else(|| Error::UnknownField {
            class,
            key: key.to_string(),
        })
}

/// Returns `true` if `field` belongs to the catalog of `class`.
pub(crate) fn is_registered(class: InstrumentClass, field: &Field) -> bool {
    lookup(class, field.key).map_or(false, |known| known == field)
}
