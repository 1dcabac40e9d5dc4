//! Screener configuration and the request builder.
//!
//! [`ScreenerConfiguration`] accumulates filters and scope selectors;
//! [`ScreenerConfiguration::build`] validates them and produces the
//! [`RequestEnvelope`] that is POSTed to the scan endpoint.
//!
//! Clauses on the same field are OR'd, clauses on different fields are
//! AND'd. Fields constrained once go to the flat `filter` list; fields
//! constrained several times become an OR group inside `filter2`.

use serde::Serialize;

use super::classification::{Country, Exchange, Market, SubMarket, SymbolType};
use super::enums::{FilterOperator, InstrumentClass, SortOrder, TimeInterval};
use super::field::{fields_for, is_registered, ExtraFilter, Field, Placement, StockField};
use super::filter::{Clause, Filter, FilterValue};
use crate::{Error, Result};

/// Default `[from, to)` row range of a scan.
pub const DEFAULT_RANGE: (u32, u32) = (0, 150);

/// Boolean connective of a [`FilterTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conjunction {
    /// All operands must hold
    And,
    /// Any operand must hold
    Or,
}

/// Operand of a [`FilterTree`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operand {
    /// A single clause
    Expression(Clause),
    /// A nested group
    Operation(FilterTree),
}

/// Nested filter expression sent as `filter2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterTree {
    /// Connective
    pub operator: Conjunction,
    /// Operands, in insertion order
    pub operands: Vec<Operand>,
}

impl FilterTree {
    fn and(operands: Vec<Operand>) -> Self {
        Self {
            operator: Conjunction::And,
            operands,
        }
    }

    fn or(operands: Vec<Operand>) -> Self {
        Self {
            operator: Conjunction::Or,
            operands,
        }
    }
}

/// `sort` request parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    /// Column to sort by
    pub sort_by: String,
    /// Direction
    pub sort_order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct RequestOptions {
    lang: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
struct SymbolsQuery {
    query: TypesQuery,
    tickers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
struct TypesQuery {
    types: Vec<String>,
}

/// Serialized snapshot of a configuration, rebuilt for every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    #[serde(skip)]
    class: InstrumentClass,
    #[serde(skip)]
    interval: TimeInterval,
    #[serde(skip)]
    projection: Vec<Field>,
    filter: Vec<Clause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter2: Option<FilterTree>,
    options: RequestOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    markets: Vec<Market>,
    symbols: SymbolsQuery,
    columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<Sort>,
    range: [u32; 2],
}

impl RequestEnvelope {
    /// Instrument class the request targets.
    pub fn class(&self) -> InstrumentClass {
        self.class
    }

    /// Interval technical columns are computed for.
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// Field descriptors aligned with [`columns`](Self::columns).
    pub fn projection(&self) -> &[Field] {
        &self.projection
    }

    /// Requested column names, interval suffix included.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Flat AND'd clauses.
    pub fn clauses(&self) -> &[Clause] {
        &self.filter
    }

    /// OR groups, AND'd with each other and with [`clauses`](Self::clauses).
    pub fn filter_tree(&self) -> Option<&FilterTree> {
        self.filter2.as_ref()
    }

    /// Markets restriction.
    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    /// Sort parameter.
    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// `[from, to)` row range.
    pub fn range(&self) -> (u32, u32) {
        (self.range[0], self.range[1])
    }

    /// Human-readable JSON of the request body.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Filters and scope selectors of one screener.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenerConfiguration {
    pub(crate) filters: Vec<Filter>,
    pub(crate) symbol_types: Vec<SymbolType>,
    pub(crate) markets: Option<Vec<Market>>,
    pub(crate) countries: Vec<Country>,
    pub(crate) exchanges: Vec<Exchange>,
    pub(crate) submarkets: Vec<SubMarket>,
    pub(crate) search: Option<String>,
    pub(crate) columns: Option<Vec<Field>>,
    pub(crate) sort: Option<(Field, SortOrder)>,
    pub(crate) range: (u32, u32),
}

impl Default for ScreenerConfiguration {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            symbol_types: Vec::new(),
            markets: None,
            countries: Vec::new(),
            exchanges: Vec::new(),
            submarkets: Vec::new(),
            search: None,
            columns: None,
            sort: None,
            range: DEFAULT_RANGE,
        }
    }
}

impl ScreenerConfiguration {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated filters, in insertion order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Selected symbol types; empty means every type.
    pub fn symbol_types(&self) -> &[SymbolType] {
        &self.symbol_types
    }

    /// Current search text.
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Filters derived from the country, exchange, sub-market and search
    /// selectors, in that order.
    fn selector_filters(&self) -> Vec<Filter> {
        let countries = self
            .countries
            .iter()
            .map(|c| Filter::new(StockField::COUNTRY, FilterOperator::Equal, *c));
        let exchanges = self
            .exchanges
            .iter()
            .map(|e| Filter::new(StockField::EXCHANGE, FilterOperator::Equal, *e));
        let submarkets = self
            .submarkets
            .iter()
            .map(|s| Filter::new(StockField::SUBMARKET, FilterOperator::Equal, *s));
        let search = self
            .search
            .iter()
            .map(|text| Filter::new(ExtraFilter::SEARCH, FilterOperator::Match, text.as_str()));

        countries.chain(exchanges).chain(submarkets).chain(search).collect()
    }

    /// Validate everything and serialize the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRequest`] for the first filter that fails
    /// validation, [`Error::UnknownField`] for a field outside the class's
    /// catalog and [`Error::InvalidInput`] for an empty row range.
    pub fn build(&self, class: InstrumentClass, interval: TimeInterval) -> Result<RequestEnvelope> {
        let selector_filters = self.selector_filters();

        let mut lifted_markets: Vec<Market> = Vec::new();
        let mut groups: Vec<(&'static str, Vec<Clause>)> = Vec::new();

        for filter in self.filters.iter().chain(&selector_filters) {
            filter.validate()?;
            ensure_registered(class, filter.field())?;

            match filter.field().placement() {
                Placement::Markets => collect_markets(filter.value(), &mut lifted_markets)?,
                Placement::Clause => {
                    let key = filter.field().key();
                    match groups.iter_mut().find(|(k, _)| *k == key) {
                        Some((_, clauses)) => clauses.push(filter.clause()),
                        None => groups.push((key, vec![filter.clause()])),
                    }
                }
            }
        }

        let mut flat = Vec::new();
        let mut operands = Vec::new();
        for (_, mut clauses) in groups {
            if clauses.len() == 1 {
                flat.append(&mut clauses);
            } else {
                let alternatives = clauses.into_iter().map(Operand::Expression).collect();
                operands.push(Operand::Operation(FilterTree::or(alternatives)));
            }
        }
        if let Some(types) = self.symbol_types_group(class)? {
            operands.push(Operand::Operation(types));
        }
        let filter2 = (!operands.is_empty()).then(|| FilterTree::and(operands));

        let markets = match (&self.markets, lifted_markets.is_empty()) {
            (None, true) => default_markets(class),
            (explicit, _) => {
                let mut markets = explicit.clone().unwrap_or_default();
                for market in lifted_markets {
                    push_unique(&mut markets, market);
                }
                markets
            }
        };

        let projection = self.projection(class)?;
        let columns = projection
            .iter()
            .map(|field| field.column(interval).into_owned())
            .collect();

        let (sort_field, sort_order) = self.sort.unwrap_or_else(|| default_sort(class));
        ensure_registered(class, &sort_field)?;
        let sort = Sort {
            sort_by: sort_field.column(interval).into_owned(),
            sort_order,
        };

        let (from, to) = self.range;
        if from >= to {
            return Err(Error::InvalidInput(format!(
                "empty row range [{}, {})",
                from, to
            )));
        }

        Ok(RequestEnvelope {
            class,
            interval,
            projection,
            filter: flat,
            filter2,
            options: RequestOptions { lang: "en" },
            markets,
            symbols: SymbolsQuery::default(),
            columns,
            sort: Some(sort),
            range: [from, to],
        })
    }

    /// `name`, `description`, then the selected (or all) fields, each once.
    fn projection(&self, class: InstrumentClass) -> Result<Vec<Field>> {
        let catalog = fields_for(class);
        let selected = self.columns.as_deref().unwrap_or(catalog);

        let mut projection = vec![StockField::NAME, StockField::DESCRIPTION];
        for field in selected {
            if !catalog.contains(field) {
                return Err(Error::UnknownField {
                    class,
                    key: field.key().to_string(),
                });
            }
            if !projection.iter().any(|known| known.key() == field.key()) {
                projection.push(*field);
            }
        }
        Ok(projection)
    }

    fn symbol_types_group(&self, class: InstrumentClass) -> Result<Option<FilterTree>> {
        let mut types: Vec<SymbolType> = Vec::new();
        for symbol_type in &self.symbol_types {
            push_unique(&mut types, *symbol_type);
        }
        if types.is_empty() {
            return Ok(None);
        }
        ensure_registered(class, &StockField::TYPE)?;
        ensure_registered(class, &StockField::TYPESPECS)?;

        let alternatives = types
            .iter()
            .map(|symbol_type| {
                let kind = Filter::new(StockField::TYPE, FilterOperator::Equal, symbol_type.kind());
                match symbol_type.typespec() {
                    Some(spec) => {
                        let spec = Filter::new(StockField::TYPESPECS, FilterOperator::Has, vec![spec]);
                        Operand::Operation(FilterTree::and(vec![
                            Operand::Expression(kind.clause()),
                            Operand::Expression(spec.clause()),
                        ]))
                    }
                    None => Operand::Expression(kind.clause()),
                }
            })
            .collect();
        Ok(Some(FilterTree::or(alternatives)))
    }
}

fn ensure_registered(class: InstrumentClass, field: &Field) -> Result<()> {
    if is_registered(class, field) {
        Ok(())
    } else {
        Err(Error::UnknownField {
            class,
            key: field.key().to_string(),
        })
    }
}

fn collect_markets(value: &FilterValue, markets: &mut Vec<Market>) -> Result<()> {
    match value {
        FilterValue::Enum(e) => push_unique(markets, e.as_str().parse()?),
        FilterValue::List(items) => {
            for item in items {
                collect_markets(item, markets)?;
            }
        }
        other => return Err(Error::InvalidInput(format!("{} is not a market", other))),
    }
    Ok(())
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

fn default_markets(class: InstrumentClass) -> Vec<Market> {
    match class {
        InstrumentClass::Stock => vec![Market::America],
        InstrumentClass::Forex => Vec::new(),
    }
}

fn default_sort(class: InstrumentClass) -> (Field, SortOrder) {
    match class {
        InstrumentClass::Stock => (StockField::MARKET_CAPITALIZATION, SortOrder::Desc),
        InstrumentClass::Forex => (StockField::NAME, SortOrder::Asc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForexField;
    use serde_json::json;

    fn build(config: &ScreenerConfiguration) -> RequestEnvelope {
        config
            .build(InstrumentClass::Stock, TimeInterval::OneDay)
            .expect("valid configuration")
    }

    #[test]
    fn test_default_stock_request() {
        let envelope = build(&ScreenerConfiguration::new());
        let body = serde_json::to_value(&envelope).unwrap();

        assert_eq!(body["filter"], json!([]));
        assert!(body.get("filter2").is_none());
        assert_eq!(body["markets"], json!(["america"]));
        assert_eq!(body["range"], json!([0, 150]));
        assert_eq!(body["sort"], json!({"sortBy": "market_cap_basic", "sortOrder": "desc"}));
        assert_eq!(&envelope.columns()[..2], ["name", "description"]);
        assert_eq!(envelope.columns().len(), fields_for(InstrumentClass::Stock).len());
    }

    #[test]
    fn test_same_field_filters_become_or_group() {
        let mut config = ScreenerConfiguration::new();
        config.filters.push(Filter::new(StockField::COUNTRY, FilterOperator::Equal, Country::Argentina));
        config.filters.push(Filter::new(StockField::PRICE, FilterOperator::Above, 5));
        config.filters.push(Filter::new(StockField::COUNTRY, FilterOperator::Equal, Country::Bermuda));

        let body = serde_json::to_value(build(&config)).unwrap();
        assert_eq!(
            body["filter"],
            json!([{"left": "close", "operation": "greater", "right": 5}])
        );
        assert_eq!(
            body["filter2"],
            json!({
                "operator": "and",
                "operands": [{
                    "operation": {
                        "operator": "or",
                        "operands": [
                            {"expression": {"left": "country", "operation": "equal", "right": "Argentina"}},
                            {"expression": {"left": "country", "operation": "equal", "right": "Bermuda"}}
                        ]
                    }
                }]
            })
        );
    }

    #[test]
    fn test_first_invalid_filter_aborts_build() {
        let mut config = ScreenerConfiguration::new();
        config.filters.push(Filter::new(StockField::PRICE, FilterOperator::Above, 5));
        config.filters.push(Filter::new(StockField::TYPE, FilterOperator::AboveOrEqual, "test"));

        let err = config
            .build(InstrumentClass::Stock, TimeInterval::OneDay)
            .unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_columns_deduplicated_in_first_requested_order() {
        let mut config = ScreenerConfiguration::new();
        config.columns = Some(vec![
            StockField::RSI,
            StockField::NAME,
            StockField::PRICE,
            StockField::RSI,
        ]);

        let envelope = config
            .build(InstrumentClass::Stock, TimeInterval::FourHours)
            .unwrap();
        assert_eq!(envelope.columns(), ["name", "description", "RSI|240", "close|240"]);
        assert_eq!(envelope.projection()[2], StockField::RSI);
    }

    #[test]
    fn test_market_filter_matches_market_selector() {
        let mut by_selector = ScreenerConfiguration::new();
        by_selector.markets = Some(vec![Market::Argentina]);

        let mut by_filter = ScreenerConfiguration::new();
        by_filter
            .filters
            .push(Filter::new(ExtraFilter::MARKET, FilterOperator::Equal, Market::Argentina));

        let a = serde_json::to_value(build(&by_selector)).unwrap();
        let b = serde_json::to_value(build(&by_filter)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["markets"], json!(["argentina"]));
    }

    #[test]
    fn test_symbol_types_group() {
        let mut config = ScreenerConfiguration::new();
        config.symbol_types = vec![SymbolType::CommonStock, SymbolType::DepositaryReceipt, SymbolType::CommonStock];

        let body = serde_json::to_value(build(&config)).unwrap();
        let types = &body["filter2"]["operands"][0]["operation"];
        assert_eq!(types["operator"], json!("or"));
        assert_eq!(types["operands"].as_array().unwrap().len(), 2);
        assert_eq!(
            types["operands"][0]["operation"]["operands"][1]["expression"],
            json!({"left": "typespecs", "operation": "has", "right": ["common"]})
        );
        assert_eq!(
            types["operands"][1]["expression"],
            json!({"left": "type", "operation": "equal", "right": "dr"})
        );
    }

    #[test]
    fn test_search_clause() {
        let mut config = ScreenerConfiguration::new();
        config.search = Some("AA".to_string());

        let envelope = build(&config);
        assert_eq!(
            serde_json::to_value(envelope.clauses()).unwrap(),
            json!([{"left": "name,description", "operation": "match", "right": "AA"}])
        );
    }

    #[test]
    fn test_forex_defaults() {
        let envelope = ScreenerConfiguration::new()
            .build(InstrumentClass::Forex, TimeInterval::OneDay)
            .unwrap();
        assert!(envelope.markets().is_empty());
        assert_eq!(envelope.sort().unwrap().sort_by, "name");
        assert!(envelope.projection().contains(&ForexField::REGION));
    }

    #[test]
    fn test_stock_field_rejected_on_forex() {
        let mut config = ScreenerConfiguration::new();
        config.countries = vec![Country::Argentina];

        let err = config
            .build(InstrumentClass::Forex, TimeInterval::OneDay)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref key, .. } if key == "country"));
    }

    #[test]
    fn test_symbol_types_rejected_on_forex() {
        let mut config = ScreenerConfiguration::new();
        config.symbol_types = vec![SymbolType::CommonStock];

        let err = config
            .build(InstrumentClass::Forex, TimeInterval::OneDay)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownField { ref key, .. } if key == "type"));
    }

    #[test]
    fn test_empty_range_rejected() {
        let mut config = ScreenerConfiguration::new();
        config.range = (10, 10);
        assert!(matches!(
            config.build(InstrumentClass::Stock, TimeInterval::OneDay),
            Err(Error::InvalidInput(_))
        ));
    }
}
