//! Result table projection.
//!
//! A [`ResultTable`] owns the cells of one scan, one row per instrument and
//! one column per projected field, with the symbol first. The column layout
//! is a view over that buffer: switching it relabels and filters columns
//! without touching the cells or re-fetching anything.
//!
//! # Example
//!
//! ```
//! use tvscreener::models::{ResultRow, ResultTable, ScanResponse, StockField};
//!
//! let projection = [StockField::NAME, StockField::DESCRIPTION, StockField::PRICE];
//! let response = ScanResponse {
//!     total_count: 1,
//!     data: vec![ResultRow::new(
//!         "NASDAQ:AAPL",
//!         vec!["AAPL".into(), "Apple Inc.".into(), 189.5.into()],
//!     )],
//! };
//!
//! let mut table = ResultTable::project(response, &projection).unwrap();
//! assert_eq!(table.columns()[0], "Symbol");
//!
//! table.set_technical_columns(false);
//! assert_eq!(table.columns()[1], ("name", "Name"));
//!
//! table.set_technical_columns(true);
//! assert_eq!(table.columns()[3], "close");
//! ```

use serde_json::Value;
use std::fmt;
use std::ops::Range;

use super::field::Field;
use super::primitives::Symbol;
use super::response::ScanResponse;
use crate::{Error, Result};

/// Number of identity columns (symbol, name, description) leading every table.
const IDENTITY_COLUMNS: usize = 3;

/// Typed cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No value
    #[default]
    Null,
    /// Text
    Text(String),
    /// Number
    Number(f64),
    /// Boolean
    Bool(bool),
    /// Multi-valued field
    List(Vec<Cell>),
}

impl Cell {
    /// Text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this is a number cell.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean cell.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` for [`Cell::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Returns `true` if this is a text cell containing `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.as_str().map_or(false, |s| s.contains(needle))
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Cell::Null, Cell::Number),
            Value::String(s) => Cell::Text(s),
            Value::Array(items) => Cell::List(items.into_iter().map(Cell::from).collect()),
            // Nested objects are not part of the scan protocol; keep them as text.
            other @ Value::Object(_) => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

/// Column label under the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnLabel {
    /// Single-level label
    Flat(&'static str),
    /// Two-level label: (wire key, display name)
    Pair(&'static str, &'static str),
}

impl PartialEq<&str> for ColumnLabel {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, ColumnLabel::Flat(label) if label == other)
    }
}

impl PartialEq<(&str, &str)> for ColumnLabel {
    fn eq(&self, other: &(&str, &str)) -> bool {
        matches!(self, ColumnLabel::Pair(key, label) if (*key, *label) == *other)
    }
}

impl fmt::Display for ColumnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnLabel::Flat(label) => f.write_str(label),
            ColumnLabel::Pair(key, label) => write!(f, "({}, {})", key, label),
        }
    }
}

/// Column presentation of a [`ResultTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnLayout {
    /// Flat display names
    #[default]
    Display,
    /// Technical presentation
    Technical {
        /// Keep only technical fields (plus the identity columns) and label
        /// columns by wire key; otherwise label every column by
        /// (wire key, display name)
        only: bool,
    },
}

impl ColumnLayout {
    fn label(&self, field: &Field) -> ColumnLabel {
        match self {
            ColumnLayout::Display => ColumnLabel::Flat(field.label()),
            ColumnLayout::Technical { only: false } => ColumnLabel::Pair(field.key(), field.label()),
            ColumnLayout::Technical { only: true } => ColumnLabel::Flat(field.key()),
        }
    }

    fn shows(&self, position: usize, field: &Field) -> bool {
        match self {
            ColumnLayout::Technical { only: true } => {
                position < IDENTITY_COLUMNS || field.is_technical()
            }
            _ => true,
        }
    }
}

/// Materialized scan result.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    fields: Vec<Field>,
    rows: Vec<Vec<Cell>>,
    total_count: usize,
    layout: ColumnLayout,
}

impl ResultTable {
    /// Map a scan response onto the projection it was requested with.
    ///
    /// `projection` must start with the name and description fields, as
    /// produced by the request builder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] if a row's value count differs
    /// from the projection length.
    pub fn project(response: ScanResponse, projection: &[Field]) -> Result<Self> {
        let mut fields = Vec::with_capacity(projection.len() + 1);
        fields.push(Field::SYMBOL);
        fields.extend_from_slice(projection);

        let rows = response
            .data
            .into_iter()
            .map(|row| {
                if row.values.len() != projection.len() {
                    return Err(Error::InvalidResponse(format!(
                        "row {} has {} values, expected {}",
                        row.symbol,
                        row.values.len(),
                        projection.len()
                    )));
                }
                let mut cells = Vec::with_capacity(fields.len());
                cells.push(Cell::Text(row.symbol));
                cells.extend(row.values.into_iter().map(Cell::from));
                Ok(cells)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fields,
            rows,
            total_count: response.total_count,
            layout: ColumnLayout::Display,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the scan matched nothing in the requested range.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row index: always the plain range `0..len()`, in every layout.
    pub fn index(&self) -> Range<usize> {
        0..self.rows.len()
    }

    /// Number of matches reported by the backend across all pages.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Current layout.
    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Switch layout. Cells are untouched.
    pub fn set_layout(&mut self, layout: ColumnLayout) {
        self.layout = layout;
    }

    /// Switch to the technical layout; `only` drops descriptive columns.
    pub fn set_technical_columns(&mut self, only: bool) {
        self.set_layout(ColumnLayout::Technical { only });
    }

    /// Switch back to flat display labels.
    pub fn set_display_columns(&mut self) {
        self.set_layout(ColumnLayout::Display);
    }

    fn visible(&self) -> impl Iterator<Item = (usize, &Field)> + '_ {
        let layout = self.layout;
        self.fields
            .iter()
            .enumerate()
            .filter(move |(position, field)| layout.shows(*position, field))
    }

    /// Column labels, in order.
    pub fn columns(&self) -> Vec<ColumnLabel> {
        self.visible()
            .map(|(_, field)| self.layout.label(field))
            .collect()
    }

    /// Field descriptors of the visible columns, in order.
    pub fn fields(&self) -> Vec<&Field> {
        self.visible().map(|(_, field)| field).collect()
    }

    fn position(&self, wanted: impl Fn(ColumnLabel) -> bool) -> Option<usize> {
        self.visible()
            .find(|(_, field)| wanted(self.layout.label(field)))
            .map(|(position, _)| position)
    }

    fn cells_at(&self, position: usize) -> Vec<&Cell> {
        self.rows.iter().map(|row| &row[position]).collect()
    }

    /// Cells of the first column with a flat `label`.
    pub fn column(&self, label: &str) -> Option<Vec<&Cell>> {
        self.position(|l| l == label).map(|p| self.cells_at(p))
    }

    /// Cells of the first column labelled `(key, label)`.
    pub fn column_pair(&self, key: &str, label: &str) -> Option<Vec<&Cell>> {
        self.position(|l| l == (key, label)).map(|p| self.cells_at(p))
    }

    /// Visible cells of row `index`.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        let row = self.rows.get(index)?;
        Some(self.visible().map(|(position, _)| &row[position]).collect())
    }

    /// Iterate over the visible cells of every row.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        self.index().filter_map(move |i| self.row(i))
    }

    /// Symbols of every row, whatever the layout.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.rows
            .iter()
            .filter_map(|row| row[0].as_str().map(Symbol::from))
            .collect()
    }

    /// Cell at `index` in the first column with a flat `label`.
    pub fn cell(&self, index: usize, label: &str) -> Option<&Cell> {
        let position = self.position(|l| l == label)?;
        self.rows.get(index).map(|row| &row[position])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultRow, StockField};
    use serde_json::json;

    fn table() -> ResultTable {
        let projection = [
            StockField::NAME,
            StockField::DESCRIPTION,
            StockField::COUNTRY,
            StockField::PRICE,
            StockField::RSI,
        ];
        let response = ScanResponse {
            total_count: 5000,
            data: vec![
                ResultRow::new(
                    "NASDAQ:AAPL",
                    vec![json!("AAPL"), json!("Apple Inc."), json!("United States"), json!(189.5), json!(55.1)],
                ),
                ResultRow::new(
                    "NYSE:YPF",
                    vec![json!("YPF"), json!("YPF S.A."), json!("Argentina"), json!(21), Value::Null],
                ),
            ],
        };
        ResultTable::project(response, &projection).unwrap()
    }

    #[test]
    fn test_display_layout() {
        let table = table();
        assert_eq!(table.columns(), [
            ColumnLabel::Flat("Symbol"),
            ColumnLabel::Flat("Name"),
            ColumnLabel::Flat("Description"),
            ColumnLabel::Flat("Country"),
            ColumnLabel::Flat("Price"),
            ColumnLabel::Flat("Relative Strength Index (14)"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_count(), 5000);
        assert_eq!(table.cell(1, "Symbol").unwrap().as_str(), Some("NYSE:YPF"));
        assert_eq!(table.cell(1, "Price").unwrap().as_f64(), Some(21.0));
        assert!(table.cell(1, "Relative Strength Index (14)").unwrap().is_null());
        assert_eq!(table.symbols()[0].ticker(), "AAPL");
    }

    #[test]
    fn test_two_level_layout_keeps_every_column() {
        let mut table = table();
        table.set_technical_columns(false);

        let columns = table.columns();
        assert_eq!(columns.len(), 6);
        assert_eq!(columns[0], ("symbol", "Symbol"));
        assert_eq!(columns[3], ("country", "Country"));
        assert!(table.column("Symbol").is_none());
        assert_eq!(table.column_pair("name", "Name").unwrap()[0].as_str(), Some("AAPL"));
        assert_eq!(table.index(), 0..2);
    }

    #[test]
    fn test_technical_only_layout() {
        let mut table = table();
        table.set_technical_columns(true);

        assert_eq!(table.columns(), [
            ColumnLabel::Flat("symbol"),
            ColumnLabel::Flat("name"),
            ColumnLabel::Flat("description"),
            ColumnLabel::Flat("close"),
            ColumnLabel::Flat("RSI"),
        ]);
        assert_eq!(table.row(0).unwrap().len(), 5);
        assert!(table.column("country").is_none());
    }

    #[test]
    fn test_layout_toggle_is_lossless() {
        let original = table();
        let mut toggled = original.clone();
        toggled.set_technical_columns(false);
        toggled.set_technical_columns(true);
        toggled.set_display_columns();
        assert_eq!(toggled, original);
    }

    #[test]
    fn test_misaligned_row_rejected() {
        let response = ScanResponse {
            total_count: 1,
            data: vec![ResultRow::new("NASDAQ:AAPL", vec![json!("AAPL")])],
        };
        let err = ResultTable::project(response, &[StockField::NAME, StockField::DESCRIPTION])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(Cell::from(json!(["common", "etf"])).to_string(), "common,etf");
        assert_eq!(Cell::from(json!(true)).as_bool(), Some(true));
        assert!(Cell::from(json!("NASDAQ:AAPL")).contains("AA"));
    }
}
