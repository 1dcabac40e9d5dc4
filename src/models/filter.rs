//! Filter model and validation.
//!
//! A [`Filter`] is a (field, operator, value) triple. [`validate`] checks it
//! against the field's declared kind and operator set without touching the
//! network, so malformed requests fail before anything is sent.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::classification::Dimension;
use super::enums::{FilterOperator, ValueKind};
use super::field::Field;
use crate::{Error, Result};

/// Constant of a classification set, tagged with its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    dimension: Dimension,
    wire: &'static str,
}

impl EnumValue {
    pub(crate) fn new(dimension: Dimension, wire: &'static str) -> Self {
        Self { dimension, wire }
    }

    /// Classification set the value belongs to.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        self.wire
    }
}

/// Right-hand side of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Free text
    Text(String),
    /// Number
    Number(f64),
    /// Boolean
    Bool(bool),
    /// Classification constant
    Enum(EnumValue),
    /// Range bounds or a set of values
    List(Vec<FilterValue>),
}

impl FilterValue {
    /// Kind of a scalar value, `None` for lists.
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            FilterValue::Text(_) => Some(ValueKind::Text),
            FilterValue::Number(_) => Some(ValueKind::Number),
            FilterValue::Bool(_) => Some(ValueKind::Boolean),
            FilterValue::Enum(_) => Some(ValueKind::Enumerated),
            FilterValue::List(_) => None,
        }
    }

    /// JSON form sent as the clause's `right` member.
    pub fn to_wire(&self) -> Value {
        match self {
            FilterValue::Text(s) => Value::String(s.clone()),
            FilterValue::Number(n) => number_to_wire(*n),
            FilterValue::Bool(b) => Value::Bool(*b),
            FilterValue::Enum(e) => Value::String(e.wire.to_string()),
            FilterValue::List(items) => Value::Array(items.iter().map(Self::to_wire).collect()),
        }
    }

    fn describe(&self) -> String {
        match self {
            FilterValue::Enum(e) => format!("a {} value", e.dimension),
            FilterValue::List(_) => "a list".to_string(),
            scalar => match scalar.kind() {
                Some(kind) => format!("a {} value", kind),
                None => "a list".to_string(),
            },
        }
    }
}

fn number_to_wire(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Number(n)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n as f64)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(f64::from(n))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FilterValue>, const N: usize> From<[T; N]> for FilterValue {
    fn from(items: [T; N]) -> Self {
        FilterValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<FilterValue>, B: Into<FilterValue>> From<(A, B)> for FilterValue {
    fn from((low, high): (A, B)) -> Self {
        FilterValue::List(vec![low.into(), high.into()])
    }
}

/// Wire form of a filter: `{"left": .., "operation": .., "right": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    /// Field key
    pub left: String,
    /// Operator
    pub operation: FilterOperator,
    /// Value
    pub right: Value,
}

/// A (field, operator, value) constraint.
///
/// Construction does not validate; [`Filter::validate`] (called by
/// `Screener::add_filter` and by the request builder) does.
///
/// # Example
///
/// ```
/// use tvscreener::models::{Country, Filter, FilterOperator, StockField};
///
/// let filter = Filter::new(StockField::COUNTRY, FilterOperator::Equal, Country::Argentina);
/// assert!(filter.validate().is_ok());
///
/// let bad = Filter::new(StockField::TYPE, FilterOperator::AboveOrEqual, "test");
/// assert!(bad.validate().unwrap_err().is_validation_error());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    field: Field,
    operator: FilterOperator,
    value: FilterValue,
}

impl Filter {
    /// Create a filter without validating it.
    pub fn new(field: Field, operator: FilterOperator, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    /// Field being constrained.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Operator.
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Right-hand side.
    pub fn value(&self) -> &FilterValue {
        &self.value
    }

    /// Check the filter against its field's contract.
    pub fn validate(&self) -> Result<()> {
        validate(&self.field, self.operator, &self.value)
    }

    /// Wire clause for this filter.
    pub fn clause(&self) -> Clause {
        Clause {
            left: self.field.key().to_string(),
            operation: self.operator,
            right: self.value.to_wire(),
        }
    }
}

/// Validate an operator and value against a field.
///
/// # Errors
///
/// Returns [`Error::MalformedRequest`] when the operator is not allowed for
/// the field, when the value's kind differs from the field's kind, or when
/// the value's shape does not fit the operator.
pub fn validate(field: &Field, operator: FilterOperator, value: &FilterValue) -> Result<()> {
    let malformed = |reason: String| Error::MalformedRequest {
        field: field.key().to_string(),
        reason,
    };

    if !field.allows(operator) {
        let allowed = field
            .operators()
            .iter()
            .map(FilterOperator::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(malformed(format!(
            "operator `{}` is not allowed; expected one of [{}]",
            operator, allowed
        )));
    }

    if operator.is_range() && field.kind() == ValueKind::Number {
        return match value {
            FilterValue::List(bounds) => match bounds.as_slice() {
                [FilterValue::Number(low), FilterValue::Number(high)]
                    if low.is_finite() && high.is_finite() =>
                {
                    if low <= high {
                        Ok(())
                    } else {
                        Err(malformed(format!("range [{}, {}] is inverted", low, high)))
                    }
                }
                _ => Err(malformed(format!(
                    "`{}` needs two finite numbers [low, high]",
                    operator
                ))),
            },
            other => Err(malformed(format!(
                "`{}` needs [low, high], got {}",
                operator,
                other.describe()
            ))),
        };
    }

    if operator.is_range() || operator.is_set() {
        return match value {
            FilterValue::List(items) if !items.is_empty() => items
                .iter()
                .try_for_each(|item| check_scalar(field, item).map_err(malformed)),
            FilterValue::List(_) => Err(malformed(format!("`{}` needs at least one value", operator))),
            other => Err(malformed(format!(
                "`{}` needs a list of values, got {}",
                operator,
                other.describe()
            ))),
        };
    }

    check_scalar(field, value).map_err(malformed)
}

fn check_scalar(field: &Field, value: &FilterValue) -> std::result::Result<(), String> {
    let ok = match (field.kind(), value) {
        (ValueKind::Number, FilterValue::Number(n)) => {
            if !n.is_finite() {
                return Err(format!("{} is not a finite number", n));
            }
            true
        }
        (ValueKind::Text, FilterValue::Text(_)) => true,
        (ValueKind::Boolean, FilterValue::Bool(_)) => true,
        (ValueKind::Enumerated, FilterValue::Enum(e)) => Some(e.dimension()) == field.dimension(),
        _ => false,
    };

    if ok {
        return Ok(());
    }

    let expected = match field.dimension() {
        Some(dimension) => format!("a {} value", dimension),
        None => format!("a {} value", field.kind()),
    };
    Err(format!("expected {}, got {}", expected, value.describe()))
}
