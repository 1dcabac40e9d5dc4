//! Enumeration types for the screener API.
//!
//! This module contains the enums shared by the field registry, the filter
//! model and the request builder: instrument classes, value kinds, filter
//! operators, time intervals and sort order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class of instrument a screener scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentClass {
    /// Stocks, funds and depositary receipts
    #[default]
    Stock,
    /// Currency pairs
    Forex,
}

impl InstrumentClass {
    /// Path segment of the scan endpoint (`/{scope}/scan`).
    pub fn scope(&self) -> &'static str {
        match self {
            InstrumentClass::Stock => "global",
            InstrumentClass::Forex => "forex",
        }
    }
}

impl fmt::Display for InstrumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentClass::Stock => write!(f, "stock"),
            InstrumentClass::Forex => write!(f, "forex"),
        }
    }
}

/// Runtime type of a field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free text
    Text,
    /// Integer or floating point number
    Number,
    /// true / false
    Boolean,
    /// One constant of a closed classification set
    Enumerated,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => write!(f, "text"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Enumerated => write!(f, "enumerated"),
        }
    }
}

/// Whether a field is a computed value or describes the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCategory {
    /// Price, indicator or fundamental value
    Technical,
    /// Identity or classification value
    Descriptive,
}

/// Comparison applied by a filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOperator {
    /// Value equals the right-hand side
    #[serde(rename = "equal")]
    Equal,
    /// Value differs from the right-hand side
    #[serde(rename = "nequal")]
    NotEqual,
    /// Strictly greater than
    #[serde(rename = "greater")]
    Above,
    /// Strictly less than
    #[serde(rename = "less")]
    Below,
    /// Greater than or equal
    #[serde(rename = "egreater")]
    AboveOrEqual,
    /// Less than or equal
    #[serde(rename = "eless")]
    BelowOrEqual,
    /// Inside a numeric range, or one of a list of values
    #[serde(rename = "in_range")]
    InRange,
    /// Outside a numeric range, or none of a list of values
    #[serde(rename = "not_in_range")]
    NotInRange,
    /// Crossed the right-hand side in either direction
    #[serde(rename = "crosses")]
    Crosses,
    /// Crossed the right-hand side upwards
    #[serde(rename = "crosses_above")]
    CrossesAbove,
    /// Crossed the right-hand side downwards
    #[serde(rename = "crosses_below")]
    CrossesBelow,
    /// Substring match
    #[serde(rename = "match")]
    Match,
    /// Multi-valued field contains any of the listed values
    #[serde(rename = "has")]
    Has,
    /// Multi-valued field contains none of the listed values
    #[serde(rename = "has_none_of")]
    HasNoneOf,
}

impl FilterOperator {
    /// Operators accepted by numeric fields.
    pub const NUMERIC: &'static [FilterOperator] = &[
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::Above,
        FilterOperator::Below,
        FilterOperator::AboveOrEqual,
        FilterOperator::BelowOrEqual,
        FilterOperator::InRange,
        FilterOperator::NotInRange,
        FilterOperator::Crosses,
        FilterOperator::CrossesAbove,
        FilterOperator::CrossesBelow,
    ];

    /// Operators accepted by free-text fields.
    pub const TEXT: &'static [FilterOperator] = &[
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::InRange,
        FilterOperator::NotInRange,
        FilterOperator::Match,
    ];

    /// Operators accepted by boolean fields.
    pub const BOOLEAN: &'static [FilterOperator] =
        &[FilterOperator::Equal, FilterOperator::NotEqual];

    /// Operators accepted by enumerated fields.
    pub const ENUMERATED: &'static [FilterOperator] = &[
        FilterOperator::Equal,
        FilterOperator::NotEqual,
        FilterOperator::InRange,
        FilterOperator::NotInRange,
    ];

    /// Operators accepted by multi-valued (array) fields.
    pub const MULTI_VALUED: &'static [FilterOperator] =
        &[FilterOperator::Has, FilterOperator::HasNoneOf];

    /// Default operator set for a value kind.
    pub fn defaults_for(kind: ValueKind) -> &'static [FilterOperator] {
        match kind {
            ValueKind::Text => Self::TEXT,
            ValueKind::Number => Self::NUMERIC,
            ValueKind::Boolean => Self::BOOLEAN,
            ValueKind::Enumerated => Self::ENUMERATED,
        }
    }

    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "equal",
            FilterOperator::NotEqual => "nequal",
            FilterOperator::Above => "greater",
            FilterOperator::Below => "less",
            FilterOperator::AboveOrEqual => "egreater",
            FilterOperator::BelowOrEqual => "eless",
            FilterOperator::InRange => "in_range",
            FilterOperator::NotInRange => "not_in_range",
            FilterOperator::Crosses => "crosses",
            FilterOperator::CrossesAbove => "crosses_above",
            FilterOperator::CrossesBelow => "crosses_below",
            FilterOperator::Match => "match",
            FilterOperator::Has => "has",
            FilterOperator::HasNoneOf => "has_none_of",
        }
    }

    /// Returns `true` if the right-hand side must be a range or a list.
    pub fn is_range(&self) -> bool {
        matches!(self, FilterOperator::InRange | FilterOperator::NotInRange)
    }

    /// Returns `true` if the right-hand side must be a list.
    pub fn is_set(&self) -> bool {
        matches!(self, FilterOperator::Has | FilterOperator::HasNoneOf)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval the backend computes technical values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeInterval {
    /// 1 minute
    OneMinute,
    /// 5 minutes
    FiveMinutes,
    /// 15 minutes
    FifteenMinutes,
    /// 30 minutes
    ThirtyMinutes,
    /// 1 hour
    OneHour,
    /// 2 hours
    TwoHours,
    /// 4 hours
    FourHours,
    /// 1 day (the backend's baseline)
    #[default]
    OneDay,
    /// 1 week
    OneWeek,
    /// 1 month
    OneMonth,
}

impl TimeInterval {
    /// Column suffix for interval-dependent fields, `None` for the baseline.
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            TimeInterval::OneMinute => Some("1"),
            TimeInterval::FiveMinutes => Some("5"),
            TimeInterval::FifteenMinutes => Some("15"),
            TimeInterval::ThirtyMinutes => Some("30"),
            TimeInterval::OneHour => Some("60"),
            TimeInterval::TwoHours => Some("120"),
            TimeInterval::FourHours => Some("240"),
            TimeInterval::OneDay => None,
            TimeInterval::OneWeek => Some("1W"),
            TimeInterval::OneMonth => Some("1M"),
        }
    }
}

/// Sort direction for the `sort` request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}
