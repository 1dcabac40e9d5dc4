//! Scan response models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One instrument of a scan response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Fully qualified symbol, `EXCHANGE:TICKER`
    #[serde(rename = "s")]
    pub symbol: String,
    /// Values aligned positionally with the requested columns
    #[serde(rename = "d", default)]
    pub values: Vec<Value>,
}

impl ResultRow {
    /// Create a row.
    pub fn new(symbol: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            symbol: symbol.into(),
            values,
        }
    }
}

/// Body returned by the scan endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Number of instruments matching the filters, across all pages
    #[serde(default)]
    pub total_count: usize,
    /// Rows inside the requested range
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ResultRow>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scan_response() {
        let body = serde_json::json!({
            "totalCount": 2,
            "data": [
                {"s": "NASDAQ:AAPL", "d": ["AAPL", "Apple Inc.", 189.5]},
                {"s": "NYSE:YPF", "d": ["YPF", "YPF Sociedad Anonima", null]}
            ]
        });

        let response: ScanResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.total_count, 2);
        assert_eq!(response.data[0].symbol, "NASDAQ:AAPL");
        assert_eq!(response.data[1].values[2], Value::Null);
    }

    #[test]
    fn test_missing_data_defaults_to_empty() {
        let response: ScanResponse = serde_json::from_str(r#"{"totalCount": 0}"#).unwrap();
        assert!(response.data.is_empty());

        let response: ScanResponse =
            serde_json::from_str(r#"{"totalCount": 0, "data": null}"#).unwrap();
        assert!(response.data.is_empty());
    }
}
