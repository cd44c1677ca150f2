// Decoding of the stats API's tabular `resultSets` payloads.
//
// Every endpoint answers with the same envelope:
//   { "resultSets": [ { "name": "...", "headers": [...], "rowSet": [[...], ...] } ] }
// Columns are located by header name so column reordering upstream is harmless.

use courtside_core::provider::ProviderError;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    #[serde(rename = "resultSets")]
    result_sets: Vec<ResultSet>,
}

fn schema_error(endpoint: &str, message: impl Into<String>) -> ProviderError {
    ProviderError::Schema {
        endpoint: endpoint.to_string(),
        message: message.into(),
    }
}

/// Pull the result set called `name` out of a response body.
pub fn extract(endpoint: &str, body: Value, name: &str) -> Result<ResultSet, ProviderError> {
    let envelope: Envelope = serde_json::from_value(body)
        .map_err(|e| schema_error(endpoint, format!("malformed resultSets envelope: {e}")))?;
    envelope
        .result_sets
        .into_iter()
        .find(|set| set.name == name)
        .ok_or_else(|| schema_error(endpoint, format!("result set {name} missing")))
}

impl ResultSet {
    /// Index of the column named `header`.
    pub fn column(&self, endpoint: &str, header: &str) -> Result<usize, ProviderError> {
        self.headers
            .iter()
            .position(|h| h == header)
            .ok_or_else(|| schema_error(endpoint, format!("{} has no {header} column", self.name)))
    }
}

// ---------------------------------------------------------------------------
// Cell accessors
// ---------------------------------------------------------------------------

/// A numeric cell, or `None` for null/missing/non-numeric.
pub fn cell_f64(row: &[Value], idx: usize) -> Option<f64> {
    row.get(idx).and_then(Value::as_f64)
}

/// A count cell. Null reads as 0.
pub fn cell_count(row: &[Value], idx: usize) -> f64 {
    cell_f64(row, idx).unwrap_or(0.0)
}

/// A string cell. Numbers are stringified; null is empty.
pub fn cell_string(row: &[Value], idx: usize) -> String {
    match row.get(idx) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// A non-negative integer cell, accepting integral floats and numeric strings.
pub fn cell_u64(row: &[Value], idx: usize) -> Option<u64> {
    match row.get(idx)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "resource": "playercareerstats",
            "resultSets": [
                { "name": "First", "headers": ["A", "B"], "rowSet": [[1, "x"]] },
                { "name": "Second", "headers": ["B", "A"], "rowSet": [] }
            ]
        })
    }

    #[test]
    fn extracts_named_set() {
        let set = extract("test", body(), "Second").unwrap();
        assert_eq!(set.headers, vec!["B", "A"]);
        assert!(set.row_set.is_empty());
        assert_eq!(set.column("test", "A").unwrap(), 1);
    }

    #[test]
    fn missing_set_is_schema_error() {
        let err = extract("test", body(), "Third").unwrap_err();
        assert!(matches!(err, ProviderError::Schema { .. }));
        assert!(err.to_string().contains("Third"));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let set = extract("test", body(), "First").unwrap();
        let err = set.column("test", "PTS").unwrap_err();
        assert!(err.to_string().contains("PTS"));
    }

    #[test]
    fn non_envelope_body_is_schema_error() {
        let err = extract("test", json!({"message": "rate limited"}), "First").unwrap_err();
        assert!(matches!(err, ProviderError::Schema { .. }));
    }

    #[test]
    fn cell_accessors_handle_nulls_and_types() {
        let row = vec![json!(82), json!(null), json!(0.512), json!(" LAL "), json!("2544"), json!(7.0)];
        assert_eq!(cell_f64(&row, 0), Some(82.0));
        assert_eq!(cell_f64(&row, 1), None);
        assert_eq!(cell_count(&row, 1), 0.0);
        assert_eq!(cell_f64(&row, 2), Some(0.512));
        assert_eq!(cell_string(&row, 3), "LAL");
        assert_eq!(cell_string(&row, 0), "82");
        assert_eq!(cell_string(&row, 1), "");
        assert_eq!(cell_u64(&row, 4), Some(2544));
        assert_eq!(cell_u64(&row, 5), Some(7));
        assert_eq!(cell_u64(&row, 2), None);
        assert_eq!(cell_f64(&row, 99), None);
    }
}
