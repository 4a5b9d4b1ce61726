//! Wire-level request model.
//!
//! Query strings and JSON bodies are built from serde values and compacted:
//! parameters whose value is `null` never reach the wire.

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Ordered list of query-string pairs.
pub type QueryPairs = Vec<(String, String)>;

/// A single API call before it is sent.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Path relative to the versioned base URL
    pub path: String,
    /// Compacted query parameters
    pub query: QueryPairs,
    /// Compacted JSON body
    pub body: Option<Value>,
}

impl Request {
    /// Create a request with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach query parameters serialized from `query`.
    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Result<Self> {
        self.query.extend(compact_query(query)?);
        Ok(self)
    }

    /// Attach a JSON body serialized from `body`.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(compact_body(body)?);
        Ok(self)
    }
}

/// Serialize a value into query pairs.
///
/// The value must serialize to a JSON object (or `null`/unit for no
/// parameters). Scalars are stringified, arrays are joined with commas and
/// `null` entries are dropped.
pub fn compact_query<Q: Serialize + ?Sized>(query: &Q) -> Result<QueryPairs> {
    match serde_json::to_value(query)? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| query_value(value).map(|v| (key, v)))
            .collect()),
        other => Err(Error::InvalidInput(format!(
            "query parameters must serialize to an object, got {}",
            other
        ))),
    }
}

fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(values) => {
            let parts: Vec<String> = values.into_iter().filter_map(query_value).collect();
            Some(parts.join(","))
        }
        other => Some(other.to_string()),
    }
}

/// Serialize a body and drop top-level `null` members.
pub fn compact_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    Ok(match serde_json::to_value(body)? {
        Value::Object(map) => Value::Object(compact_map(map)),
        other => other,
    })
}

fn compact_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().filter(|(_, v)| !v.is_null()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Filters {
        limit: u32,
        cursor: Option<String>,
        store_id: Option<String>,
        receipt_numbers: Vec<u64>,
        enabled: bool,
    }

    #[test]
    fn test_query_drops_absent_values() {
        let mut pairs = compact_query(&Filters {
            limit: 250,
            cursor: None,
            store_id: Some("store-1".into()),
            receipt_numbers: vec![123, 456],
            enabled: true,
        })
        .unwrap();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("enabled".to_string(), "true".to_string()),
                ("limit".to_string(), "250".to_string()),
                ("receipt_numbers".to_string(), "123,456".to_string()),
                ("store_id".to_string(), "store-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_unit_query_is_empty() {
        assert!(compact_query(&()).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_query_rejected() {
        assert!(matches!(compact_query(&42), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_body_compaction() {
        let body = compact_body(&json!({"name": "Drinks", "color": null})).unwrap();
        assert_eq!(body, json!({"name": "Drinks"}));
    }

    #[test]
    fn test_body_keeps_nested_nulls() {
        let body = compact_body(&json!({"variants": [{"sku": null}]})).unwrap();
        assert_eq!(body, json!({"variants": [{"sku": null}]}));
    }
}
