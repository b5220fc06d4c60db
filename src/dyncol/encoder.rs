use crate::dyncol::escape::{quote_readable, sql_literal};
use crate::types::Diagnostic;
use serde_json::{Map, Number, Value};
use tracing::warn;

/// Encodes decoded JSON objects as `COLUMN_CREATE(...)` expressions
#[derive(Debug, Default)]
pub struct ValueEncoder {
    diagnostics: Vec<Diagnostic>,
}

impl ValueEncoder {
    pub fn new() -> Self {
        ValueEncoder::default()
    }

    /// Encode an object as a `COLUMN_CREATE(key,value,...)` call.
    ///
    /// Members follow the map's iteration order. Members with no dynamic
    /// column form (booleans, nulls) are left out, and an object with nothing
    /// left encodes as `COLUMN_CREATE()`.
    pub fn encode_object(&mut self, obj: &Map<String, Value>) -> String {
        let mut pairs = Vec::with_capacity(obj.len());
        for (key, value) in obj {
            if let Some(encoded) = self.encode_member(value) {
                pairs.push(format!("{},{}", sql_literal(key), encoded));
            }
        }
        format!("COLUMN_CREATE({})", pairs.join(","))
    }

    /// Encode the value half of one object member
    fn encode_member(&mut self, value: &Value) -> Option<String> {
        match value {
            Value::Array(items) => Some(sql_literal(&self.encode_array(items))),
            Value::Object(nested) => Some(self.encode_object(nested)),
            Value::String(s) => Some(sql_literal(s)),
            Value::Number(n) => Some(sql_literal(&format_number(n))),
            Value::Bool(_) | Value::Null => None,
        }
    }

    /// Render array elements as one comma-joined string, before SQL quoting
    pub fn encode_array(&mut self, items: &[Value]) -> String {
        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            if let Some(element) = self.encode_element(item) {
                elements.push(element);
            }
        }
        elements.join(",")
    }

    fn encode_element(&mut self, value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(quote_readable(s)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(format_number(n)),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                let rendered = value.to_string();
                warn!("Unknown type: {}", rendered);
                self.diagnostics.push(Diagnostic::UnsupportedElement { value: rendered });
                None
            }
        }
    }

    /// Diagnostics raised since the last call
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Shortest decimal form that reads back as the same `f64`, without exponent
pub fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) => format_float(f),
        None => n.to_string(),
    }
}

fn format_float(f: f64) -> String {
    // Display for f64 is already shortest round-trip and never scientific
    format!("{}", f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: Value) -> (String, Vec<Diagnostic>) {
        let mut encoder = ValueEncoder::new();
        let obj = value.as_object().unwrap().clone();
        let encoded = encoder.encode_object(&obj);
        (encoded, encoder.take_diagnostics())
    }

    #[test]
    fn test_string_member() {
        let (encoded, diagnostics) = encode(json!({"name": "Alice"}));
        assert_eq!(encoded, r#"COLUMN_CREATE("name","Alice")"#);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_number_member_is_quoted() {
        let (encoded, _) = encode(json!({"a": 1, "b": 2.5}));
        assert_eq!(encoded, r#"COLUMN_CREATE("a","1","b","2.5")"#);
    }

    #[test]
    fn test_number_uses_shortest_form() {
        let value: Value = serde_json::from_str(r#"{"pi": 3.140000}"#).unwrap();
        let (encoded, _) = encode(value);
        assert_eq!(encoded, r#"COLUMN_CREATE("pi","3.14")"#);
    }

    #[test]
    fn test_format_number_never_uses_exponent() {
        let big: Number = serde_json::from_str("1e21").unwrap();
        let small: Number = serde_json::from_str("1.5e-7").unwrap();
        let neg: Number = serde_json::from_str("-42").unwrap();
        assert_eq!(format_number(&big), "1000000000000000000000");
        assert_eq!(format_number(&small), "0.00000015");
        assert_eq!(format_number(&neg), "-42");
    }

    #[test]
    fn test_nested_object_is_unquoted_call() {
        let (encoded, _) = encode(json!({"user": {"id": 7, "tag": "x"}}));
        assert_eq!(
            encoded,
            r#"COLUMN_CREATE("user",COLUMN_CREATE("id","7","tag","x"))"#
        );
    }

    #[test]
    fn test_booleans_and_nulls_are_skipped() {
        let (encoded, diagnostics) = encode(json!({"a": true, "b": "x", "c": null}));
        assert_eq!(encoded, r#"COLUMN_CREATE("b","x")"#);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_empty_object() {
        let (encoded, _) = encode(json!({}));
        assert_eq!(encoded, "COLUMN_CREATE()");

        let (encoded, _) = encode(json!({"only": false}));
        assert_eq!(encoded, "COLUMN_CREATE()");

        let (encoded, _) = encode(json!({"inner": {}}));
        assert_eq!(encoded, r#"COLUMN_CREATE("inner",COLUMN_CREATE())"#);
    }

    #[test]
    fn test_array_is_one_literal() {
        let (encoded, diagnostics) = encode(json!({"x": [1, 2, "y"]}));
        assert_eq!(encoded, r#"COLUMN_CREATE("x","1,2,\\\"y\\\"")"#);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_array_elements() {
        let mut encoder = ValueEncoder::new();
        let items = vec![json!("a b"), json!(true), json!(false), json!(0.5)];
        assert_eq!(encoder.encode_array(&items), r#""a b",true,false,0.5"#);
        assert_eq!(encoder.encode_array(&[]), "");
    }

    #[test]
    fn test_unsupported_elements_are_dropped() {
        let mut encoder = ValueEncoder::new();
        let items = vec![json!(1), json!([2, 3]), json!(null), json!({"k": 1}), json!(4)];
        assert_eq!(encoder.encode_array(&items), "1,4");

        let diagnostics = encoder.take_diagnostics();
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnsupportedElement { value: "[2,3]".to_string() },
                Diagnostic::UnsupportedElement { value: "null".to_string() },
                Diagnostic::UnsupportedElement { value: r#"{"k":1}"#.to_string() },
            ]
        );
        assert!(encoder.take_diagnostics().is_empty());
    }

    #[test]
    fn test_key_is_escaped() {
        let (encoded, _) = encode(json!({"it's": "ok"}));
        assert_eq!(encoded, r#"COLUMN_CREATE("it\\'s","ok")"#);
    }
}
