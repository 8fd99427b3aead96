use crate::error::Result;
use serde_json::{Map, Number, Value};
use std::future::Future;
use std::path::Path;

/// Reads a single API document (or a file referenced from one) into JSON
pub trait DocumentSource: Send + Sync {
    fn read_document(&self, path: &str) -> impl Future<Output = Result<Value>> + Send;
}

/// Reads documents from the local file system
#[derive(Debug, Clone, Default)]
pub struct FsDocumentSource;

impl DocumentSource for FsDocumentSource {
    async fn read_document(&self, path: &str) -> Result<Value> {
        let content = tokio::fs::read_to_string(path).await?;
        parse_document(path, &content)
    }
}

/// Parse document text, choosing JSON or YAML by file extension
pub fn parse_document(path: &str, content: &str) -> Result<Value> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        return Ok(serde_json::from_str(content)?);
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_json(yaml))
}

/// Convert YAML into JSON, stringifying non-string mapping keys
/// (`200:` in a responses map is an integer key in YAML)
pub fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_status_keys_become_strings() {
        let yaml = r#"
responses:
  200:
    description: OK
  '404':
    description: Not found
"#;
        let value = parse_document("openapi.yaml", yaml).unwrap();
        assert_eq!(value["responses"]["200"]["description"], json!("OK"));
        assert_eq!(value["responses"]["404"]["description"], json!("Not found"));
    }

    #[test]
    fn test_json_extension_uses_json_parser() {
        let value = parse_document("openapi.JSON", r#"{"openapi": "3.0.0"}"#).unwrap();
        assert_eq!(value, json!({ "openapi": "3.0.0" }));

        assert!(parse_document("openapi.json", "openapi: 3.0.0").is_err());
    }

    #[test]
    fn test_yaml_scalars() {
        let value = parse_document("doc.yml", "a: 1\nb: 1.5\nc: true\nd: ~\ne: [x, y]").unwrap();
        assert_eq!(value, json!({ "a": 1, "b": 1.5, "c": true, "d": null, "e": ["x", "y"] }));
    }

    #[tokio::test]
    async fn test_fs_source_missing_file() {
        let result = FsDocumentSource.read_document("/nonexistent/openapi.yaml").await;
        assert!(result.is_err());
    }
}
