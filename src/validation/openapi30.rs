use serde_json::{Map, Value};

/// Whether the document declares an OpenAPI 3.0.x version
pub fn is_openapi_30(document: &Value) -> bool {
    document
        .get("openapi")
        .and_then(Value::as_str)
        .is_some_and(|version| version.starts_with("3.0"))
}

/// Rewrite OpenAPI 3.0 schema keywords into their JSON Schema equivalents,
/// in place and at every depth.
///
/// - `nullable: true` adds `"null"` to `type` (and to `enum` when present)
/// - boolean `exclusiveMinimum`/`exclusiveMaximum` become numeric bounds
pub fn normalize_schema(value: &mut Value) {
    match value {
        Value::Object(map) => {
            translate_nullable(map);
            translate_exclusive(map, "exclusiveMinimum", "minimum");
            translate_exclusive(map, "exclusiveMaximum", "maximum");

            for child in map.values_mut() {
                normalize_schema(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_schema),
        _ => {}
    }
}

fn translate_nullable(map: &mut Map<String, Value>) {
    if !matches!(map.get("nullable"), Some(Value::Bool(_))) {
        return;
    }
    let Some(Value::Bool(nullable)) = map.remove("nullable") else {
        return;
    };
    if !nullable {
        return;
    }

    match map.get_mut("type") {
        Some(ty @ Value::String(_)) => {
            let single = ty.take();
            *ty = Value::Array(vec![single, null_type()]);
        }
        Some(Value::Array(types)) if !types.contains(&null_type()) => types.push(null_type()),
        _ => {}
    }

    if let Some(Value::Array(values)) = map.get_mut("enum")
        && !values.contains(&Value::Null)
    {
        values.push(Value::Null);
    }
}

fn null_type() -> Value {
    Value::String("null".to_string())
}

fn translate_exclusive(map: &mut Map<String, Value>, exclusive: &str, bound: &str) {
    if !matches!(map.get(exclusive), Some(Value::Bool(_))) {
        return;
    }
    let Some(Value::Bool(flag)) = map.remove(exclusive) else {
        return;
    };

    if flag && let Some(limit) = map.remove(bound) {
        map.insert(exclusive.to_string(), limit);
    }
}
