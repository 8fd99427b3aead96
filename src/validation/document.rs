use crate::error::{Result, SwaggerValidationError};
use super::openapi30;
use crate::models::DocumentSummary;
use oas3::OpenApiV3Spec;
use serde_json::Value;
use std::collections::HashSet;

/// Check that a dereferenced document is a well-formed OpenAPI 3.x description
pub fn validate_document(document: &Value) -> Result<DocumentSummary> {
    if document.get("swagger").is_some() && document.get("openapi").is_none() {
        return Err(SwaggerValidationError::DocumentStructure(
            "Swagger 2.0 documents are not supported; convert to OpenAPI 3.0.x or 3.1.x".to_string(),
        ));
    }

    // oas3 models the 3.1 schema dialect
    let mut document = document.clone();
    if openapi30::is_openapi_30(&document) {
        openapi30::normalize_schema(&mut document);
    }

    let spec: OpenApiV3Spec = serde_json::from_value(document)
        .map_err(|e| SwaggerValidationError::DocumentStructure(e.to_string()))?;

    if !spec.openapi.starts_with("3.0") && !spec.openapi.starts_with("3.1") {
        return Err(SwaggerValidationError::DocumentStructure(format!(
            "Unsupported OpenAPI version: {}. Only 3.0.x and 3.1.x are supported.",
            spec.openapi
        )));
    }

    // 3.1 allows webhook- or component-only documents
    if spec.openapi.starts_with("3.0") && spec.paths.is_none() {
        return Err(SwaggerValidationError::DocumentStructure(
            "missing field `paths`".to_string(),
        ));
    }

    check_operation_ids(&spec)?;

    Ok(DocumentSummary {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        openapi: spec.openapi.clone(),
        path_count: spec.paths.as_ref().map(|p| p.len()).unwrap_or(0),
    })
}

fn check_operation_ids(spec: &OpenApiV3Spec) -> Result<()> {
    let Some(paths) = &spec.paths else {
        return Ok(());
    };

    let mut seen = HashSet::new();
    for (path, path_item) in paths.iter() {
        let operations = [
            ("GET", &path_item.get),
            ("POST", &path_item.post),
            ("PUT", &path_item.put),
            ("DELETE", &path_item.delete),
            ("PATCH", &path_item.patch),
            ("OPTIONS", &path_item.options),
            ("HEAD", &path_item.head),
            ("TRACE", &path_item.trace),
        ];

        for (method, op_option) in &operations {
            if let Some(op) = op_option
                && let Some(operation_id) = &op.operation_id
                && !seen.insert(operation_id.as_str())
            {
                return Err(SwaggerValidationError::DocumentStructure(format!(
                    "Duplicate operationId '{}' at {} {}",
                    operation_id, method, path
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({
            "openapi": "3.0.0",
            "info": { "title": "Pet Store", "version": "1.2.3" },
            "paths": {
                "/pets": { "get": { "operationId": "listPets", "responses": { "200": { "description": "OK" } } } }
            }
        })
    }

    #[test]
    fn test_minimal_document_is_valid() {
        let summary = validate_document(&minimal()).unwrap();
        assert_eq!(summary.title, "Pet Store");
        assert_eq!(summary.version, "1.2.3");
        assert_eq!(summary.openapi, "3.0.0");
        assert_eq!(summary.path_count, 1);
    }

    #[test]
    fn test_missing_info() {
        let mut doc = minimal();
        doc.as_object_mut().unwrap().remove("info");

        let err = validate_document(&doc).unwrap_err();
        assert!(matches!(err, SwaggerValidationError::DocumentStructure(_)));
        assert!(err.to_string().contains("info"));
    }

    #[test]
    fn test_missing_paths_in_3_0() {
        let mut doc = minimal();
        doc.as_object_mut().unwrap().remove("paths");

        assert!(matches!(
            validate_document(&doc),
            Err(SwaggerValidationError::DocumentStructure(_))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut doc = minimal();
        doc["openapi"] = json!("4.0.0");

        let err = validate_document(&doc).unwrap_err();
        assert!(err.to_string().contains("Unsupported OpenAPI version"));
    }

    #[test]
    fn test_swagger_2_rejected() {
        let doc = json!({ "swagger": "2.0", "info": { "title": "Old", "version": "1" }, "paths": {} });
        assert!(matches!(
            validate_document(&doc),
            Err(SwaggerValidationError::DocumentStructure(_))
        ));
    }

    #[test]
    fn test_duplicate_operation_id() {
        let mut doc = minimal();
        doc["paths"]["/pets"]["post"] = json!({
            "operationId": "listPets",
            "responses": { "201": { "description": "Created" } }
        });

        let err = validate_document(&doc).unwrap_err();
        assert!(err.to_string().contains("Duplicate operationId 'listPets'"));
    }

    #[test]
    fn test_openapi_30_schema_keywords_accepted() {
        let mut doc = minimal();
        doc["paths"]["/pets"]["get"]["responses"]["200"]["content"] = json!({
            "application/json": { "schema": {
                "type": "object",
                "properties": {
                    "age": { "type": "integer", "minimum": 0, "exclusiveMinimum": true },
                    "weight": { "type": "number", "maximum": 100, "exclusiveMaximum": false },
                    "tag": { "type": "string", "nullable": true }
                }
            } }
        });

        let summary = validate_document(&doc).unwrap();
        assert_eq!(summary.openapi, "3.0.0");
    }
}
