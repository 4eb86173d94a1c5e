//! Schema-document loading: Swagger 2.0 `definitions` / OpenAPI 3 `components.schemas`
//! → [`ModelCollection`].

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DocumentError;
use crate::schema::{ModelCollection, SchemaDefinition};

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    swagger: Option<String>,
    #[serde(default)]
    openapi: Option<String>,
    #[serde(default)]
    definitions: Option<Map<String, Value>>,
    #[serde(default)]
    components: Option<Components>,
}

#[derive(Debug, Deserialize)]
struct Components {
    #[serde(default)]
    schemas: Option<Map<String, Value>>,
}

/// Read and load a document from disk.
pub fn load_path(path: &Path, json_pointer: Option<&str>) -> Result<ModelCollection, DocumentError> {
    let src = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_str(&src, json_pointer)
}

/// Load a document from JSON text, optionally selecting a sub-document first.
pub fn load_str(src: &str, json_pointer: Option<&str>) -> Result<ModelCollection, DocumentError> {
    let value: Value = from_str_with_path(src)?;
    let value = match json_pointer {
        None => value,
        Some(ptr) => value
            .pointer(ptr)
            .cloned()
            .ok_or_else(|| DocumentError::PointerNotFound(ptr.to_string()))?,
    };
    models_from_value(value)
}

/// Collect the named models of an already-parsed document.
pub fn models_from_value(value: Value) -> Result<ModelCollection, DocumentError> {
    if !value.is_object() {
        return Err(DocumentError::NonObjectRoot(json_kind(&value)));
    }
    let doc: SchemaDocument = from_value_with_path(value)?;
    tracing::debug!(swagger = ?doc.swagger, openapi = ?doc.openapi, "loaded schema document");

    let component_schemas = doc.components.and_then(|c| c.schemas);
    if doc.definitions.is_none() && component_schemas.is_none() {
        return Err(DocumentError::NoDefinitions);
    }

    let mut models = ModelCollection::new();
    for section in [doc.definitions, component_schemas].into_iter().flatten() {
        for (name, node) in &section {
            models.insert(name.clone(), SchemaDefinition::from_json(node));
        }
    }
    Ok(models)
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize with JSON-path context in error messages.
fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DocumentError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(path_error)
}

fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, DocumentError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(path_error)
}

fn path_error(err: serde_path_to_error::Error<serde_json::Error>) -> DocumentError {
    DocumentError::Json {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swagger_two_definitions() {
        let src = r##"{
            "swagger": "2.0",
            "info": { "title": "Petstore", "version": "1" },
            "definitions": {
                "Pet": { "type": "object", "properties": { "tag": { "$ref": "#/definitions/Tag" } } },
                "Tag": { "type": "string" }
            }
        }"##;
        let models = load_str(src, None).unwrap();
        assert_eq!(models.names().collect::<Vec<_>>(), ["Pet", "Tag"]);
        assert_eq!(models.get("Tag"), Some(&SchemaDefinition::String));
    }

    #[test]
    fn openapi_three_component_schemas() {
        let src = r##"{
            "openapi": "3.0.3",
            "components": { "schemas": { "Tag": { "$ref": "#/components/schemas/Label" }, "Label": { "type": "string" } } }
        }"##;
        let models = load_str(src, None).unwrap();
        assert_eq!(models.get("Tag"), Some(&SchemaDefinition::Reference { name: "Label".into() }));
    }

    #[test]
    fn json_pointer_selects_a_subdocument() {
        let src = r#"{ "bundle": { "api": { "definitions": { "A": { "type": "boolean" } } } } }"#;
        let models = load_str(src, Some("/bundle/api")).unwrap();
        assert_eq!(models.len(), 1);

        let err = load_str(src, Some("/nope")).unwrap_err();
        assert!(matches!(err, DocumentError::PointerNotFound(p) if p == "/nope"));
    }

    #[test]
    fn document_without_models_is_rejected() {
        let err = load_str(r#"{ "swagger": "2.0", "paths": {} }"#, None).unwrap_err();
        assert!(matches!(err, DocumentError::NoDefinitions));
    }

    #[test]
    fn non_object_roots_are_rejected() {
        let err = load_str("[1, 2]", None).unwrap_err();
        assert!(matches!(err, DocumentError::NonObjectRoot("an array")));
        assert_eq!(err.to_string(), "schema document root must be a JSON object, found an array");

        let err = load_str(r#"{ "bundle": "pets" }"#, Some("/bundle")).unwrap_err();
        assert!(matches!(err, DocumentError::NonObjectRoot("a string")));

        assert!(matches!(models_from_value(serde_json::Value::Null), Err(DocumentError::NonObjectRoot("null"))));
    }

    #[test]
    fn malformed_sections_report_their_path() {
        let err = load_str(r#"{ "definitions": [1, 2] }"#, None).unwrap_err();
        match err {
            DocumentError::Json { path, .. } => assert_eq!(path, "definitions"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(load_str("{ not json", None), Err(DocumentError::Json { .. })));
    }
}
