//! Reference Extractor: which named models a definition depends on.

use indexmap::IndexSet;

use crate::schema::SchemaDefinition;

/// Every model name referenced anywhere inside `definition`, in first-seen order.
pub fn references(definition: &SchemaDefinition) -> IndexSet<String> {
    let mut out = IndexSet::new();
    collect(definition, &mut out);
    out
}

fn collect(definition: &SchemaDefinition, out: &mut IndexSet<String>) {
    match definition {
        SchemaDefinition::Reference { name } => {
            out.insert(name.clone());
        }
        SchemaDefinition::Object { properties, .. } => {
            for prop in properties.values() {
                collect(prop, out);
            }
        }
        SchemaDefinition::Array { items } => collect(items, out),
        SchemaDefinition::String
        | SchemaDefinition::Number
        | SchemaDefinition::Boolean
        | SchemaDefinition::Enum { .. }
        | SchemaDefinition::Unknown { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn refs(raw: serde_json::Value) -> Vec<String> {
        references(&SchemaDefinition::from_json(&raw)).into_iter().collect()
    }

    #[test]
    fn direct_reference() {
        assert_eq!(refs(json!({"$ref": "#/definitions/Pet"})), ["Pet"]);
    }

    #[test]
    fn leaves_have_no_references() {
        assert!(refs(json!({"type": "string"})).is_empty());
        assert!(refs(json!({"type": "integer"})).is_empty());
        assert!(refs(json!({"type": "boolean"})).is_empty());
        assert!(refs(json!({"enum": ["#/definitions/Pet"]})).is_empty());
        assert!(refs(json!({"type": "file"})).is_empty());
    }

    #[test]
    fn walks_the_whole_tree() {
        let found = refs(json!({
            "type": "object",
            "properties": {
                "owner": { "$ref": "#/definitions/User" },
                "pages": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "tags": { "type": "array", "items": { "$ref": "#/definitions/Tag" } },
                            "author": { "$ref": "#/definitions/User" }
                        }
                    }
                }
            }
        }));
        assert_eq!(found, ["User", "Tag"]);
    }
}
