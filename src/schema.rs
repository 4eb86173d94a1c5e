// Closed node model for schema definitions. Classification from raw JSON happens once, here.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::naming;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDefinition {
    Object {
        properties: IndexMap<String, SchemaDefinition>,  // document order
        required: IndexSet<String>,
    },
    Array { items: Box<SchemaDefinition> },
    String,
    Number,                          // `integer` and `number` alike
    Boolean,
    Enum { values: Vec<Value> },     // literals, verbatim and in order
    Reference { name: String },
    Unknown { type_name: Option<String> },
}

/// Model name → root definition. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelCollection {
    models: IndexMap<String, SchemaDefinition>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl SchemaDefinition {
    /// Classify a raw schema node. Never fails: anything unrecognised is `Unknown`.
    ///
    /// Precedence is `enum`, then `$ref`, then `type`.
    pub fn from_json(node: &Value) -> Self {
        let Some(map) = node.as_object() else {
            return Self::Unknown { type_name: Some(json_kind(node).to_string()) };
        };

        if let Some(Value::Array(values)) = map.get("enum") {
            return Self::Enum { values: values.clone() };
        }
        if let Some(Value::String(target)) = map.get("$ref") {
            return Self::Reference { name: naming::ref_name(target).to_string() };
        }

        match map.get("type") {
            Some(Value::String(ty)) => match ty.as_str() {
                "object" => {
                    let properties = map
                        .get("properties")
                        .and_then(Value::as_object)
                        .map(|props| {
                            props.iter()
                                .map(|(k, v)| (k.clone(), Self::from_json(v)))
                                .collect()
                        })
                        .unwrap_or_default();
                    let required = map
                        .get("required")
                        .and_then(Value::as_array)
                        .map(|names| {
                            names.iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default();
                    Self::Object { properties, required }
                }
                "array" => {
                    let items = match map.get("items") {
                        Some(items) => Self::from_json(items),
                        None => Self::Unknown { type_name: None },
                    };
                    Self::Array { items: Box::new(items) }
                }
                "string" => Self::String,
                "integer" | "number" => Self::Number,
                "boolean" => Self::Boolean,
                other => Self::Unknown { type_name: Some(other.to_string()) },
            },
            Some(other) => Self::Unknown { type_name: Some(other.to_string()) },
            None => Self::Unknown { type_name: None },
        }
    }
}

impl ModelCollection {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, name: impl Into<String>, definition: SchemaDefinition) {
        self.models.insert(name.into(), definition);
    }

    /// Build from a `name → raw schema` JSON object (e.g. a Swagger `definitions` map).
    pub fn from_json_map(map: &serde_json::Map<String, Value>) -> Self {
        map.iter()
            .map(|(name, node)| (name.clone(), SchemaDefinition::from_json(node)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&SchemaDefinition> { self.models.get(name) }
    pub fn contains(&self, name: &str) -> bool { self.models.contains_key(name) }
    pub fn len(&self) -> usize { self.models.len() }
    pub fn is_empty(&self) -> bool { self.models.is_empty() }

    /// Position of a model in document order.
    pub fn index_of(&self, name: &str) -> Option<usize> { self.models.get_index_of(name) }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.models.keys().map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaDefinition)> {
        self.models.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, SchemaDefinition)> for ModelCollection {
    fn from_iter<I: IntoIterator<Item = (String, SchemaDefinition)>>(iter: I) -> Self {
        Self { models: iter.into_iter().collect() }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null      => "null",
        Value::Bool(_)   => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enum_wins_over_type_and_ref() {
        let def = SchemaDefinition::from_json(&json!({
            "type": "string",
            "$ref": "#/definitions/Other",
            "enum": ["b", "a", 3]
        }));
        assert_eq!(def, SchemaDefinition::Enum { values: vec![json!("b"), json!("a"), json!(3)] });
    }

    #[test]
    fn ref_wins_over_type() {
        let def = SchemaDefinition::from_json(&json!({ "type": "object", "$ref": "#/definitions/Pet" }));
        assert_eq!(def, SchemaDefinition::Reference { name: "Pet".into() });
    }

    #[test]
    fn integer_and_number_collapse() {
        assert_eq!(SchemaDefinition::from_json(&json!({"type": "integer"})), SchemaDefinition::Number);
        assert_eq!(SchemaDefinition::from_json(&json!({"type": "number"})), SchemaDefinition::Number);
    }

    #[test]
    fn object_keeps_property_order_and_required() {
        let def = SchemaDefinition::from_json(&json!({
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "array", "items": { "$ref": "#/definitions/Tag" } }
            },
            "required": ["alpha"]
        }));
        let SchemaDefinition::Object { properties, required } = def else { panic!("not an object") };
        assert_eq!(properties.keys().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert!(required.contains("alpha"));
        assert!(!required.contains("zeta"));
        assert_eq!(
            properties["alpha"],
            SchemaDefinition::Array {
                items: Box::new(SchemaDefinition::Reference { name: "Tag".into() })
            }
        );
    }

    #[test]
    fn unclassifiable_nodes_are_unknown() {
        assert_eq!(
            SchemaDefinition::from_json(&json!({ "type": "file" })),
            SchemaDefinition::Unknown { type_name: Some("file".into()) }
        );
        assert_eq!(
            SchemaDefinition::from_json(&json!({ "properties": {} })),
            SchemaDefinition::Unknown { type_name: None }
        );
        assert_eq!(
            SchemaDefinition::from_json(&json!({ "type": ["string", "null"] })),
            SchemaDefinition::Unknown { type_name: Some(r#"["string","null"]"#.into()) }
        );
        assert_eq!(
            SchemaDefinition::from_json(&json!(true)),
            SchemaDefinition::Unknown { type_name: Some("bool".into()) }
        );
    }

    #[test]
    fn array_without_items_has_unknown_items() {
        assert_eq!(
            SchemaDefinition::from_json(&json!({ "type": "array" })),
            SchemaDefinition::Array { items: Box::new(SchemaDefinition::Unknown { type_name: None }) }
        );
    }

    #[test]
    fn collection_preserves_document_order() {
        let raw = json!({ "B": { "type": "string" }, "A": { "type": "boolean" } });
        let models = ModelCollection::from_json_map(raw.as_object().unwrap());
        assert_eq!(models.names().collect::<Vec<_>>(), ["B", "A"]);
        assert_eq!(models.index_of("A"), Some(1));
        assert_eq!(models.get("A"), Some(&SchemaDefinition::Boolean));
    }
}
