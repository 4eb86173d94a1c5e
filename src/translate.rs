//! Definition Translator: one schema node → one type expression.
//!
//! Pure and total. Failures (dangling references, unclassifiable nodes) come back as
//! inline [`Marker`] text so sibling declarations are unaffected.

use crate::naming;
use crate::schema::{ModelCollection, SchemaDefinition};
use crate::syntax::{Marker, Syntax};

/// A `$ref` to this name is always dangling; some exporters write it for unset refs.
const UNDEFINED_REF: &str = "undefined";

pub struct Translator<'a, S: Syntax + ?Sized> {
    models: &'a ModelCollection,
    syntax: &'a S,
}

impl<'a, S: Syntax + ?Sized> Translator<'a, S> {
    /// `models` is the resolution context for references.
    pub fn new(models: &'a ModelCollection, syntax: &'a S) -> Self {
        Self { models, syntax }
    }

    pub fn translate(&self, definition: &SchemaDefinition) -> String {
        self.render(definition, &mut Vec::new())
    }

    /// Like [`translate`](Self::translate), also returning every marker placed in the
    /// expression, in output order. Literal text that merely looks like a marker (an enum
    /// value, say) is not reported.
    pub fn translate_with_markers(&self, definition: &SchemaDefinition) -> (String, Vec<Marker>) {
        let mut markers = Vec::new();
        let text = self.render(definition, &mut markers);
        (text, markers)
    }

    fn render(&self, definition: &SchemaDefinition, markers: &mut Vec<Marker>) -> String {
        let syntax = self.syntax;
        match definition {
            SchemaDefinition::Enum { values } => syntax.one_of(values),
            SchemaDefinition::Reference { name } => self.reference(name, markers),
            SchemaDefinition::Object { properties, required } => {
                if properties.is_empty() {
                    return syntax.open_object();
                }
                let props = properties
                    .iter()
                    .map(|(name, prop)| {
                        syntax.property(name, &self.render(prop, markers), required.contains(name))
                    })
                    .collect::<Vec<_>>();
                syntax.shape(&props)
            }
            SchemaDefinition::Array { items } => syntax.array_of(&self.render(items, markers)),
            SchemaDefinition::String => syntax.string(),
            SchemaDefinition::Number => syntax.number(),
            SchemaDefinition::Boolean => syntax.boolean(),
            SchemaDefinition::Unknown { type_name } => {
                tracing::debug!(?type_name, "unresolved schema type");
                place(Marker::UnresolvedType(type_name.clone()), markers)
            }
        }
    }

    fn reference(&self, name: &str, markers: &mut Vec<Marker>) -> String {
        if name == UNDEFINED_REF || !self.models.contains(name) {
            tracing::debug!(name, "missing model reference");
            return place(Marker::MissingReference(name.to_string()), markers);
        }
        naming::declared_identifier(name)
    }
}

fn place(marker: Marker, markers: &mut Vec<Marker>) -> String {
    let text = marker.to_string();
    markers.push(marker);
    text
}

/// Convenience for one-off translation.
pub fn translate<S: Syntax + ?Sized>(
    models: &ModelCollection,
    syntax: &S,
    definition: &SchemaDefinition,
) -> String {
    Translator::new(models, syntax).translate(definition)
}
