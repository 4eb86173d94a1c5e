//! Driver: order → translate → emit. Pure; writing the result is the caller's job.

use indexmap::IndexMap;

use crate::emit::emit;
use crate::error::GenerateError;
use crate::naming;
use crate::order;
use crate::schema::ModelCollection;
use crate::syntax::{Marker, Syntax};
use crate::translate::Translator;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Model name as it appears in the collection.
    pub model: String,
    /// Name the declaration is emitted under.
    pub identifier: String,
    pub text: String,
    /// Inline failure markers placed in `text` during translation, in output order.
    pub markers: Vec<Marker>,
}

/// Declarations in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generated {
    pub declarations: Vec<Declaration>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

pub fn generate<S: Syntax + ?Sized>(
    models: &ModelCollection,
    syntax: &S,
) -> Result<Generated, GenerateError> {
    let names = order::order(models)?;
    let translator = Translator::new(models, syntax);

    // identifier → first model that claimed it
    let mut claimed: IndexMap<String, String> = IndexMap::new();
    let mut declarations = Vec::with_capacity(names.len());

    for model in names {
        let Some(definition) = models.get(&model) else { continue };
        let identifier = naming::declared_identifier(&model);
        if let Some(first) = claimed.get(&identifier) {
            tracing::warn!(%identifier, first = %first, second = %model, "two models share one identifier");
        } else {
            claimed.insert(identifier.clone(), model.clone());
        }

        let (expr, markers) = translator.translate_with_markers(definition);
        let text = emit(syntax, &model, &expr);
        for marker in &markers {
            tracing::warn!(%model, %marker, "declaration carries an inline marker");
        }
        declarations.push(Declaration { model, identifier, text, markers });
    }

    tracing::info!(
        syntax = syntax.name(),
        declarations = declarations.len(),
        "generated declarations"
    );
    Ok(Generated { declarations })
}

impl Generated {
    /// Model names in emission order.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.declarations.iter().map(|d| d.model.as_str())
    }

    /// `(model, marker)` for every inline marker, in output order.
    pub fn markers(&self) -> impl Iterator<Item = (&str, &Marker)> {
        self.declarations
            .iter()
            .flat_map(|d| d.markers.iter().map(move |m| (d.model.as_str(), m)))
    }

    pub fn has_markers(&self) -> bool {
        self.declarations.iter().any(|d| !d.markers.is_empty())
    }

    /// Preamble (if non-empty) and declarations, separated by blank lines and ending in a
    /// newline. Nothing at all renders as the empty string.
    pub fn render(&self, preamble: &str) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.declarations.len() + 1);
        if !preamble.is_empty() {
            parts.push(preamble);
        }
        parts.extend(self.declarations.iter().map(|d| d.text.as_str()));
        if parts.is_empty() {
            return String::new();
        }
        let mut out = parts.join("\n\n");
        out.push('\n');
        out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
