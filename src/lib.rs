//! Swagger / OpenAPI model definitions → ordered type declarations.
//!
//! ```text
//! document ─> ModelCollection ─> order ─> translate ─> emit ─> Generated::render
//! ```
//!
//! Declarations come out dependency-first: a model is declared only after every model it
//! references. Dangling references and unclassifiable schema nodes do not abort a run;
//! they surface as inline [`Marker`]s in the affected declaration. A reference cycle
//! between two or more models does abort it ([`GenerateError::CyclicDependency`]).
//!
//! ```
//! use swagger_decls::{generate, ModelCollection, PropTypes, Syntax};
//!
//! let definitions = serde_json::json!({
//!     "Pet": { "type": "object", "properties": { "tag": { "$ref": "#/definitions/Tag" } } },
//!     "Tag": { "type": "string" }
//! });
//! let models = ModelCollection::from_json_map(definitions.as_object().unwrap());
//! let out = generate(&models, &PropTypes).unwrap();
//! assert_eq!(out.order().collect::<Vec<_>>(), ["Tag", "Pet"]);
//! print!("{}", out.render(&PropTypes.preamble(None)));
//! ```

pub mod document;
pub mod emit;
pub mod error;
pub mod generate;
pub mod naming;
pub mod order;
pub mod references;
pub mod schema;
pub mod syntax;
pub mod translate;

pub use error::{DocumentError, GenerateError};
pub use generate::{Declaration, Generated, generate};
pub use order::{DependencyGraph, order};
pub use references::references;
pub use schema::{ModelCollection, SchemaDefinition};
pub use syntax::{Marker, PropTypes, Syntax, TypeScript};
pub use translate::{Translator, translate};
