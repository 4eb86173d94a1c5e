use std::path::PathBuf;

use thiserror::Error;

/// Fatal to a generation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Two or more distinct models depend on each other. `cycle` lists one concrete
    /// cycle in dependency order; its first model depends on its last.
    #[error("cyclic dependency between models: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}

/// Failure to turn a schema document into a model collection.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schema document at JSON path {path}: {message}")]
    Json { path: String, message: String },
    #[error("JSON pointer {0:?} does not select anything in the document")]
    PointerNotFound(String),
    #[error("schema document root must be a JSON object, found {0}")]
    NonObjectRoot(&'static str),
    #[error("document has no `definitions` or `components.schemas` section")]
    NoDefinitions,
}
