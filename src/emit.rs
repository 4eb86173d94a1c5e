//! Declaration Emitter.

use crate::naming;
use crate::syntax::Syntax;

/// One declaration for `model`, under its normalized identifier.
pub fn emit<S: Syntax + ?Sized>(syntax: &S, model: &str, ty: &str) -> String {
    syntax.declaration(&naming::declared_identifier(model), ty)
}
