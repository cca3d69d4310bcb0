use super::{ParamDecl, Position, Stmt};
use crate::types::TypeTag;

/// A top-level named function declaration. `return_type` is derived from
/// `name`'s suffix at parse time (allowing `void`).
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub return_type: TypeTag,
    pub body: Vec<Stmt>,
    pub position: Position,
}

/// An anonymous (lambda) function. Unlike `FunctionDecl`, the return type is
/// written explicitly since there is no name to derive it from.
#[derive(Debug, Clone)]
pub struct AnonFunction {
    pub params: Vec<ParamDecl>,
    pub return_type: TypeTag,
    pub body: Vec<Stmt>,
    pub position: Position,
}
