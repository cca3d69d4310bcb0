use super::Position;
use crate::error::RuntimeError;
use crate::types::TypeTag;

/// A single uppercase-letter interface and the fields any conforming object
/// must have.
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub letter: char,
    pub fields: Vec<FieldDecl>,
    pub position: Position,
}

#[derive(Debug, Clone)]
pub enum FieldDecl {
    Var {
        name: String,
        position: Position,
    },
    Func {
        name: String,
        params: Vec<ParamDecl>,
        position: Position,
    },
}

impl FieldDecl {
    pub fn name(&self) -> &str {
        match self {
            FieldDecl::Var { name, .. } => name,
            FieldDecl::Func { name, .. } => name,
        }
    }
}

/// One parameter in a function declaration or function-typed interface
/// field. The declared type is always the identifier's suffix; `is_ref`
/// marks a `ref`-qualified (pass-by-reference) parameter.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub is_ref: bool,
    pub position: Position,
}

impl ParamDecl {
    /// The parameter's type, derived from its name's suffix. A parameter
    /// name ending in a letter that names no type is a type error, not a
    /// parser-level failure: the parser only checks that a suffix exists,
    /// not that every name-shape downstream accepts yet.
    pub fn type_tag(&self) -> Result<TypeTag, RuntimeError> {
        TypeTag::from_identifier_suffix(&self.name).ok_or_else(|| {
            RuntimeError::type_error(
                format!("parameter '{}' has no valid type suffix", self.name),
                self.position.clone(),
            )
        })
    }
}
