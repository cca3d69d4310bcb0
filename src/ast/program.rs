use super::{FunctionDecl, InterfaceDecl};

/// A whole parsed Glyph source file.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub interfaces: Vec<InterfaceDecl>,
    pub functions: Vec<FunctionDecl>,
}
