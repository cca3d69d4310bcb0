//! AST node types, one file per node kind, re-exported flat from here the
//! same way the interpreter's modules are organised throughout this crate.

mod expression;
mod function;
mod interface;
mod program;
mod statement;

pub use self::expression::*;
pub use self::function::*;
pub use self::interface::*;
pub use self::program::*;
pub use self::statement::*;

/// `(file name, line, column)`, attached to every node that can produce a
/// runtime error so messages can point back at source.
pub type Position = (String, usize, usize);
