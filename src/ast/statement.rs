use super::{Expr, Position, QName};

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `var name;` — binds in the enclosing function's first block.
    VarDef { name: String, position: Position },
    /// `bvar name;` — binds in the innermost currently-executing block.
    BlockVarDef { name: String, position: Position },
    Assign {
        target: QName,
        value: Expr,
        position: Position,
    },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
        position: Position,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        position: Position,
    },
    Return {
        value: Option<Expr>,
        position: Position,
    },
    /// A call used for its side effects, with its result discarded.
    Expr(Expr),
}
