use std::rc::Rc;

use super::{AnonFunction, Position};
use crate::types::TypeTag;

/// A dotted name path, e.g. `selfo.nexto.counti`. A single-segment path is
/// just a local variable reference.
pub type QName = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
}

#[derive(Debug, Clone)]
pub enum Expr {
    IntLit(i64, Position),
    StringLit(String, Position),
    BoolLit(bool, Position),
    /// The `nil` literal: always evaluates to the nil object.
    NilLit(Position),
    /// `@`: allocate a fresh, empty object on the heap.
    NewObject(Position),
    Name(QName, Position),
    Call {
        callee: QName,
        args: Vec<Expr>,
        position: Position,
    },
    Convert {
        to_type: TypeTag,
        value: Box<Expr>,
        position: Position,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        position: Position,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        position: Position,
    },
    Lambda(Rc<AnonFunction>),
}

impl Expr {
    pub fn position(&self) -> &Position {
        match self {
            Expr::IntLit(_, p)
            | Expr::StringLit(_, p)
            | Expr::BoolLit(_, p)
            | Expr::NilLit(p)
            | Expr::NewObject(p)
            | Expr::Name(_, p)
            | Expr::Call { position: p, .. }
            | Expr::Convert { position: p, .. }
            | Expr::Unary { position: p, .. }
            | Expr::Binary { position: p, .. } => p,
            Expr::Lambda(f) => &f.position,
        }
    }
}
