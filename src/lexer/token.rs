use crate::ast::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Str(String),

    True,
    False,
    Nil,

    KwInterface,
    KwFunc,
    KwVar,
    KwBvar,
    KwIf,
    KwElse,
    KwWhile,
    KwReturn,
    KwRef,
    KwConvert,
    KwInt,
    KwString,
    KwBool,
    KwVoid,
    KwObject,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    At,
    Assign,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    AndAnd,
    OrOr,
    Bang,

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}
