//! A hand-rolled lexer. Glyph's surface syntax was never specified beyond
//! the AST shape the evaluator consumes, so this is this crate's own
//! concrete grammar, kept deliberately small.

mod token;

pub use self::token::{Token, TokenKind};

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use log::trace;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::ast::Position;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    HashMap::from([
        ("interface", KwInterface),
        ("func", KwFunc),
        ("var", KwVar),
        ("bvar", KwBvar),
        ("if", KwIf),
        ("else", KwElse),
        ("while", KwWhile),
        ("return", KwReturn),
        ("ref", KwRef),
        ("convert", KwConvert),
        ("int", KwInt),
        ("string", KwString),
        ("bool", KwBool),
        ("void", KwVoid),
        ("object", KwObject),
        ("true", True),
        ("false", False),
        ("nil", Nil),
    ])
});

#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub position: Position,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (file, line, col) = &self.position;
        write!(f, "{} ({file}:{line}:{col})", self.message)
    }
}

impl std::error::Error for LexError {}

pub struct Lexer<'a> {
    file: String,
    chars: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: impl Into<String>, source: &'a str) -> Lexer<'a> {
        Lexer {
            file: file.into(),
            chars: source.chars().peekable(),
            line: 1,
            col: 1,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        trace!("lexed {} tokens from {}", tokens.len(), self.file);
        Ok(tokens)
    }

    fn position(&self) -> Position {
        (self.file.clone(), self.line, self.col)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia();
        let position = self.position();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position,
            });
        };

        if c.is_ascii_digit() {
            return self.lex_number(position);
        }
        if c == '"' {
            return self.lex_string(position);
        }
        if c.is_alphabetic() || c == '_' {
            return self.lex_ident(position);
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '@' => TokenKind::At,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Lte
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::Gte
                } else {
                    TokenKind::Gt
                }
            }
            '&' if self.peek() == Some('&') => {
                self.advance();
                TokenKind::AndAnd
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                TokenKind::OrOr
            }
            other => {
                return Err(LexError {
                    message: format!("unexpected character '{other}'"),
                    position,
                })
            }
        };
        Ok(Token { kind, position })
    }

    fn lex_number(&mut self, position: Position) -> Result<Token, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let value = text.parse::<i64>().map_err(|_| LexError {
            message: format!("invalid integer literal '{text}'"),
            position: position.clone(),
        })?;
        Ok(Token {
            kind: TokenKind::Int(value),
            position,
        })
    }

    fn lex_string(&mut self, position: Position) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut raw = String::new();
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => {
                    raw.push('\\');
                    if let Some(escaped) = self.advance() {
                        raw.push(escaped);
                    }
                }
                Some(c) => raw.push(c),
                None => {
                    return Err(LexError {
                        message: "unterminated string literal".to_string(),
                        position,
                    })
                }
            }
        }
        let unescaped = unescape::unescape(&raw).unwrap_or(raw);
        Ok(Token {
            kind: TokenKind::Str(unescaped),
            position,
        })
    }

    fn lex_ident(&mut self, position: Position) -> Result<Token, LexError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = KEYWORDS
            .get(text.as_str())
            .cloned()
            .unwrap_or(TokenKind::Ident(text));
        Ok(Token { kind, position })
    }
}
