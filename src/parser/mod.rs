//! A hand-rolled recursive-descent parser with precedence climbing for
//! expressions, producing the AST the evaluator (`crate::interpreter`)
//! consumes. Concrete syntax is this crate's own design; see
//! `src/lexer` and the grammar summary in `SPEC_FULL.md`.

use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::ast::{
    AnonFunction, BinaryOp, Expr, FieldDecl, FunctionDecl, InterfaceDecl, ParamDecl, Position,
    Program, QName, Stmt, UnaryOp,
};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::types::TypeTag;

#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (file, line, col) = &self.position;
        write!(f, "{} ({file}:{line}:{col})", self.message)
    }
}

impl std::error::Error for ParseError {}

pub fn parse_program(file: &str, source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(file, source)
        .tokenize()
        .map_err(|e| ParseError {
            message: e.message,
            position: e.position,
        })?;
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn position(&self) -> Position {
        self.peek().position.clone()
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(ParseError {
                message: format!("expected {what}, found {:?}", self.peek_kind()),
                position: self.position(),
            })
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Position), ParseError> {
        let position = self.position();
        match self.advance().kind {
            TokenKind::Ident(name) => Ok((name, position)),
            other => Err(ParseError {
                message: format!("expected identifier, found {other:?}"),
                position,
            }),
        }
    }

    fn expect_upper_letter(&mut self) -> Result<(char, Position), ParseError> {
        let (name, position) = self.expect_ident()?;
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok((c, position)),
            _ => Err(ParseError {
                message: format!("expected a single uppercase interface letter, found '{name}'"),
                position,
            }),
        }
    }

    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        while !self.check(&TokenKind::Eof) {
            match self.peek_kind() {
                TokenKind::KwInterface => program.interfaces.push(self.parse_interface()?),
                TokenKind::KwFunc => program.functions.push(self.parse_function()?),
                other => {
                    return Err(ParseError {
                        message: format!("expected 'interface' or 'func', found {other:?}"),
                        position: self.position(),
                    })
                }
            }
        }
        trace!(
            "parsed {} interface(s), {} function(s)",
            program.interfaces.len(),
            program.functions.len()
        );
        Ok(program)
    }

    fn parse_interface(&mut self) -> Result<InterfaceDecl, ParseError> {
        let position = self.position();
        self.expect(TokenKind::KwInterface, "'interface'")?;
        let (letter, _) = self.expect_upper_letter()?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            fields.push(self.parse_field_decl()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(InterfaceDecl {
            letter,
            fields,
            position,
        })
    }

    fn parse_field_decl(&mut self) -> Result<FieldDecl, ParseError> {
        let (name, position) = self.expect_ident()?;
        if self.check(&TokenKind::LParen) {
            let params = self.parse_param_list()?;
            self.expect(TokenKind::Semicolon, "';'")?;
            Ok(FieldDecl::Func {
                name,
                params,
                position,
            })
        } else {
            self.expect(TokenKind::Semicolon, "';'")?;
            Ok(FieldDecl::Var { name, position })
        }
    }

    fn parse_param_list(&mut self) -> Result<Vec<ParamDecl>, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) {
            if !params.is_empty() {
                self.expect(TokenKind::Comma, "','")?;
            }
            let position = self.position();
            let is_ref = if self.check(&TokenKind::KwRef) {
                self.advance();
                true
            } else {
                false
            };
            let (name, _) = self.expect_ident()?;
            params.push(ParamDecl {
                name,
                is_ref,
                position,
            });
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    fn parse_function(&mut self) -> Result<FunctionDecl, ParseError> {
        let position = self.position();
        self.expect(TokenKind::KwFunc, "'func'")?;
        let (name, _) = self.expect_ident()?;
        // `main` is the one function name exempt from suffix-derived typing:
        // it is always void, whatever letters it happens to end in.
        let return_type = if name == "main" {
            TypeTag::Void
        } else {
            TypeTag::from_identifier_suffix_allow_void(&name).ok_or_else(|| ParseError {
                message: format!("function name '{name}' has no valid type suffix"),
                position: position.clone(),
            })?
        };
        let params = self.parse_param_list()?;
        let body = self.parse_block()?;
        Ok(FunctionDecl {
            name,
            params,
            return_type,
            body,
            position,
        })
    }

    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let position = self.position();
        match self.peek_kind().clone() {
            TokenKind::KwVar => {
                self.advance();
                let (name, _) = self.expect_ident()?;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Stmt::VarDef { name, position })
            }
            TokenKind::KwBvar => {
                self.advance();
                let (name, _) = self.expect_ident()?;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Stmt::BlockVarDef { name, position })
            }
            TokenKind::KwIf => {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let condition = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                let then_body = self.parse_block()?;
                let else_body = if self.check(&TokenKind::KwElse) {
                    self.advance();
                    self.parse_block()?
                } else {
                    Vec::new()
                };
                Ok(Stmt::If {
                    condition,
                    then_body,
                    else_body,
                    position,
                })
            }
            TokenKind::KwWhile => {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let condition = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                let body = self.parse_block()?;
                Ok(Stmt::While {
                    condition,
                    body,
                    position,
                })
            }
            TokenKind::KwReturn => {
                self.advance();
                let value = if self.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Stmt::Return { value, position })
            }
            _ => self.parse_assign_or_expr_stmt(position),
        }
    }

    fn parse_assign_or_expr_stmt(&mut self, position: Position) -> Result<Stmt, ParseError> {
        let checkpoint = self.pos;
        if let TokenKind::Ident(_) = self.peek_kind() {
            let qname = self.parse_qname()?;
            if self.check(&TokenKind::Assign) {
                self.advance();
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, "';'")?;
                return Ok(Stmt::Assign {
                    target: qname,
                    value,
                    position,
                });
            }
            // not an assignment: rewind and parse it as a full expression
            // (covers bare calls used as statements).
            self.pos = checkpoint;
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Stmt::Expr(expr))
    }

    fn parse_qname(&mut self) -> Result<QName, ParseError> {
        let (first, _) = self.expect_ident()?;
        let mut segments = vec![first];
        while self.check(&TokenKind::Dot) {
            self.advance();
            let (next, _) = self.expect_ident()?;
            segments.push(next);
        }
        Ok(segments)
    }

    // Precedence, low to high: || , && , equality , relational , additive , multiplicative , unary , primary.
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.check(&TokenKind::OrOr) {
            let position = self.position();
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Binary {
                op: BinaryOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AndAnd) {
            let position = self.position();
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::Binary {
                op: BinaryOp::And,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::NotEq => BinaryOp::Neq,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_relational()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Lte => BinaryOp::Lte,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Gte => BinaryOp::Gte,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            let position = self.position();
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        match self.peek_kind() {
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                    position,
                })
            }
            TokenKind::Bang => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                    position,
                })
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let position = self.position();
        match self.peek_kind().clone() {
            TokenKind::Int(i) => {
                self.advance();
                Ok(Expr::IntLit(i, position))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::StringLit(s, position))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::BoolLit(true, position))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::BoolLit(false, position))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::NilLit(position))
            }
            TokenKind::At => {
                self.advance();
                Ok(Expr::NewObject(position))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::KwConvert => {
                self.advance();
                self.expect(TokenKind::LParen, "'('")?;
                let to_type = self.parse_type_name()?;
                self.expect(TokenKind::Comma, "','")?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::Convert {
                    to_type,
                    value: Box::new(value),
                    position,
                })
            }
            TokenKind::KwFunc => self.parse_lambda(position),
            TokenKind::Ident(_) => self.parse_qname_or_call(position),
            other => Err(ParseError {
                message: format!("unexpected token {other:?}"),
                position,
            }),
        }
    }

    fn parse_qname_or_call(&mut self, position: Position) -> Result<Expr, ParseError> {
        let qname = self.parse_qname()?;
        if self.check(&TokenKind::LParen) {
            let args = self.parse_arg_list()?;
            Ok(Expr::Call {
                callee: qname,
                args,
                position,
            })
        } else {
            Ok(Expr::Name(qname, position))
        }
    }

    fn parse_arg_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            if !args.is_empty() {
                self.expect(TokenKind::Comma, "','")?;
            }
            args.push(self.parse_expr()?);
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(args)
    }

    fn parse_lambda(&mut self, position: Position) -> Result<Expr, ParseError> {
        self.expect(TokenKind::KwFunc, "'func'")?;
        let params = self.parse_param_list()?;
        self.expect(TokenKind::Colon, "':'")?;
        let return_type = self.parse_type_name()?;
        let body = self.parse_block()?;
        Ok(Expr::Lambda(Rc::new(AnonFunction {
            params,
            return_type,
            body,
            position,
        })))
    }

    fn parse_type_name(&mut self) -> Result<TypeTag, ParseError> {
        let position = self.position();
        match self.advance().kind {
            TokenKind::KwInt => Ok(TypeTag::Int),
            TokenKind::KwString => Ok(TypeTag::String),
            TokenKind::KwBool => Ok(TypeTag::Bool),
            TokenKind::KwVoid => Ok(TypeTag::Void),
            TokenKind::KwObject => Ok(TypeTag::Object(None)),
            TokenKind::Ident(name) => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_uppercase() => Ok(TypeTag::Object(Some(c))),
                    _ => Err(ParseError {
                        message: format!("expected a type name, found '{name}'"),
                        position,
                    }),
                }
            }
            other => Err(ParseError {
                message: format!("expected a type name, found {other:?}"),
                position,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_main() {
        let program = parse_program("t.gl", "func maini() { return 0; }").unwrap();
        assert_eq!(program.functions.len(), 1);
        assert_eq!(program.functions[0].name, "maini");
    }

    #[test]
    fn parses_literal_main_as_void_despite_its_suffix() {
        let program = parse_program("t.gl", "func main() { print(1); }").unwrap();
        assert_eq!(program.functions[0].name, "main");
        assert_eq!(program.functions[0].return_type, TypeTag::Void);
    }

    #[test]
    fn parses_interface_and_object_literal() {
        let src = "interface N { counti; } func maini() { var xo; xo = @; return 0; }";
        let program = parse_program("t.gl", src).unwrap();
        assert_eq!(program.interfaces.len(), 1);
        assert_eq!(program.interfaces[0].letter, 'N');
    }

    #[test]
    fn parses_precedence_correctly() {
        let src = "func maini() { var xi; xi = 1 + 2 * 3; return xi; }";
        let program = parse_program("t.gl", src).unwrap();
        let Stmt::Assign { value, .. } = &program.functions[0].body[1] else {
            panic!("expected assignment");
        };
        match value {
            Expr::Binary { op: BinaryOp::Add, right, .. } => {
                assert!(matches!(**right, Expr::Binary { op: BinaryOp::Mul, .. }));
            }
            _ => panic!("expected top-level addition"),
        }
    }
}
