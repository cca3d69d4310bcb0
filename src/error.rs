//! The three fatal runtime error kinds and the error type that carries one.

use std::fmt;

use crate::ast::Position;

/// Every runtime error is exactly one of these three kinds; once raised, the
/// run aborts, there is no `catch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reference to an undefined variable, function, field or interface.
    Name,
    /// A value was used somewhere its type does not belong: bad assignment,
    /// bad argument, bad operand, failed `convert`, or failed interface
    /// conformance.
    Type,
    /// Everything else that still has to abort the run: division or modulo
    /// by zero, a call or field access through nil, a call through a
    /// function variable that was never assigned.
    Fault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Name => write!(f, "NAME_ERROR"),
            ErrorKind::Type => write!(f, "TYPE_ERROR"),
            ErrorKind::Fault => write!(f, "FAULT_ERROR"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, position: Position) -> RuntimeError {
        RuntimeError {
            kind,
            message: message.into(),
            position,
        }
    }

    pub fn name(message: impl Into<String>, position: Position) -> RuntimeError {
        RuntimeError::new(ErrorKind::Name, message, position)
    }

    pub fn type_error(message: impl Into<String>, position: Position) -> RuntimeError {
        RuntimeError::new(ErrorKind::Type, message, position)
    }

    pub fn fault(message: impl Into<String>, position: Position) -> RuntimeError {
        RuntimeError::new(ErrorKind::Fault, message, position)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (file, line, col) = &self.position;
        write!(f, "{} {} ({file}:{line}:{col})", self.kind, self.message)
    }
}

impl std::error::Error for RuntimeError {}
