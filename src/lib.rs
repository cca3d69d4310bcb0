//! Glyph: a small statically-typed imperative language with suffix-encoded
//! types, structural single-letter interfaces, first-class closures and
//! pass-by-reference parameters. This crate is both the library (parser,
//! evaluator, host façade) and the `glyph` binary's backing implementation.

pub mod ast;
pub mod cli;
pub mod environment;
pub mod error;
pub mod functions;
pub mod heap;
pub mod host;
pub mod interfaces;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod value;

use std::fmt;
use std::path::Path;

use crate::ast::Position;
use crate::error::RuntimeError;
use crate::host::Host;
use crate::interpreter::Interpreter;
use crate::value::Value;

/// Everything that can go wrong running a Glyph program end to end: a
/// lexical or syntactic failure, caught before the interpreter ever starts,
/// or a runtime error from loading declarations or executing `main`.
#[derive(Debug, Clone)]
pub enum GlyphError {
    Parse(String, Position),
    Runtime(RuntimeError),
}

impl fmt::Display for GlyphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphError::Parse(message, (file, line, col)) => {
                write!(f, "{message} ({file}:{line}:{col})")
            }
            GlyphError::Runtime(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GlyphError {}

impl From<RuntimeError> for GlyphError {
    fn from(err: RuntimeError) -> GlyphError {
        GlyphError::Runtime(err)
    }
}

/// Parse and run a complete Glyph program's source text under `host`,
/// returning whatever `main` returns (always `Value::Void`, since `main` is
/// never declared with anything else). A parse failure is returned directly;
/// a runtime error (from loading declarations or from `main` itself) is
/// reported through `host` exactly once before being returned.
pub fn run_str(file: &str, source: &str, host: &dyn Host) -> Result<Value, GlyphError> {
    let program =
        parser::parse_program(file, source).map_err(|e| GlyphError::Parse(e.message, e.position))?;
    let mut interp = Interpreter::new(host);
    if let Err(error) = interp.load(program) {
        host.report_error(&error);
        return Err(error.into());
    }
    Ok(interp.run()?)
}

/// Parse and run a Glyph program loaded from `path`.
pub fn run_file(path: &Path, host: &dyn Host) -> Result<Value, GlyphError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        GlyphError::Parse(
            format!("cannot read '{}': {e}", path.display()),
            (path.display().to_string(), 0, 0),
        )
    })?;
    run_str(&path.display().to_string(), &source, host)
}
