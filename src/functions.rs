//! The top-level function table and the closure value lambdas produce.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{AnonFunction, FunctionDecl, Position};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::types::{ParamKind, ParamSig, TypeTag};
use crate::value::{FunctionRef, Value};

/// A lambda's captured state: the environment snapshot taken when the
/// `func(...) {...}` expression was evaluated, plus enough of its signature
/// to answer interface-conformance and identity questions without
/// re-walking the AST.
#[derive(Debug)]
pub struct Closure {
    pub def: Rc<AnonFunction>,
    pub captured_env: Environment,
    pub params: Vec<ParamSig>,
}

/// The result of resolving a bare function name against a set of call
/// arguments (or, for [`FunctionTable::named_overloads`], against nothing
/// but the name): no matching declaration, exactly one, or more than one
/// with no way to prefer between them.
pub enum Resolution {
    None,
    Unique(Rc<FunctionDecl>, Vec<TypeTag>),
    Ambiguous,
}

/// All named functions declared at the top level, keyed by name and the
/// coarse parameter-kind tuple that distinguishes overloads. Each entry
/// keeps its parameter types alongside the declaration so overload
/// resolution never has to re-derive them (and never has to re-propagate
/// the suffix-parsing failure that produced them, since that already
/// happened once at `declare` time).
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: HashMap<(String, Vec<ParamKind>), (Rc<FunctionDecl>, Vec<TypeTag>)>,
}

impl FunctionTable {
    pub fn new() -> FunctionTable {
        FunctionTable::default()
    }

    /// Register a declaration, rejecting a second definition with the same
    /// name and parameter-kind tuple as a name error (Glyph has no notion of
    /// redefinition shadowing at the top level).
    pub fn declare(&mut self, decl: FunctionDecl) -> Result<(), RuntimeError> {
        let param_types = decl
            .params
            .iter()
            .map(|p| p.type_tag())
            .collect::<Result<Vec<_>, _>>()?;
        let key = Self::key(&decl.name, &param_types);
        if self.functions.contains_key(&key) {
            return Err(RuntimeError::name(
                format!("function '{}' defined more than once", decl.name),
                decl.position.clone(),
            ));
        }
        self.functions.insert(key, (Rc::new(decl), param_types));
        Ok(())
    }

    pub fn lookup(&self, name: &str, param_types: &[TypeTag]) -> Option<Rc<FunctionDecl>> {
        self.functions
            .get(&Self::key(name, param_types))
            .map(|(decl, _)| decl.clone())
    }

    pub fn lookup_main(&self) -> Option<Rc<FunctionDecl>> {
        self.lookup("main", &[])
    }

    /// Resolve a direct call to bare name `name` against its already
    /// evaluated arguments. A nil-valued argument (an unassigned object or
    /// function variable, or the `nil` literal) matches either an
    /// object-typed or a function-typed parameter, which is exactly the
    /// case that can make a call ambiguous between two overloads that differ
    /// only in that one slot.
    pub fn resolve_call(&self, name: &str, args: &[Value]) -> Resolution {
        let mut matches = self
            .functions
            .values()
            .filter(|(decl, param_types)| {
                decl.name == name
                    && param_types.len() == args.len()
                    && param_types.iter().zip(args).all(|(t, a)| arg_matches(t, a))
            });
        match (matches.next(), matches.next()) {
            (None, _) => Resolution::None,
            (Some((decl, param_types)), None) => Resolution::Unique(decl.clone(), param_types.clone()),
            (Some(_), Some(_)) => Resolution::Ambiguous,
        }
    }

    /// Resolve a bare function *reference* (no call, no arguments) by name
    /// alone, for materializing a function value out of a name that is not
    /// a bound variable. Zero or more-than-one overload with this name is a
    /// name error either way; the difference in wording is left to the
    /// caller. The returned signature carries each parameter's
    /// `ref` flag (not just its type), since a function value built this way
    /// may go on to be checked against a function-typed interface field,
    /// which compares `ref`-ness position-by-position.
    pub fn named_overloads(&self, name: &str) -> Vec<(Rc<FunctionDecl>, Vec<ParamSig>)> {
        self.functions
            .values()
            .filter(|(decl, _)| decl.name == name)
            .map(|(decl, params)| (decl.clone(), param_sigs(decl, params)))
            .collect()
    }

    fn key(name: &str, param_types: &[TypeTag]) -> (String, Vec<ParamKind>) {
        (
            name.to_string(),
            param_types.iter().map(TypeTag::param_kind).collect(),
        )
    }
}

/// Zip a declaration's formal parameters with their already-derived types to
/// build the full `(type, ref)` signature `named_overloads` hands back.
fn param_sigs(decl: &FunctionDecl, param_types: &[TypeTag]) -> Vec<ParamSig> {
    decl.params
        .iter()
        .zip(param_types)
        .map(|(param, type_tag)| ParamSig {
            type_tag: type_tag.clone(),
            is_ref: param.is_ref,
        })
        .collect()
}

/// Does an already-evaluated argument value fit a formal parameter's
/// declared type? Object and function parameters each also accept the
/// other's nil, since a nil object and an unset function variable are
/// indistinguishable at the value level until something pins the tag down.
fn arg_matches(expected: &TypeTag, value: &Value) -> bool {
    match (expected, value) {
        (TypeTag::Int, Value::Int(_)) => true,
        (TypeTag::String, Value::Str(_)) => true,
        (TypeTag::Bool, Value::Bool(_)) => true,
        (TypeTag::Object(_), Value::Object(_)) => true,
        (TypeTag::Object(_), Value::Function(FunctionRef::Nil)) => true,
        (TypeTag::Function, Value::Function(_)) => true,
        (TypeTag::Function, Value::Object(id)) => id.is_nil(),
        _ => false,
    }
}

impl Closure {
    pub fn position(&self) -> &Position {
        &self.def.position
    }
}
