//! Structural interfaces: a single uppercase letter names a required field
//! shape, and any heap object whose fields happen to match satisfies it.
//! There is no declared `impl`; conformance is checked lazily, the first
//! time an object is used somewhere an interface is required, and never
//! cached, since an object's fields can change shape between checks.

use std::collections::HashMap;

use crate::ast::Position;
use crate::error::RuntimeError;
use crate::heap::Heap;
use crate::types::{ParamSig, TypeTag};
use crate::value::{FunctionRef, ObjectId, Value};

/// One required field of an interface.
#[derive(Debug, Clone)]
pub enum FieldSpec {
    Var {
        name: String,
        type_tag: TypeTag,
    },
    Func {
        name: String,
        return_type: TypeTag,
        params: Vec<ParamSig>,
    },
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        match self {
            FieldSpec::Var { name, .. } => name,
            FieldSpec::Func { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceDef {
    pub letter: char,
    pub fields: Vec<FieldSpec>,
}

/// All interfaces declared in a program, keyed by their letter.
#[derive(Debug, Default)]
pub struct InterfaceTable {
    interfaces: HashMap<char, InterfaceDef>,
}

impl InterfaceTable {
    pub fn new() -> InterfaceTable {
        InterfaceTable::default()
    }

    pub fn insert(&mut self, def: InterfaceDef) {
        self.interfaces.insert(def.letter, def);
    }

    pub fn get(&self, letter: char) -> Option<&InterfaceDef> {
        self.interfaces.get(&letter)
    }

    /// Does the object at `id` currently have every field `letter`'s
    /// interface requires, each with a compatible type? A `letter` that
    /// names no interface ever declared in the program is a name error: a
    /// field/parameter/variable may reference an interface defined later in
    /// the same file, or even the interface it sits inside of, but it may
    /// never reference one that does not exist at all.
    pub fn object_satisfies(
        &self,
        heap: &Heap,
        id: ObjectId,
        letter: char,
        position: &Position,
    ) -> Result<bool, RuntimeError> {
        if id.is_nil() {
            // nil satisfies every interface: assigning nil to an
            // interface-constrained variable is always legal.
            return Ok(true);
        }
        let Some(def) = self.get(letter) else {
            return Err(RuntimeError::name(
                format!("interface '{letter}' is not defined"),
                position.clone(),
            ));
        };
        for field in &def.fields {
            if !self.object_has_field(heap, id, field, position)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn object_has_field(
        &self,
        heap: &Heap,
        id: ObjectId,
        field: &FieldSpec,
        position: &Position,
    ) -> Result<bool, RuntimeError> {
        let Some(cell) = heap.existing_field_cell(id, field.name()) else {
            return Ok(false);
        };
        let value = cell.get();
        match field {
            FieldSpec::Var { type_tag, .. } => self.value_matches(heap, &value, type_tag, position),
            // Function fields compare the full `(type, ref)` signature of
            // every parameter, position-by-position — not just
            // arity or bare types, so a `ref`-qualified formal never
            // satisfies an interface expecting a by-value one or vice versa.
            FieldSpec::Func { params, .. } => Ok(match value {
                Value::Function(FunctionRef::Named { params: actual, .. }) => actual == *params,
                Value::Function(FunctionRef::Closure(closure)) => closure.params == *params,
                _ => false,
            }),
        }
    }

    /// Does `value`'s own tag already match `expected` (including interface
    /// conformance)? Unlike [`InterfaceTable::check_assignable`], this never
    /// coerces nil's tag — it is for checking an already-stored value (an
    /// object field) against a fixed expectation, not for validating and
    /// normalizing a value about to be stored.
    fn value_matches(
        &self,
        heap: &Heap,
        value: &Value,
        expected: &TypeTag,
        position: &Position,
    ) -> Result<bool, RuntimeError> {
        Ok(match (value, expected) {
            (Value::Int(_), TypeTag::Int) => true,
            (Value::Str(_), TypeTag::String) => true,
            (Value::Bool(_), TypeTag::Bool) => true,
            (Value::Object(_), TypeTag::Object(None)) => true,
            (Value::Object(id), TypeTag::Object(Some(letter))) => {
                return self.object_satisfies(heap, *id, *letter, position)
            }
            (Value::Function(_), TypeTag::Function) => true,
            _ => false,
        })
    }

    /// Validate `value` against a declared `expected` type for a storage
    /// site (assignment, parameter binding, return), returning the value to
    /// actually store. A nil value (the nil object, or an unset function
    /// variable) is generic between object and function until stored: its
    /// tag is rewritten here to match `expected` rather than merely checked,
    /// per the assignment coercion rule. Anything else must already carry
    /// the expected tag exactly (object-vs-object, function-vs-function, or
    /// an exact scalar match); a constrained object's interface is checked
    /// against its *current* fields.
    pub fn check_assignable(
        &self,
        heap: &Heap,
        value: Value,
        expected: &TypeTag,
        position: &Position,
    ) -> Result<Value, RuntimeError> {
        if value.is_nil() {
            return match expected {
                TypeTag::Object(_) => Ok(Value::nil_object()),
                TypeTag::Function => Ok(Value::Function(FunctionRef::Nil)),
                _ => Err(RuntimeError::type_error(
                    format!("cannot assign nil to {expected}"),
                    position.clone(),
                )),
            };
        }
        if self.value_matches(heap, &value, expected, position)? {
            Ok(value)
        } else {
            Err(RuntimeError::type_error(
                format!("cannot assign a {} to {expected}", value.type_tag()),
                position.clone(),
            ))
        }
    }
}
