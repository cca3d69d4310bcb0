//! Runtime values and the shared-mutable cell they live in.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::functions::Closure;
use crate::types::{ParamSig, TypeTag};

/// Identifies an object on the heap. `0` is the nil object: the default
/// value of every object-typed variable before it is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub const NIL: ObjectId = ObjectId(0);

    pub fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "nil")
        } else {
            write!(f, "object#{}", self.0)
        }
    }
}

/// A value bound to a function-typed variable or passed where a function is
/// expected.
#[derive(Debug, Clone)]
pub enum FunctionRef {
    /// The default value of every function-typed variable: no function
    /// bound yet.
    Nil,
    /// A reference to a named, possibly overloaded, top-level or interface
    /// function. Two `Named` values are equal when they name the same
    /// declaration (by parameter-type tuple, since overloads share a name).
    Named {
        name: String,
        params: Vec<ParamSig>,
    },
    /// A lambda's captured closure. Two `Closure` values are equal only when
    /// they are the very same closure instance.
    Closure(Rc<Closure>),
}

impl PartialEq for FunctionRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FunctionRef::Nil, FunctionRef::Nil) => true,
            (
                FunctionRef::Named { name: n1, params: p1 },
                FunctionRef::Named { name: n2, params: p2 },
            ) => n1 == n2 && p1 == p2,
            (FunctionRef::Closure(a), FunctionRef::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A runtime value. `Void` is included only as the transient result of
/// calling a void function; it is never storable in a `Cell` (every site
/// that accepts a value for storage rejects it first).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Object(ObjectId),
    Function(FunctionRef),
    Void,
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Int(_) => TypeTag::Int,
            Value::Str(_) => TypeTag::String,
            Value::Bool(_) => TypeTag::Bool,
            Value::Object(_) => TypeTag::Object(None),
            Value::Function(_) => TypeTag::Function,
            Value::Void => TypeTag::Void,
        }
    }

    /// The value `nil` evaluates to: the nil object, so it is assignable to
    /// any object-typed variable regardless of interface constraint.
    pub fn nil_object() -> Value {
        Value::Object(ObjectId::NIL)
    }

    pub fn is_nil_object(&self) -> bool {
        matches!(self, Value::Object(id) if id.is_nil())
    }

    /// True for either flavour of nil: a nil object or a nil function. Both
    /// are "the same" nil as far as assignment coercion is concerned — only
    /// the literal's surface tag differs.
    pub fn is_nil(&self) -> bool {
        self.is_nil_object() || matches!(self, Value::Function(FunctionRef::Nil))
    }

    pub fn default_for(tag: &TypeTag) -> Value {
        match tag {
            TypeTag::Int => Value::Int(0),
            TypeTag::String => Value::Str(String::new()),
            TypeTag::Bool => Value::Bool(false),
            TypeTag::Void => Value::Void,
            TypeTag::Object(_) => Value::nil_object(),
            TypeTag::Function => Value::Function(FunctionRef::Nil),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Object(id) => write!(f, "{id}"),
            Value::Function(FunctionRef::Nil) => write!(f, "nil"),
            Value::Function(FunctionRef::Named { name, .. }) => write!(f, "function {name}"),
            Value::Function(FunctionRef::Closure(_)) => write!(f, "function <lambda>"),
            Value::Void => write!(f, "void"),
        }
    }
}

/// Shared mutable storage for one variable binding or object field. Cloning
/// a `Cell` clones the handle, not the value: every clone observes the same
/// writes, which is how reference parameters and shared object fields work.
#[derive(Debug, Clone)]
pub struct Cell(Rc<RefCell<Value>>);

impl Cell {
    pub fn new(value: Value) -> Cell {
        Cell(Rc::new(RefCell::new(value)))
    }

    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    /// A fresh cell holding a copy of this one's current value. Used when a
    /// closure snapshots a scalar binding instead of sharing it.
    pub fn snapshot_value(&self) -> Cell {
        Cell::new(self.get())
    }

    pub fn ptr_eq(&self, other: &Cell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
