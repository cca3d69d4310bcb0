//! Expression evaluation.

use std::rc::Rc;

use super::{call, Interpreter};
use crate::ast::{BinaryOp, Expr, Position, UnaryOp};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::types::TypeTag;
use crate::value::{FunctionRef, Value};

pub(crate) fn eval_expr(
    interp: &mut Interpreter,
    env: &mut Environment,
    expr: &Expr,
) -> Result<Value, RuntimeError> {
    match expr {
        Expr::IntLit(i, _) => Ok(Value::Int(*i)),
        Expr::StringLit(s, _) => Ok(Value::Str(s.clone())),
        Expr::BoolLit(b, _) => Ok(Value::Bool(*b)),
        Expr::NilLit(_) => Ok(Value::nil_object()),
        Expr::NewObject(_) => Ok(Value::Object(call::new_object(interp))),
        Expr::Name(qname, position) => call::read_qname(interp, env, qname, position),
        Expr::Call { callee, args, position } => call::eval_call(interp, env, callee, args, position),
        Expr::Convert { to_type, value, position } => {
            let inner = eval_expr(interp, env, value)?;
            convert_value(to_type, inner, position)
        }
        Expr::Unary { op, operand, position } => {
            let value = eval_expr(interp, env, operand)?;
            eval_unary_op(*op, value, position)
        }
        Expr::Binary { op, left, right, position } => eval_binary(interp, env, *op, left, right, position),
        Expr::Lambda(def) => Ok(Value::Function(FunctionRef::Closure(call::make_closure(
            env,
            Rc::clone(def),
        )?))),
    }
}

pub(crate) fn eval_bool(
    interp: &mut Interpreter,
    env: &mut Environment,
    expr: &Expr,
    position: &Position,
) -> Result<bool, RuntimeError> {
    match eval_expr(interp, env, expr)? {
        Value::Bool(b) => Ok(b),
        other => Err(RuntimeError::type_error(
            format!("expected bool, found {}", other.type_tag()),
            position.clone(),
        )),
    }
}

fn eval_binary(
    interp: &mut Interpreter,
    env: &mut Environment,
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    position: &Position,
) -> Result<Value, RuntimeError> {
    if matches!(op, BinaryOp::And | BinaryOp::Or) {
        let lhs = eval_bool(interp, env, left, position)?;
        if op == BinaryOp::And && !lhs {
            return Ok(Value::Bool(false));
        }
        if op == BinaryOp::Or && lhs {
            return Ok(Value::Bool(true));
        }
        let rhs = eval_bool(interp, env, right, position)?;
        return Ok(Value::Bool(rhs));
    }

    let lhs = eval_expr(interp, env, left)?;
    let rhs = eval_expr(interp, env, right)?;
    eval_binary_op(op, lhs, rhs, position)
}

fn eval_unary_op(op: UnaryOp, value: Value, position: &Position) -> Result<Value, RuntimeError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Int(i)) => Ok(Value::Int(-i)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnaryOp::Neg, other) => Err(RuntimeError::type_error(
            format!("cannot negate a {}", other.type_tag()),
            position.clone(),
        )),
        (UnaryOp::Not, other) => Err(RuntimeError::type_error(
            format!("cannot negate a {}", other.type_tag()),
            position.clone(),
        )),
    }
}

fn eval_binary_op(op: BinaryOp, lhs: Value, rhs: Value, position: &Position) -> Result<Value, RuntimeError> {
    use BinaryOp::*;
    match op {
        Add => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (a, b) => Err(mismatched_operands("+", &a, &b, position)),
        },
        Sub => int_op(lhs, rhs, position, "-", |a, b| Ok(a - b)),
        Mul => int_op(lhs, rhs, position, "*", |a, b| Ok(a * b)),
        Div => int_op(lhs, rhs, position, "/", |a, b| {
            if b == 0 {
                Err(RuntimeError::fault("division by zero", position.clone()))
            } else {
                Ok(a / b)
            }
        }),
        Mod => int_op(lhs, rhs, position, "%", |a, b| {
            if b == 0 {
                Err(RuntimeError::fault("modulo by zero", position.clone()))
            } else {
                Ok(a % b)
            }
        }),
        Lt => int_cmp(lhs, rhs, position, "<", |a, b| a < b),
        Lte => int_cmp(lhs, rhs, position, "<=", |a, b| a <= b),
        Gt => int_cmp(lhs, rhs, position, ">", |a, b| a > b),
        Gte => int_cmp(lhs, rhs, position, ">=", |a, b| a >= b),
        Eq => Ok(Value::Bool(eval_equality(lhs, rhs))),
        Neq => Ok(Value::Bool(!eval_equality(lhs, rhs))),
        And | Or => unreachable!("short-circuited in eval_binary"),
    }
}

fn int_op(
    lhs: Value,
    rhs: Value,
    position: &Position,
    symbol: &str,
    f: impl FnOnce(i64, i64) -> Result<i64, RuntimeError>,
) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => f(a, b).map(Value::Int),
        (a, b) => Err(mismatched_operands(symbol, &a, &b, position)),
    }
}

fn int_cmp(
    lhs: Value,
    rhs: Value,
    position: &Position,
    symbol: &str,
    f: impl FnOnce(i64, i64) -> bool,
) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(f(a, b))),
        (a, b) => Err(mismatched_operands(symbol, &a, &b, position)),
    }
}

fn mismatched_operands(symbol: &str, lhs: &Value, rhs: &Value, position: &Position) -> RuntimeError {
    RuntimeError::type_error(
        format!(
            "cannot apply '{symbol}' to a {} and a {}",
            lhs.type_tag(),
            rhs.type_tag()
        ),
        position.clone(),
    )
}

/// `==`/`!=` never fail: a nil value (object or function, the two flavours
/// are interchangeable for this purpose) compares equal only to another
/// nil; two non-nil values of the same tag compare by payload (object
/// identity for objects, closure identity for functions); anything else —
/// including a plain tag mismatch — compares unequal rather than erroring.
fn eval_equality(lhs: Value, rhs: Value) -> bool {
    if lhs.is_nil() && rhs.is_nil() {
        return true;
    }
    if lhs.is_nil() || rhs.is_nil() {
        return false;
    }
    match (&lhs, &rhs) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => a == b,
        (Value::Function(a), Value::Function(b)) => a == b,
        _ => false,
    }
}

/// The `convert` builtin's coercion matrix. Converting to (or from) an
/// object, function or void type is always a type error: there is no
/// sensible scalar encoding for any of those.
fn convert_value(to_type: &TypeTag, value: Value, position: &Position) -> Result<Value, RuntimeError> {
    match (to_type, &value) {
        (TypeTag::Int, Value::Int(_)) => Ok(value),
        (TypeTag::Int, Value::Bool(b)) => Ok(Value::Int(if *b { 1 } else { 0 })),
        (TypeTag::Int, Value::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::type_error(format!("cannot convert '{s}' to int"), position.clone())),
        (TypeTag::String, Value::Str(_)) => Ok(value),
        (TypeTag::String, Value::Int(i)) => Ok(Value::Str(i.to_string())),
        (TypeTag::String, Value::Bool(b)) => Ok(Value::Str(b.to_string())),
        (TypeTag::Bool, Value::Bool(_)) => Ok(value),
        (TypeTag::Bool, Value::Int(i)) => Ok(Value::Bool(*i != 0)),
        (TypeTag::Bool, Value::Str(s)) => Ok(Value::Bool(!s.is_empty())),
        _ => Err(RuntimeError::type_error(
            format!("cannot convert a {} to {to_type}", value.type_tag()),
            position.clone(),
        )),
    }
}
