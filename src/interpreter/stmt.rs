//! Statement execution.

use log::trace;

use super::call;
use super::{expr, Flow, Interpreter};
use crate::ast::Stmt;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::types::TypeTag;
use crate::value::Value;

pub(crate) fn exec_stmts(
    interp: &mut Interpreter,
    env: &mut Environment,
    stmts: &[Stmt],
) -> Result<Flow, RuntimeError> {
    for stmt in stmts {
        match exec_stmt(interp, env, stmt)? {
            Flow::Normal => continue,
            flow @ Flow::Return(_) => return Ok(flow),
        }
    }
    Ok(Flow::Normal)
}

/// Run `stmts` in a fresh nested block, so `bvar` definitions inside it do
/// not escape.
fn exec_block(interp: &mut Interpreter, env: &mut Environment, stmts: &[Stmt]) -> Result<Flow, RuntimeError> {
    env.push_block();
    let result = exec_stmts(interp, env, stmts);
    env.pop_block();
    result
}

fn exec_stmt(interp: &mut Interpreter, env: &mut Environment, stmt: &Stmt) -> Result<Flow, RuntimeError> {
    match stmt {
        Stmt::VarDef { name, position } => {
            let tag = TypeTag::from_identifier_suffix(name).ok_or_else(|| {
                RuntimeError::type_error(format!("'{name}' has no valid type suffix"), position.clone())
            })?;
            if !env.define_in_function_scope(name, Value::default_for(&tag)) {
                return Err(RuntimeError::name(
                    format!("variable '{name}' is already defined"),
                    position.clone(),
                ));
            }
            Ok(Flow::Normal)
        }
        Stmt::BlockVarDef { name, position } => {
            let tag = TypeTag::from_identifier_suffix(name).ok_or_else(|| {
                RuntimeError::type_error(format!("'{name}' has no valid type suffix"), position.clone())
            })?;
            if !env.define_in_current_scope(name, Value::default_for(&tag)) {
                return Err(RuntimeError::name(
                    format!("variable '{name}' is already defined"),
                    position.clone(),
                ));
            }
            Ok(Flow::Normal)
        }
        Stmt::Assign { target, value, position } => {
            let new_value = expr::eval_expr(interp, env, value)?;
            let expected = TypeTag::from_identifier_suffix(target.last().expect("qname is non-empty"))
                .ok_or_else(|| {
                    RuntimeError::type_error(
                        format!("'{}' has no valid type suffix", target.last().unwrap()),
                        position.clone(),
                    )
                })?;
            let coerced = interp
                .interfaces
                .check_assignable(&interp.heap, new_value, &expected, position)?;
            let cell = call::qname_cell(interp, env, target, position, true)?;
            cell.set(coerced);
            Ok(Flow::Normal)
        }
        Stmt::If {
            condition,
            then_body,
            else_body,
            position,
        } => {
            let cond = expr::eval_bool(interp, env, condition, position)?;
            trace!("if ({cond})");
            if cond {
                exec_block(interp, env, then_body)
            } else {
                exec_block(interp, env, else_body)
            }
        }
        Stmt::While {
            condition,
            body,
            position,
        } => {
            loop {
                if !expr::eval_bool(interp, env, condition, position)? {
                    break;
                }
                match exec_block(interp, env, body)? {
                    Flow::Normal => continue,
                    flow @ Flow::Return(_) => return Ok(flow),
                }
            }
            Ok(Flow::Normal)
        }
        Stmt::Return { value, position } => {
            let declared = interp
                .return_types
                .last()
                .cloned()
                .expect("a return statement only ever executes inside a function body");
            if declared == TypeTag::Void {
                if value.is_some() {
                    return Err(RuntimeError::type_error(
                        "a void function cannot return a value",
                        position.clone(),
                    ));
                }
                return Ok(Flow::Return(Value::Void));
            }
            let raw = match value {
                Some(expr) => expr::eval_expr(interp, env, expr)?,
                None => Value::default_for(&declared),
            };
            let coerced = interp
                .interfaces
                .check_assignable(&interp.heap, raw, &declared, position)?;
            Ok(Flow::Return(coerced))
        }
        Stmt::Expr(expr) => {
            expr::eval_expr(interp, env, expr)?;
            Ok(Flow::Normal)
        }
    }
}
