//! Qualified-name resolution and function invocation: parameter binding,
//! reference aliasing, the `selfo` receiver, and closure activation.

use std::rc::Rc;

use log::debug;

use super::{stmt, Flow, Interpreter};
use crate::ast::{AnonFunction, Expr, FunctionDecl, Position, QName};
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::functions::{Closure, Resolution};
use crate::types::{ParamSig, TypeTag};
use crate::value::{Cell, FunctionRef, ObjectId, Value};

/// Read the value a qualified name currently denotes, walking object fields
/// left to right. A single-segment name that is not a bound variable falls
/// back to materializing a function reference out of a top-level function
/// of that name; a dotted name never does, since a field access only ever
/// denotes a stored value.
pub(crate) fn read_qname(
    interp: &Interpreter,
    env: &Environment,
    qname: &QName,
    position: &Position,
) -> Result<Value, RuntimeError> {
    if qname.len() == 1 {
        if let Some(cell) = env.find_cell(&qname[0]) {
            return Ok(cell.get());
        }
        return materialize_function_reference(interp, &qname[0], position);
    }

    let mut cell = env.find_cell(&qname[0]).ok_or_else(|| {
        RuntimeError::name(format!("undefined variable '{}'", qname[0]), position.clone())
    })?;
    let mut value = cell.get();
    for seg in &qname[1..] {
        let id = match value {
            Value::Object(id) => id,
            other => {
                return Err(RuntimeError::type_error(
                    format!("cannot access field '{seg}' on a {}", other.type_tag()),
                    position.clone(),
                ))
            }
        };
        if id.is_nil() {
            return Err(RuntimeError::fault(
                format!("cannot access field '{seg}' on nil"),
                position.clone(),
            ));
        }
        cell = interp.heap.existing_field_cell(id, seg).ok_or_else(|| {
            RuntimeError::name(format!("object has no field '{seg}'"), position.clone())
        })?;
        value = cell.get();
    }
    Ok(value)
}

/// Wrap a bare name that names no variable as a `Named` function value, the
/// way passing a function by name (rather than calling it) works. Zero
/// matching declarations or more than one with no way to prefer between
/// them are both name errors.
fn materialize_function_reference(
    interp: &Interpreter,
    name: &str,
    position: &Position,
) -> Result<Value, RuntimeError> {
    let mut overloads = interp.functions.named_overloads(name);
    match overloads.len() {
        0 => Err(RuntimeError::name(format!("undefined name '{name}'"), position.clone())),
        1 => {
            let (_, params) = overloads.remove(0);
            Ok(Value::Function(FunctionRef::Named {
                name: name.to_string(),
                params,
            }))
        }
        _ => Err(RuntimeError::name(
            format!("'{name}' is ambiguous: more than one function has this name"),
            position.clone(),
        )),
    }
}

/// Resolve the cell a qualified name's last segment denotes. For a
/// single-segment name this is just the local variable's cell; for a
/// dotted name it is a field cell on the object the prefix resolves to.
/// `create_if_missing` controls whether an absent field is created (as
/// assignment does) or reported as a name error (as a read does).
pub(crate) fn qname_cell(
    interp: &mut Interpreter,
    env: &Environment,
    qname: &QName,
    position: &Position,
    create_if_missing: bool,
) -> Result<Cell, RuntimeError> {
    if qname.len() == 1 {
        return env.find_cell(&qname[0]).ok_or_else(|| {
            RuntimeError::name(format!("undefined variable '{}'", qname[0]), position.clone())
        });
    }
    let owner_value = read_qname(interp, env, &qname[..qname.len() - 1], position)?;
    let Value::Object(owner_id) = owner_value else {
        return Err(RuntimeError::type_error(
            "cannot access a field of a non-object value",
            position.clone(),
        ));
    };
    if owner_id.is_nil() {
        return Err(RuntimeError::fault(
            "cannot access a field on nil",
            position.clone(),
        ));
    }
    let field = qname.last().expect("qname is non-empty");
    if let Some(cell) = interp.heap.existing_field_cell(owner_id, field) {
        Ok(cell)
    } else if create_if_missing {
        interp.heap.set_field(owner_id, field, Value::nil_object());
        Ok(interp
            .heap
            .existing_field_cell(owner_id, field)
            .expect("field was just inserted"))
    } else {
        Err(RuntimeError::name(
            format!("object has no field '{field}'"),
            position.clone(),
        ))
    }
}

/// Allocate a fresh, empty object.
pub(crate) fn new_object(interp: &mut Interpreter) -> ObjectId {
    interp.heap.allocate()
}

/// One evaluated call argument: its value, the cell it came from when the
/// argument expression was itself a qualified name (so a `ref` parameter
/// can alias it), and that qname's statically declared type (so a `ref`
/// parameter with an interface annotation can check the caller's side
/// strictly, rather than just the value's current shape).
pub(crate) struct Argument {
    pub value: Value,
    pub cell: Option<Cell>,
    pub declared: Option<TypeTag>,
}

pub(crate) fn eval_args(
    interp: &mut Interpreter,
    env: &mut Environment,
    args: &[Expr],
) -> Result<Vec<Argument>, RuntimeError> {
    args.iter()
        .map(|arg| {
            if let Expr::Name(qname, position) = arg {
                if qname.len() == 1 && !env.exists(&qname[0]) {
                    // not a bound variable: fall back to materializing a
                    // function reference instead of treating this as an
                    // undefined-variable error, so a bare function name can
                    // be passed as a callback argument.
                    let value = super::expr::eval_expr(interp, env, arg)?;
                    return Ok(Argument { value, cell: None, declared: None });
                }
                let cell = qname_cell(interp, env, qname, position, false)?;
                let last = qname.last().expect("qname is non-empty");
                let declared = TypeTag::from_identifier_suffix(last).ok_or_else(|| {
                    RuntimeError::type_error(format!("'{last}' has no valid type suffix"), position.clone())
                })?;
                Ok(Argument {
                    value: cell.get(),
                    cell: Some(cell),
                    declared: Some(declared),
                })
            } else {
                let value = super::expr::eval_expr(interp, env, arg)?;
                Ok(Argument { value, cell: None, declared: None })
            }
        })
        .collect()
}

/// Resolve and invoke a call expression's callee: a bare name may be either
/// a direct named-function call or a call through a local function-typed
/// variable; a dotted name calls a function-valued field on the object the
/// prefix resolves to, binding `selfo` to that object for the callee.
pub(crate) fn eval_call(
    interp: &mut Interpreter,
    env: &mut Environment,
    callee: &QName,
    args: &[Expr],
    position: &Position,
) -> Result<Value, RuntimeError> {
    let evaluated = eval_args(interp, env, args)?;

    // The built-in names short-circuit before the void-argument check below:
    // they take any value, including the result of a void call, the same way
    // `print`/`inputi`/`inputs` never inspect their arguments' types up front.
    if callee.len() == 1 && !env.exists(&callee[0]) {
        if let Some(result) = call_builtin(interp, &callee[0], &evaluated, position)? {
            return Ok(result);
        }
    }
    if evaluated.iter().any(|a| matches!(a.value, Value::Void)) {
        return Err(RuntimeError::type_error(
            "a void value cannot be used as an argument",
            position.clone(),
        ));
    }

    if callee.len() == 1 {
        let name = &callee[0];
        if let Some(cell) = env.find_cell(name) {
            let Value::Function(fref) = cell.get() else {
                return Err(RuntimeError::type_error(
                    format!("'{name}' is not a function"),
                    position.clone(),
                ));
            };
            return invoke_value(interp, &fref, evaluated, None, position);
        }
        let arg_values = evaluated.iter().map(|a| a.value.clone()).collect::<Vec<_>>();
        return match interp.functions.resolve_call(name, &arg_values) {
            Resolution::Unique(decl, _) => invoke_named_args(interp, decl, evaluated, None, position),
            Resolution::None => Err(RuntimeError::name(
                format!("undefined function '{name}'"),
                position.clone(),
            )),
            Resolution::Ambiguous => Err(RuntimeError::name(
                format!("call to '{name}' is ambiguous"),
                position.clone(),
            )),
        };
    }

    let owner_value = read_qname(interp, env, &callee[..callee.len() - 1], position)?;
    let Value::Object(owner_id) = owner_value else {
        return Err(RuntimeError::type_error(
            "cannot call a field of a non-object value",
            position.clone(),
        ));
    };
    if owner_id.is_nil() {
        return Err(RuntimeError::fault(
            "cannot call a field on nil",
            position.clone(),
        ));
    }
    let field = callee.last().expect("qname is non-empty");
    let cell = interp.heap.existing_field_cell(owner_id, field).ok_or_else(|| {
        RuntimeError::name(format!("object has no field '{field}'"), position.clone())
    })?;
    let Value::Function(fref) = cell.get() else {
        return Err(RuntimeError::type_error(
            format!("field '{field}' is not a function"),
            position.clone(),
        ));
    };
    invoke_value(interp, &fref, evaluated, Some(owner_id), position)
}

/// The host I/O primitives: `print` writes every argument's display form
/// concatenated on one line, `inputi`/`inputs` read one line and parse or
/// pass it through. These are reserved names, not declarable as user
/// functions (`FunctionTable::declare` never sees them).
fn call_builtin(
    interp: &Interpreter,
    name: &str,
    args: &[Argument],
    position: &Position,
) -> Result<Option<Value>, RuntimeError> {
    match name {
        "print" => {
            let line: String = args.iter().map(|a| a.value.to_string()).collect();
            interp.host().output(&line);
            Ok(Some(Value::Void))
        }
        "inputi" => {
            print_prompt(interp, args, position)?;
            let line = interp.host().get_input().unwrap_or_default();
            let parsed = line.trim().parse::<i64>().map_err(|_| {
                RuntimeError::fault(format!("'{line}' is not a valid integer"), position.clone())
            })?;
            Ok(Some(Value::Int(parsed)))
        }
        "inputs" => {
            print_prompt(interp, args, position)?;
            let line = interp.host().get_input().unwrap_or_default();
            Ok(Some(Value::Str(line)))
        }
        _ => Ok(None),
    }
}

/// `inputi`/`inputs` take at most one argument, printed as a prompt before
/// the read; a second argument is a name error, mirroring `print`'s own
/// argument-concatenation display but capped at one.
fn print_prompt(interp: &Interpreter, args: &[Argument], position: &Position) -> Result<(), RuntimeError> {
    match args {
        [] => Ok(()),
        [prompt] => {
            interp.host().output(&prompt.value.to_string());
            Ok(())
        }
        _ => Err(RuntimeError::name(
            "input functions take at most one argument",
            position.clone(),
        )),
    }
}

fn invoke_value(
    interp: &mut Interpreter,
    fref: &FunctionRef,
    args: Vec<Argument>,
    owner: Option<ObjectId>,
    position: &Position,
) -> Result<Value, RuntimeError> {
    match fref {
        FunctionRef::Nil => Err(RuntimeError::fault(
            "call through a function variable that was never assigned",
            position.clone(),
        )),
        FunctionRef::Named { name, params } => {
            let param_types: Vec<TypeTag> = params.iter().map(|p| p.type_tag.clone()).collect();
            let decl = interp.functions.lookup(name, &param_types).ok_or_else(|| {
                RuntimeError::name(format!("undefined function '{name}'"), position.clone())
            })?;
            invoke_named_args(interp, decl, args, owner, position)
        }
        FunctionRef::Closure(closure) => invoke_closure_args(interp, Rc::clone(closure), args, owner, position),
    }
}

/// Bind each actual argument to its formal parameter: coerce/check its
/// value against the declared type (the same rule used for plain
/// assignment), then either alias the caller's cell (`ref`) or seed a
/// fresh one with the checked value.
fn bind_params(
    interp: &Interpreter,
    env: &mut Environment,
    params: &[crate::ast::ParamDecl],
    args: Vec<Argument>,
    position: &Position,
) -> Result<(), RuntimeError> {
    if params.len() != args.len() {
        return Err(RuntimeError::type_error(
            format!("expected {} argument(s), found {}", params.len(), args.len()),
            position.clone(),
        ));
    }
    for (param, arg) in params.iter().zip(args.into_iter()) {
        let expected = param.type_tag()?;
        let declared = arg.declared.clone();
        let checked = interp
            .interfaces
            .check_assignable(&interp.heap, arg.value, &expected, position)?;
        if param.is_ref {
            let cell = arg.cell.ok_or_else(|| {
                RuntimeError::type_error(
                    format!("'{}' is a ref parameter and needs a variable argument", param.name),
                    position.clone(),
                )
            })?;
            if let (TypeTag::Object(Some(expected_letter)), Some(TypeTag::Object(Some(declared_letter)))) =
                (&expected, &declared)
            {
                if declared_letter != expected_letter {
                    return Err(RuntimeError::type_error(
                        format!(
                            "ref argument for '{}' is declared {declared_letter}, expected {expected_letter}",
                            param.name
                        ),
                        position.clone(),
                    ));
                }
            }
            env.bind_cell(&param.name, cell);
        } else if !env.define_in_function_scope(&param.name, checked) {
            return Err(RuntimeError::name(
                format!("parameter '{}' is already defined", param.name),
                position.clone(),
            ));
        }
    }
    Ok(())
}

pub(crate) fn invoke_named(
    interp: &mut Interpreter,
    decl: Rc<FunctionDecl>,
    args: Vec<Value>,
    arg_cells: Vec<Option<Cell>>,
    owner: Option<ObjectId>,
    position: &Position,
) -> Result<Value, RuntimeError> {
    let wrapped = args
        .into_iter()
        .zip(arg_cells.into_iter().chain(std::iter::repeat(None)))
        .map(|(value, cell)| Argument { value, cell, declared: None })
        .collect();
    invoke_named_args(interp, decl, wrapped, owner, position)
}

fn invoke_named_args(
    interp: &mut Interpreter,
    decl: Rc<FunctionDecl>,
    args: Vec<Argument>,
    owner: Option<ObjectId>,
    position: &Position,
) -> Result<Value, RuntimeError> {
    debug!("calling {}", decl.name);
    let mut env = Environment::new_call();
    if let Some(owner_id) = owner {
        env.define_in_function_scope("selfo", Value::Object(owner_id));
    }
    bind_params(interp, &mut env, &decl.params, args, position)?;
    run_body(interp, &mut env, &decl.body, &decl.return_type, position)
}

pub(crate) fn invoke_closure(
    interp: &mut Interpreter,
    closure: Rc<Closure>,
    args: Vec<Value>,
    arg_cells: Vec<Option<Cell>>,
    position: &Position,
) -> Result<Value, RuntimeError> {
    let wrapped = args
        .into_iter()
        .zip(arg_cells.into_iter().chain(std::iter::repeat(None)))
        .map(|(value, cell)| Argument { value, cell, declared: None })
        .collect();
    invoke_closure_args(interp, closure, wrapped, None, position)
}

fn invoke_closure_args(
    interp: &mut Interpreter,
    closure: Rc<Closure>,
    args: Vec<Argument>,
    owner: Option<ObjectId>,
    position: &Position,
) -> Result<Value, RuntimeError> {
    debug!("calling lambda captured at {:?}", closure.def.position);
    let mut env = closure.captured_env.snapshot();
    env.push_frame();
    if let Some(owner_id) = owner {
        env.define_in_function_scope("selfo", Value::Object(owner_id));
    }
    bind_params(interp, &mut env, &closure.def.params, args, position)?;
    run_body(interp, &mut env, &closure.def.body, &closure.def.return_type, position)
}

/// Run a function body with `return_type` pushed onto the interpreter's
/// return-type stack, so nested `return` statements (see
/// `stmt::exec_stmt`'s `Stmt::Return` arm) know what to default to or
/// coerce against. Popped again on every exit path, including error ones.
fn run_body(
    interp: &mut Interpreter,
    env: &mut Environment,
    body: &[crate::ast::Stmt],
    return_type: &TypeTag,
    position: &Position,
) -> Result<Value, RuntimeError> {
    interp.return_types.push(return_type.clone());
    let outcome = run_body_inner(interp, env, body, return_type, position);
    interp.return_types.pop();
    outcome
}

fn run_body_inner(
    interp: &mut Interpreter,
    env: &mut Environment,
    body: &[crate::ast::Stmt],
    return_type: &TypeTag,
    _position: &Position,
) -> Result<Value, RuntimeError> {
    match stmt::exec_stmts(interp, env, body)? {
        Flow::Return(value) => Ok(value),
        // Falling off the end without a `return` is not an error: the
        // function simply yields its declared type's default value, the
        // same value a bare `return;` with no expression would produce.
        Flow::Normal => Ok(Value::default_for(return_type)),
    }
}

/// Build a closure value for a `func(...) {...}` expression, snapshotting
/// the environment it was created in.
pub(crate) fn make_closure(env: &Environment, def: Rc<AnonFunction>) -> Result<Rc<Closure>, RuntimeError> {
    let params = def
        .params
        .iter()
        .map(|p| {
            Ok(ParamSig {
                type_tag: p.type_tag()?,
                is_ref: p.is_ref,
            })
        })
        .collect::<Result<Vec<_>, RuntimeError>>()?;
    Ok(Rc::new(Closure {
        params,
        def,
        captured_env: env.snapshot(),
    }))
}
