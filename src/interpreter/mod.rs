//! The tree-walking evaluator: builds the interface and function tables
//! from a parsed program, then runs `main`.

mod call;
mod expr;
mod stmt;

use std::rc::Rc;

use log::{debug, trace};

use std::collections::HashSet;

use crate::ast::{FieldDecl, Program};
use crate::error::RuntimeError;
use crate::functions::FunctionTable;
use crate::heap::Heap;
use crate::host::Host;
use crate::interfaces::{FieldSpec, InterfaceDef, InterfaceTable};
use crate::types::TypeTag;
use crate::value::Value;

/// Non-local control flow produced by executing a statement: either it ran
/// to completion, or a `return` unwound out of it.
pub(crate) enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter<'h> {
    pub(crate) interfaces: InterfaceTable,
    pub(crate) functions: FunctionTable,
    pub(crate) heap: Heap,
    /// The declared return type of whichever function body is currently
    /// executing, one entry per call on the stack. Consulted by bare
    /// `return;` statements to know what default value to produce, and by
    /// `return expr;` to know what to coerce and check the result against.
    pub(crate) return_types: Vec<TypeTag>,
    host: &'h dyn Host,
}

impl<'h> Interpreter<'h> {
    pub fn new(host: &'h dyn Host) -> Interpreter<'h> {
        Interpreter {
            interfaces: InterfaceTable::new(),
            functions: FunctionTable::new(),
            heap: Heap::new(),
            return_types: Vec::new(),
            host,
        }
    }

    /// Register every interface and function declared in `program`.
    pub fn load(&mut self, program: Program) -> Result<(), RuntimeError> {
        for interface in program.interfaces {
            if self.interfaces.get(interface.letter).is_some() {
                return Err(RuntimeError::name(
                    format!("interface '{}' defined more than once", interface.letter),
                    interface.position.clone(),
                ));
            }
            let mut seen_fields = HashSet::new();
            let fields = interface
                .fields
                .iter()
                .map(|f| {
                    if !seen_fields.insert(f.name().to_string()) {
                        return Err(RuntimeError::name(
                            format!("field '{}' defined more than once in interface '{}'", f.name(), interface.letter),
                            interface.position.clone(),
                        ));
                    }
                    match f {
                        FieldDecl::Var { name, .. } => {
                            let type_tag = TypeTag::from_identifier_suffix(name).ok_or_else(|| {
                                RuntimeError::type_error(
                                    format!("interface field '{name}' has no valid type suffix"),
                                    interface.position.clone(),
                                )
                            })?;
                            Ok(FieldSpec::Var {
                                name: name.clone(),
                                type_tag,
                            })
                        }
                        FieldDecl::Func { name, params, .. } => {
                            let return_type = TypeTag::from_identifier_suffix_allow_void(name)
                                .ok_or_else(|| {
                                    RuntimeError::type_error(
                                        format!("interface method '{name}' has no valid type suffix"),
                                        interface.position.clone(),
                                    )
                                })?;
                            let params = params
                                .iter()
                                .map(|p| {
                                    Ok(crate::types::ParamSig {
                                        type_tag: p.type_tag()?,
                                        is_ref: p.is_ref,
                                    })
                                })
                                .collect::<Result<Vec<_>, RuntimeError>>()?;
                            Ok(FieldSpec::Func {
                                name: name.clone(),
                                return_type,
                                params,
                            })
                        }
                    }
                })
                .collect::<Result<Vec<_>, RuntimeError>>()?;
            debug!("registering interface {}", interface.letter);
            self.interfaces.insert(InterfaceDef {
                letter: interface.letter,
                fields,
            });
        }
        for function in program.functions {
            if function.name == "main" && !function.params.is_empty() {
                return Err(RuntimeError::name(
                    "main function cannot have parameters",
                    function.position.clone(),
                ));
            }
            debug!("registering function {}", function.name);
            self.functions.declare(function)?;
        }
        Ok(())
    }

    /// Run `main` with no arguments, reporting and returning any error
    /// through the host exactly once.
    pub fn run(&mut self) -> Result<Value, RuntimeError> {
        let result = self.run_inner();
        if let Err(error) = &result {
            self.host.report_error(error);
        }
        result
    }

    fn run_inner(&mut self) -> Result<Value, RuntimeError> {
        let main = self.functions.lookup_main().ok_or_else(|| {
            RuntimeError::name("no 'main' function defined", ("<program>".to_string(), 0, 0))
        })?;
        trace!("invoking main");
        let position = main.position.clone();
        call::invoke_named(self, Rc::clone(&main), Vec::new(), Vec::new(), None, &position)
    }

    pub fn host(&self) -> &'h dyn Host {
        self.host
    }
}
