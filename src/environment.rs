//! Lexical scoping: frames, blocks, and cell lookup.
//!
//! A running function owns a stack of [`Frame`]s. Normally there is exactly
//! one: calling an ordinary function pushes a single fresh frame and pops it
//! on return, so callees never see a caller's locals. Invoking a *closure*
//! is different: the interpreter swaps in the closure's captured frame stack
//! (see [`Environment::snapshot`]) before pushing the call's own frame, so a
//! lambda body can still see the variables that were in scope where it was
//! created.
//!
//! Within a frame, a function-scope `var` always lands in the frame's first
//! block (`define_in_function_scope`), while a block-scope `bvar` lands in
//! whichever block is innermost at the point it executes
//! (`define_in_current_scope`). Lookup walks outward: innermost block of the
//! innermost (most recently pushed) frame first, then out through blocks and
//! frames in turn.

use std::collections::HashMap;

use log::debug;

use crate::value::{Cell, Value};

#[derive(Debug, Default, Clone)]
struct Block {
    variables: HashMap<String, Cell>,
}

#[derive(Debug, Clone)]
struct Frame {
    blocks: Vec<Block>,
}

impl Frame {
    fn new() -> Frame {
        Frame {
            blocks: vec![Block::default()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    /// A fresh environment for an ordinary (non-closure) call: one frame,
    /// one block, nothing visible from any caller.
    pub fn new_call() -> Environment {
        Environment {
            frames: vec![Frame::new()],
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn push_block(&mut self) {
        self.frames
            .last_mut()
            .expect("environment always has a frame while a function runs")
            .blocks
            .push(Block::default());
    }

    pub fn pop_block(&mut self) {
        self.frames
            .last_mut()
            .expect("environment always has a frame while a function runs")
            .blocks
            .pop();
    }

    /// Binds `name` in the innermost frame's first block: what a `var`
    /// statement does, regardless of how deeply nested in `if`/`while`
    /// bodies it textually appears. Returns `false` (and does not rebind)
    /// if `name` is already defined there — a function's variables, unlike
    /// nested blocks' `bvar`s, may not be redeclared.
    pub fn define_in_function_scope(&mut self, name: &str, value: Value) -> bool {
        let frame = self
            .frames
            .last_mut()
            .expect("environment always has a frame while a function runs");
        if frame.blocks[0].variables.contains_key(name) {
            return false;
        }
        frame.blocks[0].variables.insert(name.to_string(), Cell::new(value));
        true
    }

    /// Binds `name` in the innermost frame's innermost block: what a `bvar`
    /// statement does. Returns `false` (and does not rebind) if `name` is
    /// already defined in that same block.
    pub fn define_in_current_scope(&mut self, name: &str, value: Value) -> bool {
        let frame = self
            .frames
            .last_mut()
            .expect("environment always has a frame while a function runs");
        let block = frame
            .blocks
            .last_mut()
            .expect("a frame always has at least one block");
        if block.variables.contains_key(name) {
            return false;
        }
        block.variables.insert(name.to_string(), Cell::new(value));
        true
    }

    /// Binds an already-shared cell (used for reference parameters, which
    /// alias the caller's cell instead of copying its value).
    pub fn bind_cell(&mut self, name: &str, cell: Cell) {
        let frame = self
            .frames
            .last_mut()
            .expect("environment always has a frame while a function runs");
        frame.blocks[0].variables.insert(name.to_string(), cell);
    }

    /// Find `name`'s cell, searching outward from the innermost block of the
    /// innermost frame.
    pub fn find_cell(&self, name: &str) -> Option<Cell> {
        for frame in self.frames.iter().rev() {
            for block in frame.blocks.iter().rev() {
                if let Some(cell) = block.variables.get(name) {
                    return Some(cell.clone());
                }
            }
        }
        None
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find_cell(name).is_some()
    }

    /// Deep-copy snapshot taken at lambda-creation time. Scalar (int,
    /// string, bool) bindings get their own fresh cell holding a copy of the
    /// current value; object and function bindings share the original
    /// cell, so writes through either side of the capture remain visible to
    /// the other.
    pub fn snapshot(&self) -> Environment {
        debug!("capturing closure environment ({} frame(s))", self.frames.len());
        let frames = self
            .frames
            .iter()
            .map(|frame| Frame {
                blocks: frame
                    .blocks
                    .iter()
                    .map(|block| Block {
                        variables: block
                            .variables
                            .iter()
                            .map(|(name, cell)| {
                                let snapshot_cell = match cell.get() {
                                    Value::Int(_) | Value::Str(_) | Value::Bool(_) => {
                                        cell.snapshot_value()
                                    }
                                    Value::Object(_) | Value::Function(_) => cell.clone(),
                                };
                                (name.clone(), snapshot_cell)
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Environment { frames }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_scope_var_lands_in_first_block_from_nested_block() {
        let mut env = Environment::new_call();
        env.push_block();
        env.push_block();
        env.define_in_function_scope("xi", Value::Int(1));
        env.pop_block();
        env.pop_block();
        assert_eq!(env.find_cell("xi").unwrap().get(), Value::Int(1));
    }

    #[test]
    fn block_scope_var_does_not_escape_its_block() {
        let mut env = Environment::new_call();
        env.push_block();
        env.define_in_current_scope("xi", Value::Int(1));
        assert!(env.exists("xi"));
        env.pop_block();
        assert!(!env.exists("xi"));
    }

    #[test]
    fn snapshot_shares_object_cells_but_copies_scalars() {
        let mut env = Environment::new_call();
        env.define_in_function_scope("counti", Value::Int(1));
        env.define_in_function_scope("selfo", Value::nil_object());
        let snap = env.snapshot();

        env.find_cell("counti").unwrap().set(Value::Int(99));
        assert_eq!(snap.find_cell("counti").unwrap().get(), Value::Int(1));

        let original_obj = env.find_cell("selfo").unwrap();
        let snap_obj = snap.find_cell("selfo").unwrap();
        assert!(original_obj.ptr_eq(&snap_obj));
    }
}
