//! The I/O façade the interpreter talks to, so that `print`/`input` and
//! fatal-error reporting go through one seam that tests can substitute.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use log::error;

use crate::error::RuntimeError;

/// Everything the interpreter needs from its surrounding process: writing a
/// line of output, reading a line of input, and being told about a fatal
/// error exactly once, right before the run aborts.
pub trait Host {
    fn output(&self, line: &str);
    fn get_input(&self) -> Option<String>;
    fn report_error(&self, error: &RuntimeError);
}

/// The real, interactive host: stdout for output, stdin for input, `log`
/// for error reporting.
pub struct ConsoleHost {
    trace: bool,
}

impl ConsoleHost {
    pub fn new(trace: bool) -> ConsoleHost {
        ConsoleHost { trace }
    }
}

impl Host for ConsoleHost {
    fn output(&self, line: &str) {
        println!("{line}");
        if self.trace {
            let _ = io::stdout().flush();
        }
    }

    fn get_input(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(_) => None,
        }
    }

    fn report_error(&self, error: &RuntimeError) {
        error!("{error}");
        eprintln!("{error}");
    }
}

/// An in-memory host for tests: output is captured, input is drawn from a
/// canned queue, and the last reported error (if any) is recorded instead of
/// printed.
#[derive(Default)]
pub struct ScriptedHost {
    output: RefCell<Vec<String>>,
    input: RefCell<VecDeque<String>>,
    last_error: RefCell<Option<RuntimeError>>,
}

impl ScriptedHost {
    pub fn new(canned_input: impl IntoIterator<Item = String>) -> ScriptedHost {
        ScriptedHost {
            output: RefCell::new(Vec::new()),
            input: RefCell::new(canned_input.into_iter().collect()),
            last_error: RefCell::new(None),
        }
    }

    pub fn output_lines(&self) -> Vec<String> {
        self.output.borrow().clone()
    }

    pub fn last_error(&self) -> Option<RuntimeError> {
        self.last_error.borrow().clone()
    }
}

impl Host for ScriptedHost {
    fn output(&self, line: &str) {
        self.output.borrow_mut().push(line.to_string());
    }

    fn get_input(&self) -> Option<String> {
        self.input.borrow_mut().pop_front()
    }

    fn report_error(&self, error: &RuntimeError) {
        error!("{error}");
        *self.last_error.borrow_mut() = Some(error.clone());
    }
}
