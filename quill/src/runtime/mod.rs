// Runtime system for Quill
// This module contains the evaluator, the environment chain, and the value
// model.

pub mod environment;
pub mod error;
pub mod evaluator;
pub mod stdlib;
pub mod values;


pub use environment::Environment;
pub use error::{RuntimeError, RuntimeResult};
pub use evaluator::Evaluator;
pub use stdlib::StandardLibrary;
pub use values::{Closure, NativeFunction, NativeImpl, Pair, Symbol, Thunk, Value};

use std::rc::Rc;

/// Host-facing entry point: owns an evaluator over a bootstrap global
/// environment. An external reader produces `Value` trees; `run` walks them.
pub struct Runtime {
    evaluator: Evaluator,
}

impl Runtime {
    pub fn new() -> Self {
        Runtime {
            evaluator: Evaluator::new(),
        }
    }

    /// A runtime over a root environment the host has already populated.
    pub fn with_global_env(env: Rc<Environment>) -> Self {
        Runtime {
            evaluator: Evaluator::with_global_env(env),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn run(&self, program: &Value) -> RuntimeResult<Value> {
        self.evaluator.evaluate(program)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
