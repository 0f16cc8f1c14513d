//! Quill bootstrap library.
//!
//! The core registers exactly one native procedure, `eval`, which exposes the
//! evaluator itself. Everything else a full language ships (arithmetic, I/O,
//! list operations, a `lambda` constructor) is provided by host collaborators
//! through the same `register` call, during start-up, before any evaluation
//! begins.

use crate::runtime::environment::Environment;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::evaluator::Evaluator;
use crate::runtime::values::{NativeFunction, NativeImpl, Value};
use log::debug;
use std::rc::Rc;

/// Builds the root environment and holds the bootstrap natives.
///
/// Registration is a start-up-only, single-threaded phase; afterwards the
/// root frame is read purely through ordinary symbol lookup. There is no
/// separate lookup path for natives.
pub struct StandardLibrary;

impl StandardLibrary {
    /// Creates a fresh root environment populated with the bootstrap
    /// natives.
    pub fn create_global_environment() -> Rc<Environment> {
        let env = Environment::new();
        Self::load_bootstrap_functions(&env);
        env
    }

    fn load_bootstrap_functions(env: &Rc<Environment>) {
        Self::register(env, "eval", Rc::new(Self::eval_native), true);
    }

    /// Insert a native procedure into `env`'s own frame under `name`.
    /// Re-registration under the same name overwrites silently: last writer
    /// wins.
    pub fn register(env: &Rc<Environment>, name: &str, func: Rc<NativeImpl>, lazy: bool) {
        debug!(
            "registering native {} ({})",
            name,
            if lazy { "lazy" } else { "eager" }
        );
        env.put(
            name,
            Value::Native(NativeFunction {
                name: name.to_string(),
                func,
                lazy,
            }),
        );
    }

    /// `(eval expr)` - evaluate the value of `expr` in the caller's
    /// environment. Lazy convention: `args` arrives as the raw, unevaluated
    /// argument list, so this body evaluates the argument exactly once to
    /// obtain the expression tree, then walks that tree. This is the
    /// metacircular entry point for hosts and for evaluated code alike.
    fn eval_native(
        args: Value,
        env: &Rc<Environment>,
        evaluator: &Evaluator,
    ) -> RuntimeResult<Value> {
        let expr = match &args {
            Value::Pair(p) => evaluator.eval_expr(&p.first, env)?,
            _ => return Err(RuntimeError::new("eval expects one argument")),
        };
        evaluator.eval_expr(&expr, env)
    }
}
