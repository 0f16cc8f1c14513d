// Quill evaluator - walks expression trees against an environment chain

use crate::runtime::environment::Environment;
use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::stdlib::StandardLibrary;
use crate::runtime::values::{Closure, NativeFunction, Thunk, Value};
use log::trace;
use std::rc::Rc;

/// The tree-walking evaluator. Holds the global environment; every
/// evaluation receives its environment explicitly, so nested calls and
/// closures chain scopes off whichever node they were handed.
///
/// Evaluation is single-threaded, synchronous recursion: depth is bounded by
/// expression nesting and call depth on the host stack, and a failure at any
/// level unwinds through `RuntimeResult` to the immediate caller.
pub struct Evaluator {
    env: Rc<Environment>,
}

impl Evaluator {
    /// Create an evaluator whose global environment holds the bootstrap
    /// natives.
    pub fn new() -> Self {
        Evaluator {
            env: StandardLibrary::create_global_environment(),
        }
    }

    /// Create an evaluator over a prebuilt root environment.
    pub fn with_global_env(env: Rc<Environment>) -> Self {
        Evaluator { env }
    }

    pub fn global_env(&self) -> &Rc<Environment> {
        &self.env
    }

    /// Evaluate an expression against the global environment.
    pub fn evaluate(&self, expr: &Value) -> RuntimeResult<Value> {
        self.eval_expr(expr, &self.env)
    }

    /// Evaluate an expression in a given environment.
    pub fn eval_expr(&self, expr: &Value, env: &Rc<Environment>) -> RuntimeResult<Value> {
        match expr {
            Value::Symbol(sym) => env
                .get(&sym.0)
                .ok_or_else(|| RuntimeError::UndefinedSymbol(sym.clone())),
            Value::Pair(call) => {
                let callee = self.eval_expr(&call.first, env)?;
                match callee {
                    Value::Native(native) => self.call_native(&native, &call.rest, env),
                    Value::Closure(closure) => self.call_closure(&closure, &call.rest, env),
                    other => Err(RuntimeError::NotCallable(other.type_name().to_string())),
                }
            }
            Value::Thunk(thunk) => self.force_thunk(thunk),
            // Literals and already-built procedure values are expressions too.
            _ => Ok(expr.clone()),
        }
    }

    /// Apply a native procedure. The eager convention evaluates every
    /// argument position first; the lazy convention hands the implementation
    /// the raw, unevaluated argument list together with the caller's
    /// environment, so it can evaluate exactly the positions it needs
    /// (conditionals must not touch the untaken branch).
    fn call_native(
        &self,
        native: &NativeFunction,
        args: &Value,
        env: &Rc<Environment>,
    ) -> RuntimeResult<Value> {
        trace!(
            "calling native {} ({})",
            native.name,
            if native.lazy { "lazy" } else { "eager" }
        );
        let params = if native.lazy {
            args.clone()
        } else {
            self.eval_args(args, env)?
        };
        (native.func)(params, env, self)
    }

    /// Apply a user-defined procedure: evaluate (or thunk) the arguments in
    /// the caller's environment, then run the body in a fresh frame chained
    /// on the closure's defining environment. Chaining on the defining
    /// environment, not the caller's, is what makes this lexical rather than
    /// dynamic scoping.
    fn call_closure(
        &self,
        closure: &Rc<Closure>,
        args: &Value,
        env: &Rc<Environment>,
    ) -> RuntimeResult<Value> {
        let params = if closure.lazy {
            self.lazy_args(args, env)?
        } else {
            self.eval_args(args, env)?
        };

        let frame = Environment::with_parent(closure.env.clone());
        let mut cursor = params;
        for name in &closure.params {
            cursor = match cursor {
                Value::Pair(p) => {
                    frame.put(&name.0, p.first.clone());
                    p.rest.clone()
                }
                // Tolerant binding: missing arguments read as nil. Surplus
                // arguments are ignored.
                _ => {
                    frame.put(&name.0, Value::Nil);
                    Value::Nil
                }
            };
        }

        self.eval_expr(&closure.body, &frame)
    }

    /// Evaluate each position of a proper argument list, left to right, each
    /// independently in `env`, producing a list of the same shape and order.
    pub fn eval_args(&self, args: &Value, env: &Rc<Environment>) -> RuntimeResult<Value> {
        match args {
            Value::Nil => Ok(Value::Nil),
            Value::Pair(p) => {
                let first = self.eval_expr(&p.first, env)?;
                let rest = self.eval_args(&p.rest, env)?;
                Ok(Value::cons(first, rest))
            }
            other => Err(RuntimeError::ImproperArgumentList(
                other.type_name().to_string(),
            )),
        }
    }

    /// Lazy counterpart of `eval_args`: same walk, same shape, but each
    /// position becomes its own thunk over the same environment, forced
    /// independently and at most once.
    pub fn lazy_args(&self, args: &Value, env: &Rc<Environment>) -> RuntimeResult<Value> {
        match args {
            Value::Nil => Ok(Value::Nil),
            Value::Pair(p) => {
                let first = Value::Thunk(Rc::new(Thunk::new(p.first.clone(), env.clone())));
                let rest = self.lazy_args(&p.rest, env)?;
                Ok(Value::cons(first, rest))
            }
            other => Err(RuntimeError::ImproperArgumentList(
                other.type_name().to_string(),
            )),
        }
    }

    /// Force a value if it is a thunk; anything else passes through
    /// unchanged. Natives use this to demand lazily-bound arguments.
    pub fn force(&self, value: &Value) -> RuntimeResult<Value> {
        match value {
            Value::Thunk(thunk) => self.force_thunk(thunk),
            _ => Ok(value.clone()),
        }
    }

    fn force_thunk(&self, thunk: &Rc<Thunk>) -> RuntimeResult<Value> {
        if let Some(cached) = thunk.cached() {
            return Ok(cached.clone());
        }
        trace!("forcing {}", thunk.expr());
        let value = self.eval_expr(thunk.expr(), thunk.env())?;
        Ok(thunk.fill(value))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
