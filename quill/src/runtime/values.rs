// Runtime value system for Quill
// Expression trees and evaluation results share this one type: code is data.

use crate::runtime::environment::Environment;
use crate::runtime::error::RuntimeResult;
use crate::runtime::evaluator::Evaluator;
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of runtime values. Every value is immutable once built
/// except a thunk's memo cell, which is written at most once.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Integer(i64),
    Float(f64),
    String(String),
    Symbol(Symbol),
    Pair(Rc<Pair>),
    Map(HashMap<String, Value>),
    Vector(Vec<Value>),
    Closure(Rc<Closure>),
    Native(NativeFunction),
    Thunk(Rc<Thunk>),
}

/// A cons cell. Chains of pairs terminated by `Nil` form proper lists;
/// `rest` may hold any other value for dotted structures.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub first: Value,
    pub rest: Value,
}

impl Value {
    pub fn cons(first: Value, rest: Value) -> Value {
        Value::Pair(Rc::new(Pair { first, rest }))
    }

    /// Build a proper list from the items, in order.
    pub fn list(items: Vec<Value>) -> Value {
        items
            .into_iter()
            .rev()
            .fold(Value::Nil, |rest, first| Value::cons(first, rest))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Map(_) => "map",
            Value::Vector(_) => "vector",
            Value::Closure(_) => "closure",
            Value::Native(_) => "native-function",
            Value::Thunk(_) => "lazy",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Pair(a), Value::Pair(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            // Procedures and thunks compare by identity, natives by name and
            // convention, never by function pointer.
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name && a.lazy == b.lazy,
            (Value::Thunk(a), Value::Thunk(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Debug rendering. Proper lists render flat with the nil marker as the
/// terminator: `(a b _)`. Not used for any equality or dispatch decision.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "(_)"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{:.6}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Symbol(s) => write!(f, "{}", s.0),
            Value::Pair(p) => {
                let rest = p.rest.to_string();
                write!(f, "({} {}", p.first, rest.get(1..).unwrap_or(""))
            }
            Value::Map(_) => write!(f, "#<map>"),
            Value::Vector(_) => write!(f, "#<vector>"),
            Value::Closure(_) => write!(f, "#<closure>"),
            Value::Native(n) => write!(f, "#<native-fn {}>", n.name),
            Value::Thunk(t) => match t.cached() {
                Some(v) => write!(f, "(lazy: {})", v),
                None => write!(f, "(lazy: {})", t.expr()),
            },
        }
    }
}

/// A user-defined procedure: parameter names, a body expression tree, and the
/// environment node it was defined under. The environment is shared, not
/// copied; that sharing is what makes lexical closures work.
#[derive(Clone)]
pub struct Closure {
    pub params: Vec<Symbol>,
    pub body: Value,
    pub env: Rc<Environment>,
    pub lazy: bool,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("params", &self.params)
            .field("lazy", &self.lazy)
            .finish_non_exhaustive()
    }
}

/// A native procedure implementation. Receives the argument list (evaluated
/// for the eager convention, raw for the lazy one), the caller's environment,
/// and the evaluator for re-entry.
pub type NativeImpl = dyn Fn(Value, &Rc<Environment>, &Evaluator) -> RuntimeResult<Value>;

#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub func: Rc<NativeImpl>,
    pub lazy: bool,
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("lazy", &self.lazy)
            .finish_non_exhaustive()
    }
}

/// A deferred evaluation: an expression and the environment it was deferred
/// under, both fixed at construction. The memo cell moves once from empty to
/// forced; re-forcing returns the cached value without re-evaluating.
pub struct Thunk {
    expr: Value,
    env: Rc<Environment>,
    memo: OnceCell<Value>,
}

impl Thunk {
    pub fn new(expr: Value, env: Rc<Environment>) -> Self {
        Thunk {
            expr,
            env,
            memo: OnceCell::new(),
        }
    }

    pub fn expr(&self) -> &Value {
        &self.expr
    }

    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }

    pub fn is_forced(&self) -> bool {
        self.memo.get().is_some()
    }

    pub fn cached(&self) -> Option<&Value> {
        self.memo.get()
    }

    /// Memoize a computed result. If a result is already present it wins and
    /// `value` is dropped, keeping forcing idempotent.
    pub(crate) fn fill(&self, value: Value) -> Value {
        self.memo.get_or_init(|| value).clone()
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("forced", &self.is_forced())
            .finish_non_exhaustive()
    }
}
