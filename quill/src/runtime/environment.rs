// Environment for variable bindings and scope management

use crate::runtime::error::{RuntimeError, RuntimeResult};
use crate::runtime::values::Value;
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// One lexical scope: a mutable frame plus the chain of enclosing scopes.
///
/// Nodes are handed out as `Rc<Environment>` and shared, not copied: every
/// closure and thunk created while a frame was live holds the same node, and
/// a `put` through any holder is visible to all of them. A frame is mutated
/// only through `put` on the node that owns it; lookups never write.
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// A fresh root: empty frame, no parent.
    pub fn new() -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// A child scope over `parent`. The parent is not mutated.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Resolve `name` starting at this frame and walking the parent chain.
    /// Absence is a normal outcome at this layer, not an error.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.get(name))
    }

    /// Insert or overwrite `name` in this frame only. Ancestor frames are
    /// never touched; shadowing is the only way to redefine an outer name.
    pub fn put(&self, name: &str, value: Value) {
        trace!("put {} = {}", name, value);
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// The enclosing scope. Popping past the root is a host error.
    pub fn parent(&self) -> RuntimeResult<Rc<Environment>> {
        self.parent.clone().ok_or_else(|| {
            RuntimeError::StructuralError("cannot pop past the root environment".to_string())
        })
    }

    /// Whether `name` is bound in this frame (parents are not consulted).
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }
}
