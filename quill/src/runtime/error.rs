// Error handling for the Quill runtime

use crate::runtime::values::Symbol;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Failures surfaced during evaluation. Every failure propagates unchanged to
/// the immediate caller; nothing is retried or recovered inside the core, and
/// how an error reaches the user is the host's decision.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// No binding for the symbol in any frame of the chain.
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(Symbol),

    /// The callee position of a call evaluated to a non-procedure.
    #[error("not callable: {0}")]
    NotCallable(String),

    /// Misuse of the environment chain by the host, e.g. popping past the
    /// root. Fatal to the operation attempting it.
    #[error("environment structure error: {0}")]
    StructuralError(String),

    /// An argument list ended in a non-nil, non-pair tail.
    #[error("improper argument list: unexpected {0} tail")]
    ImproperArgumentList(String),

    /// Failure signaled by a native procedure, propagated uninterpreted.
    #[error("{0}")]
    Generic(String),
}

impl RuntimeError {
    pub fn new(message: &str) -> RuntimeError {
        RuntimeError::Generic(message.to_string())
    }
}
