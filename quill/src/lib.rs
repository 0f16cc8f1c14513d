// Quill Language Core Library
// Evaluation core for a small, dynamically-typed, Lisp-family expression
// language: the value model, the environment chain, and the tree-walking
// evaluator. Readers, standard-library procedures, and REPLs are external
// collaborators built on top of this crate.
pub mod runtime;

// Re-export the key components so hosts can work from the crate root.
pub use runtime::evaluator::Evaluator;
pub use runtime::{
    Closure, Environment, NativeFunction, Pair, Runtime, RuntimeError, RuntimeResult,
    StandardLibrary, Symbol, Thunk, Value,
};
