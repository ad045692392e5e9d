//! Tree-walking evaluation of parsed programs.

pub mod environment;
pub mod error;
pub mod interpreter;
pub mod io;
mod ops;
mod stack;

pub use environment::{Environment, ScopeId};
pub use error::{EvalResult, RuntimeError};
pub use interpreter::{EvalConfig, Interpreter};
pub use io::{Io, MemoryIo, StdIo};
