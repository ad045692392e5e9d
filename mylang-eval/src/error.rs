use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("undefined variable '{0}'")]
    UndefinedVariable(String),
    #[error("undefined function '{0}'")]
    UndefinedFunction(String),
    /// The parser never produces such an operator.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
    #[error("type error: unsupported operand types for '{op}': {lhs} and {rhs}")]
    BinaryType {
        op: String,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("type error: bad operand type for unary '{op}': {operand}")]
    UnaryType { op: String, operand: &'static str },
    #[error("division by zero")]
    DivisionByZero,
    #[error("built-in '{name}' takes exactly 1 argument ({found} given)")]
    BuiltinArity { name: &'static str, found: usize },
    #[error("maximum call depth of {0} exceeded")]
    CallDepthExceeded(usize),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            RuntimeError::BinaryType { .. } | RuntimeError::UnaryType { .. }
        )
    }
}

pub type EvalResult<T> = Result<T, RuntimeError>;
