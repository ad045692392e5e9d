//! Stack growth for deeply nested evaluation.
//!
//! Every nested statement, expression and call adds host stack frames. Evaluation entry points
//! run through [`ensure_sufficient_stack`], which moves to a fresh heap-allocated segment when
//! the current one runs low, so call nesting is bounded by [`EvalConfig`] only.
//!
//! [`EvalConfig`]: crate::EvalConfig

/// Minimum stack space to keep available.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
