//! Core error type.
//!
//! Capture misuse (double `begin_capture`, emitting outside a capture,
//! closing a block that was never opened) indicates a bug in the host Rust
//! program and aborts via `panic!`/`assert!`, per spec.md §7. `CoreError` is
//! reserved for conditions a caller might reasonably want to recover from,
//! such as validating a finished tree before handing it to an emitter.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A structural invariant from spec.md §3 was violated (wrong child
    /// count, missing symbol, wrong root shape).
    #[error("AST invariant violated: {reason}")]
    InvariantViolated { reason: String },
}
