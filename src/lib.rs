//! pipeshell - Pipe editor text through shell commands and route the output back
//!
//! The engine lives in `pipeshell-core`; this package re-exports it.
pub use pipeshell_core::*;
