//! Architecture-specific primitives.
//!
//! Everything below `x86` is privileged: port I/O, the raw text-cell array,
//! and the context-switch leaf routine. Nothing outside `arch` performs an
//! `in`/`out`/stack-pointer-swap instruction directly.

pub mod x86;
