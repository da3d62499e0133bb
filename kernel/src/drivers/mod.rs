//! Hardware peripheral drivers: PS/2 keyboard, COM1 serial (diagnostics).
//!
//! The VGA text array is owned by [`crate::display`] rather than living here —
//! it's as much "the core's output model" as a peripheral driver, so it sits
//! next to the scheduler and editor instead of under `drivers`.

pub mod keyboard;
pub mod serial;
