//! Central tuning constants for the display, task, and scheduler subsystems.
//!
//! The teacher scatters constants like `MAX_TASKS`/`STACK_SIZE` at the top of
//! the module that owns them; here a single module holds every tunable named
//! by the core so the screen partition and task-table invariants are
//! verifiable by inspection against one source.

/// Display columns.
pub const W: usize = 80;
/// Display rows (row `H-1` is reserved and never part of the text area).
pub const H: usize = 25;

/// First overlay column; `[0, HB_COL)` is the scrolling region.
pub const HB_COL: usize = 60;
/// Width of the HUD rectangle, right-aligned within the overlay columns.
pub const HUD_W: usize = 20;
/// Height of the HUD rectangle, bottom-aligned within the text area.
pub const HUD_H: usize = 6;
/// Overlay lines per heartbeat-style producer; rows `[0, 2*HB_MAX_LINES)`
/// of the overlay columns are reserved for producers.
pub const HB_MAX_LINES: usize = 2;
/// First overlay row used by the `heartbeat0`-class producer.
pub const HB0_ROW_BASE: usize = 0;
/// First overlay row used by the `heartbeat1`-class producer.
pub const HB1_ROW_BASE: usize = 2;

/// Fixed task table size.
pub const MAX_TASKS: usize = 8;
/// Per-task stack size in bytes, 16-byte aligned.
pub const STACK_SIZE: usize = 4096;

/// Default VGA text attribute: light gray on black.
pub const DEFAULT_ATTR: u8 = 0x07;
