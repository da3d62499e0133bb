//! Task descriptor table: creation, kill, and the accessors the scheduler,
//! shell, and HUD need.
//!
//! Task identity is a plain index into a fixed array (spec.md §9: "use an
//! index into the fixed task table rather than a self-pointer; the table
//! owns all task state"). Every mutation here runs with interrupts
//! permanently disabled (see `kmain`), so — unlike the teacher's
//! `Spinlock`-guarded `Scheduler` — no lock is needed around the table: the
//! single core never observes it mid-mutation.

pub mod context;
pub mod scheduler;

use crate::config::{HB0_ROW_BASE, HB1_ROW_BASE, HB_MAX_LINES, MAX_TASKS, STACK_SIZE};
use crate::display::DISPLAY;

pub type TaskId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Dead,
    Ready,
    Running,
    Blocked,
}

impl TaskState {
    pub fn as_char(self) -> char {
        match self {
            TaskState::Ready => 'R',
            TaskState::Running => '*',
            TaskState::Blocked => 'B',
            TaskState::Dead => 'D',
        }
    }
}

/// Typed failure reason for [`task_create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnError {
    NoFreeSlot,
}

/// Typed failure reason for [`kill`]. The shell renders every variant as the
/// same lumped `Usage: kill <id>` message (spec.md §7); the distinction is
/// internal precision, not user-visible behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillError {
    InvalidId,
    AlreadyDead,
    CannotKillSelf,
}

#[derive(Clone, Copy)]
struct TaskDescriptor {
    state: TaskState,
    saved_sp: u32,
    name: &'static str,
    entry: Option<fn()>,
}

impl TaskDescriptor {
    const fn empty() -> Self {
        TaskDescriptor {
            state: TaskState::Dead,
            saved_sp: 0,
            name: "",
            entry: None,
        }
    }
}

struct TaskStack([u8; STACK_SIZE]);

struct TaskTable {
    descriptors: [TaskDescriptor; MAX_TASKS],
    stacks: [TaskStack; MAX_TASKS],
    /// `None` means "no task has yet run" (spec.md §3's `-1`).
    current: Option<TaskId>,
}

static mut TASKS: TaskTable = TaskTable {
    descriptors: [TaskDescriptor::empty(); MAX_TASKS],
    stacks: [TaskStack([0u8; STACK_SIZE]); MAX_TASKS],
    current: None,
};

/// Allocate the lowest DEAD slot, prepare its stack, and mark it READY.
pub fn task_create(entry: fn(), name: &'static str) -> Result<TaskId, SpawnError> {
    unsafe {
        let id = TASKS
            .descriptors
            .iter()
            .position(|d| d.state == TaskState::Dead)
            .ok_or(SpawnError::NoFreeSlot)?;

        let sp = context::prepare_stack(&mut TASKS.stacks[id].0, context::trampoline);

        TASKS.descriptors[id] = TaskDescriptor {
            state: TaskState::Ready,
            saved_sp: sp,
            name,
            entry: Some(entry),
        };

        DISPLAY.hud_mark_dirty();
        Ok(id)
    }
}

/// `kill(id)` succeeds iff `id` is valid, not DEAD, and not the currently
/// running task (spec.md §4.E's kill policy).
pub fn kill(id: TaskId) -> Result<(), KillError> {
    unsafe {
        if id >= MAX_TASKS {
            return Err(KillError::InvalidId);
        }
        if TASKS.descriptors[id].state == TaskState::Dead {
            return Err(KillError::AlreadyDead);
        }
        if TASKS.current == Some(id) {
            return Err(KillError::CannotKillSelf);
        }

        if let Some(row) = heartbeat_overlay_row(id, TASKS.descriptors[id].name) {
            DISPLAY.overlay_clear_line(row);
        }

        TASKS.descriptors[id] = TaskDescriptor::empty();
        DISPLAY.hud_mark_dirty();
        Ok(())
    }
}

/// Mark the currently running task DEAD and hand off forever. Called by the
/// trampoline when a task's entry function returns (spec.md: "a returning
/// task does not fall off its stack"). Resolves the source's open question
/// in favor of transitioning to DEAD rather than looping on a live slot.
pub fn task_exit() -> ! {
    unsafe {
        if let Some(id) = TASKS.current {
            TASKS.descriptors[id] = TaskDescriptor::empty();
            DISPLAY.hud_mark_dirty();
        }
    }
    loop {
        scheduler::yield_now();
    }
}

/// The task the trampoline should invoke on this (first) run.
pub(crate) fn current_entry() -> Option<fn()> {
    unsafe { TASKS.current.and_then(|id| TASKS.descriptors[id].entry) }
}

pub(crate) fn current_id() -> Option<TaskId> {
    unsafe { TASKS.current }
}

fn descriptor_at(id: TaskId) -> Option<(TaskState, &'static str)> {
    unsafe {
        if id >= MAX_TASKS {
            return None;
        }
        let d = TASKS.descriptors[id];
        Some((d.state, d.name))
    }
}

/// 0-based rank of task `id` among all non-DEAD tasks sharing its `name`,
/// counting only tasks with a strictly lower id (spec.md §4.G's "instance
/// index"). Shared by the heartbeat bodies (to pick their overlay row) and
/// by `kill` (to find the row to clear).
pub fn instance_index(id: TaskId, name: &str) -> usize {
    unsafe {
        TASKS.descriptors[..id]
            .iter()
            .filter(|d| d.state != TaskState::Dead && d.name == name)
            .count()
    }
}

/// Overlay row a live `heartbeat0`/`heartbeat1`-named task at `id` currently
/// occupies, if any — the row `kill` must clear (spec.md §4.E/§4.G).
fn heartbeat_overlay_row(id: TaskId, name: &str) -> Option<usize> {
    let row_base = match name {
        "heartbeat0" => HB0_ROW_BASE,
        "heartbeat1" => HB1_ROW_BASE,
        _ => return None,
    };
    let index = instance_index(id, name);
    if index < HB_MAX_LINES {
        Some(row_base + index)
    } else {
        None
    }
}

/// Enumerate non-DEAD tasks as `(id, state, name)`, for `ps` and the HUD.
pub fn for_each_live<F: FnMut(TaskId, TaskState, &'static str)>(mut f: F) {
    for id in 0..MAX_TASKS {
        if let Some((state, name)) = descriptor_at(id) {
            if state != TaskState::Dead {
                f(id, state, name);
            }
        }
    }
}
