//! Round-robin cooperative scheduler.
//!
//! Grounded on the shape of the teacher's `pick_next`/`schedule_inner` pair —
//! demote the outgoing task, scan for the next eligible one, context-switch —
//! collapsed from a multi-CPU, 128-priority-level, work-stealing scheduler
//! down to the single-CPU strict round-robin spec.md §4.F specifies. There is
//! no lock here, unlike the teacher's `Spinlock<Scheduler>`: interrupts are
//! disabled for the kernel's entire lifetime (spec.md §5), so nothing can
//! ever observe the task table mid-mutation.

use super::{TaskState, TASKS};
use crate::arch::x86::switch::ctx_switch;
use crate::config::MAX_TASKS;
use crate::display::{HudEntry, DISPLAY};

/// Redraw the HUD (a no-op unless the task table marked it dirty since the
/// last draw).
fn draw_hud() {
    let mut entries: [Option<HudEntry>; MAX_TASKS] = [None; MAX_TASKS];
    let mut n = 0;
    super::for_each_live(|id, state, name| {
        if n < MAX_TASKS {
            entries[n] = Some(HudEntry {
                id: id as u8,
                state_char: state.as_char(),
                name,
            });
            n += 1;
        }
    });
    unsafe {
        DISPLAY.hud_draw(entries[..n].iter().filter_map(|e| *e));
    }
}

/// Demote the running task, round-robin to the next READY one, and
/// context-switch. If no task is READY, restores the previous one (or
/// returns, idle, if there was none) — spec.md §4.F's five-step algorithm.
pub fn schedule() {
    unsafe {
        let prev = TASKS.current;
        if let Some(p) = prev {
            if TASKS.descriptors[p].state == TaskState::Running {
                TASKS.descriptors[p].state = TaskState::Ready;
            }
        }

        let start = prev.map(|p| (p + 1) % MAX_TASKS).unwrap_or(0);
        let mut next = None;
        for offset in 0..MAX_TASKS {
            let candidate = (start + offset) % MAX_TASKS;
            if TASKS.descriptors[candidate].state == TaskState::Ready {
                next = Some(candidate);
                break;
            }
        }

        let next = match next {
            Some(n) => n,
            None => {
                if let Some(p) = prev {
                    if TASKS.descriptors[p].state != TaskState::Dead {
                        TASKS.descriptors[p].state = TaskState::Running;
                    }
                }
                return;
            }
        };

        TASKS.current = Some(next);
        TASKS.descriptors[next].state = TaskState::Running;

        draw_hud();

        // First-ever switch: the outgoing context has nowhere meaningful to
        // go, so it's discarded into a throwaway slot (spec.md §4.F step 5).
        static mut DISCARDED_SP: u32 = 0;
        let old_sp_slot: *mut u32 = match prev {
            Some(p) => &mut TASKS.descriptors[p].saved_sp,
            None => core::ptr::addr_of_mut!(DISCARDED_SP),
        };
        let new_sp = TASKS.descriptors[next].saved_sp;

        ctx_switch(old_sp_slot, new_sp);
    }
}

/// `yield()` is exactly `schedule()` (spec.md §4.F).
pub fn yield_now() {
    schedule();
}
