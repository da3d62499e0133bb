//! The shell task and the two heartbeat task bodies.
//!
//! Grounded on `apps/shell.rs` for the command-matching shape (`"help"` /
//! `"clear"` / `"exit"` arms) and `apps/text_terminal.rs` for the
//! poll-keyboard / dispatch-on-Enter / redraw-prompt loop structure — run
//! here as a cooperative task body instead of a freestanding `run()` loop
//! driven by an interrupt.

use crate::config::{HB0_ROW_BASE, HB1_ROW_BASE, HB_COL, HB_MAX_LINES};
use crate::display::DISPLAY;
use crate::editor::read_line;
use crate::task::scheduler::yield_now;
use crate::task::{self, KillError, SpawnError};

const PROMPT: &str = "> ";
const LINE_CAP: usize = 128;

fn print(s: &str) {
    unsafe {
        for b in s.bytes() {
            DISPLAY.put(b);
        }
    }
}

fn println(s: &str) {
    print(s);
    unsafe {
        DISPLAY.put(b'\n');
    }
}

/// Shell task body: prompt, read a line, dispatch, yield, forever.
pub fn shell_main() {
    loop {
        print(PROMPT);
        let mut buf = [0u8; LINE_CAP];
        let len = read_line(&mut buf, LINE_CAP);
        let line = core::str::from_utf8(&buf[..len]).unwrap_or("");
        dispatch(line);
        yield_now();
    }
}

fn dispatch(line: &str) {
    let line = line.trim();
    if line == "thanks" {
        println("You're welcome!");
    } else if line == "exit" {
        println("Shutting down...");
        crate::arch::x86::shutdown::shutdown();
    } else if line == "clear" {
        unsafe {
            DISPLAY.clear_text_area();
            DISPLAY.hud_mark_dirty();
        }
    } else if line == "ps" {
        cmd_ps();
    } else if line == "yield" {
        println("(yield)");
    } else if line == "log" {
        cmd_log();
    } else if let Some(id_str) = line.strip_prefix("kill ") {
        cmd_kill(id_str.trim());
    } else if line == "spawn hb0" {
        cmd_spawn(heartbeat0, "heartbeat0", "hb0");
    } else if line == "spawn hb1" {
        cmd_spawn(heartbeat1, "heartbeat1", "hb1");
    } else {
        println("Unknown command");
    }
}

fn cmd_ps() {
    task::for_each_live(|id, state, name| {
        let mut buf = [0u8; 3 + 1 + 1 + 1 + 32];
        let mut n = 0;
        n += write_decimal(&mut buf[n..], id as u32);
        buf[n] = b' ';
        n += 1;
        buf[n] = state.as_char() as u8;
        n += 1;
        buf[n] = b' ';
        n += 1;
        for &b in name.as_bytes() {
            if n >= buf.len() {
                break;
            }
            buf[n] = b;
            n += 1;
        }
        print(core::str::from_utf8(&buf[..n]).unwrap_or(""));
        unsafe {
            DISPLAY.put(b'\n');
        }
    });
}

fn cmd_kill(arg: &str) {
    match parse_decimal(arg) {
        Some(id) => match task::kill(id) {
            Ok(()) => println("Killed task."),
            Err(KillError::InvalidId) => println("Usage: kill <id>"),
            Err(KillError::AlreadyDead) => println("Usage: kill <id>"),
            Err(KillError::CannotKillSelf) => println("Usage: kill <id>"),
        },
        None => println("Usage: kill <id>"),
    }
}

fn cmd_spawn(entry: fn(), name: &'static str, label: &str) {
    match task::task_create(entry, name) {
        Ok(_) => {
            print("Spawned ");
            print(label);
            println(".");
        }
        Err(SpawnError::NoFreeSlot) => println("No free task slots."),
    }
}

fn cmd_log() {
    let mut buf = [0u8; 1024];
    let n = crate::drivers::serial::read_log(&mut buf);
    print(core::str::from_utf8(&buf[..n]).unwrap_or("<non-utf8 log data>"));
    unsafe {
        DISPLAY.put(b'\n');
    }
}

fn parse_decimal(s: &str) -> Option<usize> {
    if s.is_empty() {
        return None;
    }
    let mut v: usize = 0;
    for b in s.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        v = v.checked_mul(10)?.checked_add((b - b'0') as usize)?;
    }
    Some(v)
}

fn write_decimal(buf: &mut [u8], mut v: u32) -> usize {
    if v == 0 {
        buf[0] = b'0';
        return 1;
    }
    let mut digits = [0u8; 10];
    let mut n = 0;
    while v > 0 {
        digits[n] = b'0' + (v % 10) as u8;
        v /= 10;
        n += 1;
    }
    for i in 0..n {
        buf[i] = digits[n - 1 - i];
    }
    n
}

/// Busy-delay that yields every `1 << 14` iterations (spec.md §4.G).
fn heartbeat_delay() {
    for _ in 0..(1u32 << 14) {
        core::hint::spin_loop();
    }
    yield_now();
}

/// Redraw this heartbeat's overlay line — `HB<n> #<id> : <counter mod 10>` —
/// at `row_base + instance_index`, as long as the instance index still fits
/// within `HB_MAX_LINES` (spec.md §4.G).
fn heartbeat_body(n: u8, row_base: usize, name: &'static str) {
    let mut counter: u32 = 0;
    loop {
        if let Some(id) = task::current_id() {
            let index = task::instance_index(id, name);
            if index < HB_MAX_LINES {
                let mut buf = [0u8; 24];
                let mut written = 0;
                buf[written] = b'H';
                written += 1;
                buf[written] = b'B';
                written += 1;
                buf[written] = b'0' + n;
                written += 1;
                buf[written] = b' ';
                written += 1;
                buf[written] = b'#';
                written += 1;
                written += write_decimal(&mut buf[written..], id as u32);
                buf[written] = b' ';
                written += 1;
                buf[written] = b':';
                written += 1;
                buf[written] = b' ';
                written += 1;
                written += write_decimal(&mut buf[written..], counter % 10);

                unsafe {
                    DISPLAY.write_at(row_base + index, HB_COL, &buf[..written]);
                }
            }
        }
        counter = counter.wrapping_add(1);
        heartbeat_delay();
    }
}

pub fn heartbeat0() {
    heartbeat_body(0, HB0_ROW_BASE, "heartbeat0");
}

pub fn heartbeat1() {
    heartbeat_body(1, HB1_ROW_BASE, "heartbeat1");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_rejects_non_digits_and_empty() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("12a"), None);
        assert_eq!(parse_decimal("42"), Some(42));
        assert_eq!(parse_decimal("0"), Some(0));
    }

    #[test]
    fn write_decimal_round_trips_small_values() {
        let mut buf = [0u8; 8];
        let n = write_decimal(&mut buf, 0);
        assert_eq!(&buf[..n], b"0");
        let n = write_decimal(&mut buf, 307);
        assert_eq!(&buf[..n], b"307");
    }
}
