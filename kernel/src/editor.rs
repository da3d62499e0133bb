//! Line editor: a cursor-aware, in-place edited line bound to a fixed screen
//! position.
//!
//! Grounded on spec.md §4.D. The editor owns no state across calls to
//! `read_line` — it captures the caret's origin on entry and otherwise
//! drives `buffer`/`len`/`cursor` as plain locals, mirroring how the teacher
//! keeps line-discipline state on the stack of the function driving it
//! rather than in a persistent struct.

use crate::drivers::keyboard::{Event, KEYBOARD};
use crate::task::scheduler::yield_now;

/// Block cooperatively until ENTER, editing `buffer[0..cap]` in place and
/// leaving a NUL-terminated string at the cursor's current screen position.
/// Returns the length of the entered text (excluding the NUL).
///
/// Assumes the editable span fits on a single row (spec.md §4.D): wrapping
/// past the right edge during editing is not handled.
pub fn read_line(buffer: &mut [u8], cap: usize) -> usize {
    read_line_polling(|event| unsafe { KEYBOARD.try_poll(event) }, buffer, cap)
}

/// Same contract as [`read_line`], but with the event source abstracted out
/// — mirrors [`crate::display::CellSink`]'s split between the editing logic
/// and the real PS/2 ports. Lets `tests/editor_test.rs` drive the editor
/// with an injected scancode queue instead of real keystrokes.
pub fn read_line_polling(
    mut poll: impl FnMut(&mut Event) -> bool,
    buffer: &mut [u8],
    cap: usize,
) -> usize {
    let cap = cap.min(buffer.len());
    let (input_row, input_col) = unsafe { crate::display::DISPLAY.cursor_position() };

    let mut len = 0usize;
    let mut cursor = 0usize;

    loop {
        let mut event = Event::Enter;
        if !poll(&mut event) {
            yield_now();
            continue;
        }

        match event {
            Event::Left => {
                cursor = cursor.saturating_sub(1);
            }
            Event::Right => {
                cursor = (cursor + 1).min(len);
            }
            Event::Backspace => {
                if cursor > 0 {
                    for i in cursor..len {
                        buffer[i - 1] = buffer[i];
                    }
                    cursor -= 1;
                    len -= 1;
                }
            }
            Event::Delete => {
                if cursor < len {
                    for i in cursor..len - 1 {
                        buffer[i] = buffer[i + 1];
                    }
                    len -= 1;
                }
            }
            Event::Char(c) => {
                if len + 1 < cap {
                    for i in (cursor..len).rev() {
                        buffer[i + 1] = buffer[i];
                    }
                    buffer[cursor] = c;
                    cursor += 1;
                    len += 1;
                }
            }
            Event::Enter => {
                if len < buffer.len() {
                    buffer[len] = 0;
                }
                unsafe {
                    crate::display::DISPLAY.set_cursor_logical(input_row, input_col + len);
                    crate::display::DISPLAY.put(b'\n');
                }
                return len;
            }
        }

        redraw(input_row, input_col, &buffer[..len], cursor, cap);
    }
}

/// Write `line` at `(input_row, input_col)`, pad with spaces to erase
/// residue from a previously longer line, then reposition the cursor.
fn redraw(input_row: usize, input_col: usize, line: &[u8], cursor: usize, cap: usize) {
    unsafe {
        crate::display::DISPLAY.write_at(input_row, input_col, line);
        let erase_to = (cap - 1).min(crate::config::W.saturating_sub(input_col));
        for c in line.len()..erase_to {
            crate::display::DISPLAY.put_at(input_row, input_col + c, b' ');
        }
        crate::display::DISPLAY.cursor_set(input_row, input_col + cursor);
    }
}

#[cfg(test)]
mod tests {
    // The editing algebra (cursor clamping, shift-on-insert/delete) is pure
    // and re-checked directly here without going through `read_line`'s
    // display/keyboard plumbing, which depends on the live singletons.

    fn insert(buf: &mut [u8], len: &mut usize, cursor: &mut usize, cap: usize, c: u8) {
        if *len + 1 < cap {
            for i in (*cursor..*len).rev() {
                buf[i + 1] = buf[i];
            }
            buf[*cursor] = c;
            *cursor += 1;
            *len += 1;
        }
    }

    fn backspace(buf: &mut [u8], len: &mut usize, cursor: &mut usize) {
        if *cursor > 0 {
            for i in *cursor..*len {
                buf[i - 1] = buf[i];
            }
            *cursor -= 1;
            *len -= 1;
        }
    }

    #[test]
    fn insert_in_middle_shifts_tail_right() {
        let mut buf = [0u8; 8];
        let mut len = 0;
        let mut cursor = 0;
        for &c in b"ac" {
            insert(&mut buf, &mut len, &mut cursor, 8, c);
        }
        cursor = 1;
        insert(&mut buf, &mut len, &mut cursor, 8, b'b');
        assert_eq!(&buf[..len], b"abc");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut buf = [0u8; 8];
        let mut len = 0;
        let mut cursor = 0;
        backspace(&mut buf, &mut len, &mut cursor);
        assert_eq!(len, 0);
        assert_eq!(cursor, 0);
    }

    #[test]
    fn insert_respects_capacity_minus_one() {
        let mut buf = [0u8; 4];
        let mut len = 0;
        let mut cursor = 0;
        for &c in b"abcd" {
            insert(&mut buf, &mut len, &mut cursor, 4, c);
        }
        // cap=4 allows len up to cap-1=3.
        assert_eq!(len, 3);
        assert_eq!(&buf[..len], b"abc");
    }
}
