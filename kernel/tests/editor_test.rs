//! Line editor integration test: drive `read_line_polling` with a scripted
//! event queue (no real PS/2 keystrokes are available under QEMU's
//! `-display none`) and check the resulting buffer and the VGA cells it
//! wrote through to.

#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(cotask_kernel::testing::test_runner)]
#![reexport_test_harness_main = "test_main"]

use core::panic::PanicInfo;
use cotask_kernel::display::DISPLAY;
use cotask_kernel::drivers::keyboard::Event;
use cotask_kernel::editor::read_line_polling;

#[no_mangle]
pub extern "C" fn kernel_entry(_magic: u32, _info: u32) -> ! {
    cotask_kernel::drivers::serial::init();
    test_main();
    loop {
        core::hint::spin_loop();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    cotask_kernel::testing::test_panic_handler(info)
}

/// Feeds a fixed script of events one at a time; never returns `false`, so
/// `read_line_polling` never needs to yield.
struct Script<'a> {
    events: &'a [Event],
    next: usize,
}

impl<'a> Script<'a> {
    fn poll(&mut self, out: &mut Event) -> bool {
        if self.next >= self.events.len() {
            return false;
        }
        *out = self.events[self.next];
        self.next += 1;
        true
    }
}

fn cell_char(row: usize, col: usize) -> u8 {
    const VGA_BUFFER: usize = 0xB8000;
    let idx = row * cotask_kernel::config::W + col;
    unsafe { core::ptr::read_volatile((VGA_BUFFER as *const u16).add(idx)) as u8 }
}

/// Contract: typing "ab", moving left, inserting "x" yields "axb", and the
/// edited span is mirrored onto the screen at the captured input origin.
#[test_case]
fn test_insert_in_middle_and_screen_mirror() {
    unsafe {
        DISPLAY.clear_text_area();
        DISPLAY.cursor_set(5, 0);
        DISPLAY.set_cursor_logical(5, 0);
    }

    let script = [
        Event::Char(b'a'),
        Event::Char(b'b'),
        Event::Left,
        Event::Char(b'x'),
        Event::Enter,
    ];
    let mut s = Script { events: &script, next: 0 };
    let mut buf = [0u8; 16];
    let len = read_line_polling(|e| s.poll(e), &mut buf, 16);

    assert_eq!(len, 3);
    assert_eq!(&buf[..len], b"axb");
    assert_eq!(cell_char(5, 0), b'a');
    assert_eq!(cell_char(5, 1), b'x');
    assert_eq!(cell_char(5, 2), b'b');
}

/// Contract: backspace at the start of the line is a no-op.
#[test_case]
fn test_backspace_at_start_is_noop() {
    unsafe {
        DISPLAY.clear_text_area();
        DISPLAY.cursor_set(6, 0);
        DISPLAY.set_cursor_logical(6, 0);
    }

    let script = [Event::Backspace, Event::Char(b'z'), Event::Enter];
    let mut s = Script { events: &script, next: 0 };
    let mut buf = [0u8; 16];
    let len = read_line_polling(|e| s.poll(e), &mut buf, 16);

    assert_eq!(len, 1);
    assert_eq!(&buf[..len], b"z");
}
