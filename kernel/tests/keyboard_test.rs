//! Keyboard decoder integration tests: confirm the decoder behaves
//! identically once actually linked against the freestanding target, not
//! just under the host-`std` unit tests in `src/drivers/keyboard.rs`.
//!
//! The decode step is pure (it never touches the PS/2 ports directly), so
//! scancodes are injected here exactly as the unit tests do; what this
//! binary additionally proves is that the decoder compiles and runs
//! correctly with `no_std`, `panic = "abort"`, and the freestanding target's
//! float/SIMD feature set disabled.

#![no_std]
#![no_main]
#![feature(custom_test_frameworks)]
#![test_runner(cotask_kernel::testing::test_runner)]
#![reexport_test_harness_main = "test_main"]

use cotask_kernel::drivers::keyboard::{Decoder, Event, KEYBOARD};
use core::panic::PanicInfo;

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

/// Contract: a lowercase letter decodes to the expected ASCII byte.
#[test_case]
fn test_unshifted_letter_decodes_to_ascii() {
    let mut d = Decoder::new();
    let mut event = Event::Enter;
    assert!(d.try_poll_with(0x1E, &mut event));
    assert_eq!(event, Event::Char(b'a'));
}

/// Contract: the global `KEYBOARD` singleton starts with no latched modifier
/// or extended-prefix state.
#[test_case]
fn test_keyboard_singleton_starts_clean() {
    let mut event = Event::Enter;
    unsafe {
        // A bare release byte with no preceding press must decode to nothing
        // on a freshly booted decoder.
        assert!(!KEYBOARD.try_poll_with(0x1E | 0x80, &mut event));
    }
}
