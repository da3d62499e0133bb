//! Support for the `tests/*.rs` integration binaries.
//!
//! Each integration test is its own freestanding binary booted under QEMU,
//! grounded on `other_examples/…SQLpassion-osdev…screen_test.rs`'s
//! `custom_test_frameworks` setup. Pass/fail is reported through the
//! isa-debug-exit convention: a 32-bit write to port `0xf4`, matching the
//! `-device isa-debug-exit,iobase=0xf4,iosize=0x04` runner configured in
//! `.cargo/config.toml`.

use crate::arch::x86::port::outl;

const ISA_DEBUG_EXIT_PORT: u16 = 0xf4;

#[repr(u32)]
pub enum QemuExitCode {
    Success = 0x10,
    Failed = 0x11,
}

/// Write the exit code and halt. QEMU translates this into a process exit
/// status the `cargo test` runner can check.
pub fn exit_qemu(code: QemuExitCode) -> ! {
    unsafe {
        outl(ISA_DEBUG_EXIT_PORT, code as u32);
    }
    crate::arch::x86::shutdown::halt()
}

pub trait Testable {
    fn run(&self);
}

impl<T: Fn()> Testable for T {
    fn run(&self) {
        crate::serial_println!("{}...", core::any::type_name::<T>());
        self();
        crate::serial_println!("[ok]");
    }
}

/// `#[test_runner]` target for every `tests/*.rs` binary.
pub fn test_runner(tests: &[&dyn Testable]) {
    crate::serial_println!("running {} tests", tests.len());
    for test in tests {
        test.run();
    }
    exit_qemu(QemuExitCode::Success);
}

/// Panic handler installed by each test binary in place of the kernel's own.
pub fn test_panic_handler(info: &core::panic::PanicInfo) -> ! {
    crate::serial_println!("[failed]");
    crate::serial_println!("{}", info);
    exit_qemu(QemuExitCode::Failed)
}
