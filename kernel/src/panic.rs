//! Kernel panic handler.
//!
//! Reports the panic over serial (the VGA screen may itself be the thing
//! that broke) and halts.

use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    cotask_kernel::serial_println!("=== KERNEL PANIC ===");
    cotask_kernel::serial_println!("{}", info);

    cotask_kernel::arch::x86::shutdown::halt()
}
