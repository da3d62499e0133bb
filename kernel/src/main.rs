//! Thin entry binary: wires the Multiboot trampoline to `cotask_kernel::kmain`.

#![no_std]
#![no_main]

mod panic;

use cotask_kernel::drivers::serial;

#[no_mangle]
pub extern "C" fn kernel_entry(_magic: u32, _info: u32) -> ! {
    serial::init();
    cotask_kernel::kmain();
}
