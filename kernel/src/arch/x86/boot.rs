//! Multiboot v1 header and the `_start` entry trampoline.
//!
//! A Multiboot-compliant loader (e.g. GRUB) scans the first 8 KiB of the
//! kernel image for this header, maps the kernel per `link.ld`, and jumps to
//! `_start` with `eax` holding the Multiboot magic and `ebx` a pointer to the
//! boot info structure. Neither value is consumed further than forwarding
//! them to `kernel_entry` — this core has no use for boot-time memory maps.
//!
//! `_start` sets up a small bootstrap stack (the per-task stacks in
//! `task::context` don't exist yet) and hands off to `kernel_entry`, which
//! never returns.

use core::arch::global_asm;

const MULTIBOOT_MAGIC: u32 = 0x1BADB002;
const MULTIBOOT_FLAGS: u32 = 0x0000_0003; // align modules on page boundaries, request memory info
const BOOT_STACK_SIZE: usize = 16384;

global_asm!(
    ".section .multiboot_header, \"a\"",
    ".align 4",
    ".long {magic}",
    ".long {flags}",
    ".long -({magic} + {flags})",

    ".section .bss",
    ".align 16",
    "boot_stack_bottom:",
    ".skip {stack_size}",
    "boot_stack_top:",

    ".section .text",
    ".global _start",
    "_start:",
    "mov esp, offset boot_stack_top",
    "push ebx", // multiboot info pointer
    "push eax", // multiboot magic
    "call kernel_entry",
    "1:",
    "hlt",
    "jmp 1b",

    magic = const MULTIBOOT_MAGIC,
    flags = const MULTIBOOT_FLAGS,
    stack_size = const BOOT_STACK_SIZE,
);
