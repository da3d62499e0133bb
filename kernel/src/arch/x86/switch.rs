//! Low-level context switch (32-bit protected mode, cdecl).
//!
//! `ctx_switch` is a leaf routine with a fixed, symmetric save/restore
//! contract (spec.md §4.E, §9): push the flags word, push the integer
//! registers in a fixed order, swap the stack pointer through the caller's
//! two arguments, then pop the same registers and flags word off the new
//! stack and `ret` into whatever return address sits there.
//!
//! The fixed order is exactly what `pushad`/`popad` already define in
//! hardware: eight 32-bit GPRs (`eax, ecx, edx, ebx, esp(ignored), ebp, esi,
//! edi`) in one instruction, paired with `pushfd`/`popfd` for the flags
//! word. A freshly prepared task stack (see `task::context::prepare_stack`)
//! must lay down zeroed words in that same order so the first `popad` on a
//! new task is well-defined.
//!
//! # Stack layout during the switch
//! On entry (before any push), the caller's frame holds, at ascending
//! addresses from `esp`: return address, `old_sp_slot`, `new_sp`. After
//! `pushfd` + `pushad` push 9 words (36 bytes) below that, those three
//! caller arguments sit at `[esp+36]`, `[esp+40]`, `[esp+44]`.

use core::arch::global_asm;

global_asm!(
    ".global ctx_switch",
    "ctx_switch:",
    "pushfd",
    "pushad",
    "mov eax, [esp+40]", // old_sp_slot
    "mov ecx, [esp+44]", // new_sp
    "mov [eax], esp",
    "mov esp, ecx",
    "popad",
    "popfd",
    "ret",
);

extern "C" {
    /// Save the caller's flags + GP registers onto the current stack, store
    /// the resulting `esp` into `*old_sp_slot`, then load `esp` from `new_sp`
    /// and pop the registers/flags that sit there, returning into whatever
    /// return address the new stack holds next.
    ///
    /// # Safety
    /// `new_sp` must point at a stack prepared by
    /// [`crate::task::context::prepare_stack`] or previously suspended by
    /// this same routine. `old_sp_slot` must be writable.
    pub fn ctx_switch(old_sp_slot: *mut u32, new_sp: u32);
}
