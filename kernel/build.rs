fn main() {
    // Only pass the kernel linker script when actually targeting the
    // freestanding image. Host-triple builds (`cargo test --lib` against
    // std for the pure-logic unit tests) must link normally.
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "none" {
        return;
    }

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    println!("cargo:rustc-link-arg=-T{}/link.ld", manifest_dir);
    println!("cargo:rerun-if-changed=link.ld");
}
