//! Build script for twinplate-firmware
//!
//! Passes the cortex-m-rt and defmt linker scripts. `memory.x` itself is
//! generated by embassy-stm32's `memory-x` feature.

fn main() {
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=build.rs");
}
