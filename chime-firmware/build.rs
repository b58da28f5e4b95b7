//! Build script for chime-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Records the build machine's local time to seed the RTC

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use chrono::{Datelike, Local, Timelike};

fn main() {
    setup_linker();
    emit_build_time();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Linker scripts for cortex-m-rt and defmt
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Export the local build time as compile-time environment variables
///
/// The panel has no battery-backed clock and no network, so the RTC starts
/// from the moment the firmware was built. Flash right after building.
fn emit_build_time() {
    let now = Local::now();

    println!("cargo:rustc-env=CHIME_BUILD_YEAR={}", now.year());
    println!("cargo:rustc-env=CHIME_BUILD_MONTH={}", now.month());
    println!("cargo:rustc-env=CHIME_BUILD_DAY={}", now.day());
    println!(
        "cargo:rustc-env=CHIME_BUILD_WEEKDAY={}",
        now.weekday().num_days_from_sunday()
    );
    println!("cargo:rustc-env=CHIME_BUILD_HOUR={}", now.hour());
    println!("cargo:rustc-env=CHIME_BUILD_MINUTE={}", now.minute());
    println!("cargo:rustc-env=CHIME_BUILD_SECOND={}", now.second());

    // A path that never exists makes cargo re-run this script on every build
    println!("cargo:rerun-if-changed=build-time.stamp");
}
