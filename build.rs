use std::env;
use std::process::Command;

// The AVX-512 intrinsics and target features are stable since Rust 1.89
const AVX512_STABLE_MINOR: u32 = 89;

// Minor version of the compiler, from the output of `rustc --version`
// (e.g. "rustc 1.89.0 (29483883e 2025-08-04)")
fn rustc_minor_version() -> Option<u32> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    let version_info = String::from_utf8_lossy(&output.stdout);
    let version = version_info.split_whitespace().nth(1)?;
    let mut parts = version.split('.');
    if parts.next()? != "1" {
        return None;
    }
    parts.next()?.parse().ok()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rustc-check-cfg=cfg(minmax_avx512)");

    let nightly_simd = env::var_os("CARGO_FEATURE_NIGHTLY_SIMD").is_some();
    let stable_avx512 = rustc_minor_version().is_some_and(|minor| minor >= AVX512_STABLE_MINOR);
    if nightly_simd || stable_avx512 {
        println!("cargo:rustc-cfg=minmax_avx512");
    }
}
