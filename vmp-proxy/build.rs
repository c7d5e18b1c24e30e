//! Build script for vmp-proxy
//!
//! Exposes build identification to the binary as compile-time env vars:
//! GIT_HASH (short), BUILD_TIMESTAMP (RFC 3339, UTC), BUILD_PROFILE.

use std::process::Command;

fn main() {
    let git_hash = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={git_hash}");
    println!("cargo:rustc-env=BUILD_TIMESTAMP={build_timestamp}");
    println!("cargo:rustc-env=BUILD_PROFILE={profile}");
}
