//! Build script for aremdump
//!
//! Records the metadata printed by `aremdump --version`

use std::env;

fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");

    let host = env::var("HOST").unwrap_or_else(|_| "unknown".to_string());
    let commit = env::var("GIT_COMMIT_HASH")
        .map(|hash| hash.chars().take(12).collect())
        .unwrap_or_else(|_| "unknown".to_string());
    let stamp = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

    for (key, value) in [
        ("AREMDUMP_BUILD_HOST", host),
        ("AREMDUMP_BUILD_COMMIT", commit),
        ("AREMDUMP_BUILD_TIME", stamp),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
    println!("cargo:rerun-if-env-changed=GIT_COMMIT_HASH");
}
