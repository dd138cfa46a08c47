// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=AGRIBOT_VERSION");

    // Packagers pin the version explicitly
    let version = std::env::var("AGRIBOT_VERSION").unwrap_or_else(|_| describe_version());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version string from `git describe`
///
/// - exact tag `v0.2.0` becomes `0.2.0-<hash>`
/// - `v0.2.0-3-gabc1234` becomes `0.2.0-dirty-abc1234`
/// - no tags at all falls back to the crate version plus the short hash
fn describe_version() -> String {
    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    let Some(described) = git(&["describe", "--tags", "--match", "v*"]) else {
        return format!("{}-{}", env!("CARGO_PKG_VERSION"), hash);
    };
    let described = described.strip_prefix('v').unwrap_or(&described).to_string();

    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    match parts.as_slice() {
        [tail, _commits, base] => {
            let tail = tail.strip_prefix('g').unwrap_or(tail);
            format!("{}-dirty-{}", base, tail)
        }
        _ => format!("{}-{}", described, hash),
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}
