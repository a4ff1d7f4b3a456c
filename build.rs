// SPDX-License-Identifier: MPL-2.0

use std::process::Command;

/// Version shown in the About page and `snapcam status`
///
/// `SNAPCAM_VERSION` wins (distribution builds without a git checkout). Otherwise
/// the package version is suffixed with the short `git describe` of HEAD, e.g.
/// `0.1.0+a1b2c3d` or `0.1.0+a1b2c3d-dirty`.
fn main() {
    println!("cargo::rerun-if-env-changed=SNAPCAM_VERSION");
    println!("cargo::rerun-if-changed=.git/HEAD");

    let version = std::env::var("SNAPCAM_VERSION").unwrap_or_else(|_| {
        let package = env!("CARGO_PKG_VERSION");
        match describe_head() {
            Some(head) => format!("{}+{}", package, head),
            None => package.to_string(),
        }
    });

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--exclude", "*"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let head = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!head.is_empty()).then_some(head)
}
