//! Embeds the source revision as `CYBERBOT_GIT_REV` for `--help` and the
//! session header. Falls back to "unknown" outside a git checkout.

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=CYBERBOT_GIT_REV");
    if let Some(branch) = std::fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.trim().strip_prefix("ref: ").map(str::to_string))
    {
        println!("cargo:rerun-if-changed=.git/{branch}");
    }

    let rev = std::env::var("CYBERBOT_GIT_REV")
        .ok()
        .or_else(git_rev)
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=CYBERBOT_GIT_REV={rev}");
}

fn git_rev() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    let rev = String::from_utf8(output.stdout).ok()?;
    let rev = rev.trim();
    (output.status.success() && !rev.is_empty()).then(|| rev.to_string())
}
