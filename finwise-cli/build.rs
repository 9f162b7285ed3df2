//! Stamps `finwise --version` with the commit the binary was built from.

use std::path::Path;
use std::process::Command;

fn git_revision(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?.trim().to_string();
    (!rev.is_empty()).then_some(rev)
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = Path::new(&manifest_dir).join("..");
    let rev = git_revision(&workspace).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=FINWISE_BUILD_SHA={rev}");
}
