use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn rustc_version() -> Option<String> {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let output = Command::new(rustc).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let line = String::from_utf8(output.stdout).ok()?;
    let line = line.trim();
    (!line.is_empty()).then(|| line.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-env-changed=RUSTC");

    let version = rustc_version().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=FUMO_RUSTC_VERSION={version}");

    let built_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    println!("cargo:rustc-env=FUMO_BUILT_AT={built_at}");
}
