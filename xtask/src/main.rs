//! Workspace build tasks.
//!
//! ```bash
//! cargo xtask build-web            # release bundle
//! cargo xtask build-web --dev      # debug bundle
//! ```
//!
//! `build-web` compiles `trattoria-web` for `wasm32-unknown-unknown` and runs
//! `wasm-bindgen --target web` over it, writing `trattoria_web.js` and
//! `trattoria_web_bg.wasm` to `crates/site/static/pkg`, where the page's
//! boot script imports them. Requires the `wasm32-unknown-unknown` target and
//! a `wasm-bindgen` CLI matching the workspace's `wasm-bindgen` version.

#![allow(clippy::print_stderr)]

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const WEB_PACKAGE: &str = "trattoria-web";
const WEB_ARTIFACT: &str = "trattoria_web.wasm";
const BUNDLE_NAME: &str = "trattoria_web";
const BUNDLE_DIR: &str = "crates/site/static/pkg";

fn run(root: &Path, program: &str, args: &[&str]) -> Result<(), String> {
    let status = Command::new(program)
        .args(args)
        .current_dir(root)
        .status()
        .map_err(|e| format!("failed to run `{program}`: {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: {program} {}", args.join(" ")))
    }
}

/// Path of the compiled wasm artifact for a profile.
fn wasm_artifact(root: &Path, profile: &str) -> PathBuf {
    let target_dir = env::var_os("CARGO_TARGET_DIR")
        .map_or_else(|| root.join("target"), PathBuf::from);
    target_dir.join(WASM_TARGET).join(profile).join(WEB_ARTIFACT)
}

fn build_web(root: &Path, release: bool) -> Result<(), String> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    let mut args = vec!["build", "--package", WEB_PACKAGE, "--target", WASM_TARGET];
    if release {
        args.push("--release");
    }
    run(root, &cargo, &args)?;

    let profile = if release { "release" } else { "debug" };
    let artifact = wasm_artifact(root, profile);
    let artifact = artifact
        .to_str()
        .ok_or_else(|| format!("non UTF-8 artifact path: {}", artifact.display()))?;

    run(
        root,
        "wasm-bindgen",
        &[
            "--target",
            "web",
            "--no-typescript",
            "--out-dir",
            BUNDLE_DIR,
            "--out-name",
            BUNDLE_NAME,
            artifact,
        ],
    )
    .map_err(|e| format!("{e} (install with `cargo install wasm-bindgen-cli`)"))?;

    eprintln!("web bundle written to {BUNDLE_DIR}/{BUNDLE_NAME}.js");
    Ok(())
}

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "help".to_string());
    let Some(root) = Path::new(env!("CARGO_MANIFEST_DIR")).parent() else {
        eprintln!("xtask must live one level below the workspace root");
        return ExitCode::FAILURE;
    };

    let result = match command.as_str() {
        "build-web" => build_web(root, !args.any(|arg| arg == "--dev")),
        "help" | "--help" | "-h" => {
            eprintln!("xtask commands:");
            eprintln!("  build-web [--dev]");
            Ok(())
        }
        _ => Err(format!(
            "unknown xtask command: {command} (try `cargo xtask help`)"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_artifact_path_per_profile() {
        let root = Path::new("/work");
        if env::var_os("CARGO_TARGET_DIR").is_some() {
            return;
        }
        assert_eq!(
            wasm_artifact(root, "release"),
            PathBuf::from("/work/target/wasm32-unknown-unknown/release/trattoria_web.wasm")
        );
        assert_eq!(
            wasm_artifact(root, "debug"),
            PathBuf::from("/work/target/wasm32-unknown-unknown/debug/trattoria_web.wasm")
        );
    }
}
