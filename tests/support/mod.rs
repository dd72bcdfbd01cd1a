#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{Builder, NamedTempFile};

pub const CSV_HEADER: &str = "symbol,molecular_weight,molar_volume,atomic_radius";

pub fn shipped_properties() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/properties.csv")
}

pub fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_catalyst-elements"))
}

/// Write `contents` to a temp file whose name ends in `suffix` (e.g. `.csv`).
pub fn fixture(contents: &str, suffix: &str) -> Result<NamedTempFile> {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .context("failed to allocate fixture file")?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// CSV fixture with the standard header followed by `rows`.
pub fn csv_fixture(rows: &[&str]) -> Result<NamedTempFile> {
    let mut body = String::from(CSV_HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');
    fixture(&body, ".csv")
}

pub fn cli(properties: &Path) -> Command {
    let mut cmd = Command::new(cli_binary());
    cmd.env_remove("CATALYST_PROPERTIES")
        .env("RUST_LOG", "off")
        .arg("--properties")
        .arg(properties);
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
