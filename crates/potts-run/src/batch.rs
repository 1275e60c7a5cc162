//! Batch-script generation for launching many simulation runs.
//!
//! Scripts start the jobs of each batch in the background and join before the
//! next batch begins, so at most `batch_size` simulator processes run at
//! once. A `batch_size` of zero puts every job in one batch.

use std::fs;
use std::path::Path;

use potts_core::{ErrorInfo, PottsError};
use serde::{Deserialize, Serialize};

/// Shell dialect a batch script is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellFlavor {
    /// POSIX shell script with `&` backgrounding and `wait` joins.
    Bash,
    /// PowerShell script with `Start-Job` and `Get-Job | Wait-Job` joins.
    PowerShell,
}

/// Renders a batch script running `commands` in groups of `batch_size`.
pub fn batch_script(flavor: ShellFlavor, commands: &[String], batch_size: usize) -> String {
    match flavor {
        ShellFlavor::Bash => bash_script(commands, batch_size),
        ShellFlavor::PowerShell => powershell_script(commands, batch_size),
    }
}

fn batch_boundary(index: usize, total: usize, batch_size: usize) -> bool {
    let filled = batch_size > 0 && (index + 1) % batch_size == 0;
    filled || index + 1 == total
}

/// Renders a bash batch script.
pub fn bash_script(commands: &[String], batch_size: usize) -> String {
    let mut script = String::from("#!/usr/bin/env bash\n");
    for (index, command) in commands.iter().enumerate() {
        script.push_str(command);
        script.push_str(" &\n");
        if batch_boundary(index, commands.len(), batch_size) {
            script.push_str("wait\n");
        }
    }
    script
}

/// Renders a PowerShell batch script.
pub fn powershell_script(commands: &[String], batch_size: usize) -> String {
    let mut script = String::new();
    for (index, command) in commands.iter().enumerate() {
        script.push_str(&format!("Start-Job -ScriptBlock {{ {command} }} | Out-Null\n"));
        if batch_boundary(index, commands.len(), batch_size) {
            script.push_str("Get-Job | Wait-Job | Out-Null\n");
        }
    }
    script
}

/// Writes a rendered batch script to disk, creating parent directories.
pub fn write_batch_script(path: &Path, script: &str) -> Result<(), PottsError> {
    let write_error = |code: &str, err: std::io::Error| {
        PottsError::Config(
            ErrorInfo::new(code, err.to_string())
                .with_context("path", path.display().to_string()),
        )
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| write_error("batch-mkdir", err))?;
    }
    fs::write(path, script).map_err(|err| write_error("batch-write", err))
}
