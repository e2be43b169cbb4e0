//! Stub Go toolchain for driving real builds without a compiler.
//!
//! The stub appends one line per invocation to `stub.log` in its working
//! directory, recording its arguments and the variables the driver is
//! expected to control, then writes the requested output file.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const LOG_FILE: &str = "stub.log";

/// Install a stub toolchain in `dir` that exits with `exit_code`.
pub fn install_stub(dir: &Path, exit_code: i32) -> PathBuf {
    let script = format!(
        r#"#!/bin/sh
echo "args=$*|GOOS=$GOOS|GOARCH=$GOARCH|PATH=$PATH|MARKER=$UPDATER_BUILD_MARKER" >> {LOG_FILE}
if [ {exit_code} -ne 0 ]; then
    echo "stub: build failed" >&2
    exit {exit_code}
fi
touch "$3"
"#
    );

    let path = dir.join("go-stub");
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// One recorded toolchain invocation.
#[derive(Debug)]
pub struct Invocation {
    pub args: String,
    pub goos: String,
    pub goarch: String,
    pub path: String,
    pub marker: String,
}

/// Read back every invocation the stub recorded in `dir`.
pub fn invocations(dir: &Path) -> Vec<Invocation> {
    let log = match fs::read_to_string(dir.join(LOG_FILE)) {
        Ok(log) => log,
        Err(_) => return Vec::new(),
    };

    log.lines()
        .map(|line| {
            let field = |name: &str| {
                line.split('|')
                    .find_map(|part| part.strip_prefix(name)?.strip_prefix('='))
                    .unwrap_or_default()
                    .to_string()
            };
            Invocation {
                args: field("args"),
                goos: field("GOOS"),
                goarch: field("GOARCH"),
                path: field("PATH"),
                marker: field("MARKER"),
            }
        })
        .collect()
}
