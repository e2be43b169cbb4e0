//! Cross-compilation targets for the updater binaries.
//!
//! Each target is a platform/architecture pair in the Go toolchain's naming
//! (`GOOS`/`GOARCH`) plus the file the toolchain should write.

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable the toolchain reads for the target operating system.
pub const TARGET_OS_VAR: &str = "GOOS";

/// Environment variable the toolchain reads for the target CPU architecture.
pub const TARGET_ARCH_VAR: &str = "GOARCH";

/// A single artifact to cross-compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub platform: String,
    pub arch: String,
    pub output: PathBuf,
}

impl BuildTarget {
    pub fn new(
        platform: impl Into<String>,
        arch: impl Into<String>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            platform: platform.into(),
            arch: arch.into(),
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.arch)
    }
}

/// The release targets, built in this order.
///
/// To ship another platform, append a target here.
pub fn default_targets() -> Vec<BuildTarget> {
    vec![
        BuildTarget::new("windows", "amd64", "flysky-updater-win64.exe"),
        BuildTarget::new("linux", "amd64", "flysky-updater-linux64"),
    ]
}

/// Print the default targets, one per line.
pub fn list_targets() {
    for target in default_targets() {
        println!("{} -> {}", target, target.output.display());
    }
}
