//! Cross-compilation driver for the updater binaries.
//!
//! Runs the Go toolchain once per release target, each time with a private
//! copy of the environment that selects the target platform and
//! architecture.

pub mod build;
pub mod env;
pub mod target;

pub use build::{BuildConfig, Toolchain, ToolchainError};
pub use env::BuildEnv;
pub use target::{default_targets, BuildTarget};
