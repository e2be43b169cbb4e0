use clap::Args;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::env::BuildEnv;
use crate::target::{BuildTarget, TARGET_ARCH_VAR, TARGET_OS_VAR};

/// Configuration for the cross-build driver
#[derive(Args, Debug, Clone)]
pub struct BuildConfig {
    /// Path to the Go toolchain
    #[arg(long = "go", default_value = "go", env = "GO")]
    pub go_path: PathBuf,

    /// Directory of the Go module to build (defaults to current directory)
    #[arg(short = 'C', long = "dir")]
    pub dir: Option<PathBuf>,

    /// Enable verbose logging (shows environment overrides and toolchain commands)
    #[arg(short, long)]
    pub verbose: bool,
}

/// A toolchain invocation that did not produce its artifact.
///
/// Covers both a toolchain that could not be started and one that exited
/// unsuccessfully.
#[derive(Debug, Error)]
#[error("build for {target} failed: {reason}")]
pub struct ToolchainError {
    pub target: String,
    pub code: Option<i32>,
    reason: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ToolchainError {
    fn not_started(
        target: &BuildTarget,
        program: &Path,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            target: target.to_string(),
            code: None,
            reason: format!("could not start {}", program.display()),
            source: Some(Box::new(err)),
        }
    }

    fn exited(target: &BuildTarget, status: ExitStatus) -> Self {
        let reason = match status.code() {
            Some(code) => format!("toolchain exited with code {code}"),
            None => "toolchain terminated by signal".to_string(),
        };

        Self {
            target: target.to_string(),
            code: status.code(),
            reason,
            source: None,
        }
    }

    /// Exit status for the driver process: the toolchain's code when it has
    /// one, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            Some(code) if code != 0 => code,
            _ => 1,
        }
    }
}

/// The compiler toolchain the driver invokes once per target.
#[derive(Debug, Clone)]
pub struct Toolchain {
    program: PathBuf,
    dir: Option<PathBuf>,
}

impl Toolchain {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: None,
        }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self {
            program: config.go_path.clone(),
            dir: config.dir.clone(),
        }
    }

    /// Run the toolchain in `dir` instead of the current directory.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Build every target in order, stopping at the first failure.
    pub fn build_all(&self, targets: &[BuildTarget]) -> Result<(), ToolchainError> {
        for target in targets {
            self.build(target)?;
        }

        info!(count = targets.len(), "All targets built");
        Ok(())
    }

    /// Cross-compile a single target and wait for the toolchain to exit.
    #[instrument(skip_all, fields(target = %target))]
    pub fn build(&self, target: &BuildTarget) -> Result<(), ToolchainError> {
        info!(output = %target.output().display(), "Building");

        let program = which::which(&self.program)
            .map_err(|e| ToolchainError::not_started(target, &self.program, e))?;

        let env = BuildEnv::from_current(target);
        for key in [TARGET_OS_VAR, TARGET_ARCH_VAR] {
            debug!(key, value = ?env.get(key), "Overriding env var");
        }
        debug!(env_count = env.len(), "Environment prepared for toolchain");

        let mut cmd = self.command(&program, target, &env);

        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().to_string())
            .collect();
        debug!(program = %program.display(), args = ?args, "Executing toolchain");

        let status = cmd
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ToolchainError::not_started(target, &program, e))?;

        if !status.success() {
            return Err(ToolchainError::exited(target, status));
        }

        info!(output = %target.output().display(), "Build completed");
        Ok(())
    }

    /// The child command for `target`, running with exactly `env`.
    pub fn command(&self, program: &Path, target: &BuildTarget, env: &BuildEnv) -> Command {
        let mut cmd = Command::new(program);
        cmd.arg("build").arg("-o").arg(target.output());

        cmd.env_clear();
        cmd.envs(env.iter());

        if let Some(ref dir) = self.dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}
