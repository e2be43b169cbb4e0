//! Child environment for a cross-compilation run.
//!
//! The toolchain selects its target from `GOOS`/`GOARCH`. Rather than
//! setting those on the driver process, every build gets its own copy of
//! the inherited environment with the two variables overridden, and the
//! child is spawned with exactly that copy.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

use crate::target::{BuildTarget, TARGET_ARCH_VAR, TARGET_OS_VAR};

/// Environment handed to one toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnv {
    vars: BTreeMap<OsString, OsString>,
}

impl BuildEnv {
    /// Copy the current process environment and apply the target overrides.
    pub fn from_current(target: &BuildTarget) -> Self {
        Self::from_base(std::env::vars_os(), target)
    }

    /// Copy `base` and apply the target overrides.
    pub fn from_base<I, K, V>(base: I, target: &BuildTarget) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let mut vars: BTreeMap<OsString, OsString> = base
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        for (key, value) in overrides(target) {
            vars.retain(|existing, _| !same_var(existing, key));
            vars.insert(key.into(), value.into());
        }

        Self { vars }
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Whether `existing` names the variable `key` on this platform.
///
/// Windows variable names are case-insensitive, so an inherited `goos`
/// would shadow the `GOOS` override in the child.
#[cfg(windows)]
fn same_var(existing: &OsStr, key: &str) -> bool {
    existing.eq_ignore_ascii_case(key)
}

#[cfg(not(windows))]
fn same_var(existing: &OsStr, key: &str) -> bool {
    existing == key
}

/// The variables that differ from the inherited environment for `target`.
pub fn overrides(target: &BuildTarget) -> [(&'static str, &str); 2] {
    [
        (TARGET_OS_VAR, target.platform.as_str()),
        (TARGET_ARCH_VAR, target.arch.as_str()),
    ]
}
