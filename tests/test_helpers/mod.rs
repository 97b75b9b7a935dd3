//! Process environment guard shared by integration test binaries.
//!
//! Tests that touch the environment hold the guard for their whole body;
//! the global lock keeps them from interleaving.

use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Variable name and the value to set, or `None` to unset it.
pub type EnvChange = (OsString, Option<OsString>);

/// Restores the touched variables when dropped.
pub struct EnvVarGuard {
    saved: Vec<EnvChange>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes` and remembers the previous values.
    pub fn set_many(changes: &[EnvChange]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = changes
            .iter()
            .map(|(name, value)| {
                let previous = env::var_os(name);
                apply(name, value.as_ref());
                (name.clone(), previous)
            })
            .collect();
        Self { saved, _lock: lock }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (name, previous) in self.saved.drain(..).rev() {
            apply(&name, previous.as_ref());
        }
    }
}

fn apply(name: &OsString, value: Option<&OsString>) {
    // SAFETY: every mutation happens while `ENV_LOCK` is held.
    unsafe {
        match value {
            Some(new_value) => env::set_var(name, new_value),
            None => env::remove_var(name),
        }
    }
}
