//! Helpers shared by unit tests.

use std::env;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serializes tests that touch the process working directory and puts the
/// original directory back when dropped.
pub struct CwdGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

pub fn cwd_lock() -> CwdGuard {
    let lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let original = env::current_dir()
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
    CwdGuard {
        original,
        _lock: lock,
    }
}
