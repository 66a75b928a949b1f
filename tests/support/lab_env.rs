use std::{
    cell::Cell,
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use maggilicious::{app_dirs::CONFIG_HOME_ENV, recipe_lab::Clock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

pub struct LabEnvGuard {
    previous: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl LabEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = std::env::var(CONFIG_HOME_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for LabEnvGuard {
    fn drop(&mut self) {
        if let Some(value) = self.previous.take() {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                std::env::set_var(CONFIG_HOME_ENV, value);
            }
        } else {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                std::env::remove_var(CONFIG_HOME_ENV);
            }
        }
    }
}

/// Clock that advances one second per reading.
pub struct TickingClock {
    next: Cell<i64>,
}

impl TickingClock {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            next: Cell::new(millis),
        }
    }
}

impl Clock for TickingClock {
    fn now_millis(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + 1_000);
        now
    }
}
