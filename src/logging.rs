//! Logging backend for the binary.
//!
//! Library code emits `tracing` events; with `tracing`'s `log` feature and no
//! subscriber installed, those become `log` records, which `flexi_logger`
//! writes to stderr or to rotating files.

use std::sync::{Mutex, MutexGuard, PoisonError};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

use crate::config::LogConfig;
use crate::{Error, Result};

/// Kept alive for the life of the process; dropping it stops logging.
static LOGGER_HANDLE: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// Start the logger described by `config`.
pub fn init(config: &LogConfig) -> Result<()> {
    let logger = Logger::try_with_str(&config.level)
        .map_err(|e| Error::Config(format!("invalid log level '{}': {e}", config.level)))?;

    let logger = match &config.dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().basename("city-graph").directory(dir))
            .rotate(
                Criterion::Size(config.max_file_size),
                Naming::Numbers,
                Cleanup::KeepLogFiles(config.max_files),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append(),
        None => logger.log_to_stderr(),
    };

    let handle = logger
        .start()
        .map_err(|e| Error::Config(format!("cannot start logger: {e}")))?;

    *lock_ignoring_poison(&LOGGER_HANDLE) = Some(handle);
    log::info!("logging initialized at level {}", config.level);
    Ok(())
}

/// Flush buffered log lines. Call before the process exits.
pub fn shutdown() {
    if let Some(handle) = lock_ignoring_poison(&LOGGER_HANDLE).take() {
        handle.flush();
    }
}

/// A panic elsewhere must not cost us the logger handle.
fn lock_ignoring_poison<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisoned_slot_still_usable() {
        let slot = Mutex::new(Some(7));
        let _ = std::panic::catch_unwind(|| {
            let _guard = slot.lock().unwrap();
            panic!("poison the slot");
        });
        assert!(slot.is_poisoned());

        assert_eq!(lock_ignoring_poison(&slot).take(), Some(7));
        *lock_ignoring_poison(&slot) = Some(9);
        assert_eq!(*lock_ignoring_poison(&slot), Some(9));
    }
}
