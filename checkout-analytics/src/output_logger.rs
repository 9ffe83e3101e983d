use log::Level;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use std::time::Duration;

use crate::logging_utils::sanitize_auth_token;

const MAX_CHARS: usize = 400;
const TRUNCATED_SUFFIX: &str = "...[TRUNCATED]";
const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Warn;

lazy_static::lazy_static! {
    static ref LOGGER_STATE: RwLock<LoggerState> = RwLock::new(LoggerState::default());
}

/// Process-wide: the first `EventAnalytics` decides where logs go, and its shutdown
/// hands the sink back.
struct LoggerState {
    initialized: bool,
    level: LogLevel,
    provider: Option<Arc<dyn OutputLogProvider>>,
}

impl Default for LoggerState {
    fn default() -> Self {
        Self {
            initialized: false,
            level: DEFAULT_LOG_LEVEL,
            provider: None,
        }
    }
}

/// Ordered by verbosity, so `Debug` lets everything through and `None` nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

impl From<u32> for LogLevel {
    fn from(level: u32) -> Self {
        match level {
            0 => LogLevel::None,
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            3 => LogLevel::Info,
            4 => LogLevel::Debug,
            _ => DEFAULT_LOG_LEVEL,
        }
    }
}

impl LogLevel {
    fn as_log_level(self) -> Option<Level> {
        match self {
            LogLevel::None => None,
            LogLevel::Error => Some(Level::Error),
            LogLevel::Warn => Some(Level::Warn),
            LogLevel::Info => Some(Level::Info),
            LogLevel::Debug => Some(Level::Debug),
        }
    }
}

/// Sink for the crate's log lines, for hosts that collect logs themselves.
/// Messages arrive truncated and with auth tokens masked.
pub trait OutputLogProvider: Send + Sync {
    fn initialize(&self);
    fn debug(&self, tag: &str, msg: String);
    fn info(&self, tag: &str, msg: String);
    fn warn(&self, tag: &str, msg: String);
    fn error(&self, tag: &str, msg: String);
    fn shutdown(&self);
}

fn read_state() -> Option<RwLockReadGuard<'static, LoggerState>> {
    let state = LOGGER_STATE.try_read_for(LOCK_TIMEOUT);
    if state.is_none() {
        eprintln!("[checkout-analytics] Failed to acquire read lock for logger");
    }
    state
}

fn write_state() -> Option<RwLockWriteGuard<'static, LoggerState>> {
    let state = LOGGER_STATE.try_write_for(LOCK_TIMEOUT);
    if state.is_none() {
        eprintln!("[checkout-analytics] Failed to acquire write lock for logger");
    }
    state
}

/// Routes logs to `provider`, or to the `log` facade through `simple_logger` when
/// there is none. Later calls are ignored until [`shutdown_output_logger`].
pub fn initialize_output_logger(
    level: &Option<LogLevel>,
    provider: Option<Arc<dyn OutputLogProvider>>,
) {
    let Some(mut state) = write_state() else {
        return;
    };

    if state.initialized {
        return;
    }

    state.initialized = true;
    state.level = level.unwrap_or(DEFAULT_LOG_LEVEL);

    if let Some(provider) = provider {
        provider.initialize();
        state.provider = Some(provider);
        return;
    }

    if let Some(max_level) = state.level.as_log_level() {
        // another logger may already own the facade
        if simple_logger::init_with_level(max_level).is_err() {
            log::set_max_level(max_level.to_level_filter());
        }
    }
}

pub fn shutdown_output_logger() {
    let Some(mut state) = write_state() else {
        return;
    };

    if let Some(provider) = state.provider.take() {
        provider.shutdown();
    }

    state.initialized = false;
}

pub fn has_valid_log_level(level: LogLevel) -> bool {
    read_state().is_some_and(|state| level != LogLevel::None && level <= state.level)
}

fn clip_message(msg: String) -> String {
    if msg.chars().count() <= MAX_CHARS {
        return msg;
    }

    let visible: String = msg
        .chars()
        .take(MAX_CHARS - TRUNCATED_SUFFIX.len())
        .collect();
    visible + TRUNCATED_SUFFIX
}

pub fn log_message(tag: &str, level: LogLevel, msg: String) {
    let msg = sanitize_auth_token(&clip_message(msg));

    if let Some(state) = read_state() {
        if let Some(provider) = &state.provider {
            match level {
                LogLevel::Debug => provider.debug(tag, msg),
                LogLevel::Info => provider.info(tag, msg),
                LogLevel::Warn => provider.warn(tag, msg),
                LogLevel::Error => provider.error(tag, msg),
                LogLevel::None => {}
            }
            return;
        }
    }

    if let Some(level) = level.as_log_level() {
        let target = format!("checkout_analytics::{tag}");
        log::log!(target: target.as_str(), level, "{}", msg);
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $tag:expr, $($arg:tt)*) => {
        if $crate::output_logger::has_valid_log_level($level) {
            $crate::output_logger::log_message($tag, $level, format!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_d {
    ($tag:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::output_logger::LogLevel::Debug, $tag, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_i {
    ($tag:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::output_logger::LogLevel::Info, $tag, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_w {
    ($tag:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::output_logger::LogLevel::Warn, $tag, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_e {
    ($tag:expr, $($arg:tt)*) => {
        $crate::__log_at!($crate::output_logger::LogLevel::Error, $tag, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_number() {
        assert_eq!(LogLevel::from(0), LogLevel::None);
        assert_eq!(LogLevel::from(1), LogLevel::Error);
        assert_eq!(LogLevel::from(4), LogLevel::Debug);
        assert_eq!(LogLevel::from(99), LogLevel::Warn);
    }

    #[test]
    fn test_levels_ordered_by_verbosity() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::None.as_log_level(), None);
    }

    #[test]
    fn test_short_message_untouched() {
        assert_eq!(clip_message("order placed".to_string()), "order placed");
    }

    #[test]
    fn test_long_message_clipped_to_max_chars() {
        let clipped = clip_message("é".repeat(MAX_CHARS + 1));

        assert_eq!(clipped.chars().count(), MAX_CHARS);
        assert!(clipped.ends_with(TRUNCATED_SUFFIX));
    }
}
