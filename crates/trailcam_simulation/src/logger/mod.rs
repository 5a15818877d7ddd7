//! Logger — глобальный sink для диагностики gameplay систем
//!
//! Missing target / parent / camera не паникуют: системы пишут warning сюда и делают no-op.
//! Host (client, тесты) может подменить printer через `set_logger`.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = LOGGER.lock() {
        *slot = Some(logger);
    }
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    if let Ok(mut slot) = LOGGER.lock() {
        if slot.is_none() {
            *slot = Some(logger);
        }
    }
}

/// Минимальный уровень, ниже которого сообщения отбрасываются
pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current) = LOGGER_LEVEL.lock() {
        *current = level;
    }
}

pub fn log_level() -> LogLevel {
    LOGGER_LEVEL
        .lock()
        .map(|level| *level)
        .unwrap_or(LogLevel::Debug)
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    // Poisoned mutex = кто-то запаниковал внутри printer; логи в этом случае теряем
    let Ok(slot) = LOGGER.lock() else {
        return;
    };

    if let Some(logger) = slot.as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// stdout printer (headless bin, client)
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Ставит ConsoleLogger, если host ещё не установил свой printer
pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Printer, складывающий сообщения в общий буфер
    struct CapturePrinter(Arc<Mutex<Vec<(LogLevel, String)>>>);

    impl LogPrinter for CapturePrinter {
        fn log(&self, level: LogLevel, message: &str) {
            if let Ok(mut lines) = self.0.lock() {
                lines.push((level, message.to_string()));
            }
        }
    }

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert_eq!(LogLevel::Warning.as_str(), "WARNING");
    }

    #[test]
    fn test_messages_below_threshold_are_dropped() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        set_logger(Box::new(CapturePrinter(captured.clone())));
        set_log_level(LogLevel::Warning);
        assert_eq!(log_level(), LogLevel::Warning);

        log("threshold-check debug");
        log_info("threshold-check info");
        log_warning("threshold-check warning");
        log_error("threshold-check error");

        set_log_level(LogLevel::Debug);
        set_logger(Box::new(ConsoleLogger));

        // Другие тесты параллельно тоже пишут в глобальный sink → фильтруем по маркеру
        let lines = captured.lock().map(|lines| lines.clone()).unwrap_or_default();
        let ours: Vec<_> = lines
            .iter()
            .filter(|(_, message)| message.contains("threshold-check"))
            .collect();

        assert_eq!(ours.len(), 2, "{:?}", ours);
        assert_eq!(ours[0].0, LogLevel::Warning);
        assert!(ours[0].1.ends_with("threshold-check warning"));
        assert_eq!(ours[1].0, LogLevel::Error);
    }
}
