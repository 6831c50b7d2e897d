//! Injected logger for the stamina layer.
//!
//! Systems take `Res<SimulationLogger>` instead of reaching for a global, so
//! tests can swap the printer for a [`BufferedLogger`] and inspect output.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
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

/// Prints to stdout (headless runs, demo binary).
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct BufferedLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl BufferedLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, line)| line.contains(needle))
    }
}

impl LogPrinter for BufferedLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, message.to_string()));
    }
}

/// Logger resource: printer, minimum level and the debug switch.
///
/// `debug()` lines are dropped unless `debug_mode` is on, regardless of the
/// level filter. Everything else goes through the level filter only.
#[derive(Resource)]
pub struct SimulationLogger {
    printer: Box<dyn LogPrinter>,
    level: LogLevel,
    debug_mode: bool,
}

impl Default for SimulationLogger {
    fn default() -> Self {
        Self::new(Box::new(ConsoleLogger))
    }
}

impl SimulationLogger {
    pub fn new(printer: Box<dyn LogPrinter>) -> Self {
        Self {
            printer,
            level: LogLevel::Info,
            debug_mode: false,
        }
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.set_debug_mode(debug_mode);
        self
    }

    /// Turns debug output on (and lowers the level filter) or off.
    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.debug_mode = debug_mode;
        if debug_mode {
            self.level = LogLevel::Debug;
        }
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn log_with_level(&self, level: LogLevel, message: &str) {
        if level < self.level {
            return;
        }
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        self.printer.log(level, &format!("[{}] {}", timestamp, message));
    }

    pub fn debug(&self, message: &str) {
        if self.debug_mode {
            self.log_with_level(LogLevel::Debug, message);
        }
    }

    pub fn info(&self, message: &str) {
        self.log_with_level(LogLevel::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.log_with_level(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log_with_level(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_lines_need_debug_mode() {
        let buffer = BufferedLogger::new();
        let logger = SimulationLogger::new(Box::new(buffer.clone())).with_level(LogLevel::Debug);

        logger.debug("hidden");
        assert!(buffer.lines().is_empty());

        let logger = SimulationLogger::new(Box::new(buffer.clone())).with_debug_mode(true);
        logger.debug("shown");
        assert!(buffer.contains("shown"));
    }

    #[test]
    fn test_level_filter() {
        let buffer = BufferedLogger::new();
        let logger = SimulationLogger::new(Box::new(buffer.clone())).with_level(LogLevel::Warning);

        logger.info("quiet");
        logger.warning("loud");
        logger.error("louder");

        let lines = buffer.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, LogLevel::Warning);
        assert!(lines[1].1.ends_with("louder"));
    }
}
