//! Audit logging for connection loaders
//!
//! Two severities only: `warn` for client-caused rejections and `error` for
//! backing-store failures.

use std::fmt;
use std::sync::Mutex;

/// One operator-facing log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub actor: String,
    pub operation: &'static str,
    pub message: String,
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Logger capability handed to loaders
pub trait Logger: Send + Sync {
    fn warn(&self, record: &AuditRecord);
    fn error(&self, record: &AuditRecord);
}

/// Logger that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, record: &AuditRecord) {
        tracing::warn!(
            actor = %record.actor,
            operation = record.operation,
            "{}",
            record.message
        );
    }

    fn error(&self, record: &AuditRecord) {
        tracing::error!(
            actor = %record.actor,
            operation = record.operation,
            "{}",
            record.message
        );
    }
}

/// Severity of a captured line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
}

/// Logger that keeps every line in memory
#[derive(Debug, Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured lines, oldest first
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.at(Level::Warn)
    }

    pub fn errors(&self) -> Vec<String> {
        self.at(Level::Error)
    }

    fn at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line)
            .collect()
    }

    fn push(&self, level: Level, record: &AuditRecord) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, record.to_string()));
        }
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, record: &AuditRecord) {
        self.push(Level::Warn, record);
    }

    fn error(&self, record: &AuditRecord) {
        self.push(Level::Error, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> AuditRecord {
        AuditRecord {
            actor: "123".to_string(),
            operation: "loadDomainConnectionsByOrgId",
            message: message.to_string(),
        }
    }

    #[test]
    fn test_recording_logger_splits_severity() {
        let logger = RecordingLogger::new();
        logger.warn(&record("client did something"));
        logger.error(&record("database fell over"));

        assert_eq!(logger.warnings(), vec!["client did something".to_string()]);
        assert_eq!(logger.errors(), vec!["database fell over".to_string()]);
        assert_eq!(logger.lines().len(), 2);
    }

    #[test]
    fn test_tracing_logger_without_subscriber() {
        let logger = TracingLogger;
        logger.warn(&record("no subscriber installed"));
        logger.error(&record("still fine"));
    }
}
