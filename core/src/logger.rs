use log::Level;
use std::fmt::{self, Debug};

/// Logger receives leveled, structured entries.
///
/// `fields` carries key/value pairs attached to the entry, `args` the
/// rendered message.
pub trait Logger: Debug + Send + Sync + 'static {
    /// Record one entry.
    fn log(&self, level: Level, fields: &[(&str, String)], args: fmt::Arguments<'_>);

    /// Record a debug entry.
    fn debug(&self, fields: &[(&str, String)], args: fmt::Arguments<'_>) {
        self.log(Level::Debug, fields, args)
    }

    /// Record an error entry.
    fn error(&self, fields: &[(&str, String)], args: fmt::Arguments<'_>) {
        self.log(Level::Error, fields, args)
    }
}

/// LogLogger forwards entries to the [`log`] facade.
///
/// Whatever backend the application installed (`env_logger`, `tracing-log`,
/// ...) receives them with the fields attached as key/values.
#[derive(Debug, Clone)]
pub struct LogLogger {
    target: &'static str,
    fields: Vec<(&'static str, String)>,
}

impl Default for LogLogger {
    fn default() -> Self {
        Self {
            target: "signtrip",
            fields: Vec::new(),
        }
    }
}

impl LogLogger {
    /// Create a logger with the default `signtrip` target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log target.
    pub fn with_target(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    /// Attach a field to every entry logged by this logger.
    pub fn with_field(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.fields.push((key, value.into()));
        self
    }
}

impl Logger for LogLogger {
    fn log(&self, level: Level, fields: &[(&str, String)], args: fmt::Arguments<'_>) {
        if level > log::max_level() {
            return;
        }

        let kvs = self
            .fields
            .iter()
            .map(|(k, v)| (*k, v.as_str()))
            .chain(fields.iter().map(|(k, v)| (*k, v.as_str())))
            .collect::<Vec<_>>();

        log::logger().log(
            &log::Record::builder()
                .level(level)
                .target(self.target)
                .args(args)
                .key_values(&kvs.as_slice())
                .build(),
        );
    }
}

/// NoopLogger drops every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _: Level, _: &[(&str, String)], _: fmt::Arguments<'_>) {}
}
