//! Logger adapters
//!
//! A small leveled [`Logger`] interface with interchangeable backends:
//!
//! - [`ConsoleLogger`] writes lines at or above a threshold level
//! - [`NoopLogger`] discards everything
//! - [`TestLogger`] records every call for later assertions
//! - [`TracingLogger`] forwards to the `tracing` macros
//!
//! Every logger can derive a child carrying extra context.

use crate::error::{Result, UtilError};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Context attached to log lines
pub type LogObject = Map<String, Value>;

/// Environment variable read by [`LoggerConfig::from_env`]
pub const LOG_LEVEL_ENV: &str = "UTILKIT_LOG_LEVEL";

/// Log severity, from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// All levels in ascending severity
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Lowercase name, as used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    fn colored_tag(self) -> String {
        let tag = self.to_string();
        match self {
            Level::Trace => tag.dimmed().to_string(),
            Level::Debug => tag.blue().to_string(),
            Level::Info => tag.green().to_string(),
            Level::Warn => tag.yellow().to_string(),
            Level::Error => tag.red().to_string(),
            Level::Fatal => tag.red().bold().to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for Level {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UtilError::invalid_argument(format!("Unknown log level `{s}`")))
    }
}

/// A single call captured by [`TestLogger`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub msg: String,
    pub obj: Option<Value>,
}

/// Leveled logging interface
///
/// Implementors only provide [`Logger::log`] and [`Logger::child`]; the
/// per-level methods forward to `log`.
pub trait Logger: Send + Sync {
    /// Log `msg` at `level` with an optional structured object
    fn log(&self, level: Level, obj: Option<Value>, msg: &str);

    /// Derive a logger carrying extra context
    fn child(&self, context: LogObject) -> Box<dyn Logger>;

    fn trace(&self, msg: &str) {
        self.log(Level::Trace, None, msg);
    }

    fn debug(&self, msg: &str) {
        self.log(Level::Debug, None, msg);
    }

    fn info(&self, msg: &str) {
        self.log(Level::Info, None, msg);
    }

    fn warn(&self, msg: &str) {
        self.log(Level::Warn, None, msg);
    }

    fn error(&self, msg: &str) {
        self.log(Level::Error, None, msg);
    }

    fn fatal(&self, msg: &str) {
        self.log(Level::Fatal, None, msg);
    }

    fn trace_with(&self, obj: Value, msg: &str) {
        self.log(Level::Trace, Some(obj), msg);
    }

    fn debug_with(&self, obj: Value, msg: &str) {
        self.log(Level::Debug, Some(obj), msg);
    }

    fn info_with(&self, obj: Value, msg: &str) {
        self.log(Level::Info, Some(obj), msg);
    }

    fn warn_with(&self, obj: Value, msg: &str) {
        self.log(Level::Warn, Some(obj), msg);
    }

    fn error_with(&self, obj: Value, msg: &str) {
        self.log(Level::Error, Some(obj), msg);
    }

    fn fatal_with(&self, obj: Value, msg: &str) {
        self.log(Level::Fatal, Some(obj), msg);
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, level: Level, obj: Option<Value>, msg: &str) {
        (**self).log(level, obj, msg);
    }

    fn child(&self, context: LogObject) -> Box<dyn Logger> {
        (**self).child(context)
    }
}

/// A logger that stores all logs in memory
///
/// Clones and children share the same log, so records written through a
/// child are visible on the parent.
#[derive(Debug, Clone, Default)]
pub struct TestLogger {
    logs: Arc<Mutex<Vec<LogRecord>>>,
}

impl TestLogger {
    /// Create a logger with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, in call order
    pub fn records(&self) -> Vec<LogRecord> {
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Records at the given level
    pub fn records_at(&self, level: Level) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .collect()
    }

    /// Number of records captured so far, children included
    pub fn len(&self) -> usize {
        self.logs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been logged
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every captured record
    ///
    /// The log is shared, so this also empties it for clones and children.
    pub fn clear(&self) {
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Logger for TestLogger {
    fn log(&self, level: Level, obj: Option<Value>, msg: &str) {
        self.logs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                msg: msg.to_string(),
                obj,
            });
    }

    fn child(&self, _context: LogObject) -> Box<dyn Logger> {
        Box::new(self.clone())
    }
}

/// A logger that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: Level, _obj: Option<Value>, _msg: &str) {}

    fn child(&self, _context: LogObject) -> Box<dyn Logger> {
        Box::new(NoopLogger)
    }
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// A logger that prints lines at or above a threshold level
///
/// Lines look like `LEVEL [context] [obj] msg`, with the context and
/// object serialized as JSON. Output goes to stdout unless another writer
/// is injected with [`ConsoleLogger::with_writer`].
#[derive(Clone)]
pub struct ConsoleLogger {
    level: Level,
    context: Option<LogObject>,
    colors: bool,
    writer: SharedWriter,
}

impl ConsoleLogger {
    /// Create a logger writing to stdout at the given threshold
    pub fn new(level: Level) -> Self {
        ConsoleLogger {
            level,
            context: None,
            colors: false,
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
        }
    }

    /// Build a logger from a [`LoggerConfig`]
    pub fn from_config(config: LoggerConfig) -> Self {
        ConsoleLogger {
            level: config.level,
            context: config.context,
            colors: config.colors,
            ..Self::new(config.level)
        }
    }

    /// Attach a context printed with every line
    #[must_use]
    pub fn with_context(mut self, context: LogObject) -> Self {
        self.context = Some(context);
        self
    }

    /// Colorize the level tag
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Send output to `writer` instead of stdout
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.writer = Arc::new(Mutex::new(Box::new(writer)));
        self
    }

    /// Threshold below which calls are discarded
    pub fn level(&self) -> Level {
        self.level
    }

    /// Context printed with every line, if any
    pub fn context(&self) -> Option<&LogObject> {
        self.context.as_ref()
    }

    /// Whether a call at `level` would be written
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn format_line(&self, level: Level, obj: Option<&Value>, msg: &str) -> String {
        let mut parts = vec![if self.colors {
            level.colored_tag()
        } else {
            level.to_string()
        }];

        if let Some(context) = &self.context {
            parts.push(Value::Object(context.clone()).to_string());
        }
        if let Some(obj) = obj {
            parts.push(obj.to_string());
        }
        if !msg.is_empty() {
            parts.push(msg.to_string());
        }

        parts.join(" ")
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl fmt::Debug for ConsoleLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleLogger")
            .field("level", &self.level)
            .field("context", &self.context)
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, obj: Option<Value>, msg: &str) {
        if !self.enabled(level) {
            return;
        }

        let line = self.format_line(level, obj.as_ref(), msg);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(writer, "{line}") {
            warn!("Failed to write log line: {}", err);
        }
    }

    fn child(&self, context: LogObject) -> Box<dyn Logger> {
        let mut merged = self.context.clone().unwrap_or_default();
        merged.extend(context);

        Box::new(ConsoleLogger {
            context: Some(merged),
            ..self.clone()
        })
    }
}

/// A logger forwarding to the `tracing` macros
///
/// The context travels as a `context` field. `fatal` is emitted at the
/// error level with `fatal = true`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    context: LogObject,
}

impl TracingLogger {
    /// Create a logger with an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a context sent as the `context` field of every event
    #[must_use]
    pub fn with_context(mut self, context: LogObject) -> Self {
        self.context = context;
        self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, obj: Option<Value>, msg: &str) {
        let context = Value::Object(self.context.clone());
        let obj = obj.unwrap_or(Value::Null);

        match level {
            Level::Trace => tracing::trace!(context = %context, obj = %obj, "{}", msg),
            Level::Debug => tracing::debug!(context = %context, obj = %obj, "{}", msg),
            Level::Info => tracing::info!(context = %context, obj = %obj, "{}", msg),
            Level::Warn => tracing::warn!(context = %context, obj = %obj, "{}", msg),
            Level::Error => tracing::error!(context = %context, obj = %obj, "{}", msg),
            Level::Fatal => {
                tracing::error!(fatal = true, context = %context, obj = %obj, "{}", msg);
            }
        }
    }

    fn child(&self, context: LogObject) -> Box<dyn Logger> {
        let mut merged = self.context.clone();
        merged.extend(context);
        Box::new(TracingLogger { context: merged })
    }
}

/// Console logger configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level written
    pub level: Level,
    /// Context printed with every line
    pub context: Option<LogObject>,
    /// Colorize the level tag
    pub colors: bool,
}

impl LoggerConfig {
    /// Read the threshold from `UTILKIT_LOG_LEVEL`, defaulting to `warn`
    ///
    /// # Errors
    ///
    /// Returns [`UtilError::InvalidArgument`] when the variable holds an
    /// unknown level.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggerConfig::from_env`] with a custom variable source
    ///
    /// # Errors
    ///
    /// Returns [`UtilError::InvalidArgument`] for an unknown level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = match lookup(LOG_LEVEL_ENV) {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => Level::default(),
        };

        Ok(LoggerConfig {
            level,
            ..Self::default()
        })
    }

    /// Build a [`ConsoleLogger`] from this configuration
    pub fn build(self) -> ConsoleLogger {
        ConsoleLogger::from_config(self)
    }
}

/// Install a global `tracing` subscriber
///
/// The filter comes from `RUST_LOG` when set, else from
/// `default_directive` (e.g. `"info"` or `"warn,utilkit=debug"`).
///
/// # Errors
///
/// Fails on an invalid directive or when a global subscriber is already
/// installed.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| UtilError::invalid_argument(format!("Invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| UtilError::custom(format!("Failed to install subscriber: {e}")))
}
