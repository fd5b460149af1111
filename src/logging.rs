use std::fmt::{self, Display};

use log::{Level, LevelFilter};

use super::{ErrorKind, Result};

/// A structured logging handle for one component
///
/// Callers name themselves explicitly and hand the handle down, rather than
/// having the logger dig the caller out of the stack. Each handle carries its
/// own level, checked before the global `log` filter gets a say.
///
/// Records go through the `log` facade with the component as the target,
/// and the fields appended as `key=value` pairs:
///
/// ```
/// use kubewright::Logger;
/// let log = Logger::new("deploy-tool");
/// log.info("Generated manifest", &[("kind", &"Deployment"), ("replicas", &3)]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Logger {
    component: String,
    level: LevelFilter,
}

/// A key and a value to attach to a log line
pub type Field<'a> = (&'a str, &'a dyn Display);

impl Logger {
    /// A handle that lets everything through to the global filter
    pub fn new(component: &str) -> Self {
        Logger {
            component: component.to_string(),
            level: LevelFilter::Trace,
        }
    }

    /// Handle for a component with a level given by name
    ///
    /// Accepts the usual names case insensitively, plus `warning`,
    /// and `fatal`/`panic` as aliases for `error`.
    pub fn from_level_str(component: &str, level: &str) -> Result<Self> {
        Ok(Logger::new(component).with_level(parse_level(level)?))
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Handle for a sub component, keeping the level
    pub fn child(&self, name: &str) -> Self {
        Logger {
            component: format!("{}::{}", self.component, name),
            level: self.level,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Emit a record at an arbitrary level
    pub fn log(&self, level: Level, message: &str, fields: &[Field<'_>]) {
        if !self.enabled(level) {
            return;
        }
        log!(target: self.component.as_str(), level, "{}{}", message, Fields(fields));
    }

    pub fn trace(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::Trace, message, fields)
    }

    pub fn debug(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::Debug, message, fields)
    }

    pub fn info(&self, message: &str, fields: &[Field<'_>]) {
        self.log(Level::Info, message, fields)
    }

    /// Warning with the error that caused it
    pub fn warn(&self, message: &str, err: &dyn Display, fields: &[Field<'_>]) {
        self.log_error(Level::Warn, message, err, fields)
    }

    /// Error with the error that caused it
    pub fn error(&self, message: &str, err: &dyn Display, fields: &[Field<'_>]) {
        self.log_error(Level::Error, message, err, fields)
    }

    fn log_error(&self, level: Level, message: &str, err: &dyn Display, fields: &[Field<'_>]) {
        let mut all: Vec<Field<'_>> = Vec::with_capacity(fields.len() + 1);
        all.push(("error", err));
        all.extend_from_slice(fields);
        self.log(level, message, &all)
    }
}

/// Parse a level name into a filter
pub fn parse_level(s: &str) -> Result<LevelFilter> {
    let lvl = match s.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" | "fatal" | "panic" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => bail!(ErrorKind::InvalidLogLevel(s.to_string())),
    };
    Ok(lvl)
}

/// Renders fields as ` key=value key2=value2`
struct Fields<'a, 'b>(&'a [Field<'b>]);

impl<'a, 'b> Display for Fields<'a, 'b> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in self.0 {
            write!(f, " {}={}", k, v)?;
        }
        Ok(())
    }
}

/// Render fields the way they end up in log lines
pub fn format_fields(fields: &[Field<'_>]) -> String {
    Fields(fields).to_string()
}
