//! Output sink handed to hooks by the host.
//!
//! Lines render the way the package manager prints hook output:
//!
//! ```text
//! [HOOK - bintray-updater] post_upload_recipe(): Reading package info from Bintray...
//! [HOOK - binary-linter] post_package(): WARN: don't know how to verify for os None, giving up...
//! ```

use std::fmt;
use std::io::Write;

use colored::Colorize;

/// Severity of an output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info | Level::Success => "",
            Level::Warn => "WARN: ",
            Level::Error => "ERROR: ",
        }
    }
}

/// Where a line came from: the hook name and the lifecycle method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a> {
    pub hook: &'a str,
    pub method: &'a str,
}

/// One line of hook output.
#[derive(Debug, Clone, Copy)]
pub struct OutputRecord<'a> {
    pub level: Level,
    pub scope: Option<Scope<'a>>,
    pub message: &'a str,
}

impl<'a> OutputRecord<'a> {
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            level,
            scope: None,
            message,
        }
    }
}

impl fmt::Display for OutputRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scope) = self.scope {
            write!(f, "[HOOK - {}] {}(): ", scope.hook, scope.method)?;
        }
        write!(f, "{}{}", self.level.tag(), self.message)
    }
}

/// Sink for hook output.
///
/// Sinks mirror every line to `tracing` at debug level.
pub trait HookOutput {
    fn emit(&mut self, record: &OutputRecord<'_>);

    fn info(&mut self, message: &str) {
        self.emit(&OutputRecord::new(Level::Info, message));
    }

    fn success(&mut self, message: &str) {
        self.emit(&OutputRecord::new(Level::Success, message));
    }

    fn warn(&mut self, message: &str) {
        self.emit(&OutputRecord::new(Level::Warn, message));
    }

    fn error(&mut self, message: &str) {
        self.emit(&OutputRecord::new(Level::Error, message));
    }
}

/// Wraps a sink so every line carries the hook's scope prefix.
pub(crate) struct ScopedOutput<'o, 's> {
    inner: &'o mut dyn HookOutput,
    scope: Scope<'s>,
}

impl<'o, 's> ScopedOutput<'o, 's> {
    pub(crate) fn new(inner: &'o mut dyn HookOutput, hook: &'s str, method: &'s str) -> Self {
        Self {
            inner,
            scope: Scope { hook, method },
        }
    }
}

impl HookOutput for ScopedOutput<'_, '_> {
    fn emit(&mut self, record: &OutputRecord<'_>) {
        let scoped = OutputRecord {
            scope: record.scope.or(Some(self.scope)),
            ..*record
        };
        self.inner.emit(&scoped);
    }
}

fn trace(record: &OutputRecord<'_>) {
    tracing::debug!(level = ?record.level, "{record}");
}

// ---------------------------------------------------------------------------
// ConsoleOutput
// ---------------------------------------------------------------------------

/// Writes colored lines to any writer (stdout for the CLI).
pub struct ConsoleOutput<W: Write> {
    writer: W,
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleOutput<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> HookOutput for ConsoleOutput<W> {
    fn emit(&mut self, record: &OutputRecord<'_>) {
        trace(record);
        let line = record.to_string();
        let painted = match record.level {
            Level::Info => line.normal(),
            Level::Success => line.green(),
            Level::Warn => line.yellow(),
            Level::Error => line.red(),
        };
        if let Err(err) = writeln!(self.writer, "{painted}") {
            tracing::debug!(error = %err, "dropped hook output line");
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryOutput
// ---------------------------------------------------------------------------

/// Captures rendered lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryOutput {
    lines: Vec<(Level, String)>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|(_, l)| l.as_str())
    }

    pub fn lines_at(&self, level: Level) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |(l, _)| *l == level)
            .map(|(_, line)| line.as_str())
    }

    /// `true` if any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().any(|l| l.contains(needle))
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl HookOutput for MemoryOutput {
    fn emit(&mut self, record: &OutputRecord<'_>) {
        trace(record);
        self.lines.push((record.level, record.to_string()));
    }
}
