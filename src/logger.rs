//! Terminal output.
//!
//! - [`log!`] prints one line behind a colored `[module]` prefix.
//! - [`DocumentEvent`] is what a build reports about `data.json`: a load
//!   failure, the sections it rendered, or an icon it could not draw.
//! - [`WatchStatus`] keeps the rebuild status of `folio serve` to one block
//!   that is overwritten on every change.
//!
//! ```ignore
//! log!("build"; "wrote {}", index.display());
//! DocumentEvent::Rendered { path, sections: &ids }.log();
//! ```

use crate::{data::LoadError, render::SectionId};
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    error::Error,
    io::{Write, stdout},
    path::Path,
    sync::OnceLock,
};

/// Terminal columns, read once.
static TERMINAL_WIDTH: OnceLock<usize> = OnceLock::new();

/// Columns assumed when the terminal size is unknown (piped output, CI).
const FALLBACK_WIDTH: u16 = 120;

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| usize::from(size().map_or(FALLBACK_WIDTH, |(w, _)| w)))
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// ```ignore
/// log!("serve"; "http://{}", addr);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print `message` behind `[module]`.
///
/// Single-line messages are cut to the terminal width; multi-line ones
/// (rendered section text, error chains) are printed whole.
pub fn log(module: &str, message: &str) {
    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();

    let prefix = module_prefix(module);
    if message.contains('\n') {
        writeln!(stdout, "{prefix} {message}").ok();
    } else {
        // "[" + module + "] "
        let room = terminal_width().saturating_sub(module.len() + 3);
        writeln!(stdout, "{prefix} {}", truncate_str(message, room)).ok();
    }

    stdout.flush().ok();
}

fn module_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module {
        "build" | "init" => prefix.bright_yellow().bold(),
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "preview" => prefix.bright_magenta().bold(),
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.red().bold(),
        _ => prefix.bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// `error` followed by its sources, joined with `: `.
fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// File name of the document for log lines, the full path as fallback.
fn document_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

// ============================================================================
// Document Events
// ============================================================================

/// What happened to the data document during one build or preview.
#[derive(Debug)]
pub enum DocumentEvent<'a> {
    /// Unreadable or malformed. The page shows only the load error message.
    LoadFailed { error: &'a LoadError },
    /// Sections that received markup, in page order.
    Rendered { path: &'a Path, sections: &'a [SectionId] },
    /// Inline icons have no glyph for `name`; the placeholder stays.
    UnknownIcon { section: SectionId, name: &'a str },
}

impl DocumentEvent<'_> {
    const fn module(&self) -> &'static str {
        match self {
            Self::LoadFailed { .. } => "error",
            Self::Rendered { .. } => "build",
            Self::UnknownIcon { .. } => "warn",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::LoadFailed { error } => error_chain(*error),
            Self::Rendered { path, sections } if sections.is_empty() => {
                format!("{}: nothing to render", document_name(path))
            }
            Self::Rendered { path, sections } => {
                let ids: Vec<_> = sections.iter().map(|id| id.as_str()).collect();
                format!("{}: {}", document_name(path), ids.join(", "))
            }
            Self::UnknownIcon { section, name } => {
                format!(
                    "#{}: no inline icon `{name}`, set `icons = \"script\"` to load it",
                    section.as_str()
                )
            }
        }
    }

    pub fn log(&self) {
        log(self.module(), &self.message());
    }
}

// ============================================================================
// Watch Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Rebuilt,
    Unchanged,
    Failed,
}

/// Rebuild status while serving. Each report replaces the previous one.
///
/// ```ignore
/// let mut status = WatchStatus::new();
/// status.rebuilt("data.json");
/// status.failed("data.json", &err);
/// ```
pub struct WatchStatus {
    /// Terminal lines taken by the last report.
    last_lines: usize,
    /// Successful rebuilds since serving started.
    rebuilds: usize,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self {
            last_lines: 0,
            rebuilds: 0,
        }
    }

    /// The page was rebuilt because `trigger` changed.
    pub fn rebuilt(&mut self, trigger: &str) {
        self.rebuilds += 1;
        let message = format!("rebuilt #{}: {trigger}", self.rebuilds);
        self.display(StatusKind::Rebuilt, &message);
    }

    /// `path` was touched but its content is the same.
    pub fn unchanged(&mut self, path: &str) {
        self.display(StatusKind::Unchanged, &format!("unchanged: {path}"));
    }

    /// Rebuilding after `trigger` failed; the full error chain goes below.
    pub fn failed(&mut self, trigger: &str, error: &anyhow::Error) {
        self.display(StatusKind::Failed, &format!("{trigger} failed\n{error:#}"));
    }

    fn display(&mut self, kind: StatusKind, message: &str) {
        let mut stdout = stdout().lock();

        if self.last_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.last_lines as u16;
            execute!(stdout, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
        }

        let timestamp = format!("[{}]", chrono::Local::now().format("%H:%M:%S")).dimmed();
        writeln!(stdout, "{timestamp} {}", decorate(kind, message)).ok();
        stdout.flush().ok();

        self.last_lines = count_lines(message);
    }
}

fn decorate(kind: StatusKind, message: &str) -> String {
    match kind {
        StatusKind::Rebuilt => format!("{} {message}", "✓".green()),
        StatusKind::Unchanged => message.dimmed().to_string(),
        StatusKind::Failed => format!("{} {message}", "✗".red()),
    }
}

/// Terminal lines a status message occupies.
fn count_lines(message: &str) -> usize {
    message.lines().count().max(1)
}
