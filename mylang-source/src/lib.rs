//! Source code representation and error management.

use std::{cell::RefCell, fmt, ops::Range};

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
    /// Byte offset of the first character of every line.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            errors: ErrorReporter::new(),
            line_starts,
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the 1-based line and column of the byte `offset`.
    /// Columns count characters, not bytes.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .content
            .get(line_start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        Position {
            line: line + 1,
            column: column + 1,
        }
    }

    /// Returns the text of the 1-based `line` without its line terminator.
    pub fn line_text(&self, line: usize) -> &'a str {
        let start = match self.line_starts.get(line.wrapping_sub(1)) {
            Some(start) => *start,
            None => return "",
        };
        let end = self
            .line_starts
            .get(line)
            .map_or(self.content.len(), |next| next - 1);
        self.content[start..end].trim_end_matches('\r')
    }

    /// Builds a [`Diagnostic`] pointing at `span`.
    pub fn diagnostic(
        &self,
        phase: Phase,
        message: impl ToString,
        span: Range<usize>,
    ) -> Diagnostic {
        let position = self.position(span.start);
        Diagnostic {
            phase,
            message: message.to_string(),
            line_text: self.line_text(position.line).to_string(),
            span,
            position,
        }
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The pipeline stage that produced a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lexical,
    Syntax,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Lexical => write!(f, "Lexical"),
            Phase::Syntax => write!(f, "Syntax"),
        }
    }
}

/// Represents a lexical or syntax error (error found before evaluation).
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub phase: Phase,
    pub message: String,
    pub span: Range<usize>,
    pub position: Position,
    /// The source line containing `span.start`.
    pub line_text: String,
}

impl Diagnostic {
    /// The first line of the rendered diagnostic, without the source excerpt.
    pub fn headline(&self) -> String {
        format!(
            "{phase} error at {position}: {message}",
            phase = self.phase,
            position = self.position,
            message = self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline())?;
        writeln!(f, "{}", self.line_text)?;
        write!(f, "{:>width$}", "^", width = self.position.column)
    }
}

impl std::error::Error for Diagnostic {}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<Diagnostic>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for
    /// ergonomics.
    pub fn add_error(&self, error: Diagnostic) {
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// Returns a copy of the accumulated errors, in the order they were reported.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.errors.borrow().clone()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "{}", error)?;
        }

        Ok(())
    }
}
