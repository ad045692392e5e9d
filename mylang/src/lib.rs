pub mod config;

use std::path::PathBuf;
use std::{fs, io};

use mylang_eval::{Interpreter, Io, RuntimeError, StdIo};
use mylang_parser::lexer::{Token, Tokenizer};
use mylang_parser::Parser;
use mylang_source::{Diagnostic, Source};
use mylang_value::Value;
use thiserror::Error;
use tracing::debug;

pub use config::Config;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Syntax(Diagnostic),
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
    #[error("could not read '{}': {source}", .path.display())]
    ReadFile { path: PathBuf, source: io::Error },
}

/// Parses `text` and evaluates it in the global scope of `interpreter`.
///
/// Lexical errors are written to the interpreter's output and do not stop the run; a syntax error
/// stops it before anything is evaluated.
pub fn run_source<I: Io>(interpreter: &mut Interpreter<I>, text: &str) -> Result<Value, Error> {
    let source = Source::new(text);
    let program = Parser::new(&source).parse_program();

    for diagnostic in source.errors.errors() {
        interpreter
            .io_mut()
            .write_line(&diagnostic.to_string())
            .map_err(RuntimeError::from)?;
    }

    let program = program.map_err(Error::Syntax)?;
    Ok(interpreter.interpret(&program)?)
}

/// Reads the script at `path` and runs it once.
pub fn run_file<I: Io>(interpreter: &mut Interpreter<I>, path: PathBuf) -> Result<Value, Error> {
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(Error::ReadFile { path, source }),
    };
    debug!(path = %path.display(), bytes = text.len(), "running script");
    run_source(interpreter, &text)
}

/// An interactive session: successive inputs share one global scope.
pub struct Session<I: Io = StdIo> {
    interpreter: Interpreter<I>,
    /// Lines of an input whose braces are not closed yet.
    pending: String,
}

impl<I: Io> Session<I> {
    pub fn new(interpreter: Interpreter<I>) -> Self {
        Self {
            interpreter,
            pending: String::new(),
        }
    }

    pub fn interpreter(&self) -> &Interpreter<I> {
        &self.interpreter
    }

    /// The prompt to show before reading the next line.
    pub fn prompt(&self) -> &'static str {
        if self.pending.is_empty() {
            ">>> "
        } else {
            "... "
        }
    }

    /// Feeds one line of input.
    ///
    /// Returns `None` when there is nothing to run yet: the line is blank, or it leaves a `{`
    /// unclosed and more lines are needed. Errors leave the global scope intact.
    pub fn feed_line(&mut self, line: &str) -> Option<Result<Value, Error>> {
        if self.pending.is_empty() && line.trim().is_empty() {
            return None;
        }
        self.pending.push_str(line);
        self.pending.push('\n');
        if open_braces(&self.pending) > 0 {
            return None;
        }

        let text = std::mem::take(&mut self.pending);
        Some(run_source(&mut self.interpreter, &text))
    }
}

/// Number of `{` not yet matched by a `}`. Braces inside strings and comments are ignored.
fn open_braces(text: &str) -> i64 {
    let source = Source::new(text);
    Tokenizer::new(&source).fold(0, |depth, token| match token.token {
        Token::OpenBrace => depth + 1,
        Token::CloseBrace => depth - 1,
        _ => depth,
    })
}
