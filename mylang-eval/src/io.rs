//! The outside world as seen by `print` and `input`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Io {
    /// Writes `line` followed by a newline.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
    /// Shows `prompt` and blocks until a line is entered. The line terminator is not included.
    /// Fails with [`io::ErrorKind::UnexpectedEof`] once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from stdin and writes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdIo;

impl Io for StdIo {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        let len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(len);
        Ok(line)
    }
}

/// Records output and serves input from a queue of lines.
#[derive(Debug, Default, Clone)]
pub struct MemoryIo {
    output: Vec<String>,
    prompts: Vec<String>,
    input: VecDeque<String>,
}

impl MemoryIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `MemoryIo` that answers `input` with `lines`, in order.
    pub fn with_input<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every line written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Io for MemoryIo {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.input
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"))
    }
}
