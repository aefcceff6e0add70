use std::io::{self, Write};

/// Where command results go.
pub trait OutputWriter {
    fn write_schema(&mut self, rendered: &str) -> Result<(), OutputError>;
    fn write_error(&mut self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl From<OutputError> for crate::domain::error::SchemyError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::IoError(e) => Self::Io(e),
        }
    }
}

/// Writes results to one stream and messages to another; stdout and stderr
/// by default.
pub struct ConsoleWriter<O = io::Stdout, E = io::Stderr> {
    out: O,
    err: E,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Write, E: Write> ConsoleWriter<O, E> {
    pub fn with_streams(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> OutputWriter for ConsoleWriter<O, E> {
    /// `rendered` already ends in a newline, and is written as-is.
    fn write_schema(&mut self, rendered: &str) -> Result<(), OutputError> {
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn write_error(&mut self, error: &str) -> Result<(), OutputError> {
        writeln!(self.err, "Error: {}", error)?;
        Ok(())
    }
}
