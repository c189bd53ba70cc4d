//! Result output.

use crate::error::CallerError;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Where the extracted result is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output, verbatim with no trailing newline.
    Stdout,
    /// A file, replaced with the result bytes.
    File(PathBuf),
}

impl OutputSink {
    /// Chooses the file sink when a path is given, stdout otherwise.
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(OutputSink::Stdout, OutputSink::File)
    }

    /// Writes `result` to this sink.
    pub fn write(&self, result: &str) -> Result<(), CallerError> {
        match self {
            OutputSink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(result.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(CallerError::Stdout)
            }
            OutputSink::File(path) => fs::write(path, result).map_err(|source| CallerError::Output {
                path: path.clone(),
                source,
            }),
        }
    }
}
