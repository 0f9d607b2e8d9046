use std::fmt;
use std::io;
use std::path::PathBuf;

use cfg_membership::RecognizeError;

/// Everything that stops the checker before it prints results.
#[derive(Debug)]
pub enum CliError {
    /// A file couldn't be read.
    Read { path: PathBuf, source: io::Error },
    /// Standard input couldn't be read.
    Stdin(io::Error),
    /// Output couldn't be written.
    Write(io::Error),
    /// The grammar can't serve the request.
    Recognize(RecognizeError),
    /// Results couldn't be serialized.
    Json(serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Read { .. } | CliError::Stdin(_) | CliError::Recognize(_) => 2,
            CliError::Write(_) | CliError::Json(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::Read { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            CliError::Stdin(error) => write!(f, "cannot read standard input: {}", error),
            CliError::Write(error) => write!(f, "cannot write output: {}", error),
            CliError::Recognize(error) => write!(f, "{}", error),
            CliError::Json(error) => write!(f, "cannot serialize results: {}", error),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Read { source, .. } => Some(source),
            CliError::Stdin(error) | CliError::Write(error) => Some(error),
            CliError::Recognize(error) => Some(error),
            CliError::Json(error) => Some(error),
        }
    }
}

impl From<RecognizeError> for CliError {
    fn from(error: RecognizeError) -> Self {
        CliError::Recognize(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Json(error)
    }
}
