use std::{fmt, io};

/// Errors surfaced by configuration parsing and the training loop.
#[derive(Debug)]
pub enum Error {
    /// A transfer-function mode name was not recognized.
    UnknownTransfer(String),

    /// A dataset mode name was not recognized.
    UnknownDatasetMode(String),

    /// Writing the cost log failed.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTransfer(name) => write!(f, "invalid activation function: {name}"),
            Error::UnknownDatasetMode(name) => write!(f, "invalid dataset mode: {name}"),
            Error::Io(err) => write!(f, "cost log: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
