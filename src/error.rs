use std::fmt;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RBTreeError {
    /// The arena could not grow to hold another node.
    OutOfMemory,
    /// Every slot index a `NodeId` can name is in use.
    TooManyNodes,
}

impl fmt::Display for RBTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory => f.write_str("failed to allocate a tree node"),
            Self::TooManyNodes => f.write_str("node index space exhausted"),
        }
    }
}

impl std::error::Error for RBTreeError {}


#[non_exhaustive]
#[derive(Debug)]
pub enum LoggingError {
    /// The log file could not be created.
    Io(std::io::Error),
    /// A global logger was already installed.
    SetLogger(log::SetLoggerError),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "couldn't open log file: {e}"),
            Self::SetLogger(e) => write!(f, "couldn't install logger: {e}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::SetLogger(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::SetLogger(e)
    }
}
