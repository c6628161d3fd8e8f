use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeneratorError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Navigation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Screenshot capture failed: {0}")]
    CaptureFailed(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Browser launch failed: {0}")]
    BrowserLaunchFailed(String),

    #[error("Browser error: {0}")]
    BrowserError(String),

    #[error("Page error: {0}")]
    PageError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl GeneratorError {
    /// Errors raised while rendering a single mockup. These are counted and
    /// the batch moves on to the next file.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GeneratorError::NavigationFailed(_)
                | GeneratorError::Timeout(_)
                | GeneratorError::CaptureFailed(_)
                | GeneratorError::InvalidPath(_)
        )
    }

    pub fn scope(&self) -> ErrorScope {
        match self {
            GeneratorError::FileNotFound(_) | GeneratorError::ConfigurationError(_) => {
                ErrorScope::Config
            }
            e if e.is_recoverable() => ErrorScope::Render,
            _ => ErrorScope::Fatal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Bad input from the command line; nothing was rendered.
    Config,
    /// A single file failed; the run continues.
    Render,
    /// Run-level failure outside the per-file loop.
    Fatal,
}

impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        GeneratorError::IoError(err.to_string())
    }
}
