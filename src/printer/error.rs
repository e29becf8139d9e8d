//! Printer error types.
//!
//! Rendering a well-formed tree cannot fail. The only recoverable errors come
//! from the output sink; malformed trees are programmer errors and panic.

use std::{fmt, io};
use thiserror::Error;

/// The output sink refused rendered text.
#[derive(Debug, Error)]
pub enum PrintError {
    /// Writing to an I/O destination failed.
    #[error("failed to write rendered source: {0}")]
    Io(#[from] io::Error),

    /// A formatting sink reported an error.
    #[error("output sink rejected rendered source")]
    Fmt(#[from] fmt::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrintError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert!(err.to_string().contains("failed to write"));
        assert!(err.to_string().contains("pipe closed"));

        let err = PrintError::from(fmt::Error);
        assert!(err.to_string().contains("rejected"));
    }
}
