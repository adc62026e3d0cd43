//! Crate-level error types.

use std::fmt;

use crate::surface::SurfaceError;

/// Errors produced by the superformula crate.
#[derive(Debug)]
pub enum SuperformulaError {
    /// Unrecognized flag, missing value, or unparsable value. Also carries
    /// the `-h` help request, which exits successfully.
    InvalidArgument(clap::Error),
    /// A flag value that parsed but is outside its accepted range.
    InvalidValue {
        /// The offending flag, e.g. `-s`.
        flag: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
    /// Window or renderer creation failed; no frame was rendered.
    SurfaceInit(SurfaceError),
    /// Presentation failed in a way the surface could not recover from.
    Render(String),
    /// Console output could not be written.
    Io(std::io::Error),
}

impl SuperformulaError {
    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(e) => e.exit_code(),
            Self::InvalidValue { .. } => 2,
            Self::SurfaceInit(_) | Self::Render(_) | Self::Io(_) => 1,
        }
    }
}

impl fmt::Display for SuperformulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => write!(f, "{e}"),
            Self::InvalidValue { flag, reason } => {
                write!(f, "invalid value for {flag}: {reason}")
            }
            Self::SurfaceInit(e) => write!(f, "display surface error: {e}"),
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SuperformulaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(e) => Some(e),
            Self::SurfaceInit(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::InvalidValue { .. } | Self::Render(_) => None,
        }
    }
}

impl From<clap::Error> for SuperformulaError {
    fn from(e: clap::Error) -> Self {
        Self::InvalidArgument(e)
    }
}

impl From<SurfaceError> for SuperformulaError {
    fn from(e: SurfaceError) -> Self {
        Self::SurfaceInit(e)
    }
}

impl From<std::io::Error> for SuperformulaError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SuperformulaError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io::{self, Write};

    use super::*;

    /// A console whose pipe has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn print_points(out: &mut impl Write, points: usize) -> Result<()> {
        writeln!(out, "Number of points: {points}")?;
        Ok(())
    }

    #[test]
    fn failed_console_write_is_reported() {
        let err = print_points(&mut ClosedPipe, 1257).unwrap_err();
        assert!(matches!(err, SuperformulaError::Io(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"), "{err}");
    }

    #[test]
    fn console_write_succeeds_into_a_buffer() {
        let mut out = Vec::new();
        print_points(&mut out, 1257).unwrap();
        assert_eq!(out, b"Number of points: 1257\n");
    }
}
