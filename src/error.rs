//! Crate-level error type.

use std::fmt;

/// Errors produced by sphereview.
#[derive(Debug)]
pub enum Error {
    /// A constructor or config value was outside its allowed range.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// Generic I/O failure (reading or writing a config file).
    Io(std::io::Error),
    /// TOML parsing or serialization failure.
    ConfigParse(String),
    /// The window event loop could not be created or failed while running.
    EventLoop(winit::error::EventLoopError),
    /// The OS refused to create the window.
    Window(winit::error::OsError),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: f32) -> Self {
        Self::InvalidParameter { name, value }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::EventLoop(e) => write!(f, "event loop error: {e}"),
            Self::Window(e) => write!(f, "window creation failed: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::EventLoop(e) => Some(e),
            Self::Window(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<winit::error::EventLoopError> for Error {
    fn from(e: winit::error::EventLoopError) -> Self {
        Self::EventLoop(e)
    }
}

impl From<winit::error::OsError> for Error {
    fn from(e: winit::error::OsError) -> Self {
        Self::Window(e)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_names_the_field() {
        let err = Error::invalid("trackball radius", -1.0);
        assert_eq!(err.to_string(), "invalid value for trackball radius: -1");
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error as _;
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
