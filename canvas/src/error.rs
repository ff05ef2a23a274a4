use failure::{Backtrace, Context, Fail};
use std::fmt;

/// The specific kind of error that can occur.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    /// The request could not be sent or its body could not be read.
    #[fail(display = "HTTP error: {}", _0)]
    Http(String),
    /// Canvas answered with a non-success status code.
    #[fail(display = "Canvas returned status {}", _0)]
    Status(u16),
    /// A response body could not be decoded.
    #[fail(display = "Serialization error: {}", _0)]
    Decode(String),
    /// A `Link` response header could not be parsed.
    #[fail(display = "Invalid link-header: {}", _0)]
    LinkHeader(String),
    /// A URL could not be built from the configuration.
    #[fail(display = "Invalid URL: {}", _0)]
    InvalidUrl(String),
    /// Hints that destructuring should not be exhaustive.
    ///
    /// This enum may grow additional variants, so this makes sure clients
    /// don't count on exhaustive matching. (Otherwise, adding a new variant
    /// could break existing code.)
    #[doc(hidden)]
    #[fail(display = "Non exhaustive")]
    __Nonexhaustive,
}

/// An error that can occur while talking to Canvas.
#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

impl Error {
    /// Return the kind of this error.
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }

    /// Whether the response arrived but its body was not what we expected.
    pub fn is_decode(&self) -> bool {
        match self.kind() {
            ErrorKind::Decode(_) => true,
            _ => false,
        }
    }
}

impl Fail for Error {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<ErrorKind>> for Error {
    fn from(inner: Context<ErrorKind>) -> Error {
        Error { inner }
    }
}
