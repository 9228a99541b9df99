use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// A field was given a structurally illegal value, such as a cookie
    /// name containing a separator character. Raised at the mutating call.
    InvalidFormat(String),
    /// A malformed or missing required input to one of the pure functions,
    /// such as an empty domain or a non-http uri passed to matching.
    InvalidArgument(String),
    /// Uri errors surfaced from the http crate.
    Http(http::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFormat(v) => write!(f, "invalid format: {}", v),
            Error::InvalidArgument(v) => write!(f, "invalid argument: {}", v),
            Error::Http(v) => write!(f, "http api: {}", v),
        }
    }
}

impl std::error::Error for Error {}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::Http(e)
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(e: http::uri::InvalidUri) -> Self {
        Error::Http(e.into())
    }
}
