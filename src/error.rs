#[macro_export]
macro_rules! err_new {
    ($kind:expr, $message:expr) => {
        $crate::error::Error::new(file!(), line!(), column!(), $kind, $message)
    };
}

#[macro_export]
macro_rules! err_new_io {
    ($err:expr) => {
        $crate::error::Error::new(
            file!(),
            line!(),
            column!(),
            $crate::error::Kind::IoError($err.kind()),
            &$err.to_string(),
        )
    };
}

#[macro_export]
macro_rules! err_new_json {
    ($err:expr) => {
        $crate::error::Error::new(
            file!(),
            line!(),
            column!(),
            $crate::error::Kind::Config,
            &$err.to_string(),
        )
    };
}

#[macro_export]
macro_rules! err_new_utf8 {
    ($err:expr) => {
        $crate::error::Error::new(
            file!(),
            line!(),
            column!(),
            $crate::error::Kind::EncodingError,
            &$err.to_string(),
        )
    };
}

#[macro_export]
macro_rules! err_new_tryfrom {
    ($err:expr) => {
        $crate::error::Error::new(
            file!(),
            line!(),
            column!(),
            $crate::error::Kind::TryFromIntError,
            &$err.to_string(),
        )
    };
}

pub struct Error {
    location: Option<String>,
    kind: Kind,
    message: String,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut f = f.debug_struct("Error");
        if let Some(ref location) = self.location {
            f.field("location", location);
        }
        f.field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self {
            location: None,
            kind: Kind::IoError(value.kind()),
            message: value.to_string(),
        }
    }
}
impl From<std::num::TryFromIntError> for Error {
    fn from(value: std::num::TryFromIntError) -> Self {
        Self {
            location: None,
            kind: Kind::TryFromIntError,
            message: value.to_string(),
        }
    }
}
impl From<std::str::Utf8Error> for Error {
    fn from(value: std::str::Utf8Error) -> Self {
        Self {
            location: None,
            kind: Kind::EncodingError,
            message: value.to_string(),
        }
    }
}
impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self {
            location: None,
            kind: Kind::Other,
            message: value.to_string(),
        }
    }
}

impl Error {
    #[must_use]
    pub fn new(file: &str, line: u32, column: u32, kind: Kind, message: &str) -> Self {
        Self {
            location: Some(format!("{file}:{line}:{column}")),
            kind,
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Requested count is negative, not a number, or larger than what is left.
    InvalidCount,
    /// An operation needed a non-empty sequence and got an empty one.
    DegenerateSequence,
    /// Seed bytes are not valid UTF-8.
    EncodingError,
    IoError(std::io::ErrorKind),
    TryFromIntError,
    Config,
    Usage,
    Other,
}
