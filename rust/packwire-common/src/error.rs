use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if the origin ran out of bytes in the middle of a value.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind(), ErrorKind::OriginExhausted { .. })
    }

    pub fn exhausted(offset: u64, requested: usize, available: usize) -> Error {
        Error(
            ErrorKind::OriginExhausted {
                offset,
                requested,
                available,
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::OriginFailure {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn not_at_end(offset: u64) -> Error {
        Error(ErrorKind::NotAtEndOfData { offset }.into())
    }

    pub fn unsupported(name: impl Into<String>) -> Error {
        Error(ErrorKind::UnsupportedOperation { name: name.into() }.into())
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("origin exhausted at offset {offset}: requested {requested} bytes, {available} available")]
    OriginExhausted {
        offset: u64,
        requested: usize,
        available: usize,
    },

    #[error("I/O failure in '{context}': {source}")]
    OriginFailure {
        context: String,
        source: std::io::Error,
    },

    #[error("not at end of data (offset {offset})")]
    NotAtEndOfData { offset: u64 },

    #[error("unsupported operation {name}")]
    UnsupportedOperation { name: String },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid encoding for '{element}': {message}")]
    InvalidFormat { element: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::Unsupported => Error::unsupported(e.to_string()),
            _ => Error::io("", e),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Error::invalid_format("utf8", e.to_string())
    }
}
