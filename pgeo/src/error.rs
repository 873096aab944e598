//! `pgeo` error types.
use std::{backtrace::Backtrace, fmt};

use crate::{
    codec::CodecError,
    postgres::{FormatCode, Oid},
};

/// A specialized [`Result`] type for `pgeo` operation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All possible error from `pgeo` library.
pub struct Error {
    context: String,
    backtrace: Backtrace,
    kind: ErrorKind,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// Prefix error message with `context`.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// All possible error kind from `pgeo` library.
pub enum ErrorKind {
    /// Codec failed to encode or decode a value.
    Codec(CodecError),
    /// No type registered for the oid.
    UnknownOid(Oid),
    /// Registered codec have no plan for the format.
    UnsupportedFormat { oid: Oid, format: FormatCode },
    /// Session failed to run a query.
    Session(Box<dyn std::error::Error + Send + Sync>),
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for Error {
            fn from($pat: $ty) -> Self {
                let backtrace = std::backtrace::Backtrace::capture();
                Self { context: String::new(), backtrace, kind: $body }
            }
        }
    };
}

from!(<ErrorKind>e => e);
from!(<CodecError>e => ErrorKind::Codec(e));

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.context.is_empty() {
            write!(f, "{}: ", self.context)?;
        }

        fmt::Display::fmt(&self.kind, f)?;

        if let std::backtrace::BacktraceStatus::Captured = self.backtrace.status() {
            let mut backtrace = self.backtrace.to_string();
            write!(f, "\n\n")?;
            writeln!(f, "Stack backtrace:")?;
            backtrace.truncate(backtrace.trim_end().len());
            write!(f, "{}", backtrace)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl std::error::Error for ErrorKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            Self::Session(e) => Some(&**e),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => fmt::Display::fmt(e, f),
            Self::UnknownOid(oid) => write!(f, "no type registered for oid {oid}"),
            Self::UnsupportedFormat { oid, format } => {
                write!(f, "type with oid {oid} does not support format {format}")
            }
            Self::Session(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl fmt::Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn context() {
        let err = Error::from(ErrorKind::UnknownOid(42)).context("encode");
        assert!(err.to_string().starts_with("encode: no type registered for oid 42"));

        let err = Error::from(CodecError::Unsupported);
        assert!(matches!(err.kind(), ErrorKind::Codec(CodecError::Unsupported)));
        assert!(err.to_string().starts_with("operation not supported"));
    }
}
