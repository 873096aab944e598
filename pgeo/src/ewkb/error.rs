use std::fmt;

use geozero::error::GeozeroError;

/// An error when reading or writing EWKB.
pub enum EwkbError {
    /// Input ended in the middle of the header.
    UnexpectedEof,
    /// Byte order marker is neither `0` nor `1`.
    InvalidByteOrder(u8),
    /// Type code is not one of the seven geometry kinds, or carry unknown bits.
    UnknownType(u32),
    /// Geometry variant have no EWKB representation.
    UnsupportedGeometry(&'static str),
    /// Failed to read or write the geometry body.
    Geozero(GeozeroError),
}

impl std::error::Error for EwkbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geozero(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for EwkbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ewkb: ")?;
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::InvalidByteOrder(b) => write!(f, "invalid byte order marker: {b}"),
            Self::UnknownType(t) => write!(f, "unknown geometry type: {t:#x}"),
            Self::UnsupportedGeometry(name) => write!(f, "unsupported geometry type: {name}"),
            Self::Geozero(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl fmt::Debug for EwkbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl From<GeozeroError> for EwkbError {
    fn from(e: GeozeroError) -> Self {
        Self::Geozero(e)
    }
}
