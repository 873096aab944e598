use std::fmt;

use crate::ewkb::EwkbError;

/// An error from a [`Codec`][super::Codec] or one of its plans.
pub enum CodecError {
    /// Operation not supported, either the format or the value type.
    Unsupported,
    /// Scan target is not a geometry slot.
    InvalidTarget,
    /// Decoded geometry kind differ from the scan target.
    TypeMismatch {
        target: &'static str,
        found: &'static str,
    },
    /// Failed to encode geometry.
    Encode(EwkbError),
    /// Failed to decode geometry.
    Ewkb(EwkbError),
    /// Text format value is not valid hex.
    Hex(hex::FromHexError),
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(e) | Self::Ewkb(e) => Some(e),
            Self::Hex(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("operation not supported"),
            Self::InvalidTarget => f.write_str("target must be a mutable reference to a geometry"),
            Self::TypeMismatch { target, found } => {
                write!(f, "target type &mut {target} doesn't match geometry type {found}")
            }
            Self::Encode(e) => write!(f, "failed to encode geometry: {e}"),
            Self::Ewkb(e) => fmt::Display::fmt(e, f),
            Self::Hex(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl fmt::Debug for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

macro_rules! from {
    (<$ty:ty>$pat:pat => $body:expr) => {
        impl From<$ty> for CodecError {
            fn from($pat: $ty) -> Self {
                $body
            }
        }
    };
}

from!(<EwkbError>e => Self::Ewkb(e));
from!(<hex::FromHexError>e => Self::Hex(e));
