//! Extended Well-Known Binary.
//!
//! EWKB is the PostGIS flavour of WKB, it is what `geometry` sends in binary
//! format and, hex encoded, in text format. Encoding and decoding is done by
//! [`geozero`], this module validates the outermost header and extracts the srid.
//!
//! Every geometry starts with a header:
//!
//! - byte order marker, `0` for big endian and `1` for little endian
//! - `u32` type code, with [`SRID_FLAG`], [`Z_FLAG`] and [`M_FLAG`] on the high bits
//! - `i32` srid, only present when [`SRID_FLAG`] is set
//!
//! followed by the coordinates, counts prefixed. Members of multi geometries and
//! collections are full geometries with their own header.
//!
//! <https://postgis.net/docs/using_postgis_dbmanagement.html#EWKB_EWKT>
mod error;
mod read;
mod write;

pub use error::EwkbError;
pub use read::{Unmarshaled, unmarshal};
pub use write::{WriteEwkb, marshal};

use crate::geometry::GeometryKind;

/// Srid written when none is requested, no srid is written in the header.
pub const DEFAULT_SRID: i32 = 0;

/// Byte order written by [`marshal`].
pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::LittleEndian;

/// Type code flag, srid follows the type code.
pub const SRID_FLAG: u32 = 0x2000_0000;

/// Type code flag, coordinates have a z ordinate.
pub const Z_FLAG: u32 = 0x8000_0000;

/// Type code flag, coordinates have a m ordinate.
pub const M_FLAG: u32 = 0x4000_0000;

const FLAGS: u32 = SRID_FLAG | Z_FLAG | M_FLAG;

/// EWKB byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// XDR, marker `0`.
    BigEndian,
    /// NDR, marker `1`.
    LittleEndian,
}

impl ByteOrder {
    /// Returns the header marker byte.
    pub const fn marker(&self) -> u8 {
        match self {
            ByteOrder::BigEndian => 0,
            ByteOrder::LittleEndian => 1,
        }
    }

    /// Returns [`None`] for unknown marker.
    pub const fn from_marker(marker: u8) -> Option<ByteOrder> {
        match marker {
            0 => Some(ByteOrder::BigEndian),
            1 => Some(ByteOrder::LittleEndian),
            _ => None,
        }
    }
}

/// Kind of a type code stripped from its flags.
const fn kind_of(code: u32) -> Option<GeometryKind> {
    match code {
        1 => Some(GeometryKind::Point),
        2 => Some(GeometryKind::LineString),
        3 => Some(GeometryKind::Polygon),
        4 => Some(GeometryKind::MultiPoint),
        5 => Some(GeometryKind::MultiLineString),
        6 => Some(GeometryKind::MultiPolygon),
        7 => Some(GeometryKind::GeometryCollection),
        _ => None,
    }
}
