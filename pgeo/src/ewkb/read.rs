use std::io::Cursor;

use bytes::Buf;
use geozero::wkb::{FromWkb, WkbDialect};

use super::{ByteOrder, DEFAULT_SRID, EwkbError, FLAGS, SRID_FLAG, kind_of};
use crate::geometry::Geometry;

/// Result of [`unmarshal`].
#[derive(Debug, Clone, PartialEq)]
pub struct Unmarshaled {
    /// The decoded geometry.
    pub geometry: Geometry,
    /// Srid of the outermost header, [`DEFAULT_SRID`] if absent.
    pub srid: i32,
    /// Byte order of the outermost header.
    pub order: ByteOrder,
    /// Number of bytes consumed.
    pub len: usize,
}

/// Decode EWKB.
///
/// Plain WKB is also accepted, it is EWKB without srid. Z and M ordinates are
/// read and dropped. ISO WKB type codes are rejected, PostGIS always use the
/// EWKB flags.
///
/// Trailing bytes after the geometry are not read, see [`Unmarshaled::len`].
pub fn unmarshal(data: &[u8]) -> Result<Unmarshaled, EwkbError> {
    let Header { order, srid } = Header::read(data)?;

    let mut cursor = Cursor::new(data);
    let geometry = Geometry::from_wkb(&mut cursor, WkbDialect::Ewkb)?;

    Ok(Unmarshaled {
        geometry,
        srid: srid.unwrap_or(DEFAULT_SRID),
        order,
        len: cursor.position() as usize,
    })
}

struct Header {
    order: ByteOrder,
    srid: Option<i32>,
}

impl Header {
    fn read(mut buf: &[u8]) -> Result<Header, EwkbError> {
        if buf.remaining() < size_of::<u8>() + size_of::<u32>() {
            return Err(EwkbError::UnexpectedEof);
        }

        let marker = buf.get_u8();
        let order = ByteOrder::from_marker(marker).ok_or(EwkbError::InvalidByteOrder(marker))?;

        let raw = match order {
            ByteOrder::BigEndian => buf.get_u32(),
            ByteOrder::LittleEndian => buf.get_u32_le(),
        };

        // reserved bits and iso codes are left after the flags
        if kind_of(raw & !FLAGS).is_none() {
            return Err(EwkbError::UnknownType(raw));
        }

        if raw & SRID_FLAG == 0 {
            return Ok(Header { order, srid: None });
        }

        if buf.remaining() < size_of::<i32>() {
            return Err(EwkbError::UnexpectedEof);
        }

        let srid = match order {
            ByteOrder::BigEndian => buf.get_i32(),
            ByteOrder::LittleEndian => buf.get_i32_le(),
        };
        Ok(Header { order, srid: Some(srid) })
    }
}
