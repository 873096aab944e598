use std::any::Any;

use bytes::{BufMut, BytesMut};

use crate::{
    codec::{AnyValue, Codec, CodecError, DriverValue, EncodePlan, ScanPlan},
    common::verbose,
    ewkb::{self, DEFAULT_SRID, WriteEwkb},
    geometry::{
        Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
        MultiPolygon, Point, Polygon, type_name,
    },
    postgres::{BINARY_FORMAT_CODE, FormatCode, Oid, PgFormat},
    types::TypeMap,
};

/// Codec for the PostGIS `geometry` type.
///
/// Binary format is EWKB, text format is hex encoded EWKB.
///
/// Values to encode must be one of the geometry types in [`crate::geometry`],
/// either by value or as [`Geometry`]. Scan targets must be one of the same
/// types, a target of concrete kind only accepts a geometry of that kind while
/// [`Geometry`] accepts any.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryCodec;

/// Encode geometry as EWKB.
#[derive(Debug)]
pub struct BinaryEncodePlan;

/// Encode geometry as hex encoded EWKB.
#[derive(Debug)]
pub struct TextEncodePlan;

/// Scan EWKB into a geometry.
#[derive(Debug)]
pub struct BinaryScanPlan;

/// Scan hex encoded EWKB into a geometry.
#[derive(Debug)]
pub struct TextScanPlan;

impl Codec for GeometryCodec {
    fn format_supported(&self, format: FormatCode) -> bool {
        PgFormat::from_code(format).is_some()
    }

    fn preferred_format(&self) -> FormatCode {
        BINARY_FORMAT_CODE
    }

    fn plan_encode(
        &self,
        _: &TypeMap,
        _: Oid,
        format: FormatCode,
        _: &dyn Any,
    ) -> Option<&'static dyn EncodePlan> {
        match PgFormat::from_code(format) {
            Some(PgFormat::Binary) => Some(&BinaryEncodePlan),
            Some(PgFormat::Text) => Some(&TextEncodePlan),
            None => {
                verbose!(format, "no geometry encode plan");
                None
            }
        }
    }

    fn plan_scan(
        &self,
        _: &TypeMap,
        _: Oid,
        format: FormatCode,
        _: &dyn Any,
    ) -> Option<&'static dyn ScanPlan> {
        match PgFormat::from_code(format) {
            Some(PgFormat::Binary) => Some(&BinaryScanPlan),
            Some(PgFormat::Text) => Some(&TextScanPlan),
            None => {
                verbose!(format, "no geometry scan plan");
                None
            }
        }
    }

    fn decode_value(
        &self,
        _: &TypeMap,
        _: Oid,
        format: FormatCode,
        src: &[u8],
    ) -> Result<AnyValue, CodecError> {
        let geometry = match PgFormat::from_code(format) {
            Some(PgFormat::Text) => ewkb::unmarshal(&hex::decode(src)?)?.geometry,
            Some(PgFormat::Binary) => ewkb::unmarshal(src)?.geometry,
            None => return Err(CodecError::Unsupported),
        };
        Ok(Box::new(geometry))
    }

    fn decode_driver_value(
        &self,
        _: &TypeMap,
        _: Oid,
        _: FormatCode,
        _: &[u8],
    ) -> Result<DriverValue, CodecError> {
        Err(CodecError::Unsupported)
    }
}

impl EncodePlan for BinaryEncodePlan {
    fn encode(&self, value: &dyn Any, buf: &mut BytesMut) -> Result<(), CodecError> {
        let ewkb = marshal(value)?;
        buf.put_slice(&ewkb);
        Ok(())
    }
}

impl EncodePlan for TextEncodePlan {
    fn encode(&self, value: &dyn Any, buf: &mut BytesMut) -> Result<(), CodecError> {
        let ewkb = marshal(value)?;
        buf.put_slice(hex::encode(ewkb).as_bytes());
        Ok(())
    }
}

impl ScanPlan for BinaryScanPlan {
    fn scan(&self, src: &[u8], target: &mut dyn Any) -> Result<(), CodecError> {
        if !is_geometry_slot(target) {
            return Err(CodecError::InvalidTarget);
        }

        if src.is_empty() {
            return Ok(());
        }

        assign(target, ewkb::unmarshal(src)?.geometry)
    }
}

impl ScanPlan for TextScanPlan {
    fn scan(&self, src: &[u8], target: &mut dyn Any) -> Result<(), CodecError> {
        if !is_geometry_slot(target) {
            return Err(CodecError::InvalidTarget);
        }

        if src.is_empty() {
            return Ok(());
        }

        let src = hex::decode(src)?;
        assign(target, ewkb::unmarshal(&src)?.geometry)
    }
}

/// Encode value as EWKB with default srid and byte order.
fn marshal(value: &dyn Any) -> Result<Vec<u8>, CodecError> {
    let geometry = as_geometry(value).ok_or(CodecError::Unsupported)?;
    ewkb::marshal(geometry, DEFAULT_SRID).map_err(CodecError::Encode)
}

macro_rules! geometry_types {
    ($mac:ident!($($arg:tt)*)) => {
        $mac!(
            $($arg)*;
            Point,
            LineString,
            Polygon,
            MultiPoint,
            MultiLineString,
            MultiPolygon,
            GeometryCollection,
            Geometry
        )
    };
}

fn as_geometry(value: &dyn Any) -> Option<&dyn WriteEwkb> {
    macro_rules! downcast {
        ($value:ident; $($ty:ty),*) => {
            $(
                if let Some(geometry) = $value.downcast_ref::<$ty>() {
                    return Some(geometry);
                }
            )*
        };
    }

    geometry_types!(downcast!(value));
    None
}

fn is_geometry_slot(target: &dyn Any) -> bool {
    macro_rules! is {
        ($target:ident; $($ty:ty),*) => {
            false $(|| $target.is::<$ty>())*
        };
    }

    geometry_types!(is!(target))
}

fn assign(target: &mut dyn Any, geometry: Geometry) -> Result<(), CodecError> {
    macro_rules! assign {
        ($target:ident, $geometry:ident; $($ty:ty),*) => {
            $(
                if let Some(slot) = $target.downcast_mut::<$ty>() {
                    return put(slot, $geometry);
                }
            )*
        };
    }

    geometry_types!(assign!(target, geometry));
    Err(CodecError::InvalidTarget)
}

fn put<T: GeometryType>(slot: &mut T, geometry: Geometry) -> Result<(), CodecError> {
    let found = type_name(&geometry);
    match T::from_geometry(geometry) {
        Ok(ok) => {
            *slot = ok;
            Ok(())
        }
        Err(_) => Err(CodecError::TypeMismatch { target: T::NAME, found }),
    }
}
