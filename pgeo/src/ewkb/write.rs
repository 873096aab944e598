use std::borrow::Cow;

use geozero::{CoordDimensions, ToWkb};

use super::{DEFAULT_SRID, EwkbError};
use crate::geometry::{
    Geometry, GeometryCollection, GeometryKind, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, type_name,
};

/// Encode 2D EWKB in [`DEFAULT_BYTE_ORDER`][super::DEFAULT_BYTE_ORDER].
///
/// Srid is written only when it is not [`DEFAULT_SRID`], and only in the
/// outermost header.
pub fn marshal<G>(geometry: &G, srid: i32) -> Result<Vec<u8>, EwkbError>
where
    G: WriteEwkb + ?Sized,
{
    let geometry = geometry.to_geometry();
    ensure_supported(&geometry)?;
    let srid = (srid != DEFAULT_SRID).then_some(srid);
    Ok(geometry.to_ewkb(CoordDimensions::xy(), srid)?)
}

/// `Line`, `Rect` and `Triangle` have no EWKB type, even nested.
fn ensure_supported(geometry: &Geometry) -> Result<(), EwkbError> {
    match geometry {
        Geometry::GeometryCollection(collection) => {
            collection.iter().try_for_each(ensure_supported)
        }
        _ => match GeometryKind::of(geometry) {
            Some(_) => Ok(()),
            None => Err(EwkbError::UnsupportedGeometry(type_name(geometry))),
        },
    }
}

/// Geometry that can be encoded as EWKB.
///
/// This trait is sealed, it is implemented for the seven geometry kinds and
/// [`Geometry`].
pub trait WriteEwkb: sealed::Sealed {
    #[doc(hidden)]
    fn to_geometry(&self) -> Cow<'_, Geometry>;
}

impl WriteEwkb for Geometry {
    fn to_geometry(&self) -> Cow<'_, Geometry> {
        Cow::Borrowed(self)
    }
}

macro_rules! write_ewkb {
    ($($ty:ty),*) => {$(
        impl WriteEwkb for $ty {
            fn to_geometry(&self) -> Cow<'_, Geometry> {
                Cow::Owned(Geometry::from(self.clone()))
            }
        }
    )*};
}

write_ewkb!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon
);

impl WriteEwkb for GeometryCollection {
    fn to_geometry(&self) -> Cow<'_, Geometry> {
        Cow::Owned(Geometry::GeometryCollection(self.clone()))
    }
}

mod sealed {
    use crate::geometry::*;

    pub trait Sealed { }
    impl Sealed for Point { }
    impl Sealed for LineString { }
    impl Sealed for Polygon { }
    impl Sealed for MultiPoint { }
    impl Sealed for MultiLineString { }
    impl Sealed for MultiPolygon { }
    impl Sealed for GeometryCollection { }
    impl Sealed for Geometry { }
}
