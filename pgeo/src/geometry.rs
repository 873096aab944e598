//! Geometry value model.
//!
//! Values are [`geo_types`] geometries with `f64` coordinates. Seven kinds have
//! an EWKB representation:
//!
//! - [`Point`]
//! - [`LineString`]
//! - [`Polygon`]
//! - [`MultiPoint`]
//! - [`MultiLineString`]
//! - [`MultiPolygon`]
//! - [`GeometryCollection`]
//!
//! [`Geometry`] is the sum of all of them, and is the type to use when the
//! kind of a column value is not known upfront.
use std::{any::Any, fmt};

use crate::ewkb::WriteEwkb;

/// A coordinate.
pub type Coord = geo_types::Coord<f64>;
/// A single point.
pub type Point = geo_types::Point<f64>;
/// An ordered collection of coordinates.
pub type LineString = geo_types::LineString<f64>;
/// An exterior ring with zero or more interior rings.
pub type Polygon = geo_types::Polygon<f64>;
/// A collection of points.
pub type MultiPoint = geo_types::MultiPoint<f64>;
/// A collection of line strings.
pub type MultiLineString = geo_types::MultiLineString<f64>;
/// A collection of polygons.
pub type MultiPolygon = geo_types::MultiPolygon<f64>;
/// A collection of any geometry.
pub type GeometryCollection = geo_types::GeometryCollection<f64>;
/// Any geometry.
pub type Geometry = geo_types::Geometry<f64>;

/// Kind of geometry that have an EWKB representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    /// Returns the kind of given geometry.
    ///
    /// Returns [`None`] for `Line`, `Rect` and `Triangle`.
    pub const fn of(geometry: &Geometry) -> Option<GeometryKind> {
        match geometry {
            Geometry::Point(_) => Some(GeometryKind::Point),
            Geometry::LineString(_) => Some(GeometryKind::LineString),
            Geometry::Polygon(_) => Some(GeometryKind::Polygon),
            Geometry::MultiPoint(_) => Some(GeometryKind::MultiPoint),
            Geometry::MultiLineString(_) => Some(GeometryKind::MultiLineString),
            Geometry::MultiPolygon(_) => Some(GeometryKind::MultiPolygon),
            Geometry::GeometryCollection(_) => Some(GeometryKind::GeometryCollection),
            Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => None,
        }
    }

    /// Returns the kind name.
    pub const fn name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the variant name of any geometry, including the ones without
/// [`GeometryKind`].
pub const fn type_name(geometry: &Geometry) -> &'static str {
    match GeometryKind::of(geometry) {
        Some(kind) => kind.name(),
        None => match geometry {
            Geometry::Line(_) => "Line",
            Geometry::Rect(_) => "Rect",
            _ => "Triangle",
        },
    }
}

/// A type that a geometry column can be encoded from and scanned into.
///
/// Implemented for the seven kinds and for [`Geometry`], which accepts every kind.
pub trait GeometryType: WriteEwkb + Any + Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Convert decoded geometry into self.
    ///
    /// Returns the geometry back if its kind is not accepted.
    fn from_geometry(geometry: Geometry) -> Result<Self, Geometry>;
}

impl GeometryType for Geometry {
    const NAME: &'static str = "Geometry";

    fn from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
        Ok(geometry)
    }
}

macro_rules! geometry_type {
    ($($ty:ident),*) => {$(
        impl GeometryType for $ty {
            const NAME: &'static str = stringify!($ty);

            fn from_geometry(geometry: Geometry) -> Result<Self, Geometry> {
                match geometry {
                    Geometry::$ty(ok) => Ok(ok),
                    other => Err(other),
                }
            }
        }
    )*};
}

geometry_type!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);

#[cfg(test)]
mod test {
    use geo_types::{Rect, coord, line_string, point};

    use super::*;

    #[test]
    fn kind_of() {
        let point = Geometry::Point(point!(x: 1.0, y: 2.0));
        assert_eq!(GeometryKind::of(&point), Some(GeometryKind::Point));
        assert_eq!(type_name(&point), "Point");

        let rect = Geometry::Rect(Rect::new(coord! { x: 0., y: 0. }, coord! { x: 1., y: 1. }));
        assert_eq!(GeometryKind::of(&rect), None);
        assert_eq!(type_name(&rect), "Rect");
    }

    #[test]
    fn from_geometry() {
        let line = line_string![(x: 0., y: 0.), (x: 1., y: 1.)];

        let ok = LineString::from_geometry(Geometry::LineString(line.clone()));
        assert_eq!(ok, Ok(line.clone()));

        let err = Point::from_geometry(Geometry::LineString(line.clone()));
        assert_eq!(err, Err(Geometry::LineString(line.clone())));

        let any = Geometry::from_geometry(Geometry::LineString(line.clone()));
        assert_eq!(any, Ok(Geometry::LineString(line)));
    }

    #[test]
    fn names() {
        assert_eq!(Point::NAME, "Point");
        assert_eq!(GeometryCollection::NAME, "GeometryCollection");
        assert_eq!(Geometry::NAME, "Geometry");
        assert_eq!(MultiPolygon::NAME, GeometryKind::MultiPolygon.name());
        assert_eq!(GeometryKind::MultiLineString.to_string(), "MultiLineString");
    }
}
