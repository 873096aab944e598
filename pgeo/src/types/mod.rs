//! Registered types and their codecs.
//!
//! A [`TypeMap`] is owned by a connection, it maps every [`Oid`] the
//! connection knows to a [`Type`], and dispatch encode and decode to the
//! type's [`Codec`].
//!
//! ```
//! use pgeo::{GeometryCodec, Type, TypeMap, geometry::Point, postgres::BINARY_FORMAT_CODE};
//!
//! let mut map = TypeMap::new();
//! map.register_type(Type::new("geometry", 16_000, GeometryCodec));
//!
//! let mut buf = bytes::BytesMut::new();
//! map.encode(16_000, BINARY_FORMAT_CODE, &Point::new(1.0, 2.0), &mut buf).unwrap();
//!
//! let mut point = Point::new(0.0, 0.0);
//! map.scan(16_000, BINARY_FORMAT_CODE, &buf, &mut point).unwrap();
//! assert_eq!(point, Point::new(1.0, 2.0));
//! ```
use std::{any::Any, borrow::Cow, collections::HashMap, fmt, sync::Arc};

use bytes::BytesMut;

use crate::{
    Result,
    codec::{AnyValue, Codec},
    common::verbose,
    error::ErrorKind,
    postgres::{FormatCode, Oid},
};

mod geometry;

pub use geometry::{BinaryEncodePlan, BinaryScanPlan, GeometryCodec, TextEncodePlan, TextScanPlan};

/// A named Postgres type with its codec.
pub struct Type {
    name: Cow<'static, str>,
    oid: Oid,
    codec: Arc<dyn Codec>,
}

impl Type {
    pub fn new(name: impl Into<Cow<'static, str>>, oid: Oid, codec: impl Codec + 'static) -> Self {
        Self { name: name.into(), oid, codec: Arc::new(codec) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> Oid {
        self.oid
    }

    pub fn codec(&self) -> &dyn Codec {
        &*self.codec
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name)
            .field("oid", &self.oid)
            .finish_non_exhaustive()
    }
}

/// Registered types of a connection, lookup by oid or name.
#[derive(Debug, Default, Clone)]
pub struct TypeMap {
    oids: HashMap<Oid, Arc<Type>>,
    names: HashMap<Cow<'static, str>, Arc<Type>>,
}

impl TypeMap {
    /// Create empty [`TypeMap`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, replacing any type with the same oid or name.
    pub fn register_type(&mut self, ty: Type) {
        verbose!(name = %ty.name, oid = ty.oid, "register type");

        if let Some(old) = self.oids.remove(&ty.oid) {
            self.names.remove(&old.name);
        }
        if let Some(old) = self.names.remove(&ty.name) {
            self.oids.remove(&old.oid);
        }

        let ty = Arc::new(ty);
        self.oids.insert(ty.oid, ty.clone());
        self.names.insert(ty.name.clone(), ty);
    }

    pub fn type_for_oid(&self, oid: Oid) -> Option<&Type> {
        self.oids.get(&oid).map(|ty| &**ty)
    }

    pub fn type_for_name(&self, name: &str) -> Option<&Type> {
        self.names.get(name).map(|ty| &**ty)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.oids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oids.is_empty()
    }

    /// Encode `value` as a parameter of type `oid`, appending it to `buf`.
    pub fn encode(
        &self,
        oid: Oid,
        format: FormatCode,
        value: &dyn Any,
        buf: &mut BytesMut,
    ) -> Result<()> {
        let codec = self.codec(oid)?;
        let Some(plan) = codec.plan_encode(self, oid, format, value) else {
            return Err(ErrorKind::UnsupportedFormat { oid, format }.into());
        };
        plan.encode(value, buf)?;
        Ok(())
    }

    /// Scan column value of type `oid` into `target`.
    ///
    /// Empty `src` is NULL, `target` is left untouched.
    pub fn scan(&self, oid: Oid, format: FormatCode, src: &[u8], target: &mut dyn Any) -> Result<()> {
        let codec = self.codec(oid)?;
        let Some(plan) = codec.plan_scan(self, oid, format, target) else {
            return Err(ErrorKind::UnsupportedFormat { oid, format }.into());
        };
        plan.scan(src, target)?;
        Ok(())
    }

    /// Decode column value of type `oid` without a typed target.
    pub fn decode_value(&self, oid: Oid, format: FormatCode, src: &[u8]) -> Result<AnyValue> {
        Ok(self.codec(oid)?.decode_value(self, oid, format, src)?)
    }

    fn codec(&self, oid: Oid) -> Result<&dyn Codec> {
        match self.oids.get(&oid) {
            Some(ty) => Ok(ty.codec()),
            None => {
                verbose!(oid, "unknown oid");
                Err(ErrorKind::UnknownOid(oid).into())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use geo_types::point;

    use super::*;
    use crate::{
        codec::CodecError,
        geometry::{Geometry, LineString, Polygon},
        postgres::{BINARY_FORMAT_CODE, TEXT_FORMAT_CODE},
    };

    const OID: Oid = 16_000;

    fn map() -> TypeMap {
        let mut map = TypeMap::new();
        map.register_type(Type::new("geometry", OID, GeometryCodec));
        map
    }

    #[test]
    fn register() {
        let mut map = map();
        assert_eq!(map.len(), 1);
        assert_eq!(map.type_for_oid(OID).map(Type::name), Some("geometry"));
        assert_eq!(map.type_for_name("geometry").map(Type::oid), Some(OID));
        assert!(map.type_for_oid(25).is_none());

        // oid changed after extension reinstall
        map.register_type(Type::new("geometry", OID + 1, GeometryCodec));
        assert_eq!(map.len(), 1);
        assert!(map.type_for_oid(OID).is_none());
        assert_eq!(map.type_for_name("geometry").map(Type::oid), Some(OID + 1));

        // same oid, other name
        map.register_type(Type::new("geom", OID + 1, GeometryCodec));
        assert_eq!(map.len(), 1);
        assert!(map.type_for_name("geometry").is_none());
        assert_eq!(map.type_for_oid(OID + 1).map(Type::name), Some("geom"));
    }

    #[test]
    fn dispatch() {
        let map = map();
        let point = point!(x: 1., y: 2.);

        for format in [BINARY_FORMAT_CODE, TEXT_FORMAT_CODE] {
            let mut buf = BytesMut::new();
            map.encode(OID, format, &point, &mut buf).unwrap();

            let mut target = Geometry::Point(point!(x: 0., y: 0.));
            map.scan(OID, format, &buf, &mut target).unwrap();
            assert_eq!(target, Geometry::Point(point));

            let value = map.decode_value(OID, format, &buf).unwrap();
            assert_eq!(value.downcast_ref::<Geometry>(), Some(&Geometry::Point(point)));
        }
    }

    #[test]
    fn unknown_oid() {
        let map = map();
        let mut buf = BytesMut::new();
        let err = map.encode(25, BINARY_FORMAT_CODE, &point!(x: 1., y: 2.), &mut buf).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownOid(25)));

        let mut point = point!(x: 0., y: 0.);
        let err = map.scan(25, BINARY_FORMAT_CODE, b"", &mut point).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnknownOid(25)));
    }

    #[test]
    fn unsupported_format() {
        let map = map();
        let mut buf = BytesMut::new();
        let err = map.encode(OID, 2, &point!(x: 1., y: 2.), &mut buf).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::UnsupportedFormat { oid: OID, format: 2 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn codec_error() {
        let map = map();
        let mut buf = BytesMut::new();
        map.encode(OID, BINARY_FORMAT_CODE, &point!(x: 1., y: 2.), &mut buf).unwrap();

        let mut polygon = Polygon::new(LineString::new(vec![]), vec![]);
        let err = map.scan(OID, BINARY_FORMAT_CODE, &buf, &mut polygon).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Codec(CodecError::TypeMismatch { target: "Polygon", found: "Point" })
        ));
    }
}
