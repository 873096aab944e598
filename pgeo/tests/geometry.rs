use std::io;

use bytes::BytesMut;
use geo_types::{line_string, point, polygon};
use pgeo::{
    CodecError, ErrorKind, RegisterConfig, TypeMap, TypeSession,
    geometry::{Geometry, GeometryCollection, LineString, MultiPoint, Point, Polygon},
    postgres::{BINARY_FORMAT_CODE, Oid, TEXT_FORMAT_CODE},
    register, register_with,
};

const GEOMETRY_OID: Oid = 16_394;

/// Connection that answer every oid lookup with the same oid.
struct Connection {
    oid: Option<Oid>,
    types: TypeMap,
}

impl Connection {
    fn new(oid: Option<Oid>) -> Self {
        Self { oid, types: TypeMap::new() }
    }
}

impl TypeSession for Connection {
    type Error = io::Error;

    async fn query_oid(&mut self, sql: &str) -> Result<Oid, Self::Error> {
        assert!(sql.ends_with("::text::regtype::oid"));
        self.oid.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "type does not exist"))
    }

    fn type_map_mut(&mut self) -> &mut TypeMap {
        &mut self.types
    }
}

async fn connect() -> Connection {
    let mut conn = Connection::new(Some(GEOMETRY_OID));
    register(&mut conn).await.unwrap();
    conn
}

#[tokio::test]
async fn registered_round_trip() {
    let conn = connect().await;
    let geometries = [
        Geometry::Point(point!(x: -71.06, y: 42.35)),
        Geometry::LineString(line_string![(x: 0., y: 0.), (x: 10., y: 10.)]),
        Geometry::Polygon(polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.)]),
        Geometry::GeometryCollection(GeometryCollection::new_from(vec![
            Geometry::Point(point!(x: 1., y: 1.)),
            Geometry::MultiPoint(MultiPoint::new(vec![point!(x: 2., y: 2.)])),
        ])),
    ];

    for format in [BINARY_FORMAT_CODE, TEXT_FORMAT_CODE] {
        for geometry in &geometries {
            let mut buf = BytesMut::new();
            conn.types.encode(GEOMETRY_OID, format, geometry, &mut buf).unwrap();

            let mut out = Geometry::Point(point!(x: 0., y: 0.));
            conn.types.scan(GEOMETRY_OID, format, &buf, &mut out).unwrap();
            assert_eq!(&out, geometry);
        }
    }
}

#[tokio::test]
async fn postgis_output() {
    let conn = connect().await;

    // SELECT 'SRID=4326;LINESTRING(1 2,3 4)'::geometry
    let text = b"0102000020E610000002000000000000000000F03F000000000000004000000000000008400000000000001040";
    let mut line = LineString::new(vec![]);
    conn.types.scan(GEOMETRY_OID, TEXT_FORMAT_CODE, text, &mut line).unwrap();
    assert_eq!(line, line_string![(x: 1., y: 2.), (x: 3., y: 4.)]);

    // NULL
    let mut point = point!(x: 5., y: 5.);
    conn.types.scan(GEOMETRY_OID, BINARY_FORMAT_CODE, b"", &mut point).unwrap();
    assert_eq!(point, point!(x: 5., y: 5.));

    // typed target of the wrong kind
    let err = conn.types.scan(GEOMETRY_OID, TEXT_FORMAT_CODE, text, &mut point).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Codec(CodecError::TypeMismatch { target: "Point", found: "LineString" })
    ));
    assert_eq!(point, point!(x: 5., y: 5.));
}

#[tokio::test]
async fn unregistered() {
    let mut conn = Connection::new(None);
    let err = register_with(&mut conn, &RegisterConfig::default()).await.unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Session(_)));
    assert!(err.to_string().starts_with("get geometry oid failed: type does not exist"));
    assert!(conn.types.is_empty());

    let mut buf = BytesMut::new();
    let err = conn
        .types
        .encode(GEOMETRY_OID, BINARY_FORMAT_CODE, &point!(x: 1., y: 2.), &mut buf)
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnknownOid(GEOMETRY_OID)));
}

#[tokio::test]
async fn preferred_format() {
    let conn = connect().await;
    let ty = conn.types.type_for_name("geometry").unwrap();
    assert_eq!(ty.oid(), GEOMETRY_OID);

    let codec = ty.codec();
    assert_eq!(codec.preferred_format(), BINARY_FORMAT_CODE);
    assert!(codec.format_supported(TEXT_FORMAT_CODE));

    let polygon: Polygon = polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.)];
    let mut buf = BytesMut::new();
    conn.types.encode(GEOMETRY_OID, codec.preferred_format(), &polygon, &mut buf).unwrap();

    let value = conn.types.decode_value(GEOMETRY_OID, BINARY_FORMAT_CODE, &buf).unwrap();
    assert_eq!(value.downcast_ref::<Geometry>(), Some(&Geometry::Polygon(polygon)));

    let mut point = Point::new(0., 0.);
    assert!(conn.types.scan(GEOMETRY_OID, BINARY_FORMAT_CODE, &buf, &mut point).is_err());
}
