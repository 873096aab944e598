//! PostGIS geometry codec
//!
//! Move [`geo_types`] geometries between Rust and the two PostGIS wire
//! formats: EWKB in binary format and hex encoded EWKB in text format.
//!
//! # Examples
//!
//! Register on a new connection:
//!
//! ```no_run
//! # async fn app<C: pgeo::TypeSession>(conn: &mut C) -> pgeo::Result<()> {
//! pgeo::register(conn).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Encode and scan through a registered type:
//!
//! ```
//! use pgeo::{
//!     GeometryCodec, Type, TypeMap,
//!     geometry::{Geometry, Point},
//!     postgres::TEXT_FORMAT_CODE,
//! };
//!
//! let mut map = TypeMap::new();
//! map.register_type(Type::new("geometry", 16_394, GeometryCodec));
//!
//! let mut buf = bytes::BytesMut::new();
//! map.encode(16_394, TEXT_FORMAT_CODE, &Point::new(1.0, 2.0), &mut buf).unwrap();
//! assert_eq!(&buf[..], b"0101000000000000000000f03f0000000000000040");
//!
//! let mut geometry = Geometry::Point(Point::new(0.0, 0.0));
//! map.scan(16_394, TEXT_FORMAT_CODE, &buf, &mut geometry).unwrap();
//! assert_eq!(geometry, Geometry::Point(Point::new(1.0, 2.0)));
//! ```

mod common;

// Protocol
pub mod postgres;

// Encoding
pub mod geometry;
pub mod ewkb;

// Component
pub mod codec;
pub mod types;
pub mod register;

mod error;

pub use codec::{Codec, CodecError};
pub use types::{GeometryCodec, Type, TypeMap};
pub use register::{RegisterConfig, TypeSession, register, register_with};
pub use error::{Error, ErrorKind, Result};
