
/// Postgres object identifier.
///
/// The oid type is implemented as an unsigned four-byte integer.
///
/// <https://www.postgresql.org/docs/current/datatype-oid.html>
pub type Oid = u32;

/// PostGIS `geometry` type name.
///
/// Extension types have no fixed oid, it is assigned when the extension
/// is created and must be looked up per database.
pub const GEOMETRY: &str = "geometry";
