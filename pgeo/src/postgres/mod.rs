//! Postgres protocol vocabulary used by the codec.
mod pg_format;
mod pg_type;

pub use pg_format::{BINARY_FORMAT_CODE, FormatCode, PgFormat, TEXT_FORMAT_CODE};
pub use pg_type::{GEOMETRY, Oid};
