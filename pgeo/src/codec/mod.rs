//! Type plugin interface.
//!
//! A [`Codec`] teaches a driver how to move values of one Postgres type between
//! Rust and the wire. The driver keeps codecs in a [`TypeMap`] keyed by [`Oid`],
//! and for every value bound to, or returned from, a column of that type it:
//!
//! 1. picks a format, using [`Codec::preferred_format`] when it has a choice,
//! 2. asks for an [`EncodePlan`] or a [`ScanPlan`] for that format,
//! 3. runs the plan on the value or the raw bytes.
//!
//! Values and scan targets are passed as [`Any`], a codec decides which
//! concrete types it accepts.
use std::any::Any;

use bytes::{Bytes, BytesMut};

use crate::{
    postgres::{FormatCode, Oid},
    types::TypeMap,
};

mod error;

pub use error::CodecError;

/// Value returned from [`Codec::decode_value`].
pub type AnyValue = Box<dyn Any + Send + Sync>;

/// Encoding and decoding of one Postgres type.
pub trait Codec: Send + Sync {
    /// Returns `true` if the codec can encode and decode in given format.
    fn format_supported(&self, format: FormatCode) -> bool;

    /// Format to use when the driver have a choice.
    fn preferred_format(&self) -> FormatCode;

    /// Returns a plan to encode `value` in given format.
    ///
    /// Returns [`None`] if the codec cannot encode in that format.
    fn plan_encode(
        &self,
        map: &TypeMap,
        oid: Oid,
        format: FormatCode,
        value: &dyn Any,
    ) -> Option<&'static dyn EncodePlan>;

    /// Returns a plan to scan bytes in given format into `target`.
    ///
    /// Returns [`None`] if the codec cannot decode that format.
    fn plan_scan(
        &self,
        map: &TypeMap,
        oid: Oid,
        format: FormatCode,
        target: &dyn Any,
    ) -> Option<&'static dyn ScanPlan>;

    /// Decode without a typed target, used for generic row inspection.
    fn decode_value(
        &self,
        map: &TypeMap,
        oid: Oid,
        format: FormatCode,
        src: &[u8],
    ) -> Result<AnyValue, CodecError>;

    /// Decode into a generic driver value.
    fn decode_driver_value(
        &self,
        map: &TypeMap,
        oid: Oid,
        format: FormatCode,
        src: &[u8],
    ) -> Result<DriverValue, CodecError>;
}

/// Encode a value into its wire representation.
pub trait EncodePlan: Send + Sync {
    /// Append encoded `value` to `buf`.
    ///
    /// On error, `buf` is left untouched.
    fn encode(&self, value: &dyn Any, buf: &mut BytesMut) -> Result<(), CodecError>;
}

/// Decode wire representation into a target.
pub trait ScanPlan: Send + Sync {
    /// Decode `src` and write it into `target`.
    ///
    /// On error, `target` is left untouched.
    fn scan(&self, src: &[u8], target: &mut dyn Any) -> Result<(), CodecError>;
}

/// Untyped value a driver can hand out without knowing the column type.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    Null,
    Bytes(Bytes),
    Text(String),
}
