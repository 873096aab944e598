/// Raw format code as sent in `Bind` and `RowDescription` messages.
pub type FormatCode = i16;

/// Format code of [`PgFormat::Text`].
pub const TEXT_FORMAT_CODE: FormatCode = 0;

/// Format code of [`PgFormat::Binary`].
pub const BINARY_FORMAT_CODE: FormatCode = 1;

/// Postgres data transmission format.
///
/// For specific information, see its variant documentation.
///
/// <https://www.postgresql.org/docs/current/protocol-overview.html#PROTOCOL-FORMAT-CODES>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgFormat {
    /// Text has format code zero.
    ///
    /// In the [`Text`][t] transmitted representation, there is no trailing null character.
    /// PostGIS sends `geometry` in text format as hex encoded EWKB.
    ///
    /// [t]: PgFormat::Text
    Text,
    /// Binary has format code one.
    ///
    /// PostGIS sends `geometry` in binary format as raw EWKB.
    Binary,
}

impl PgFormat {
    /// Return format code for current format.
    pub const fn format_code(&self) -> FormatCode {
        match self {
            PgFormat::Text => TEXT_FORMAT_CODE,
            PgFormat::Binary => BINARY_FORMAT_CODE,
        }
    }

    /// Returns [`None`] for any code other than zero or one.
    pub const fn from_code(code: FormatCode) -> Option<PgFormat> {
        match code {
            TEXT_FORMAT_CODE => Some(PgFormat::Text),
            BINARY_FORMAT_CODE => Some(PgFormat::Binary),
            _ => None,
        }
    }
}

impl From<PgFormat> for FormatCode {
    fn from(format: PgFormat) -> Self {
        format.format_code()
    }
}
