//! Geometry type registration.
//!
//! The oid of `geometry` is assigned when the PostGIS extension is created, so
//! it differs between databases and must be looked up on every new
//! connection, before any query binds or returns a geometry.
use std::{borrow::Cow, env::var};

use crate::{
    Result,
    common::verbose,
    error::ErrorKind,
    postgres::{GEOMETRY, Oid},
    types::{GeometryCodec, Type, TypeMap},
};

/// Connection that geometry can be registered into.
pub trait TypeSession {
    /// Error returned by the connection.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a query returning a single oid.
    fn query_oid(&mut self, sql: &str) -> impl Future<Output = Result<Oid, Self::Error>>;

    /// Connection scoped type registry.
    fn type_map_mut(&mut self) -> &mut TypeMap;
}

impl<S> TypeSession for &mut S where S: TypeSession {
    type Error = S::Error;

    fn query_oid(&mut self, sql: &str) -> impl Future<Output = Result<Oid, Self::Error>> {
        S::query_oid(self, sql)
    }

    fn type_map_mut(&mut self) -> &mut TypeMap {
        S::type_map_mut(self)
    }
}

/// Registration configuration.
#[derive(Clone, Debug)]
pub struct RegisterConfig {
    type_name: Cow<'static, str>,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self { type_name: Cow::Borrowed(GEOMETRY) }
    }
}

impl RegisterConfig {
    /// Retrieve configuration from environment variable.
    ///
    /// It reads `PGEO_GEOMETRY_TYPE`, the possibly schema qualified geometry
    /// type name, default to `geometry`.
    pub fn from_env() -> RegisterConfig {
        match var("PGEO_GEOMETRY_TYPE") {
            Ok(ok) if !ok.is_empty() => Self { type_name: ok.into() },
            _ => Self::default(),
        }
    }

    /// Get the geometry type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Set the geometry type name, e.g. `extensions.geometry`.
    pub fn with_type_name(mut self, value: impl Into<Cow<'static, str>>) -> Self {
        self.type_name = value.into();
        self
    }

    /// Query returning the geometry type oid.
    pub fn oid_query(&self) -> String {
        format!("select '{}'::text::regtype::oid", self.type_name.replace('\'', "''"))
    }
}

/// Register [`GeometryCodec`] into the session with default config.
///
/// See [`register_with`].
pub async fn register<S: TypeSession>(session: S) -> Result<()> {
    register_with(session, &RegisterConfig::default()).await
}

/// Register [`GeometryCodec`] into the session.
///
/// Looks up the oid of the configured type name, then inserts the type into
/// the session [`TypeMap`]. On error, nothing is inserted.
pub async fn register_with<S: TypeSession>(mut session: S, config: &RegisterConfig) -> Result<()> {
    let sql = config.oid_query();
    verbose!(%sql, "lookup geometry oid");

    let oid = match session.query_oid(&sql).await {
        Ok(ok) => ok,
        Err(err) => {
            return Err(crate::Error::from(ErrorKind::Session(Box::new(err)))
                .context("get geometry oid failed"));
        }
    };

    #[cfg(feature = "log")]
    log::debug!("registered {} with oid {oid}", config.type_name);

    session
        .type_map_mut()
        .register_type(Type::new(config.type_name.clone(), oid, GeometryCodec));

    Ok(())
}
