use album_model::AlbumError;
use thiserror::Error;

/// Failure talking to a catalog service.
///
/// "No match" is not one of these; lookups return `Ok(None)` or an empty
/// list for that.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{service} returned HTTP {status}")]
    Status { service: &'static str, status: u16 },

    #[error("authentication with {service} failed: {reason}")]
    Auth {
        service: &'static str,
        reason: String,
    },

    #[error("failed to parse {service} response: {reason}")]
    Parse {
        service: &'static str,
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn network(error: reqwest::Error) -> Self {
        CatalogError::Network(error.to_string())
    }

    pub(crate) fn parse(service: &'static str, error: impl std::fmt::Display) -> Self {
        CatalogError::Parse {
            service,
            reason: error.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{catalog} lookup failed")]
    Catalog {
        catalog: &'static str,
        #[source]
        source: CatalogError,
    },

    #[error("{catalog} returned an unusable album record")]
    InvalidRecord {
        catalog: &'static str,
        #[source]
        source: AlbumError,
    },
}
