//! Resource catalog port
//!
//! Abstracts where the elder-care resource listing comes from. The seeded
//! catalog serves a fixed set for offline use; the HTTP catalog queries a
//! directory service with the same filter semantics.

use askedith_domain::resource::{CatalogFilter, Resource};
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a catalog lookup
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error reaching catalog: {0}")]
    Network(String),

    #[error("Catalog service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Catalog returned malformed data: {0}")]
    Malformed(String),
}

/// Source of care resources matching a filter
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// Fetch resources matching the filter
    async fn fetch(&self, filter: &CatalogFilter) -> Result<Vec<Resource>, CatalogError>;
}
