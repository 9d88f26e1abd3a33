//! Care-resource domain
//!
//! - [`entities::Resource`] — a care-provider record
//! - [`entities::Category`] — resource category, free text at the edges
//! - [`filter::CatalogFilter`] — category / postal-radius filtering

pub mod entities;
pub mod filter;

// Re-export main types
pub use entities::{Category, Resource};
pub use filter::{CatalogFilter, haversine_miles};
