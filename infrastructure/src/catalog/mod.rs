//! Resource catalog adapters

mod http;
mod seed;

pub use http::HttpCatalog;
pub use seed::SeedCatalog;
