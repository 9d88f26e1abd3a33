//! Progress reporting for batch sends

pub mod reporter;

pub use reporter::{ProgressReporter, SimpleProgress};
