//! Outreach email draft

use serde::{Deserialize, Serialize};

use crate::resource::entities::Category;

/// One composed outreach email, addressed to a single resource
///
/// Drafts are never persisted on their own; they are regenerated from the
/// answer set and the selected resource ids whenever the preview stage is
/// entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachEmail {
    /// The resource this draft targets
    pub resource_id: u32,
    /// Display name of that resource, for previews and reports
    pub resource_name: String,
    /// Category label used for foldering and logging
    pub category: Category,
    pub to: String,
    pub subject: String,
    pub body: String,
}
