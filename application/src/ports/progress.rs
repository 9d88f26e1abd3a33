//! Delivery progress notifications
//!
//! Lets the presentation layer surface batch progress without the use case
//! knowing about terminals or progress bars.

use askedith_domain::delivery::DeliveryReport;

/// Observer for batch delivery progress
pub trait DeliveryProgress: Send + Sync {
    /// A batch of `total` messages is about to be dispatched
    fn on_batch_start(&self, total: usize);

    /// One message finished, successfully or not
    fn on_message_complete(&self, to: &str, success: bool);

    /// The whole batch finished
    fn on_batch_complete(&self, report: &DeliveryReport);
}

/// No-op implementation for contexts without progress display
pub struct NoProgress;

impl DeliveryProgress for NoProgress {
    fn on_batch_start(&self, _total: usize) {}
    fn on_message_complete(&self, _to: &str, _success: bool) {}
    fn on_batch_complete(&self, _report: &DeliveryReport) {}
}
