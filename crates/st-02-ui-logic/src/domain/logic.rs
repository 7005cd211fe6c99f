//! The logic trait implemented by every panel controller.

use crate::context::LogicContext;
use crate::domain::errors::UiError;
use shared_types::AsAny;

/// A panel controller. At most one instance per type is open at a time.
///
/// Objects loaded through the [`LogicContext`] are owned by the instance and
/// destroyed, newest first, right after [`UiLogic::on_close`] returns.
/// Subscriptions and delayed actions made through the context's host are
/// released at the same point.
pub trait UiLogic: AsAny {
    /// Name of the layer this logic's panels are attached under.
    fn layer(&self) -> &str;

    /// Runs once per open. A failure aborts the open and releases
    /// everything acquired so far.
    fn on_open(&mut self, _cx: &mut LogicContext<'_>) -> Result<(), UiError> {
        Ok(())
    }

    /// Runs once per close, before owned objects are destroyed.
    fn on_close(&mut self, _cx: &mut LogicContext<'_>) {}
}
