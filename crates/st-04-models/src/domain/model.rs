//! The model trait.

use crate::domain::errors::ModelError;
use shared_types::AsAny;

/// Long-lived application state, one instance per type.
pub trait Model: AsAny + Send {
    /// Runs once right after construction. A failure drops the instance.
    fn on_init(&mut self) -> Result<(), ModelError> {
        Ok(())
    }

    /// Runs once per frame.
    fn on_update(&mut self) {}

    /// Runs when the registry is cleared.
    fn on_clear(&mut self) {}
}
