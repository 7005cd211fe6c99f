//! Downcasting support for type-keyed registries.

use std::any::Any;

/// Exposes a value as `dyn Any` so trait objects can be downcast back to
/// their concrete type.
///
/// Call through the trait object (`(*boxed).as_any()`), not the `Box`,
/// otherwise the box itself is returned.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
