//! # Model Registry
//!
//! Models are listed explicitly at startup through [`ModelRegistryBuilder`]
//! and constructed by [`ModelRegistry::init`] in registration order.

use crate::domain::{Model, ModelError};
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

type Factory = Box<dyn Fn() -> Result<Box<dyn Model>, ModelError> + Send>;

struct Registration {
    key: TypeId,
    name: &'static str,
    factory: Factory,
}

/// Ordered list of model factories.
#[derive(Default)]
pub struct ModelRegistryBuilder {
    registrations: Vec<Registration>,
}

impl ModelRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `M`, constructed with `Default`.
    #[must_use]
    pub fn register<M: Model + Default>(self) -> Self {
        self.register_with(|| Ok(M::default()))
    }

    /// Register `M` with a fallible factory. A type registered twice keeps
    /// its first registration.
    #[must_use]
    pub fn register_with<M, F>(mut self, factory: F) -> Self
    where
        M: Model,
        F: Fn() -> Result<M, ModelError> + Send + 'static,
    {
        let key = TypeId::of::<M>();
        let name = type_name::<M>();
        if self.registrations.iter().any(|r| r.key == key) {
            warn!(model = name, "[st-04] Model registered twice, keeping the first");
            return self;
        }
        self.registrations.push(Registration {
            key,
            name,
            factory: Box::new(move || factory().map(|m| Box::new(m) as Box<dyn Model>)),
        });
        self
    }

    pub fn build(self) -> ModelRegistry {
        ModelRegistry {
            registrations: self.registrations,
            models: HashMap::new(),
            order: Vec::new(),
        }
    }
}

/// Outcome of [`ModelRegistry::init`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub constructed: usize,
    pub failed: Vec<ModelError>,
}

/// Live model instances keyed by type.
pub struct ModelRegistry {
    registrations: Vec<Registration>,
    models: HashMap<TypeId, Box<dyn Model>>,
    order: Vec<TypeId>,
}

impl ModelRegistry {
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::new()
    }

    /// Construct and initialize every registered model. Models already
    /// live are dropped first without their clear hook. Failed factories
    /// are logged and skipped.
    pub fn init(&mut self) -> InitReport {
        self.models.clear();
        self.order.clear();

        let mut report = InitReport::default();
        for registration in &self.registrations {
            match construct(registration) {
                Ok(model) => {
                    self.models.insert(registration.key, model);
                    self.order.push(registration.key);
                    report.constructed += 1;
                    debug!(model = registration.name, "[st-04] Model initialized");
                }
                Err(e) => {
                    error!(model = registration.name, error = %e, "[st-04] Model skipped");
                    report.failed.push(e);
                }
            }
        }

        info!(
            constructed = report.constructed,
            failed = report.failed.len(),
            "[st-04] Models initialized"
        );
        report
    }

    pub fn get<M: Model>(&self) -> Option<&M> {
        self.models
            .get(&TypeId::of::<M>())
            .and_then(|m| (**m).as_any().downcast_ref::<M>())
    }

    pub fn get_mut<M: Model>(&mut self) -> Option<&mut M> {
        self.models
            .get_mut(&TypeId::of::<M>())
            .and_then(|m| (**m).as_any_mut().downcast_mut::<M>())
    }

    pub fn contains<M: Model>(&self) -> bool {
        self.models.contains_key(&TypeId::of::<M>())
    }

    /// Per-frame update, in registration order.
    pub fn update(&mut self) {
        for key in &self.order {
            if let Some(model) = self.models.get_mut(key) {
                model.on_update();
            }
        }
    }

    /// Run every clear hook in registration order, then drop all models.
    /// Registrations survive, so `init` may run again.
    pub fn clear(&mut self) {
        for key in &self.order {
            if let Some(model) = self.models.get_mut(key) {
                model.on_clear();
            }
        }
        let cleared = self.models.len();
        self.models.clear();
        self.order.clear();
        debug!(cleared, "[st-04] Models cleared");
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn registered(&self) -> usize {
        self.registrations.len()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        ModelRegistryBuilder::new().build()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.registrations.iter().map(|r| r.name).collect();
        f.debug_struct("ModelRegistry")
            .field("registered", &names)
            .field("live", &self.models.len())
            .finish()
    }
}

fn construct(registration: &Registration) -> Result<Box<dyn Model>, ModelError> {
    let built = panic::catch_unwind(AssertUnwindSafe(|| -> Result<Box<dyn Model>, ModelError> {
        let mut model = (registration.factory)()?;
        model.on_init()?;
        Ok(model)
    }));
    built.unwrap_or_else(|payload| {
        Err(ModelError::construct(
            registration.name,
            panic_message(payload.as_ref()),
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked".to_string()
    }
}
