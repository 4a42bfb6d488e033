//! Cloning adapter registry
//!
//! Quantity construction needs a fresh, value-equal instance of whatever
//! concrete representation it is handed. Each representation registers one
//! cloning adapter here, keyed by its `TypeId`; construction consults the
//! registry rather than enumerating representations itself. Unsupported
//! representations fail explicitly with [`UnitError::UnsupportedType`].

use std::any::TypeId;
use std::sync::{Arc, OnceLock, RwLock};

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::{Result, UnitError};
use crate::magnitude::{Magnitude, Num};

/// A cloning adapter: produces a new handle holding a copy of the input's
/// payload, or `None` if the input is not the expected representation
pub type CloneFn = Arc<dyn Fn(&Num) -> Option<Num> + Send + Sync>;

/// Registry mapping representation tag to cloning adapter
pub struct CloneRegistry {
    adapters: FxHashMap<TypeId, CloneFn>,
}

impl CloneRegistry {
    /// Create a registry pre-seeded with the stock representations
    fn new() -> Self {
        let mut registry = Self {
            adapters: FxHashMap::default(),
        };
        registry.register::<f64>();
        registry.register::<f32>();
        registry.register::<i64>();
        registry.register::<i32>();
        registry
    }

    /// Register (or replace) the adapter for representation `T`
    pub fn register<T: Magnitude + Clone>(&mut self) {
        self.register_fn::<T>(Arc::new(|m: &Num| {
            m.as_any()
                .downcast_ref::<T>()
                .map(|v| Arc::new(v.clone()) as Num)
        }));
    }

    /// Register (or replace) a hand-written adapter for representation `T`
    pub fn register_fn<T: Magnitude>(&mut self, adapter: CloneFn) {
        self.adapters.insert(TypeId::of::<T>(), adapter);
    }

    /// Whether an adapter exists for the given magnitude's representation
    pub fn supports(&self, magnitude: &dyn Magnitude) -> bool {
        self.adapters.contains_key(&magnitude.as_any().type_id())
    }

    /// Clone a magnitude through its registered adapter
    pub fn clone_magnitude(&self, magnitude: &Num) -> Result<Num> {
        let tag = magnitude.as_any().type_id();
        let adapter = self
            .adapters
            .get(&tag)
            .ok_or_else(|| UnitError::UnsupportedType {
                type_name: magnitude.type_name().to_string(),
            })?;
        adapter(magnitude).ok_or_else(|| UnitError::AssertionFailure {
            what: format!(
                "cloning adapter registered for `{}` rejected its own representation",
                magnitude.type_name()
            ),
        })
    }
}

static REGISTRY: OnceLock<RwLock<CloneRegistry>> = OnceLock::new();

fn registry() -> &'static RwLock<CloneRegistry> {
    REGISTRY.get_or_init(|| RwLock::new(CloneRegistry::new()))
}

/// Register a cloning adapter for representation `T` in the process-wide
/// registry
pub fn register_clone_adapter<T: Magnitude + Clone>() {
    let mut registry = registry().write().unwrap();
    registry.register::<T>();
    debug!(type_name = std::any::type_name::<T>(), "registered cloning adapter");
}

/// Register a hand-written adapter for representation `T` in the
/// process-wide registry. The adapter must honor the cloning contract:
/// a new, value-equal, non-identical instance.
pub fn register_clone_adapter_fn<T: Magnitude>(adapter: CloneFn) {
    let mut registry = registry().write().unwrap();
    registry.register_fn::<T>(adapter);
    debug!(type_name = std::any::type_name::<T>(), "registered cloning adapter");
}

/// Clone a magnitude through the process-wide registry
pub fn clone_magnitude(magnitude: &Num) -> Result<Num> {
    registry().read().unwrap().clone_magnitude(magnitude)
}
