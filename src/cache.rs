use alloc::{collections::BTreeMap, sync::Arc};
use core::any::{Any, TypeId};

use crate::any::TypeInfo;

/// A fully constructed and wired singleton, addressable both through its
/// capability and through its concrete implementation type.
#[derive(Clone)]
pub(crate) struct WiredInstance {
    pub(crate) implementation: TypeInfo,
    // holds an Arc<Cap>
    by_capability: Arc<dyn Any + Send + Sync>,
    // holds an Arc<Impl>
    by_implementation: Arc<dyn Any + Send + Sync>,
}

impl WiredInstance {
    #[must_use]
    pub(crate) fn new<Impl, Cap>(concrete: Arc<Impl>, capability: Arc<Cap>) -> Self
    where
        Impl: Send + Sync + 'static,
        Cap: ?Sized + Send + Sync + 'static,
    {
        Self {
            implementation: TypeInfo::of::<Impl>(),
            by_capability: Arc::new(capability),
            by_implementation: Arc::new(concrete),
        }
    }

    #[must_use]
    pub(crate) fn extract<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        if let Some(handle) = self.by_capability.downcast_ref::<Arc<T>>() {
            return Some(handle.clone());
        }
        self.by_implementation.downcast_ref::<Arc<T>>().cloned()
    }
}

pub(crate) struct Cache {
    map: BTreeMap<TypeId, WiredInstance>,
}

impl Cache {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    #[must_use]
    pub(crate) fn get(&self, type_id: &TypeId) -> Option<WiredInstance> {
        self.map.get(type_id).cloned()
    }

    // Entries are never replaced or evicted for the container's lifetime.
    pub(crate) fn insert(&mut self, type_id: TypeId, instance: WiredInstance) -> Option<WiredInstance> {
        self.map.insert(type_id, instance)
    }
}
