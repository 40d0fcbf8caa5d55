use alloc::{boxed::Box, collections::BTreeMap, sync::Arc, vec::Vec};
use core::any::{Any, TypeId};
use tracing::debug;

use crate::{
    any::TypeInfo,
    cache::WiredInstance,
    errors::{InstantiateErrorKind, ResolveErrorKind},
    inject::InjectionPoint,
    injectable::Injectable,
};

pub(crate) type BoxedAny = Box<dyn Any + Send + Sync>;
type BoxedConstructor = Box<dyn Fn() -> Result<BoxedAny, InstantiateErrorKind> + Send + Sync>;
type BoxedSeal = Box<dyn Fn(BoxedAny) -> Result<WiredInstance, BoxedAny> + Send + Sync>;

/// A capability bound to the one concrete implementation serving it.
pub(crate) struct Binding {
    pub(crate) capability: TypeInfo,
    pub(crate) implementation: TypeInfo,
    pub(crate) component: bool,
    pub(crate) points: Vec<InjectionPoint>,
    constructor: BoxedConstructor,
    seal: BoxedSeal,
}

impl Binding {
    #[must_use]
    fn new<Cap, Impl, F>(coerce: F) -> Self
    where
        Cap: ?Sized + Send + Sync + 'static,
        Impl: Injectable,
        F: Fn(Arc<Impl>) -> Arc<Cap> + Send + Sync + 'static,
    {
        Self {
            capability: TypeInfo::of::<Cap>(),
            implementation: TypeInfo::of::<Impl>(),
            component: Impl::is_component(),
            points: Impl::injection_points(),
            constructor: Box::new(|| Impl::construct().map(|instance| Box::new(instance) as BoxedAny)),
            seal: Box::new(move |bare| match bare.downcast::<Impl>() {
                Ok(instance) => {
                    let concrete = Arc::<Impl>::from(instance);
                    Ok(WiredInstance::new(concrete.clone(), coerce(concrete)))
                }
                Err(bare) => Err(bare),
            }),
        }
    }

    #[inline]
    pub(crate) fn construct(&self) -> Result<BoxedAny, InstantiateErrorKind> {
        (self.constructor)()
    }

    #[inline]
    pub(crate) fn seal(&self, bare: BoxedAny) -> Result<WiredInstance, BoxedAny> {
        (self.seal)(bare)
    }
}

/// The immutable capability to implementation table, populated once at
/// container startup.
pub struct Registry {
    bindings: BTreeMap<TypeId, Binding>,
    implementations: BTreeMap<TypeId, TypeId>,
}

impl Registry {
    pub(crate) fn binding(&self, requested: TypeInfo) -> Result<&Binding, ResolveErrorKind> {
        if let Some(binding) = self.bindings.get(&requested.id) {
            return Ok(binding);
        }
        if let Some(capability_id) = self.implementations.get(&requested.id) {
            return Ok(self
                .bindings
                .get(capability_id)
                .expect("implementation index entries always mirror a binding"));
        }
        Err(if requested.concrete {
            ResolveErrorKind::UnsupportedType { requested }
        } else {
            ResolveErrorKind::NoImplementation { requested }
        })
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    bindings: BTreeMap<TypeId, Binding>,
}

impl RegistryBuilder {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Binds a capability type to the implementation serving it.
    ///
    /// `coerce` turns the shared implementation handle into the capability
    /// handle; `|implementation| implementation` is enough, the unsized
    /// coercion happens at the closure's return position.
    ///
    /// Binding the same capability twice keeps the last entry, and a concrete
    /// type serves at most one capability.
    #[must_use]
    pub fn bind<Cap, Impl, F>(mut self, coerce: F) -> Self
    where
        Cap: ?Sized + Send + Sync + 'static,
        Impl: Injectable,
        F: Fn(Arc<Impl>) -> Arc<Cap> + Send + Sync + 'static,
    {
        let binding = Binding::new::<Cap, Impl, F>(coerce);
        let capability = binding.capability;
        let implementation = binding.implementation;

        self.bindings
            .retain(|_, existing| existing.implementation.id != implementation.id);
        if self.bindings.insert(capability.id, binding).is_some() {
            debug!(capability = capability.name, "Capability rebound");
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        let implementations = self
            .bindings
            .iter()
            .map(|(capability_id, binding)| (binding.implementation.id, *capability_id))
            .collect();

        Registry {
            bindings: self.bindings,
            implementations,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::RegistryBuilder;
    use crate::{
        any::TypeInfo,
        errors::{InstantiateErrorKind, ResolveErrorKind},
        injectable::Injectable,
    };

    trait Port: Send + Sync {}

    struct First;
    struct Second;

    impl Port for First {}
    impl Port for Second {}

    impl Injectable for First {
        fn construct() -> Result<Self, InstantiateErrorKind> {
            Ok(Self)
        }
    }

    impl Injectable for Second {
        fn construct() -> Result<Self, InstantiateErrorKind> {
            Ok(Self)
        }
    }

    #[test]
    fn test_lookup_by_capability_and_implementation() {
        let registry = RegistryBuilder::new().bind::<dyn Port, First, _>(|first| first).build();

        assert!(registry.binding(TypeInfo::of::<dyn Port>()).is_ok());
        assert!(registry.binding(TypeInfo::of::<First>()).is_ok());
        assert!(matches!(
            registry.binding(TypeInfo::of::<Second>()),
            Err(ResolveErrorKind::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_unbound_capability() {
        trait Elsewhere: Send + Sync {}

        let registry = RegistryBuilder::new().build();

        assert!(matches!(
            registry.binding(TypeInfo::of::<dyn Elsewhere>()),
            Err(ResolveErrorKind::NoImplementation { .. })
        ));
    }

    #[test]
    fn test_rebind_keeps_last() {
        let registry = RegistryBuilder::new()
            .bind::<dyn Port, First, _>(|first| first)
            .bind::<dyn Port, Second, _>(|second| second)
            .build();

        let binding = registry.binding(TypeInfo::of::<dyn Port>()).unwrap();
        assert_eq!(binding.implementation.id, TypeInfo::of::<Second>().id);
        assert!(matches!(
            registry.binding(TypeInfo::of::<First>()),
            Err(ResolveErrorKind::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_implementation_serves_one_capability() {
        trait OtherPort: Send + Sync {}

        impl OtherPort for First {}

        let registry = RegistryBuilder::new()
            .bind::<dyn Port, First, _>(|first| first)
            .bind::<dyn OtherPort, First, _>(|first| first)
            .build();

        assert!(matches!(
            registry.binding(TypeInfo::of::<dyn Port>()),
            Err(ResolveErrorKind::NoImplementation { .. })
        ));
        assert!(registry.binding(TypeInfo::of::<dyn OtherPort>()).is_ok());
    }
}
