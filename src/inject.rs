use alloc::{boxed::Box, sync::Arc};
use core::any::Any;

use crate::{any::TypeInfo, cache::WiredInstance, errors::InjectErrorKind};

type BoxedSetter = Box<dyn Fn(&mut (dyn Any + Send + Sync), &WiredInstance) -> Result<(), InjectErrorKind> + Send + Sync>;

/// A slot on an implementation that the container fills with another
/// resolved capability.
pub struct InjectionPoint {
    field: &'static str,
    requires: TypeInfo,
    setter: BoxedSetter,
}

impl InjectionPoint {
    /// Creates an injection point for the named slot of `Owner`, requiring
    /// the capability `Dep`.
    ///
    /// The setter receives the bare owner instance and the shared handle of
    /// the resolved dependency.
    #[must_use]
    pub fn new<Owner, Dep, F>(field: &'static str, set: F) -> Self
    where
        Owner: Send + Sync + 'static,
        Dep: ?Sized + Send + Sync + 'static,
        F: Fn(&mut Owner, Arc<Dep>) + Send + Sync + 'static,
    {
        Self {
            field,
            requires: TypeInfo::of::<Dep>(),
            setter: Box::new(move |owner: &mut (dyn Any + Send + Sync), resolved: &WiredInstance| {
                let Some(owner) = owner.downcast_mut::<Owner>() else {
                    return Err(InjectErrorKind::IncorrectOwner {
                        expected: TypeInfo::of::<Owner>(),
                    });
                };
                let Some(dependency) = resolved.extract::<Dep>() else {
                    return Err(InjectErrorKind::IncorrectSlot {
                        expected: TypeInfo::of::<Dep>(),
                        actual: resolved.implementation,
                    });
                };
                set(owner, dependency);
                Ok(())
            }),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn field(&self) -> &'static str {
        self.field
    }

    #[inline]
    #[must_use]
    pub(crate) const fn requires(&self) -> TypeInfo {
        self.requires
    }

    #[inline]
    pub(crate) fn fill(&self, owner: &mut (dyn Any + Send + Sync), resolved: &WiredInstance) -> Result<(), InjectErrorKind> {
        (self.setter)(owner, resolved)
    }
}
