use alloc::vec::Vec;

use crate::{errors::InstantiateErrorKind, inject::InjectionPoint};

/// A concrete type the container can construct and wire.
///
/// `construct` produces a bare instance with empty slots; the container fills
/// every declared [`InjectionPoint`] afterwards, so the constructor must not
/// resolve dependencies itself.
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Whether the registration mechanism marked this type as a managed
    /// component. Bindings whose implementation reports `false` fail
    /// resolution with [`crate::ResolveErrorKind::NotComponent`].
    #[inline]
    #[must_use]
    fn is_component() -> bool {
        true
    }

    /// No-argument constructor for the bare instance.
    ///
    /// # Errors
    /// Returns [`InstantiateErrorKind`] if the instance cannot be created.
    fn construct() -> Result<Self, InstantiateErrorKind>;

    /// Slots to fill after construction, in declaration order.
    #[must_use]
    fn injection_points() -> Vec<InjectionPoint> {
        Vec::new()
    }
}
