use alloc::boxed::Box;
use core::{
    any::TypeId,
    fmt::{self, Display, Formatter},
};

use super::{inject::InjectErrorKind, instantiate::InstantiateErrorKind};
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("No implementation found in registry for {}", requested.name)]
    NoImplementation { requested: TypeInfo },
    #[error("Implementation {} is not registered as a component", implementation.name)]
    NotComponent { implementation: TypeInfo },
    #[error("Unsupported type requested: {} is not a bound implementation", requested.name)]
    UnsupportedType { requested: TypeInfo },
    #[error("Cyclic dependency detected: {chain}")]
    CyclicDependency { chain: DependencyChain },
    #[error("Cannot instantiate {}", implementation.name)]
    Instantiate {
        implementation: TypeInfo,
        #[source]
        source: InstantiateErrorKind,
    },
    #[error("Cannot initialize field {field} of {}", implementation.name)]
    Inject {
        implementation: TypeInfo,
        field: &'static str,
        #[source]
        source: InjectErrorKind,
    },
    #[error("Incorrect implementation type. Actual: {actual:?}, expected: {expected:?}")]
    IncorrectType { expected: TypeId, actual: TypeId },
}

#[derive(Debug)]
pub struct DependencyChain(pub(crate) Box<[TypeInfo]>);

impl Display for DependencyChain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut links = self.0.iter();
        if let Some(first) = links.next() {
            f.write_str(first.short_name())?;
        }
        for link in links {
            write!(f, " -> {}", link.short_name())?;
        }
        Ok(())
    }
}
