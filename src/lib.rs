#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod errors;
pub(crate) mod inject;
pub(crate) mod injectable;
pub(crate) mod registry;
pub(crate) mod registry_macros;

pub mod macros_utils;

pub use any::TypeInfo;
pub use container::Container;
pub use errors::{DependencyChain, InjectErrorKind, InstantiateErrorKind, ResolveErrorKind};
pub use inject::InjectionPoint;
pub use injectable::Injectable;
pub use registry::{Registry, RegistryBuilder};
