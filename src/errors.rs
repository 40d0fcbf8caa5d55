mod inject;
mod instantiate;
mod resolve;

pub use inject::InjectErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use resolve::{DependencyChain, ResolveErrorKind};
