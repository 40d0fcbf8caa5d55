use alloc::{sync::Arc, vec::Vec};
use core::any::type_name;
use parking_lot::Mutex;
use tracing::{debug, debug_span, error, info_span};

use crate::{
    any::TypeInfo,
    cache::{Cache, WiredInstance},
    errors::{DependencyChain, ResolveErrorKind},
    registry::{Binding, Registry},
};

/// The resolver. Owns the immutable binding table and the singleton cache;
/// cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: Registry,
    state: Mutex<ResolveState>,
}

struct ResolveState {
    cache: Cache,
    // implementations currently being constructed, outermost first
    in_progress: Vec<TypeInfo>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registry,
                state: Mutex::new(ResolveState {
                    cache: Cache::new(),
                    in_progress: Vec::new(),
                }),
            }),
        }
    }

    /// Resolves a capability or concrete implementation type to its fully
    /// wired singleton.
    ///
    /// The first resolution constructs the instance and, transitively, every
    /// dependency declared through its injection points; later resolutions
    /// return the cached instance. The whole pass runs under the container's
    /// state lock, so concurrent callers observe exactly one construction per
    /// implementation.
    ///
    /// # Errors
    /// See [`ResolveErrorKind`]. All failures are fatal; a failed pass leaves
    /// no entry for the failed implementation in the cache.
    pub fn resolve<Dep>(&self) -> Result<Arc<Dep>, ResolveErrorKind>
    where
        Dep: ?Sized + 'static,
    {
        let span = info_span!("resolve", requested = type_name::<Dep>());
        let _guard = span.enter();

        let requested = TypeInfo::of::<Dep>();
        let mut state = self.inner.state.lock();
        let wired = self.resolve_erased(&mut state, requested)?;

        match wired.extract::<Dep>() {
            Some(handle) => Ok(handle),
            None => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: requested.id,
                    actual: wired.implementation.id,
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    fn resolve_erased(&self, state: &mut ResolveState, requested: TypeInfo) -> Result<WiredInstance, ResolveErrorKind> {
        let span = debug_span!("wire", dependency = requested.name);
        let _guard = span.enter();

        let binding = match self.inner.registry.binding(requested) {
            Ok(binding) => binding,
            Err(err) => {
                error!("{}", err);
                return Err(err);
            }
        };

        if !binding.component {
            let err = ResolveErrorKind::NotComponent {
                implementation: binding.implementation,
            };
            error!("{}", err);
            return Err(err);
        }

        if let Some(wired) = state.cache.get(&binding.implementation.id) {
            debug!("Found in cache");
            return Ok(wired);
        }
        debug!("Not found in cache");

        if state.in_progress.iter().any(|info| info.id == binding.implementation.id) {
            let err = ResolveErrorKind::CyclicDependency {
                chain: chain_through(&state.in_progress, binding.implementation),
            };
            error!("{}", err);
            return Err(err);
        }

        state.in_progress.push(binding.implementation);
        let result = self.construct_and_wire(state, binding);
        state.in_progress.pop();
        result
    }

    fn construct_and_wire(&self, state: &mut ResolveState, binding: &Binding) -> Result<WiredInstance, ResolveErrorKind> {
        let mut bare = match binding.construct() {
            Ok(bare) => bare,
            Err(source) => {
                let err = ResolveErrorKind::Instantiate {
                    implementation: binding.implementation,
                    source,
                };
                error!("{}", err);
                return Err(err);
            }
        };
        debug!(implementation = binding.implementation.name, "Constructed");

        for point in &binding.points {
            let dependency = self.resolve_erased(state, point.requires())?;
            if let Err(source) = point.fill(bare.as_mut(), &dependency) {
                let err = ResolveErrorKind::Inject {
                    implementation: binding.implementation,
                    field: point.field(),
                    source,
                };
                error!("{}", err);
                return Err(err);
            }
        }

        match binding.seal(bare) {
            Ok(wired) => {
                state.cache.insert(binding.implementation.id, wired.clone());
                debug!(implementation = binding.implementation.name, "Cached");
                Ok(wired)
            }
            Err(bare) => {
                let err = ResolveErrorKind::IncorrectType {
                    expected: binding.implementation.id,
                    actual: (*bare).type_id(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }
}

fn chain_through(in_progress: &[TypeInfo], repeated: TypeInfo) -> DependencyChain {
    let mut chain: Vec<TypeInfo> = in_progress
        .iter()
        .copied()
        .skip_while(|info| info.id != repeated.id)
        .collect();
    chain.push(repeated);
    DependencyChain(chain.into_boxed_slice())
}
