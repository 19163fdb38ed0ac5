use parking_lot::RwLock;
use std::{
    any::type_name,
    fmt::{self, Debug, Display, Formatter},
    mem,
    sync::{Arc, Weak},
};
use tracing::{debug, debug_span, error, info_span, warn};

use crate::{
    any::{Map, TypeInfo},
    binding::Bindings,
    dependency_resolver::DependencyResolver,
    destroy::Destroyer,
    errors::{
        DestroyError, DestroyErrors, Errors, InvokeError, RegisterError, RegisterErrors, ResolveError, ResolveErrorKind,
    },
    invoke::Invoke,
    provider::Provider,
    trace::Trace,
};

pub(crate) struct ScopeInner {
    name: Arc<str>,
    providers: RwLock<Map>,
    destroyers: RwLock<Vec<Destroyer>>,
}

/// A named registry of bindings plus the teardown actions recorded while using them.
///
/// All operations take `&self` and may be called from any number of threads. Values are
/// always produced with no internal lock held, so creators and destructors may freely
/// use the scope themselves.
pub struct Scope {
    inner: Arc<ScopeInner>,
}

impl Scope {
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                name: name.into(),
                providers: RwLock::new(Map::new()),
                destroyers: RwLock::new(Vec::new()),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Applies bindings in order, replacing any earlier binding of the same type.
    ///
    /// A binding that fails validation is skipped and reported, the others still apply.
    pub fn register<B>(&self, bindings: B) -> Result<(), RegisterErrors>
    where
        B: Bindings,
    {
        let span = info_span!("register", scope = %self.inner.name);
        let _guard = span.enter();

        let mut errors = Vec::new();
        for binding in bindings.into_bindings() {
            let description = binding.to_string();
            match binding.register(self) {
                Ok(()) => debug!(binding = %description, "Registered"),
                Err(kind) => {
                    let err = RegisterError {
                        scope: self.inner.name.clone(),
                        binding: description,
                        kind,
                    };
                    error!("{}", err);
                    errors.push(err);
                }
            }
        }

        Errors::join(errors)
    }

    #[track_caller]
    pub fn must_register<B>(&self, bindings: B)
    where
        B: Bindings,
    {
        if let Err(err) = self.register(bindings) {
            panic!("{err}");
        }
    }

    /// Produces a value of `R` using its current binding.
    pub fn resolve<R>(&self) -> Result<R, ResolveError>
    where
        R: 'static,
    {
        let span = info_span!("resolve", scope = %self.inner.name, dependency = type_name::<R>());
        let _guard = span.enter();

        self.resolve_traced(&Trace::new())
    }

    #[track_caller]
    pub fn must_resolve<R>(&self) -> R
    where
        R: 'static,
    {
        match self.resolve() {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    pub(crate) fn resolve_traced<R>(&self, trace: &Trace) -> Result<R, ResolveError>
    where
        R: 'static,
    {
        let type_info = TypeInfo::of::<R>();

        let span = debug_span!("resolve_traced", dependency = type_info.name);
        let _guard = span.enter();

        let provider = self.inner.providers.read().get(&type_info).cloned();
        let Some(provider) = provider else {
            let err = self.resolve_error(type_info, ResolveErrorKind::NotRegistered(type_info));
            warn!("{}", err);
            return Err(err);
        };

        if let Some(cycle) = trace.cycle(type_info) {
            let err = self.resolve_error(type_info, ResolveErrorKind::Cycle(cycle));
            error!("{}", err);
            return Err(err);
        }

        match self.produce::<R>(&*provider, &trace.extended(type_info)) {
            Ok(value) => {
                debug!("Resolved");
                Ok(value)
            }
            Err(kind @ ResolveErrorKind::Dependency(_)) => Err(self.resolve_error(type_info, kind)),
            Err(kind) => {
                let err = self.resolve_error(type_info, kind);
                error!("{}", err);
                Err(err)
            }
        }
    }

    fn produce<R>(&self, provider: &dyn Provider, trace: &Trace) -> Result<R, ResolveErrorKind>
    where
        R: 'static,
    {
        let value = provider.produce(self, trace)?;
        match value.downcast::<R>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(ResolveErrorKind::IncorrectType {
                expected: TypeInfo::of::<R>(),
                actual: (*value).type_id(),
            }),
        }
    }

    /// Resolves every argument of `function`, then calls it once.
    ///
    /// The first argument that fails to resolve aborts the call.
    pub fn invoke<F, Deps>(&self, function: F) -> Result<F::Output, InvokeError>
    where
        F: Invoke<Deps>,
        Deps: DependencyResolver,
    {
        let span = info_span!("invoke", scope = %self.inner.name, function = type_name::<F>());
        let _guard = span.enter();

        match Deps::resolve(self, &Trace::new()) {
            Ok(dependencies) => Ok(function.invoke(dependencies)),
            Err(source) => {
                let err = InvokeError {
                    scope: self.inner.name.clone(),
                    function: type_name::<F>(),
                    source,
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    #[track_caller]
    pub fn must_invoke<F, Deps>(&self, function: F) -> F::Output
    where
        F: Invoke<Deps>,
        Deps: DependencyResolver,
    {
        match self.invoke(function) {
            Ok(output) => output,
            Err(err) => panic!("{err}"),
        }
    }

    /// Runs every recorded teardown action, most recent first, and forgets them.
    ///
    /// Bindings stay registered. Failing actions don't stop the others.
    pub fn destroy(&self) -> Result<(), DestroyErrors> {
        let span = info_span!("destroy", scope = %self.inner.name);
        let _guard = span.enter();

        let destroyers = mem::take(&mut *self.inner.destroyers.write());

        let mut errors = Vec::new();
        for destroyer in destroyers.into_iter().rev() {
            let description = destroyer.to_string();
            match destroyer.destroy() {
                Ok(()) => debug!(destroyer = %description, "Destroyed"),
                Err(source) => {
                    let err = DestroyError {
                        scope: self.inner.name.clone(),
                        destroyer: description,
                        source,
                    };
                    error!("{}", err);
                    errors.push(err);
                }
            }
        }

        Errors::join(errors)
    }

    #[track_caller]
    pub fn must_destroy(&self) {
        if let Err(err) = self.destroy() {
            panic!("{err}");
        }
    }

    pub(crate) fn insert_provider(&self, type_info: TypeInfo, provider: Arc<dyn Provider>) {
        if self.inner.providers.write().insert(type_info, provider).is_some() {
            debug!(dependency = type_info.name, "Previous binding replaced");
        }
    }

    pub(crate) fn push_destroyer(&self, destroyer: Destroyer) {
        self.inner.destroyers.write().push(destroyer);
    }

    #[inline]
    pub(crate) fn name_arc(&self) -> Arc<str> {
        self.inner.name.clone()
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<ScopeInner> {
        Arc::downgrade(&self.inner)
    }

    #[inline]
    pub(crate) const fn from_inner(inner: Arc<ScopeInner>) -> Self {
        Self { inner }
    }

    fn resolve_error(&self, type_info: TypeInfo, kind: ResolveErrorKind) -> ResolveError {
        ResolveError::new(self.inner.name.clone(), type_info, kind)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

impl Debug for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.inner.name)
            .field("bindings", &self.inner.providers.read().len())
            .field("destroyers", &self.inner.destroyers.read().len())
            .finish()
    }
}
