use std::{
    any::type_name,
    fmt::{self, Debug, Display, Formatter},
    marker::PhantomData,
    sync::Arc,
};
use tracing::debug;

use crate::{
    any::{BoxedValue, TypeInfo},
    binding::Binding,
    create::{self, Create},
    dependency_resolver::DependencyResolver,
    destroy::{Destroy, Destructor},
    errors::{ResolveErrorKind, ValidateErrorKind},
    provider::Provider,
    scope::Scope,
    trace::Trace,
    validate,
};

/// Binds `R` to a creator called anew on every resolution.
///
/// Inputs are resolved from the scope the resolution was requested on. When a destructor is
/// set, one teardown action is recorded per produced value.
pub struct Factory<R, C = (), Deps = (), M = (), V = ()> {
    create: C,
    destructor: Option<Destructor<V>>,
    _marker: PhantomData<fn() -> (R, Deps, M)>,
}

impl<R> Factory<R> {
    #[inline]
    #[must_use]
    pub fn new<C, Deps, M>(create: C) -> Factory<R, C, Deps, M, C::Value>
    where
        C: Create<R, Deps, M>,
        Deps: DependencyResolver,
    {
        Factory {
            create,
            destructor: None,
            _marker: PhantomData,
        }
    }
}

impl<R, C, Deps, M, V> Factory<R, C, Deps, M, V> {
    #[inline]
    #[must_use]
    pub fn destroy<D>(mut self, destroy: D) -> Self
    where
        D: Destroy<V>,
        V: Clone + Send + Sync + 'static,
    {
        self.destructor = Some(Destructor::new(destroy));
        self
    }

    /// Like `destroy`, and also names each value by its [`Debug`] form in teardown errors.
    #[inline]
    #[must_use]
    pub fn destroy_debug<D>(mut self, destroy: D) -> Self
    where
        D: Destroy<V>,
        V: Clone + Debug + Send + Sync + 'static,
    {
        self.destructor = Some(Destructor::new(destroy).described());
        self
    }
}

impl<R, C, Deps, M, V> Display for Factory<R, C, Deps, M, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Factory[{}]", type_name::<R>())
    }
}

impl<R, C, Deps, M, V> Binding for Factory<R, C, Deps, M, V>
where
    R: Send + 'static,
    C: Create<R, Deps, M, Value = V>,
    Deps: DependencyResolver + 'static,
    M: 'static,
    V: Into<R> + Send + Sync + 'static,
{
    fn register(self: Box<Self>, scope: &Scope) -> Result<(), ValidateErrorKind> {
        let signature = validate::create::<R, C, Deps, M>();
        debug!(%signature, "Creator accepted");

        scope.insert_provider(TypeInfo::of::<R>(), Arc::new(*self));
        Ok(())
    }
}

impl<R, C, Deps, M, V> Provider for Factory<R, C, Deps, M, V>
where
    R: Send + 'static,
    C: Create<R, Deps, M, Value = V>,
    Deps: DependencyResolver + 'static,
    M: 'static,
    V: Into<R> + Send + Sync + 'static,
{
    fn produce(&self, scope: &Scope, trace: &Trace) -> Result<BoxedValue, ResolveErrorKind> {
        let value = create::call::<R, C, Deps, M>(&self.create, scope, trace)?;

        if let Some(destructor) = &self.destructor {
            let destroyer = destructor.destroyer(&value);
            debug!(%destroyer, "Destroyer recorded");
            scope.push_destroyer(destroyer);
        }

        Ok(Box::new(value.into()))
    }
}
