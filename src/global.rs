//! A process-wide scope and functions operating on it.
//!
//! Every function here aborts with the error's message on failure.

use once_cell::sync::Lazy;

use crate::{binding::Bindings, dependency_resolver::DependencyResolver, invoke::Invoke, scope::Scope};

pub const NAME: &str = "global";

static SCOPE: Lazy<Scope> = Lazy::new(|| Scope::new(NAME));

#[inline]
#[must_use]
pub fn scope() -> &'static Scope {
    &SCOPE
}

#[track_caller]
pub fn register<B>(bindings: B)
where
    B: Bindings,
{
    SCOPE.must_register(bindings);
}

#[track_caller]
pub fn resolve<R>() -> R
where
    R: 'static,
{
    SCOPE.must_resolve()
}

#[track_caller]
pub fn invoke<F, Deps>(function: F) -> F::Output
where
    F: Invoke<Deps>,
    Deps: DependencyResolver,
{
    SCOPE.must_invoke(function)
}

#[track_caller]
pub fn destroy() {
    SCOPE.must_destroy();
}
