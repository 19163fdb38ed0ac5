use std::sync::Arc;
use tracing::debug;

use crate::{
    dependency_resolver::DependencyResolver,
    errors::{CreateErrorKind, ResolveErrorKind},
    scope::Scope,
    trace::Trace,
};

/// Output shape of a creator returning the resolved type itself.
pub enum Plain {}

/// Output shape of a creator returning [`anyhow::Result`].
pub enum Fallible {}

/// What a creator may return when producing `R`.
///
/// Either `R` itself, or `anyhow::Result<V>` for any `V` convertible into `R`.
/// `M` only tells the two shapes apart.
pub trait CreateOutput<R, M> {
    type Value: 'static;

    fn into_result(self) -> Result<Self::Value, CreateErrorKind>;
}

impl<R> CreateOutput<R, Plain> for R
where
    R: 'static,
{
    type Value = R;

    #[inline]
    fn into_result(self) -> Result<Self::Value, CreateErrorKind> {
        Ok(self)
    }
}

impl<R, V> CreateOutput<R, Fallible> for Result<V, anyhow::Error>
where
    V: 'static,
{
    type Value = V;

    #[inline]
    fn into_result(self) -> Result<Self::Value, CreateErrorKind> {
        self.map_err(CreateErrorKind::Custom)
    }
}

/// A creator of `R` whose inputs are resolved from a scope.
///
/// Implemented for functions and closures taking resolved types and returning a [`CreateOutput`].
pub trait Create<R, Deps, M>: Send + Sync + 'static
where
    Deps: DependencyResolver,
{
    type Value: 'static;

    fn create(&self, dependencies: Deps) -> Result<Self::Value, CreateErrorKind>;
}

/// Resolves the creator's inputs against `scope` and calls it.
pub(crate) fn call<R, C, Deps, M>(create: &C, scope: &Scope, trace: &Trace) -> Result<C::Value, ResolveErrorKind>
where
    C: Create<R, Deps, M>,
    Deps: DependencyResolver,
{
    let dependencies = match Deps::resolve(scope, trace) {
        Ok(dependencies) => dependencies,
        Err(err) => return Err(ResolveErrorKind::Dependency(Box::new(err))),
    };
    let value = match create.create(dependencies) {
        Ok(value) => value,
        Err(err) => return Err(ResolveErrorKind::Create(Arc::new(err))),
    };

    debug!("Created");

    Ok(value)
}

macro_rules! impl_create {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, O, R, M, $($ty,)*> Create<R, ($($ty,)*), M> for F
        where
            F: Fn($($ty,)*) -> O + Send + Sync + 'static,
            O: CreateOutput<R, M>,
            $( $ty: 'static, )*
        {
            type Value = O::Value;

            #[inline]
            fn create(&self, ($($ty,)*): ($($ty,)*)) -> Result<Self::Value, CreateErrorKind> {
                self($($ty,)*).into_result()
            }
        }
    };
}

all_the_tuples!(impl_create);
