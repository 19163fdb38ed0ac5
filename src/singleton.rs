use once_cell::sync::OnceCell;
use std::{
    any::type_name,
    fmt::{self, Debug, Display, Formatter},
    marker::PhantomData,
    sync::{Arc, Weak},
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
    scope::{Scope, ScopeInner},
    trace::Trace,
    validate,
};

/// Binds `R` to a creator called at most once.
///
/// The first resolution runs the creator, with inputs resolved from the scope the singleton was
/// registered in. Its outcome, value or error, is returned to every later resolution.
pub struct Singleton<R, C = (), Deps = (), M = (), V = ()> {
    create: C,
    destructor: Option<Destructor<V>>,
    _marker: PhantomData<fn() -> (R, Deps, M)>,
}

impl<R> Singleton<R> {
    #[inline]
    #[must_use]
    pub fn new<C, Deps, M>(create: C) -> Singleton<R, C, Deps, M, C::Value>
    where
        C: Create<R, Deps, M>,
        Deps: DependencyResolver,
    {
        Singleton {
            create,
            destructor: None,
            _marker: PhantomData,
        }
    }
}

impl<R, C, Deps, M, V> Singleton<R, C, Deps, M, V> {
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

impl<R, C, Deps, M, V> Display for Singleton<R, C, Deps, M, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Singleton[{}]", type_name::<R>())
    }
}

impl<R, C, Deps, M, V> Binding for Singleton<R, C, Deps, M, V>
where
    R: Clone + Send + Sync + 'static,
    C: Create<R, Deps, M, Value = V>,
    Deps: DependencyResolver + 'static,
    M: 'static,
    V: Into<R> + Send + Sync + 'static,
{
    fn register(self: Box<Self>, scope: &Scope) -> Result<(), ValidateErrorKind> {
        let signature = validate::create::<R, C, Deps, M>();
        debug!(%signature, "Creator accepted");

        let Self { create, destructor, .. } = *self;
        let provider = SingletonProvider {
            scope: scope.downgrade(),
            scope_name: scope.name_arc(),
            create,
            destructor,
            cell: OnceCell::new(),
            _marker: PhantomData::<fn() -> (V, Deps, M)>,
        };

        scope.insert_provider(TypeInfo::of::<R>(), Arc::new(provider));
        Ok(())
    }
}

struct SingletonProvider<R, C, Deps, M, V> {
    scope: Weak<ScopeInner>,
    scope_name: Arc<str>,
    create: C,
    destructor: Option<Destructor<V>>,
    cell: OnceCell<Result<R, ResolveErrorKind>>,
    _marker: PhantomData<fn() -> (V, Deps, M)>,
}

impl<R, C, Deps, M, V> SingletonProvider<R, C, Deps, M, V>
where
    R: Send + Sync + 'static,
    C: Create<R, Deps, M, Value = V>,
    Deps: DependencyResolver,
    V: Into<R> + Send + Sync + 'static,
{
    fn create_once(&self, trace: &Trace) -> Result<R, ResolveErrorKind> {
        let Some(inner) = self.scope.upgrade() else {
            return Err(ResolveErrorKind::ScopeDropped(self.scope_name.clone()));
        };
        let scope = Scope::from_inner(inner);

        let value = create::call::<R, C, Deps, M>(&self.create, &scope, trace)?;

        if let Some(destructor) = &self.destructor {
            let destroyer = destructor.destroyer(&value);
            debug!(%destroyer, "Destroyer recorded");
            scope.push_destroyer(destroyer);
        }

        Ok(value.into())
    }
}

impl<R, C, Deps, M, V> Provider for SingletonProvider<R, C, Deps, M, V>
where
    R: Clone + Send + Sync + 'static,
    C: Create<R, Deps, M, Value = V>,
    Deps: DependencyResolver,
    V: Into<R> + Send + Sync + 'static,
{
    fn produce(&self, _scope: &Scope, trace: &Trace) -> Result<BoxedValue, ResolveErrorKind> {
        let result = match self.cell.get() {
            Some(result) => {
                debug!("Found in cache");
                result
            }
            None => self.cell.get_or_init(|| self.create_once(trace)),
        };

        match result {
            Ok(value) => Ok(Box::new(value.clone())),
            Err(err) => Err(err.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Singleton;
    use crate::{errors::ResolveErrorKind, Factory, Instance, Scope};

    use core::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_created_once() {
        let call_count = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((Singleton::<Arc<u8>>::new({
                let call_count = call_count.clone();
                move || Ok(Arc::new(call_count.fetch_add(1, Ordering::SeqCst)))
            }),))
            .unwrap();

        let first = scope.resolve::<Arc<u8>>().unwrap();
        let second = scope.resolve::<Arc<u8>>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[traced_test]
    fn test_error_cached() {
        let call_count = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((Singleton::<u8>::new({
                let call_count = call_count.clone();
                move || {
                    call_count.fetch_add(1, Ordering::SeqCst);
                    Err::<u8, _>(anyhow::anyhow!("whoops"))
                }
            }),))
            .unwrap();

        let first = scope.resolve::<u8>().unwrap_err();
        let second = scope.resolve::<u8>().unwrap_err();

        match (&first.kind, &second.kind) {
            (ResolveErrorKind::Create(first), ResolveErrorKind::Create(second)) => assert!(Arc::ptr_eq(first, second)),
            kinds => panic!("unexpected kinds: {kinds:?}"),
        }
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[traced_test]
    fn test_destroyer_recorded_once() {
        let destroyed = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((Singleton::<u8>::new(|| Ok(4u8)).destroy({
                let destroyed = destroyed.clone();
                move |value: u8| {
                    destroyed.fetch_add(value, Ordering::SeqCst);
                }
            }),))
            .unwrap();

        scope.resolve::<u8>().unwrap();
        scope.resolve::<u8>().unwrap();
        scope.destroy().unwrap();

        assert_eq!(destroyed.load(Ordering::SeqCst), 4);
    }

    #[test]
    #[traced_test]
    fn test_inputs_resolved_on_first_use() {
        let scope = Scope::new("test");
        scope
            .register((
                Instance::<u8>::new(1u8),
                Singleton::<u16>::new(|a: u8| Ok(u16::from(a))),
                Factory::<u32>::new(|a: u8| Ok(u32::from(a))),
            ))
            .unwrap();

        scope.register((Instance::<u8>::new(2u8),)).unwrap();

        assert_eq!(scope.resolve::<u16>().unwrap(), 2);
        assert_eq!(scope.resolve::<u32>().unwrap(), 2);

        scope.register((Instance::<u8>::new(3u8),)).unwrap();

        assert_eq!(scope.resolve::<u16>().unwrap(), 2);
        assert_eq!(scope.resolve::<u32>().unwrap(), 3);
    }

    #[test]
    #[traced_test]
    fn test_missing_input_cached() {
        let scope = Scope::new("test");
        scope.register((Singleton::<u16>::new(|a: u8| Ok(u16::from(a))),)).unwrap();

        assert!(scope.resolve::<u16>().is_err());

        scope.register((Instance::<u8>::new(1u8),)).unwrap();

        let err = scope.resolve::<u16>().unwrap_err();
        assert!(matches!(err.root(), ResolveErrorKind::NotRegistered(_)));
    }

    #[test]
    #[traced_test]
    fn test_plain_value_creator() {
        let call_count = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((Singleton::<u8>::new({
                let call_count = call_count.clone();
                move || call_count.fetch_add(1, Ordering::SeqCst) + 10
            }),))
            .unwrap();

        assert_eq!(scope.resolve::<u8>().unwrap(), 10);
        assert_eq!(scope.resolve::<u8>().unwrap(), 10);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }
}
