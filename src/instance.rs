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
    destroy::{Destroy, Destructor},
    errors::{ResolveErrorKind, ValidateErrorKind},
    provider::Provider,
    scope::Scope,
    trace::Trace,
    validate::{self, Checked},
};

/// Binds `R` to a pre-built value of type `V`.
///
/// Every resolution returns a clone of the stored value. The destructor, if any, is recorded
/// once at registration and receives the value exactly as it was given.
pub struct Instance<R, V = ()> {
    value: Option<V>,
    destructor: Option<Destructor<V>>,
    _resolved: PhantomData<fn() -> R>,
}

impl<R> Instance<R> {
    #[inline]
    #[must_use]
    pub fn new<V>(value: V) -> Instance<R, V> {
        Instance {
            value: Some(value),
            destructor: None,
            _resolved: PhantomData,
        }
    }

    /// An absent value of `V`, accepted only when `R` is `Option<V>`.
    #[inline]
    #[must_use]
    pub fn nil<V>() -> Instance<R, V> {
        Instance {
            value: None,
            destructor: None,
            _resolved: PhantomData,
        }
    }
}

impl<R, V> Instance<R, V> {
    /// Sets the destructor run on teardown. It isn't recorded for a nil value.
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

impl<R, V> Display for Instance<R, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Instance[{}]", type_name::<R>())
    }
}

impl<R, V> Binding for Instance<R, V>
where
    R: Clone + Send + Sync + 'static,
    V: Into<R> + Send + Sync + 'static,
{
    fn register(self: Box<Self>, scope: &Scope) -> Result<(), ValidateErrorKind> {
        let Self { value, destructor, .. } = *self;

        let (value, destroyer) = match validate::value::<R, V>(value)? {
            Checked::Value(value) => {
                let destroyer = destructor.map(|destructor| destructor.destroyer(&value));
                (value.into(), destroyer)
            }
            Checked::Nil(nil) => (nil, None),
        };

        scope.insert_provider(TypeInfo::of::<R>(), Arc::new(InstanceProvider { value }));
        if let Some(destroyer) = destroyer {
            debug!(%destroyer, "Destroyer recorded");
            scope.push_destroyer(destroyer);
        }

        Ok(())
    }
}

struct InstanceProvider<R> {
    value: R,
}

impl<R> Provider for InstanceProvider<R>
where
    R: Clone + Send + Sync + 'static,
{
    #[inline]
    fn produce(&self, _scope: &Scope, _trace: &Trace) -> Result<BoxedValue, ResolveErrorKind> {
        Ok(Box::new(self.value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::Instance;
    use crate::{errors::ValidateErrorKind, Scope};

    use core::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    #[derive(Clone)]
    struct Config {
        port: u16,
    }

    #[test]
    #[traced_test]
    fn test_resolve_stored_value() {
        let scope = Scope::new("test");
        scope.register((Instance::<Config>::new(Config { port: 8080 }),)).unwrap();

        assert_eq!(scope.resolve::<Config>().unwrap().port, 8080);
        assert_eq!(scope.resolve::<Config>().unwrap().port, 8080);
    }

    #[test]
    #[traced_test]
    fn test_resolve_converted_value() {
        let scope = Scope::new("test");
        scope.register((Instance::<u64>::new(7u8),)).unwrap();

        assert_eq!(scope.resolve::<u64>().unwrap(), 7);
    }

    #[test]
    #[traced_test]
    fn test_nil() {
        let scope = Scope::new("test");
        scope.register((Instance::<Option<Arc<Config>>>::nil::<Arc<Config>>(),)).unwrap();

        assert!(scope.resolve::<Option<Arc<Config>>>().unwrap().is_none());
    }

    #[test]
    #[traced_test]
    fn test_nil_not_convertible() {
        let scope = Scope::new("test");
        let errors = scope.register((Instance::<u8>::nil::<u8>(),)).unwrap_err();

        assert_eq!(errors.len(), 1);
        let err = errors.iter().next().unwrap();
        assert_eq!(err.binding, "Instance[u8]");
        assert!(matches!(err.kind, ValidateErrorKind::NotConvertible { from: "<nil>", .. }));
        assert!(scope.resolve::<u8>().is_err());
    }

    #[test]
    #[traced_test]
    fn test_destroyer_recorded_once() {
        let destroyed = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((Instance::<u8>::new(3u8).destroy({
                let destroyed = destroyed.clone();
                move |value: u8| {
                    destroyed.fetch_add(value, Ordering::SeqCst);
                }
            }),))
            .unwrap();

        scope.resolve::<u8>().unwrap();
        scope.resolve::<u8>().unwrap();
        scope.destroy().unwrap();

        assert_eq!(destroyed.load(Ordering::SeqCst), 3);
    }

    #[test]
    #[traced_test]
    fn test_nil_has_no_destroyer() {
        let destroyed = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((Instance::<Option<u8>>::nil::<u8>().destroy({
                let destroyed = destroyed.clone();
                move |_: u8| {
                    destroyed.fetch_add(1, Ordering::SeqCst);
                }
            }),))
            .unwrap();

        scope.destroy().unwrap();

        assert_eq!(destroyed.load(Ordering::SeqCst), 0);
    }
}
