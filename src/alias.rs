use std::{
    any::type_name,
    fmt::{self, Display, Formatter},
    sync::Arc,
};

use crate::{
    any::{BoxedValue, TypeInfo},
    binding::Binding,
    errors::{ResolveErrorKind, ValidateErrorKind},
    provider::Provider,
    scope::Scope,
    trace::Trace,
};

/// Binds `R` to whatever `Of` currently resolves to.
///
/// Nothing is cached: re-registering `Of` changes what the alias yields. Conversions
/// that aren't expressible as [`Into`], like unsizing `Arc<T>` into `Arc<dyn Trait>`,
/// are given with [`Alias::with`].
pub struct Alias<R, Of> {
    convert: fn(Of) -> R,
}

impl<R, Of> Alias<R, Of> {
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        Of: Into<R>,
    {
        Self {
            convert: <Of as Into<R>>::into,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with(convert: fn(Of) -> R) -> Self {
        Self { convert }
    }
}

impl<R, Of> Default for Alias<R, Of>
where
    Of: Into<R>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<R, Of> Display for Alias<R, Of> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Alias[{}, {}]", type_name::<R>(), type_name::<Of>())
    }
}

impl<R, Of> Binding for Alias<R, Of>
where
    R: Send + 'static,
    Of: 'static,
{
    fn register(self: Box<Self>, scope: &Scope) -> Result<(), ValidateErrorKind> {
        scope.insert_provider(TypeInfo::of::<R>(), Arc::new(*self));
        Ok(())
    }
}

impl<R, Of> Provider for Alias<R, Of>
where
    R: Send + 'static,
    Of: 'static,
{
    fn produce(&self, scope: &Scope, trace: &Trace) -> Result<BoxedValue, ResolveErrorKind> {
        match scope.resolve_traced::<Of>(trace) {
            Ok(of) => Ok(Box::new((self.convert)(of))),
            Err(err) => Err(ResolveErrorKind::Dependency(Box::new(err))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Alias;
    use crate::{any::TypeInfo, errors::ResolveErrorKind, Factory, Instance, Scope};

    use core::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;
    use tracing_test::traced_test;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_owned()
        }
    }

    struct French;

    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".to_owned()
        }
    }

    #[test]
    #[traced_test]
    fn test_into_alias() {
        let scope = Scope::new("test");
        scope.register((Instance::<u8>::new(5u8), Alias::<u32, u8>::new())).unwrap();

        assert_eq!(scope.resolve::<u32>().unwrap(), 5);
    }

    #[test]
    #[traced_test]
    fn test_trait_object_alias() {
        let scope = Scope::new("test");
        scope
            .register((
                Instance::<Arc<English>>::new(Arc::new(English)),
                Alias::<Arc<dyn Greeter>, Arc<English>>::with(|english| english),
            ))
            .unwrap();

        assert_eq!(scope.resolve::<Arc<dyn Greeter>>().unwrap().greet(), "hello");
    }

    #[test]
    #[traced_test]
    fn test_follows_reregistration() {
        let scope = Scope::new("test");
        scope
            .register((
                Instance::<Arc<English>>::new(Arc::new(English)),
                Instance::<Arc<French>>::new(Arc::new(French)),
                Alias::<Arc<dyn Greeter>, Arc<English>>::with(|english| english),
            ))
            .unwrap();
        assert_eq!(scope.resolve::<Arc<dyn Greeter>>().unwrap().greet(), "hello");

        scope
            .register((Alias::<Arc<dyn Greeter>, Arc<French>>::with(|french| french),))
            .unwrap();
        assert_eq!(scope.resolve::<Arc<dyn Greeter>>().unwrap().greet(), "bonjour");
    }

    #[test]
    #[traced_test]
    fn test_follows_target_reregistration() {
        let scope = Scope::new("test");
        scope.register((Instance::<u8>::new(1u8), Alias::<u32, u8>::new())).unwrap();
        assert_eq!(scope.resolve::<u32>().unwrap(), 1);

        scope.register((Instance::<u8>::new(2u8),)).unwrap();
        assert_eq!(scope.resolve::<u32>().unwrap(), 2);
    }

    #[test]
    #[traced_test]
    fn test_not_cached() {
        let call_count = Arc::new(AtomicU8::new(0));

        let scope = Scope::new("test");
        scope
            .register((
                Factory::<u8>::new({
                    let call_count = call_count.clone();
                    move || Ok(call_count.fetch_add(1, Ordering::SeqCst))
                }),
                Alias::<u16, u8>::new(),
            ))
            .unwrap();

        assert_eq!(scope.resolve::<u16>().unwrap(), 0);
        assert_eq!(scope.resolve::<u16>().unwrap(), 1);
    }

    #[test]
    #[traced_test]
    fn test_missing_target() {
        let scope = Scope::new("test");
        scope.register((Alias::<u32, u8>::new(),)).unwrap();

        let err = scope.resolve::<u32>().unwrap_err();

        assert_eq!(err.chain(), [TypeInfo::of::<u32>(), TypeInfo::of::<u8>()]);
        assert!(matches!(err.root(), ResolveErrorKind::NotRegistered(type_info) if *type_info == TypeInfo::of::<u8>()));
    }
}
