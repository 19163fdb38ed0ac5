use std::{
    fmt::{self, Debug, Display, Formatter},
    sync::Arc,
};

use crate::{any::TypeInfo, errors::DestroyErrorKind, validate};

/// A destructor run on teardown with the exact value a creator produced.
///
/// Implemented for functions and closures taking the value and returning either `()`
/// or `Result<(), E>` for any error convertible into [`anyhow::Error`].
pub trait Destroy<V>: Send + Sync + 'static {
    fn destroy(&self, value: V) -> Result<(), DestroyErrorKind>;
}

pub trait DestroyOutput {
    fn into_result(self) -> Result<(), DestroyErrorKind>;
}

impl DestroyOutput for () {
    #[inline]
    fn into_result(self) -> Result<(), DestroyErrorKind> {
        Ok(())
    }
}

impl<E> DestroyOutput for Result<(), E>
where
    E: Into<anyhow::Error>,
{
    #[inline]
    fn into_result(self) -> Result<(), DestroyErrorKind> {
        self.map_err(|err| DestroyErrorKind::Custom(err.into()))
    }
}

impl<F, V, O> Destroy<V> for F
where
    F: Fn(V) -> O + Send + Sync + 'static,
    O: DestroyOutput,
{
    #[inline]
    fn destroy(&self, value: V) -> Result<(), DestroyErrorKind> {
        self(value).into_result()
    }
}

/// A configured destructor, able to record a teardown action for each produced value.
pub(crate) struct Destructor<V> {
    destroy: Arc<dyn Destroy<V>>,
    duplicate: fn(&V) -> V,
    describe: Option<fn(&V) -> String>,
    type_info: TypeInfo,
}

impl<V> Destructor<V>
where
    V: Send + Sync + 'static,
{
    #[inline]
    #[must_use]
    pub(crate) fn new<D>(destroy: D) -> Self
    where
        D: Destroy<V>,
        V: Clone,
    {
        Self {
            type_info: validate::destroy::<V, D>(),
            destroy: Arc::new(destroy),
            duplicate: V::clone,
            describe: None,
        }
    }

    /// Names each recorded value by its [`Debug`] form in teardown diagnostics.
    #[inline]
    #[must_use]
    pub(crate) fn described(mut self) -> Self
    where
        V: Debug,
    {
        self.describe = Some(debug_description::<V>);
        self
    }

    #[must_use]
    pub(crate) fn destroyer(&self, value: &V) -> Destroyer {
        let description = self.describe.map(|describe| describe(value));
        let value = (self.duplicate)(value);
        let destroy = self.destroy.clone();

        Destroyer {
            type_info: self.type_info,
            description,
            destroy: Box::new(move || destroy.destroy(value)),
        }
    }
}

fn debug_description<V: Debug>(value: &V) -> String {
    format!("{value:?}")
}

/// A pending teardown action, bound to one produced value.
pub(crate) struct Destroyer {
    type_info: TypeInfo,
    description: Option<String>,
    destroy: Box<dyn FnOnce() -> Result<(), DestroyErrorKind> + Send + Sync>,
}

impl Destroyer {
    #[inline]
    pub(crate) fn destroy(self) -> Result<(), DestroyErrorKind> {
        (self.destroy)()
    }
}

impl Display for Destroyer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.type_info)?;
        if let Some(description) = &self.description {
            write!(f, " {description}")?;
        }
        Ok(())
    }
}
