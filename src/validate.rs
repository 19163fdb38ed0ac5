//! Registration-time checks of values and callables.
//!
//! Most shape errors (a creator that isn't callable, an output that isn't assignable to the
//! resolved type, a destructor taking the wrong value) are rejected by the trait bounds at
//! compile time. What remains at runtime is the nil instance check.

use std::{
    any::{Any, TypeId},
    fmt::{self, Display, Formatter},
};

use crate::{
    any::TypeInfo, create::Create, dependency_resolver::DependencyResolver, destroy::Destroy,
    errors::ValidateErrorKind,
};

pub(crate) const NIL: &str = "<nil>";

/// Input and output types of a creator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub inputs: Vec<TypeInfo>,
    pub output: TypeInfo,
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (index, input) in self.inputs.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{input}")?;
        }
        write!(f, ") -> {}", self.output)
    }
}

/// Whether an instance value, or its absence, can be registered under `R`.
///
/// Present values always are. An absent value is only accepted when `R` is `Option<V>`.
#[must_use]
pub fn is_valid_value<R, V>(value: Option<&V>) -> bool
where
    R: 'static,
    V: Into<R> + 'static,
{
    value.is_some() || TypeId::of::<R>() == TypeId::of::<Option<V>>()
}

/// Signature of a creator producing something assignable to `R`.
#[must_use]
pub fn create<R, C, Deps, M>() -> Signature
where
    R: 'static,
    C: Create<R, Deps, M>,
    C::Value: Into<R>,
    Deps: DependencyResolver,
{
    Signature {
        inputs: Deps::type_infos(),
        output: TypeInfo::of::<C::Value>(),
    }
}

/// Type consumed by a destructor of `V`.
#[must_use]
pub fn destroy<V, D>() -> TypeInfo
where
    V: 'static,
    D: Destroy<V>,
{
    TypeInfo::of::<V>()
}

pub(crate) enum Checked<R, V> {
    Value(V),
    Nil(R),
}

pub(crate) fn value<R, V>(value: Option<V>) -> Result<Checked<R, V>, ValidateErrorKind>
where
    R: 'static,
    V: Into<R> + 'static,
{
    match value {
        Some(value) => Ok(Checked::Value(value)),
        None => {
            let nil: Box<dyn Any> = Box::new(None::<V>);
            match nil.downcast::<R>() {
                Ok(nil) => Ok(Checked::Nil(*nil)),
                Err(_) => Err(ValidateErrorKind::NotConvertible {
                    from: NIL,
                    to: TypeInfo::of::<R>(),
                }),
            }
        }
    }
}
