use std::fmt::Display;

use crate::{errors::ValidateErrorKind, scope::Scope};

/// A registration value, applied to a scope by [`Scope::register`].
///
/// Its [`Display`] form names the strategy and the resolved type, e.g. `Factory[u8]`,
/// and is used in registration errors and logs.
pub trait Binding: Display + Send {
    fn register(self: Box<Self>, scope: &Scope) -> Result<(), ValidateErrorKind>;
}

/// A batch of bindings, applied in order.
pub trait Bindings {
    fn into_bindings(self) -> Vec<Box<dyn Binding>>;
}

impl Bindings for Vec<Box<dyn Binding>> {
    #[inline]
    fn into_bindings(self) -> Vec<Box<dyn Binding>> {
        self
    }
}

macro_rules! impl_bindings {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<$($ty,)*> Bindings for ($($ty,)*)
        where
            $( $ty: Binding + 'static, )*
        {
            #[inline]
            fn into_bindings(self) -> Vec<Box<dyn Binding>> {
                let ($($ty,)*) = self;
                vec![$(Box::new($ty) as Box<dyn Binding>),*]
            }
        }
    };
}

all_the_tuples!(impl_bindings);
