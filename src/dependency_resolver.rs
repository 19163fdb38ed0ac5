use crate::{any::TypeInfo, errors::ResolveError, scope::Scope, trace::Trace};

/// The declared inputs of a creator or an invoked function.
///
/// Implemented for tuples of resolved types, each element is resolved from the scope in order.
pub trait DependencyResolver: Sized {
    fn resolve(scope: &Scope, trace: &Trace) -> Result<Self, ResolveError>;

    #[must_use]
    fn type_infos() -> Vec<TypeInfo>;
}

macro_rules! impl_dependency_resolver {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<$($ty,)*> DependencyResolver for ($($ty,)*)
        where
            $( $ty: 'static, )*
        {
            #[inline]
            #[allow(unused_variables)]
            fn resolve(scope: &Scope, trace: &Trace) -> Result<Self, ResolveError> {
                Ok(($(scope.resolve_traced::<$ty>(trace)?,)*))
            }

            #[inline]
            fn type_infos() -> Vec<TypeInfo> {
                vec![$(TypeInfo::of::<$ty>()),*]
            }
        }
    };
}

all_the_tuples!(impl_dependency_resolver);
