use crate::dependency_resolver::DependencyResolver;

/// A function whose arguments are resolved from a scope before it is called once.
pub trait Invoke<Deps>: Sized
where
    Deps: DependencyResolver,
{
    type Output;

    fn invoke(self, dependencies: Deps) -> Self::Output;
}

macro_rules! impl_invoke {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Output, $($ty,)*> Invoke<($($ty,)*)> for F
        where
            F: FnOnce($($ty,)*) -> Output,
            $( $ty: 'static, )*
        {
            type Output = Output;

            #[inline]
            fn invoke(self, ($($ty,)*): ($($ty,)*)) -> Self::Output {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_invoke);
