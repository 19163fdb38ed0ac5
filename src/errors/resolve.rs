use std::sync::Arc;

use super::{custom::CreateErrorKind, SEPARATOR};
use crate::{any::TypeInfo, trace::Trace};

#[derive(thiserror::Error, Debug, Clone)]
pub enum ResolveErrorKind {
    #[error("not registered: {0}")]
    NotRegistered(TypeInfo),
    #[error("cycle detected: {0}")]
    Cycle(Trace),
    #[error("{0}")]
    Dependency(#[source] Box<ResolveError>),
    #[error(transparent)]
    Create(Arc<CreateErrorKind>),
    #[error("incorrect provided type. Actual: {actual:?}, expected: {expected}")]
    IncorrectType {
        expected: TypeInfo,
        actual: std::any::TypeId,
    },
    #[error("registration scope {0} was dropped")]
    ScopeDropped(Arc<str>),
}

/// A resolution failure, annotated with the scope and the type that was requested.
///
/// Failures of nested dependencies are kept as [`ResolveErrorKind::Dependency`],
/// one layer per level of the dependency chain.
#[derive(thiserror::Error, Debug, Clone)]
#[error("resolve: {scope} -> {type_info}{sep}{kind}", sep = SEPARATOR)]
pub struct ResolveError {
    pub scope: Arc<str>,
    pub type_info: TypeInfo,
    #[source]
    pub kind: ResolveErrorKind,
}

impl ResolveError {
    #[inline]
    #[must_use]
    pub(crate) const fn new(scope: Arc<str>, type_info: TypeInfo, kind: ResolveErrorKind) -> Self {
        Self { scope, type_info, kind }
    }

    /// The innermost failure, past all [`ResolveErrorKind::Dependency`] layers.
    #[must_use]
    pub fn root(&self) -> &ResolveErrorKind {
        let mut kind = &self.kind;
        while let ResolveErrorKind::Dependency(err) = kind {
            kind = &err.kind;
        }
        kind
    }

    /// Types requested along the failed chain, outermost first.
    #[must_use]
    pub fn chain(&self) -> Vec<TypeInfo> {
        let mut chain = vec![self.type_info];
        let mut kind = &self.kind;
        while let ResolveErrorKind::Dependency(err) = kind {
            chain.push(err.type_info);
            kind = &err.kind;
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::{ResolveError, ResolveErrorKind};
    use crate::any::TypeInfo;

    use std::sync::Arc;

    #[test]
    fn test_root_and_chain() {
        let scope: Arc<str> = Arc::from("test");
        let inner = ResolveError::new(
            scope.clone(),
            TypeInfo::of::<u8>(),
            ResolveErrorKind::NotRegistered(TypeInfo::of::<u8>()),
        );
        let outer = ResolveError::new(scope, TypeInfo::of::<u16>(), ResolveErrorKind::Dependency(Box::new(inner)));

        assert!(matches!(outer.root(), ResolveErrorKind::NotRegistered(type_info) if *type_info == TypeInfo::of::<u8>()));
        assert_eq!(outer.chain(), [TypeInfo::of::<u16>(), TypeInfo::of::<u8>()]);
        assert_eq!(
            outer.to_string(),
            "resolve: test -> u16\n └> resolve: test -> u8\n └> not registered: u8"
        );
    }
}
