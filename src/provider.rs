use crate::{any::BoxedValue, errors::ResolveErrorKind, scope::Scope, trace::Trace};

/// Registered production strategy for one resolved type.
///
/// `produce` receives the scope being resolved from and the trace *including* the
/// type being produced, and must forward the trace to every nested resolution.
pub(crate) trait Provider: Send + Sync {
    fn produce(&self, scope: &Scope, trace: &Trace) -> Result<BoxedValue, ResolveErrorKind>;
}
