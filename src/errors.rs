mod custom;
mod joined;
mod resolve;
mod scope;
mod validate;

pub use custom::{CreateErrorKind, DestroyErrorKind};
pub use joined::{DestroyErrors, Errors, RegisterErrors};
pub use resolve::{ResolveError, ResolveErrorKind};
pub use scope::{DestroyError, InvokeError, RegisterError};
pub use validate::ValidateErrorKind;

/// Separates a contextual error from the cause it wraps.
pub(crate) const SEPARATOR: &str = "\n └> ";
