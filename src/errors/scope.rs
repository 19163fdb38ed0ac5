use std::sync::Arc;

use super::{custom::DestroyErrorKind, resolve::ResolveError, validate::ValidateErrorKind, SEPARATOR};

#[derive(thiserror::Error, Debug)]
#[error("register: {scope} <- {binding}{sep}{kind}", sep = SEPARATOR)]
pub struct RegisterError {
    pub scope: Arc<str>,
    pub binding: String,
    #[source]
    pub kind: ValidateErrorKind,
}

#[derive(thiserror::Error, Debug)]
#[error("invoke: {scope} <- {function}{sep}{source}", sep = SEPARATOR)]
pub struct InvokeError {
    pub scope: Arc<str>,
    pub function: &'static str,
    pub source: ResolveError,
}

#[derive(thiserror::Error, Debug)]
#[error("destroy: {scope} -> {destroyer}{sep}{source}", sep = SEPARATOR)]
pub struct DestroyError {
    pub scope: Arc<str>,
    pub destroyer: String,
    pub source: DestroyErrorKind,
}
