use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidateErrorKind {
    #[error("not convertible: {from} to {to}")]
    NotConvertible { from: &'static str, to: TypeInfo },
}
