/// Error returned by a caller-supplied creator.
#[derive(thiserror::Error, Debug)]
pub enum CreateErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

/// Error returned by a caller-supplied destructor.
#[derive(thiserror::Error, Debug)]
pub enum DestroyErrorKind {
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
