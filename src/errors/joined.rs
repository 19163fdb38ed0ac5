use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    slice,
};

use super::scope::{DestroyError, RegisterError};

/// Every error of a batch operation, in the order they occurred.
#[derive(Debug)]
pub struct Errors<E>(Vec<E>);

pub type RegisterErrors = Errors<RegisterError>;
pub type DestroyErrors = Errors<DestroyError>;

impl<E> Errors<E> {
    pub(crate) fn join(errors: Vec<E>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.0.iter()
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<E> {
        self.0
    }
}

impl<'a, E> IntoIterator for &'a Errors<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Display> Display for Errors<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
        }
        for err in iter {
            write!(f, "\n{err}")?;
        }
        Ok(())
    }
}

impl<E: Error + 'static> Error for Errors<E> {}

#[cfg(test)]
mod tests {
    use super::Errors;

    #[derive(thiserror::Error, Debug)]
    #[error("{0}")]
    struct Message(&'static str);

    #[test]
    fn test_join() {
        assert!(Errors::<Message>::join(Vec::new()).is_ok());

        let err = Errors::join(vec![Message("whoops"), Message("floops")]).unwrap_err();

        assert_eq!(err.len(), 2);
        assert_eq!(err.to_string(), "whoops\nfloops");
    }
}
