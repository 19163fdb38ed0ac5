use std::{
    fmt::{self, Display, Formatter},
    slice,
};

use crate::any::TypeInfo;

/// The chain of types being resolved by one top-level call.
///
/// A trace is never mutated in place: each recursive step works on an extended copy,
/// so sibling branches don't see each other's in-flight types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace(Vec<TypeInfo>);

impl Trace {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
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
    #[must_use]
    pub fn contains(&self, type_info: &TypeInfo) -> bool {
        self.0.contains(type_info)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, TypeInfo> {
        self.0.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[TypeInfo] {
        &self.0
    }

    #[must_use]
    pub(crate) fn extended(&self, type_info: TypeInfo) -> Self {
        let mut chain = Vec::with_capacity(self.0.len() + 1);
        chain.extend_from_slice(&self.0);
        chain.push(type_info);
        Self(chain)
    }

    /// Sub-chain from the first occurrence of `type_info` through its repeat,
    /// or `None` if the type isn't in flight.
    #[must_use]
    pub(crate) fn cycle(&self, type_info: TypeInfo) -> Option<Self> {
        let start = self.0.iter().position(|in_flight| *in_flight == type_info)?;
        let mut chain = self.0[start..].to_vec();
        chain.push(type_info);
        Some(Self(chain))
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TypeInfo;
    type IntoIter = slice::Iter<'a, TypeInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Trace {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
        }
        for type_info in iter {
            write!(f, " -> {type_info}")?;
        }
        Ok(())
    }
}
