// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespace tokens scoping geometry matching.

use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_NAMESPACE: AtomicUsize = AtomicUsize::new(1);

/// Opaque token that scopes geometry matching.
///
/// A source and a target only link when they are recorded and looked up under the
/// same namespace. Every call to [`Namespace::new`] returns a token that compares
/// unequal to every other token handed out in this process.
///
/// ```
/// use tether_geometry::Namespace;
///
/// let a = Namespace::new();
/// let b = Namespace::new();
/// assert_ne!(a, b);
/// assert_eq!(a, a);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace(usize);

impl Namespace {
    /// Allocate a fresh, unique namespace.
    pub fn new() -> Self {
        Self(NEXT_NAMESPACE.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for Namespace {
    /// Same as [`Namespace::new`]: every default namespace is distinct.
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn namespaces_are_unique() {
        let all: Vec<Namespace> = (0..64).map(|_| Namespace::new()).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b, "namespaces must never repeat");
            }
        }
    }

    #[test]
    fn default_is_fresh() {
        assert_ne!(Namespace::default(), Namespace::default());
    }
}
