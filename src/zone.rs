//! Interned zone names.
//!
//! Zone names are repeated in every shortcut-index bucket they fall into, so
//! we intern them once at build time and pass around a small `Copy` index
//! (mirroring the teacher crate's preference for index types like
//! `CellIndex` over passing owned data through the hot path).

use ahash::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable index into the interner's zone-name table.
///
/// Ordering matches the ascending lexicographic order of the underlying
/// name, so that iterating candidates "zone-name ascending" (as required by
/// the shortcut index's deterministic iteration order) reduces to sorting
/// `ZoneId`s numerically.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ZoneId(pub(crate) u32);

impl ZoneId {
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A sorted, deduplicated table of IANA zone names.
#[derive(Clone, Debug, Default)]
pub struct ZoneTable {
    names: Vec<Box<str>>,
    by_name: HashMap<Box<str>, ZoneId>,
}

impl ZoneTable {
    /// Builds a table from an arbitrary iterator of names, deduplicating and
    /// sorting them so that `ZoneId` ordering is name ordering.
    pub fn build<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut unique = names
            .into_iter()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .map(String::into_boxed_str)
            .collect::<Vec<_>>();
        unique.sort_unstable();

        let by_name = unique
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (name.clone(), ZoneId(u32::try_from(i).expect("zone count")))
            })
            .collect();

        Self {
            names: unique,
            by_name,
        }
    }

    /// Looks up the ID for a name, if interned.
    pub fn get(&self, name: &str) -> Option<ZoneId> {
        self.by_name.get(name).copied()
    }

    /// Returns the name for an ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` wasn't produced by this table.
    pub fn name(&self, id: ZoneId) -> &str {
        &self.names[id.index()]
    }

    /// Iterates over all interned names, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneId, &str)> {
        self.names.iter().enumerate().map(|(i, name)| {
            (ZoneId(u32::try_from(i).expect("zone count")), name.as_ref())
        })
    }

    /// Number of distinct zone names interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no names at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
