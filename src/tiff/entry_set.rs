//! Ordered, tag-keyed entry collection
//!
//! The TIFF spec requires directory entries sorted by ascending tag value
//! and at most one entry per tag. The collection is keyed by the tag's
//! numeric id in a sorted map, so insertion replaces any prior entry and
//! iteration always yields spec-conformant order.

use log::trace;

use crate::tiff::entry::DirectoryEntry;
use crate::tiff::errors::{TiffError, TiffResult};
use std::collections::BTreeMap;

/// The entries of one image file directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryEntrySet {
    entries: BTreeMap<u16, DirectoryEntry>,
}

impl DirectoryEntrySet {
    /// Creates an empty entry set
    pub fn new() -> Self {
        DirectoryEntrySet {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts an entry, replacing any prior entry with the same tag
    pub fn set(&mut self, entry: DirectoryEntry) {
        trace!("Setting entry: {}", entry);
        self.entries.insert(entry.tag(), entry);
    }

    /// Gets the entry for a tag
    pub fn get(&self, tag: u16) -> TiffResult<&DirectoryEntry> {
        self.entries.get(&tag).ok_or(TiffError::TagNotFound(tag))
    }

    /// Checks whether an entry exists for a tag
    pub fn has_tag(&self, tag: u16) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Iterates the entries in ascending tag order
    pub fn entries(&self) -> impl Iterator<Item = &DirectoryEntry> {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
