//! Metadata tag strategies
//!
//! This module handles the textual tags of a directory: the image
//! description and the private tag carrying an embedded free-text
//! metadata blob.

use log::debug;

use crate::tiff::constants::tags;
use crate::tiff::entry::DirectoryEntry;
use crate::tiff::entry_set::DirectoryEntrySet;
use crate::tiff::types::TiffValue;

/// Handles textual metadata tags
pub struct MetadataBuilder;

impl MetadataBuilder {
    /// Add the image description tag
    pub fn add_description_tag(entries: &mut DirectoryEntrySet, name: &str) {
        entries.set(DirectoryEntry::new(
            tags::IMAGE_DESCRIPTION,
            TiffValue::Ascii(name.to_string()),
        ));
    }

    /// Add the private metadata tag carrying the blob verbatim
    pub fn add_text_metadata_tag(entries: &mut DirectoryEntrySet, metadata: Option<&str>) {
        if let Some(text) = metadata {
            debug!("Embedding {} bytes of text metadata", text.len());
            entries.set(DirectoryEntry::new(
                tags::IMAGE_METADATA,
                TiffValue::Ascii(text.to_string()),
            ));
        }
    }
}
