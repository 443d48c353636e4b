//! Image File Directory construction and serialization
//!
//! This is the heart of the writer. A `TiffIfd` is built once from a
//! raster descriptor, populating every entry whose value is known without
//! a file position; strip offsets start out relative to the strip region.
//! Writing is a second, separate phase: `compute_layout` resolves the
//! byte positions of the directory table, the out-of-line value blocks
//! and the strip region for a given directory offset, and `write`
//! serializes against that layout. The layout is derived per call and
//! never cached, so repeated writes of the same directory at the same
//! offset produce identical bytes.

use log::{debug, info};
use std::collections::BTreeMap;
use std::io::{Seek, SeekFrom};

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableSink;
use crate::raster::data_type::{common_sample_type, RasterDataType};
use crate::raster::descriptor::RasterDescriptor;
use crate::tiff::builders::basic_tags::BasicTagsBuilder;
use crate::tiff::builders::geo_tags::GeoTagsBuilder;
use crate::tiff::builders::metadata_tags::MetadataBuilder;
use crate::tiff::constants::tags;
use crate::tiff::entry::{DirectoryEntry, BYTES_PER_ENTRY};
use crate::tiff::entry_set::DirectoryEntrySet;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::types::TiffValue;

const BYTES_FOR_NUMBER_OF_ENTRIES: u32 = 2;
const BYTES_FOR_NEXT_IFD_OFFSET: u32 = 4;

/// Resolved byte positions for one serialization of a directory
///
/// Produced by `compute_layout` and consumed immutably; recomputing for
/// the same directory offset always yields the same table.
#[derive(Debug, Clone)]
pub struct IfdLayout {
    /// Absolute offset of the directory table
    pub ifd_offset: u32,
    /// Absolute offset of the first out-of-line value block
    pub values_start: u32,
    /// Absolute offset of the strip region
    pub strips_start: u32,
    value_offsets: BTreeMap<u16, u32>,
}

impl IfdLayout {
    /// Absolute value-block offset assigned to a referenced entry
    pub fn value_offset(&self, tag: u16) -> Option<u32> {
        self.value_offsets.get(&tag).copied()
    }
}

/// A TIFF image file directory for the GeoTIFF format
pub struct TiffIfd {
    entries: DirectoryEntrySet,
    sample_type: RasterDataType,
}

impl TiffIfd {
    /// Builds the directory for an image.
    ///
    /// Fails with `UnsupportedSampleType` when no common sample type can
    /// be derived for the descriptor's bands.
    pub fn new(descriptor: &RasterDescriptor) -> TiffResult<Self> {
        let sample_type = common_sample_type(&descriptor.band_types())?;
        info!("Building IFD for '{}': {}x{}, {} bands, common sample type {}",
              descriptor.name(), descriptor.width(), descriptor.height(),
              descriptor.num_bands(), sample_type.name());

        let mut entries = DirectoryEntrySet::new();
        BasicTagsBuilder::add_image_tags(&mut entries, descriptor, sample_type);
        BasicTagsBuilder::add_strip_tags(&mut entries, descriptor, sample_type);
        MetadataBuilder::add_description_tag(&mut entries, descriptor.name());
        MetadataBuilder::add_text_metadata_tag(&mut entries, descriptor.text_metadata());
        if let Some(geo_metadata) = descriptor.geo_metadata() {
            GeoTagsBuilder::add_geo_tags(&mut entries, geo_metadata);
        }

        Ok(TiffIfd { entries, sample_type })
    }

    /// The directory's entries
    pub fn entries(&self) -> &DirectoryEntrySet {
        &self.entries
    }

    /// Gets an entry by tag
    pub fn get_entry(&self, tag: u16) -> TiffResult<&DirectoryEntry> {
        self.entries.get(tag)
    }

    /// The common sample type resolved for the image's bands
    pub fn sample_type(&self) -> RasterDataType {
        self.sample_type
    }

    /// Size of the directory table: entry count, the entry records and
    /// the next-IFD pointer
    pub fn required_directory_size(&self) -> u32 {
        BYTES_FOR_NUMBER_OF_ENTRIES
            + self.entries.len() as u32 * BYTES_PER_ENTRY
            + BYTES_FOR_NEXT_IFD_OFFSET
    }

    /// Total size of all referenced out-of-line value blocks
    pub fn required_referenced_values_size(&self) -> u32 {
        self.entries
            .entries()
            .filter(|entry| entry.must_values_be_referenced())
            .map(|entry| entry.values_size_in_bytes())
            .sum()
    }

    /// Total size of the strip region
    pub fn required_strip_size(&self) -> TiffResult<u64> {
        Ok(self.strip_byte_counts()?.iter().map(|&count| count as u64).sum())
    }

    /// Total buffer size needed to hold the directory, its value blocks
    /// and the strip data
    pub fn required_entire_size(&self) -> TiffResult<u64> {
        Ok(self.required_directory_size() as u64
            + self.required_referenced_values_size() as u64
            + self.required_strip_size()?)
    }

    /// Resolves the byte layout for a directory written at `ifd_offset`.
    ///
    /// Referenced value blocks follow the directory table immediately, in
    /// ascending-tag order; the strip region starts where the value
    /// blocks end. A negative offset is rejected before any computation.
    pub fn compute_layout(&self, ifd_offset: i64) -> TiffResult<IfdLayout> {
        if ifd_offset < 0 {
            return Err(TiffError::InvalidIfdOffset(ifd_offset));
        }
        if ifd_offset > u32::MAX as i64 {
            return Err(TiffError::GenericError(format!(
                "IFD offset {} exceeds the classic TIFF offset range", ifd_offset)));
        }
        let ifd_offset = ifd_offset as u32;

        let values_start = ifd_offset + self.required_directory_size();
        let mut value_offsets = BTreeMap::new();
        let mut cursor = values_start;
        for entry in self.entries.entries() {
            if entry.must_values_be_referenced() {
                value_offsets.insert(entry.tag(), cursor);
                cursor += entry.values_size_in_bytes();
            }
        }

        debug!("Computed layout: directory at {}, values at {}, strips at {}",
               ifd_offset, values_start, cursor);

        Ok(IfdLayout {
            ifd_offset,
            values_start,
            strips_start: cursor,
            value_offsets,
        })
    }

    /// Serializes the directory at `ifd_offset`.
    ///
    /// Writes the entry count, the 12-byte records in ascending-tag order
    /// (inline values in place, referenced values at their assigned
    /// blocks) and the next-IFD pointer, 0 marking the final directory.
    /// Strip offsets are written rebased to the layout's strip region.
    /// Returns the layout so callers can place the strip data.
    pub fn write(
        &self,
        sink: &mut dyn SeekableSink,
        handler: &dyn ByteOrderHandler,
        ifd_offset: i64,
        next_ifd_offset: u32,
    ) -> TiffResult<IfdLayout> {
        let layout = self.compute_layout(ifd_offset)?;

        sink.seek(SeekFrom::Start(layout.ifd_offset as u64))?;
        handler.write_u16(sink, self.entries.len() as u16)?;

        // Entries may reposition the sink to write their referenced
        // values, so every record write re-seeks to its slot.
        let mut entry_position = layout.ifd_offset as u64 + BYTES_FOR_NUMBER_OF_ENTRIES as u64;
        for entry in self.entries.entries() {
            sink.seek(SeekFrom::Start(entry_position))?;
            if entry.tag() == tags::STRIP_OFFSETS {
                let rebased = self.rebased_strip_offsets(layout.strips_start)?;
                let rebased_entry = DirectoryEntry::new(tags::STRIP_OFFSETS, TiffValue::Long(rebased));
                rebased_entry.write(sink, handler, layout.value_offset(entry.tag()))?;
            } else {
                entry.write(sink, handler, layout.value_offset(entry.tag()))?;
            }
            entry_position += BYTES_PER_ENTRY as u64;
        }

        let next_pointer_position =
            layout.ifd_offset + self.required_directory_size() - BYTES_FOR_NEXT_IFD_OFFSET;
        sink.seek(SeekFrom::Start(next_pointer_position as u64))?;
        handler.write_u32(sink, next_ifd_offset)?;

        Ok(layout)
    }

    /// Strip offsets as built, relative to the start of the strip region
    pub fn relative_strip_offsets(&self) -> TiffResult<Vec<u32>> {
        match self.get_entry(tags::STRIP_OFFSETS)?.value() {
            TiffValue::Long(values) => Ok(values.clone()),
            _ => Err(TiffError::GenericError("strip offsets are not LONG values".to_string())),
        }
    }

    /// Byte count of each strip
    pub fn strip_byte_counts(&self) -> TiffResult<Vec<u32>> {
        match self.get_entry(tags::STRIP_BYTE_COUNTS)?.value() {
            TiffValue::Long(values) => Ok(values.clone()),
            _ => Err(TiffError::GenericError("strip byte counts are not LONG values".to_string())),
        }
    }

    /// Strip offsets rebased into the file, a pure additive shift
    fn rebased_strip_offsets(&self, strips_start: u32) -> TiffResult<Vec<u32>> {
        Ok(self
            .relative_strip_offsets()?
            .into_iter()
            .map(|offset| offset + strips_start)
            .collect())
    }
}
