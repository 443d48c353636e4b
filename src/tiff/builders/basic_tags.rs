//! Basic TIFF tag strategies
//!
//! This module populates the structural tags of a directory: dimensions,
//! sample layout, strip geometry and the fixed ancillary entries. Strips
//! are laid out one per band (planar configuration), each covering the
//! whole image, with offsets relative to the start of the strip region
//! until layout computation rebases them.

use log::debug;

use crate::raster::data_type::RasterDataType;
use crate::raster::descriptor::RasterDescriptor;
use crate::tiff::constants::{compression, photometric, planar_config, resolution_unit, sample_format, tags};
use crate::tiff::entry::DirectoryEntry;
use crate::tiff::entry_set::DirectoryEntrySet;
use crate::tiff::types::TiffValue;

/// Adds the structural tags of an image directory
pub struct BasicTagsBuilder;

impl BasicTagsBuilder {
    /// Add the fixed and per-image structural tags
    pub fn add_image_tags(
        entries: &mut DirectoryEntrySet,
        descriptor: &RasterDescriptor,
        sample_type: RasterDataType,
    ) {
        let num_bands = descriptor.num_bands();
        debug!("Adding image tags: {}x{}, {} bands, sample type {}",
               descriptor.width(), descriptor.height(), num_bands, sample_type.name());

        entries.set(DirectoryEntry::new(
            tags::IMAGE_WIDTH,
            TiffValue::Long(vec![descriptor.width()]),
        ));
        entries.set(DirectoryEntry::new(
            tags::IMAGE_LENGTH,
            TiffValue::Long(vec![descriptor.height()]),
        ));
        entries.set(DirectoryEntry::new(
            tags::BITS_PER_SAMPLE,
            TiffValue::Short(vec![8 * sample_type.elem_size() as u16; num_bands]),
        ));
        entries.set(DirectoryEntry::new(
            tags::COMPRESSION,
            TiffValue::Short(vec![compression::NONE]),
        ));
        entries.set(DirectoryEntry::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            TiffValue::Short(vec![photometric::BLACK_IS_ZERO]),
        ));
        entries.set(DirectoryEntry::new(
            tags::SAMPLES_PER_PIXEL,
            TiffValue::Short(vec![num_bands as u16]),
        ));
        entries.set(DirectoryEntry::new(
            tags::ROWS_PER_STRIP,
            TiffValue::Long(vec![descriptor.height()]),
        ));
        entries.set(DirectoryEntry::new(
            tags::X_RESOLUTION,
            TiffValue::Rational(vec![(1, 1)]),
        ));
        entries.set(DirectoryEntry::new(
            tags::Y_RESOLUTION,
            TiffValue::Rational(vec![(1, 1)]),
        ));
        entries.set(DirectoryEntry::new(
            tags::RESOLUTION_UNIT,
            TiffValue::Short(vec![resolution_unit::NONE]),
        ));
        entries.set(DirectoryEntry::new(
            tags::PLANAR_CONFIGURATION,
            TiffValue::Short(vec![planar_config::PLANAR]),
        ));
        entries.set(DirectoryEntry::new(
            tags::SAMPLE_FORMAT,
            TiffValue::Short(vec![Self::sample_format_code(sample_type); num_bands]),
        ));
    }

    /// Add the strip geometry tags: one strip per band, offsets relative
    /// to the start of the strip region
    pub fn add_strip_tags(
        entries: &mut DirectoryEntrySet,
        descriptor: &RasterDescriptor,
        sample_type: RasterDataType,
    ) {
        let strip_size = descriptor.width() as u64
            * descriptor.height() as u64
            * sample_type.elem_size() as u64;
        let num_bands = descriptor.num_bands();

        let byte_counts = vec![strip_size as u32; num_bands];
        let mut offsets = Vec::with_capacity(num_bands);
        let mut offset = 0u32;
        for _ in 0..num_bands {
            offsets.push(offset);
            offset += strip_size as u32;
        }

        debug!("Adding strip tags: {} strips of {} bytes", num_bands, strip_size);

        entries.set(DirectoryEntry::new(tags::STRIP_OFFSETS, TiffValue::Long(offsets)));
        entries.set(DirectoryEntry::new(tags::STRIP_BYTE_COUNTS, TiffValue::Long(byte_counts)));
    }

    /// SampleFormat code for the directory's common sample type
    fn sample_format_code(sample_type: RasterDataType) -> u16 {
        if sample_type.is_unsigned_integer() {
            sample_format::UNSIGNED
        } else if sample_type.is_signed_integer() {
            sample_format::SIGNED
        } else {
            sample_format::IEEEFP
        }
    }
}
