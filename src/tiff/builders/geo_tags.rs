//! GeoTIFF tag strategies
//!
//! This module translates geo-referencing metadata into the tags that turn
//! a plain TIFF directory into a GeoTIFF: the GeoKey directory, its double
//! and ASCII parameter blocks, and the raster-to-model placement tags.

use log::debug;

use crate::tiff::constants::tags;
use crate::tiff::entry::DirectoryEntry;
use crate::tiff::entry_set::DirectoryEntrySet;
use crate::tiff::geokeys::{get_key_name, GeoTiffMetadata};
use crate::tiff::types::TiffValue;

/// Handles GeoTIFF tags and transformations
pub struct GeoTagsBuilder;

impl GeoTagsBuilder {
    /// Translate geo metadata into directory entries.
    ///
    /// Keys whose values live in the double-params block get their offset
    /// field rewritten to the running index into the accumulated doubles,
    /// taken before the key's own values are appended. ASCII keys get a
    /// byte offset derived from the most recently accumulated string (see
    /// DESIGN.md). The parameter blocks are only emitted when non-empty,
    /// and the transformation matrix takes precedence over pixel scale
    /// and tie points.
    pub fn add_geo_tags(entries: &mut DirectoryEntrySet, metadata: &GeoTiffMetadata) {
        let key_entries = metadata.geo_key_entries();
        let mut directory_values: Vec<u16> = Vec::with_capacity(key_entries.len() * 4);
        let mut double_values: Vec<f64> = Vec::new();
        let mut ascii_values: Vec<String> = Vec::new();

        for key_entry in &key_entries {
            let data = key_entry.data();
            let record_start = directory_values.len();
            directory_values.extend_from_slice(&data);

            if data[1] == tags::GEO_DOUBLE_PARAMS {
                debug!("GeoKey {} ({}) references {} doubles at index {}",
                       data[0], get_key_name(data[0]), data[2], double_values.len());
                directory_values[record_start + 3] = double_values.len() as u16;
                double_values.extend_from_slice(metadata.geo_double_params(data[0]));
            }
            if data[1] == tags::GEO_ASCII_PARAMS {
                // Byte offset into the ASCII block, advanced by the length
                // of the most recently appended string only
                let mut size_in_bytes = 0u16;
                for value in &ascii_values {
                    size_in_bytes = value.len() as u16 + 1;
                }
                directory_values[record_start + 3] = size_in_bytes;
                if let Some(value) = metadata.geo_ascii_param(data[0]) {
                    debug!("GeoKey {} ({}) references ASCII '{}' at offset {}",
                           data[0], get_key_name(data[0]), value, size_in_bytes);
                    ascii_values.push(value.to_string());
                }
            }
        }

        entries.set(DirectoryEntry::new(
            tags::GEO_KEY_DIRECTORY,
            TiffValue::Short(directory_values),
        ));
        if !double_values.is_empty() {
            entries.set(DirectoryEntry::new(
                tags::GEO_DOUBLE_PARAMS,
                TiffValue::Double(double_values),
            ));
        }
        if !ascii_values.is_empty() {
            entries.set(DirectoryEntry::new(
                tags::GEO_ASCII_PARAMS,
                TiffValue::Ascii(Self::join_ascii_params(&ascii_values)),
            ));
        }

        Self::add_placement_tags(entries, metadata);
    }

    /// Add the tag placing the raster in model space: the transformation
    /// matrix when present, pixel scale plus tie points otherwise
    fn add_placement_tags(entries: &mut DirectoryEntrySet, metadata: &GeoTiffMetadata) {
        let transformation = metadata.model_transformation();
        if !is_zero_array(transformation) {
            entries.set(DirectoryEntry::new(
                tags::MODEL_TRANSFORMATION,
                TiffValue::Double(transformation.to_vec()),
            ));
            return;
        }

        let pixel_scale = metadata.model_pixel_scale();
        if !is_zero_array(pixel_scale) {
            entries.set(DirectoryEntry::new(
                tags::MODEL_PIXEL_SCALE,
                TiffValue::Double(pixel_scale.to_vec()),
            ));
        }

        let tie_points = metadata.tie_points();
        if !tie_points.is_empty() {
            let mut values = Vec::with_capacity(tie_points.len() * 6);
            for tie_point in tie_points {
                values.extend_from_slice(tie_point.data());
            }
            entries.set(DirectoryEntry::new(
                tags::MODEL_TIEPOINT,
                TiffValue::Double(values),
            ));
        }
    }

    /// The ASCII block: each string terminated with '|', the whole block
    /// NUL-terminated when serialized as an ASCII value
    fn join_ascii_params(values: &[String]) -> String {
        let mut joined = String::new();
        for value in values {
            joined.push_str(value);
            joined.push('|');
        }
        joined
    }
}

/// Whether every element of the array is exactly zero
fn is_zero_array(values: &[f64]) -> bool {
    values.iter().all(|&value| value == 0.0)
}
