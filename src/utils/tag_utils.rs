//! TIFF tag utilities
//!
//! Fast name lookups for the tags and field types this writer emits,
//! used for logging and entry display.

use crate::tiff::constants::{field_types, tags};

/// Get the name of a TIFF tag
///
/// Returns a human-readable name for a tag based on its numeric ID.
/// If the tag is not recognized, returns "Unknown".
pub fn get_tag_name(tag: u16) -> &'static str {
    match tag {
        // Basic image structure tags
        tags::IMAGE_WIDTH => "ImageWidth",
        tags::IMAGE_LENGTH => "ImageLength",
        tags::BITS_PER_SAMPLE => "BitsPerSample",
        tags::COMPRESSION => "Compression",
        tags::PHOTOMETRIC_INTERPRETATION => "PhotometricInterpretation",
        tags::IMAGE_DESCRIPTION => "ImageDescription",
        tags::STRIP_OFFSETS => "StripOffsets",
        tags::SAMPLES_PER_PIXEL => "SamplesPerPixel",
        tags::ROWS_PER_STRIP => "RowsPerStrip",
        tags::STRIP_BYTE_COUNTS => "StripByteCounts",
        tags::X_RESOLUTION => "XResolution",
        tags::Y_RESOLUTION => "YResolution",
        tags::PLANAR_CONFIGURATION => "PlanarConfiguration",
        tags::RESOLUTION_UNIT => "ResolutionUnit",
        tags::SAMPLE_FORMAT => "SampleFormat",

        // GeoTIFF tags
        tags::MODEL_PIXEL_SCALE => "ModelPixelScale",
        tags::MODEL_TIEPOINT => "ModelTiepoint",
        tags::MODEL_TRANSFORMATION => "ModelTransformation",
        tags::GEO_KEY_DIRECTORY => "GeoKeyDirectory",
        tags::GEO_DOUBLE_PARAMS => "GeoDoubleParams",
        tags::GEO_ASCII_PARAMS => "GeoAsciiParams",

        // Private tags
        tags::IMAGE_METADATA => "ImageMetadata",

        // Default for unknown tags
        _ => "Unknown",
    }
}

/// Get the name of a TIFF field type
///
/// Returns a human-readable name for a field type based on its numeric ID.
pub fn get_field_type_name(field_type: u16) -> &'static str {
    match field_type {
        field_types::ASCII => "ASCII",
        field_types::SHORT => "SHORT",
        field_types::LONG => "LONG",
        field_types::RATIONAL => "RATIONAL",
        field_types::DOUBLE => "DOUBLE",
        _ => "Unknown",
    }
}
