//! Tests for the geo metadata translation

extern crate std;

use crate::tiff::builders::geo_tags::GeoTagsBuilder;
use crate::tiff::constants::{geo_keys, tags};
use crate::tiff::entry_set::DirectoryEntrySet;
use crate::tiff::geokeys::{GeoTiffMetadata, ModelTiePoint};
use crate::tiff::types::TiffValue;

fn translate(metadata: &GeoTiffMetadata) -> DirectoryEntrySet {
    let mut entries = DirectoryEntrySet::new();
    GeoTagsBuilder::add_geo_tags(&mut entries, metadata);
    entries
}

fn short_values(entries: &DirectoryEntrySet, tag: u16) -> Vec<u16> {
    match entries.get(tag).unwrap().value() {
        TiffValue::Short(values) => values.clone(),
        other => panic!("expected SHORT values for tag {}, got {:?}", tag, other),
    }
}

fn double_values(entries: &DirectoryEntrySet, tag: u16) -> Vec<f64> {
    match entries.get(tag).unwrap().value() {
        TiffValue::Double(values) => values.clone(),
        other => panic!("expected DOUBLE values for tag {}, got {:?}", tag, other),
    }
}

#[test]
fn test_short_keys_only() {
    let mut metadata = GeoTiffMetadata::new();
    metadata.add_geo_short_param(geo_keys::PROJECTED_CS_TYPE, 32633);
    metadata.add_geo_short_param(geo_keys::MODEL_TYPE, 1);

    let entries = translate(&metadata);
    let directory = short_values(&entries, tags::GEO_KEY_DIRECTORY);

    // Header record first, then keys in ascending key order
    std::assert_eq!(directory, vec![
        1, 1, 0, 2,
        geo_keys::MODEL_TYPE, 0, 1, 1,
        geo_keys::PROJECTED_CS_TYPE, 0, 1, 32633,
    ]);
    std::assert!(!entries.has_tag(tags::GEO_DOUBLE_PARAMS));
    std::assert!(!entries.has_tag(tags::GEO_ASCII_PARAMS));
}

#[test]
fn test_double_keys_get_running_index() {
    let mut metadata = GeoTiffMetadata::new();
    metadata.add_geo_double_param(geo_keys::GEOG_SEMI_MAJOR_AXIS, &[6378137.0]);
    metadata.add_geo_double_param(2058, &[6356752.314, 0.0]); // GeogSemiMinorAxisGeoKey

    let entries = translate(&metadata);
    let directory = short_values(&entries, tags::GEO_KEY_DIRECTORY);

    // 2057 comes first and starts at index 0; 2058 starts after its value
    std::assert_eq!(directory, vec![
        1, 1, 0, 2,
        geo_keys::GEOG_SEMI_MAJOR_AXIS, tags::GEO_DOUBLE_PARAMS, 1, 0,
        2058, tags::GEO_DOUBLE_PARAMS, 2, 1,
    ]);
    std::assert_eq!(double_values(&entries, tags::GEO_DOUBLE_PARAMS),
                    vec![6378137.0, 6356752.314, 0.0]);
}

#[test]
fn test_ascii_keys_offset_tracks_last_string() {
    let mut metadata = GeoTiffMetadata::new();
    metadata.add_geo_ascii_param(geo_keys::CITATION, "WGS 84");
    metadata.add_geo_ascii_param(2049, "datum"); // GeogCitationGeoKey
    metadata.add_geo_ascii_param(3073, "utm"); // PCSCitationGeoKey

    let entries = translate(&metadata);
    let directory = short_values(&entries, tags::GEO_KEY_DIRECTORY);

    // The offset field advances by the length of the most recently
    // accumulated string only: 0, then "WGS 84"+1, then "datum"+1
    std::assert_eq!(directory, vec![
        1, 1, 0, 3,
        geo_keys::CITATION, tags::GEO_ASCII_PARAMS, 7, 0,
        2049, tags::GEO_ASCII_PARAMS, 6, 7,
        3073, tags::GEO_ASCII_PARAMS, 4, 6,
    ]);

    // The block joins every string with a '|' terminator
    match entries.get(tags::GEO_ASCII_PARAMS).unwrap().value() {
        TiffValue::Ascii(text) => std::assert_eq!(text, "WGS 84|datum|utm|"),
        other => panic!("expected ASCII value, got {:?}", other),
    }
}

#[test]
fn test_transformation_takes_precedence() {
    let mut metadata = GeoTiffMetadata::new();
    metadata.add_geo_short_param(geo_keys::MODEL_TYPE, 1);
    metadata.set_model_pixel_scale(10.0, 10.0, 0.0);
    metadata.add_model_tie_point(ModelTiePoint::new(0.0, 0.0, 0.0, 500000.0, 4649776.0, 0.0));
    metadata.set_affine_transformation([10.0, 0.0, 500000.0, 0.0, -10.0, 4649776.0]);

    let entries = translate(&metadata);

    std::assert!(entries.has_tag(tags::MODEL_TRANSFORMATION));
    std::assert!(!entries.has_tag(tags::MODEL_PIXEL_SCALE));
    std::assert!(!entries.has_tag(tags::MODEL_TIEPOINT));

    let matrix = double_values(&entries, tags::MODEL_TRANSFORMATION);
    std::assert_eq!(matrix.len(), 16);
    std::assert_eq!(matrix[0], 10.0);
    std::assert_eq!(matrix[3], 500000.0);
    std::assert_eq!(matrix[5], -10.0);
    std::assert_eq!(matrix[7], 4649776.0);
    std::assert_eq!(matrix[15], 1.0);
}

#[test]
fn test_pixel_scale_and_tie_points_without_transformation() {
    let mut metadata = GeoTiffMetadata::new();
    metadata.add_geo_short_param(geo_keys::GEOGRAPHIC_TYPE, 4326);
    metadata.set_model_pixel_scale(0.1, 0.1, 0.0);
    metadata.add_model_tie_point(ModelTiePoint::new(0.0, 0.0, 0.0, 10.0, 54.0, 0.0));
    metadata.add_model_tie_point(ModelTiePoint::new(4.0, 4.0, 0.0, 10.4, 53.6, 0.0));

    let entries = translate(&metadata);

    std::assert!(!entries.has_tag(tags::MODEL_TRANSFORMATION));
    std::assert_eq!(double_values(&entries, tags::MODEL_PIXEL_SCALE), vec![0.1, 0.1, 0.0]);
    std::assert_eq!(double_values(&entries, tags::MODEL_TIEPOINT), vec![
        0.0, 0.0, 0.0, 10.0, 54.0, 0.0,
        4.0, 4.0, 0.0, 10.4, 53.6, 0.0,
    ]);
}

#[test]
fn test_empty_metadata_emits_header_only_directory() {
    let metadata = GeoTiffMetadata::new();
    let entries = translate(&metadata);

    std::assert_eq!(short_values(&entries, tags::GEO_KEY_DIRECTORY), vec![1, 1, 0, 0]);
    std::assert!(!entries.has_tag(tags::GEO_DOUBLE_PARAMS));
    std::assert!(!entries.has_tag(tags::GEO_ASCII_PARAMS));
    std::assert!(!entries.has_tag(tags::MODEL_PIXEL_SCALE));
}
