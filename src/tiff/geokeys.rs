//! GeoTIFF key metadata
//!
//! This module provides the geo-referencing metadata attached to an image
//! before it is written: the GeoKey entry list, double and ASCII parameter
//! pools, model pixel scale, model transformation and tie points. It also
//! loads the human-readable tag/key names used for logging and reports.

use lazy_static::lazy_static;
use std::collections::{BTreeMap, HashMap};

use crate::tiff::constants::tags;
use crate::tiff::errors::{TiffError, TiffResult};

lazy_static! {
    // Parse the TOML file at startup
    static ref GEOTIFF_DEFINITIONS: GeoTiffDefinitions = {
        let content = include_str!("../../geotiff_tags.toml");
        GeoTiffDefinitions::from_str(content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse GeoTIFF tag definitions: {}", e);
                GeoTiffDefinitions::default()
            })
    };
}

/// Container for GeoTIFF tag and key definitions
#[derive(Debug, Default)]
pub struct GeoTiffDefinitions {
    // Maps tag IDs to tag names
    pub tag_names: HashMap<u16, String>,
    // Maps GeoKey IDs to key names
    pub key_names: HashMap<u16, String>,
}

impl GeoTiffDefinitions {
    /// Parse GeoTIFF definitions from a TOML string
    pub fn from_str(content: &str) -> TiffResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(TiffError::GenericError(format!("Failed to parse TOML: {}", e))),
        };

        let mut defs = GeoTiffDefinitions::default();
        Self::parse_code_table(&toml_value, "tag_ids", &mut defs.tag_names);
        Self::parse_code_table(&toml_value, "key_ids", &mut defs.key_names);
        Ok(defs)
    }

    /// Helper to parse code tables from TOML
    fn parse_code_table(toml_value: &toml::Value, table_name: &str, target: &mut HashMap<u16, String>) {
        if let Some(table) = toml_value.get(table_name).and_then(|v| v.as_table()) {
            for (k, v) in table {
                if let (Ok(id), Some(name)) = (k.parse::<u16>(), v.as_str()) {
                    target.insert(id, name.to_string());
                }
            }
        }
    }
}

/// Get a tag name by ID from the definitions file
pub fn get_tag_name(tag_id: u16) -> String {
    GEOTIFF_DEFINITIONS.tag_names.get(&tag_id)
        .cloned()
        .unwrap_or_else(|| format!("Unknown-{}", tag_id))
}

/// Get a GeoKey name by ID from the definitions file
pub fn get_key_name(key_id: u16) -> String {
    GEOTIFF_DEFINITIONS.key_names.get(&key_id)
        .cloned()
        .unwrap_or_else(|| format!("Unknown-{}", key_id))
}

/// Checks whether a tag belongs to the GeoTIFF tag family
pub fn is_geotiff_tag(tag: u16) -> bool {
    matches!(tag,
        tags::MODEL_PIXEL_SCALE
        | tags::MODEL_TIEPOINT
        | tags::MODEL_TRANSFORMATION
        | tags::GEO_KEY_DIRECTORY
        | tags::GEO_DOUBLE_PARAMS
        | tags::GEO_ASCII_PARAMS)
}

/// One record of the GeoKey directory
///
/// Each record is four shorts: the key id, the tag the value lives in
/// (0 when the value is stored directly in the record), the value count
/// and the value-or-offset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoKeyEntry {
    /// GeoKey identifier
    pub key_id: u16,
    /// Tag holding the key's values, 0 for an inline short value
    pub location: u16,
    /// Number of values
    pub count: u16,
    /// Inline value, or offset into the referenced parameter block
    pub value: u16,
}

impl GeoKeyEntry {
    /// Creates a new GeoKey record
    pub fn new(key_id: u16, location: u16, count: u16, value: u16) -> Self {
        GeoKeyEntry { key_id, location, count, value }
    }

    /// The record as the four shorts laid out in the directory
    pub fn data(&self) -> [u16; 4] {
        [self.key_id, self.location, self.count, self.value]
    }
}

/// Links a raster position to a model-space position, six doubles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTiePoint {
    data: [f64; 6],
}

impl ModelTiePoint {
    /// Creates a tie point from raster coordinates (i, j, k) and
    /// model coordinates (x, y, z)
    pub fn new(i: f64, j: f64, k: f64, x: f64, y: f64, z: f64) -> Self {
        ModelTiePoint { data: [i, j, k, x, y, z] }
    }

    /// The tie point as the six doubles laid out in the tag
    pub fn data(&self) -> &[f64; 6] {
        &self.data
    }
}

/// Geo-referencing metadata of one image
///
/// Keys are held sorted by key id; the GeoTIFF spec requires the key
/// directory in ascending key order.
#[derive(Debug, Clone, Default)]
pub struct GeoTiffMetadata {
    key_directory_version: u16,
    key_revision: u16,
    minor_revision: u16,
    key_entries: BTreeMap<u16, GeoKeyEntry>,
    double_params: HashMap<u16, Vec<f64>>,
    ascii_params: HashMap<u16, String>,
    model_pixel_scale: [f64; 3],
    model_transformation: [f64; 16],
    tie_points: Vec<ModelTiePoint>,
}

impl GeoTiffMetadata {
    /// Creates empty metadata with the standard directory header (1.1.0)
    pub fn new() -> Self {
        GeoTiffMetadata {
            key_directory_version: 1,
            key_revision: 1,
            minor_revision: 0,
            ..Default::default()
        }
    }

    /// Adds a key whose short value is stored inline in the directory
    pub fn add_geo_short_param(&mut self, key_id: u16, value: u16) {
        self.key_entries.insert(key_id, GeoKeyEntry::new(key_id, 0, 1, value));
    }

    /// Adds a key whose values live in the double-params block.
    /// The record's offset field is assigned during translation.
    pub fn add_geo_double_param(&mut self, key_id: u16, values: &[f64]) {
        self.key_entries.insert(
            key_id,
            GeoKeyEntry::new(key_id, tags::GEO_DOUBLE_PARAMS, values.len() as u16, 0),
        );
        self.double_params.insert(key_id, values.to_vec());
    }

    /// Adds a key whose string lives in the ASCII-params block.
    /// The count includes the '|' terminator the block uses per string.
    pub fn add_geo_ascii_param(&mut self, key_id: u16, value: &str) {
        self.key_entries.insert(
            key_id,
            GeoKeyEntry::new(key_id, tags::GEO_ASCII_PARAMS, value.len() as u16 + 1, 0),
        );
        self.ascii_params.insert(key_id, value.to_string());
    }

    /// Sets the pixel size in model units
    pub fn set_model_pixel_scale(&mut self, x: f64, y: f64, z: f64) {
        self.model_pixel_scale = [x, y, z];
    }

    /// Sets the full 4x4 raster-to-model transformation matrix, row major
    pub fn set_model_transformation(&mut self, matrix: [f64; 16]) {
        self.model_transformation = matrix;
    }

    /// Sets the transformation from a 2D affine [a, b, tx, d, e, ty]
    pub fn set_affine_transformation(&mut self, affine: [f64; 6]) {
        let [a, b, tx, d, e, ty] = affine;
        self.model_transformation = [
            a, b, 0.0, tx,
            d, e, 0.0, ty,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
    }

    /// Appends a model tie point
    pub fn add_model_tie_point(&mut self, tie_point: ModelTiePoint) {
        self.tie_points.push(tie_point);
    }

    /// Number of records in the key directory, header included
    pub fn num_geo_key_entries(&self) -> usize {
        self.key_entries.len() + 1
    }

    /// The directory records in serialization order: the header record
    /// first, then the keys in ascending key-id order
    pub fn geo_key_entries(&self) -> Vec<GeoKeyEntry> {
        let mut entries = Vec::with_capacity(self.num_geo_key_entries());
        entries.push(GeoKeyEntry::new(
            self.key_directory_version,
            self.key_revision,
            self.minor_revision,
            self.key_entries.len() as u16,
        ));
        entries.extend(self.key_entries.values().copied());
        entries
    }

    /// Double values recorded for a key
    pub fn geo_double_params(&self, key_id: u16) -> &[f64] {
        self.double_params.get(&key_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// ASCII string recorded for a key
    pub fn geo_ascii_param(&self, key_id: u16) -> Option<&str> {
        self.ascii_params.get(&key_id).map(String::as_str)
    }

    /// Pixel scale triple
    pub fn model_pixel_scale(&self) -> &[f64; 3] {
        &self.model_pixel_scale
    }

    /// Transformation matrix
    pub fn model_transformation(&self) -> &[f64; 16] {
        &self.model_transformation
    }

    /// Tie points
    pub fn tie_points(&self) -> &[ModelTiePoint] {
        &self.tie_points
    }
}
