//! Descriptor of the image handed to the writer
//!
//! A `RasterDescriptor` is the narrow interface between the raster data
//! model and the directory builder: dimensions, per-band sample types,
//! optional geo-referencing and an optional free-text metadata blob.
//! The descriptor is read-only once handed to the writer.

use crate::raster::data_type::RasterDataType;
use crate::tiff::geokeys::GeoTiffMetadata;

/// A single band of the image
#[derive(Debug, Clone)]
pub struct RasterBand {
    /// Band name
    pub name: String,
    /// Numeric type of the band's samples
    pub data_type: RasterDataType,
}

impl RasterBand {
    /// Creates a new band
    pub fn new(name: &str, data_type: RasterDataType) -> Self {
        RasterBand {
            name: name.to_string(),
            data_type,
        }
    }
}

/// Describes the image a directory is built for
#[derive(Debug, Clone)]
pub struct RasterDescriptor {
    name: String,
    width: u32,
    height: u32,
    bands: Vec<RasterBand>,
    geo_metadata: Option<GeoTiffMetadata>,
    text_metadata: Option<String>,
}

impl RasterDescriptor {
    /// Creates a new descriptor with no bands
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        RasterDescriptor {
            name: name.to_string(),
            width,
            height,
            bands: Vec::new(),
            geo_metadata: None,
            text_metadata: None,
        }
    }

    /// Appends a band
    pub fn add_band(&mut self, band: RasterBand) {
        self.bands.push(band);
    }

    /// Attaches geo-referencing metadata
    pub fn set_geo_metadata(&mut self, metadata: GeoTiffMetadata) {
        self.geo_metadata = Some(metadata);
    }

    /// Attaches a free-text metadata blob, embedded verbatim in the output
    pub fn set_text_metadata(&mut self, metadata: &str) {
        self.text_metadata = Some(metadata.to_string());
    }

    /// Image name, written as the text description of the output
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The bands of the image
    pub fn bands(&self) -> &[RasterBand] {
        &self.bands
    }

    /// Number of bands
    pub fn num_bands(&self) -> usize {
        self.bands.len()
    }

    /// Sample types of all bands, in band order
    pub fn band_types(&self) -> Vec<RasterDataType> {
        self.bands.iter().map(|band| band.data_type).collect()
    }

    /// Geo-referencing metadata, if the image is georeferenced
    pub fn geo_metadata(&self) -> Option<&GeoTiffMetadata> {
        self.geo_metadata.as_ref()
    }

    /// Free-text metadata blob, if any
    pub fn text_metadata(&self) -> Option<&str> {
        self.text_metadata.as_deref()
    }
}
