//! Main interface to the RasterForge library

use log::info;
use std::fs::File;
use std::io::BufWriter;

use crate::raster::descriptor::RasterDescriptor;
use crate::tiff::errors::TiffResult;
use crate::tiff::constants::header;
use crate::tiff::geokeys::is_geotiff_tag;
use crate::tiff::ifd::TiffIfd;
use crate::tiff::writer::{GeoTiffWriter, StripSource};
use crate::utils::logger::Logger;
use crate::utils::tag_utils;

/// Main interface to the RasterForge library
pub struct RasterForge {
    logger: Logger,
}

impl RasterForge {
    /// Create a new RasterForge instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "rasterforge.log"
    ///
    /// # Returns
    /// A RasterForge instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> TiffResult<Self> {
        let log_path = log_file.unwrap_or("rasterforge.log");
        let logger = Logger::new(log_path)?;
        Ok(RasterForge { logger })
    }

    /// Describe the directory and byte layout that would be written for
    /// an image, without writing anything
    ///
    /// # Arguments
    /// * `descriptor` - The image to plan a directory for
    ///
    /// # Returns
    /// String containing the layout plan or an error
    pub fn describe(&self, descriptor: &RasterDescriptor) -> TiffResult<String> {
        let ifd = TiffIfd::new(descriptor)?;
        let layout = ifd.compute_layout(header::HEADER_SIZE as i64)?;

        let mut result = String::from("GeoTIFF Layout Plan:\n");
        result.push_str(&format!("  Image: {} ({}x{}, {} bands)\n",
                                 descriptor.name(), descriptor.width(),
                                 descriptor.height(), descriptor.num_bands()));
        result.push_str(&format!("  Common sample type: {}\n", ifd.sample_type().name()));
        result.push_str(&format!("  Directory size: {} bytes\n", ifd.required_directory_size()));
        result.push_str(&format!("  Referenced values: {} bytes\n", ifd.required_referenced_values_size()));
        result.push_str(&format!("  Strip data: {} bytes\n", ifd.required_strip_size()?));
        result.push_str(&format!("  Entire size: {} bytes\n", ifd.required_entire_size()?));
        result.push_str(&format!("  Values start: {}, strips start: {}\n",
                                 layout.values_start, layout.strips_start));

        result.push_str("  Entries:\n");
        for entry in ifd.entries().entries() {
            let family = if is_geotiff_tag(entry.tag()) { " [geo]" } else { "" };
            let storage = match layout.value_offset(entry.tag()) {
                Some(offset) => format!("referenced at {}", offset),
                None => "inline".to_string(),
            };
            result.push_str(&format!("    {} ({}): {} x {}, {}{}\n",
                                     entry.tag(),
                                     tag_utils::get_tag_name(entry.tag()),
                                     entry.count(),
                                     tag_utils::get_field_type_name(entry.field_type()),
                                     storage,
                                     family));
        }

        Ok(result)
    }

    /// Write an image to a GeoTIFF file
    ///
    /// # Arguments
    /// * `output_path` - Path of the file to create
    /// * `descriptor` - The image to write
    /// * `source` - Supplier of the encoded pixel bytes, one strip per band
    pub fn write_file(
        &self,
        output_path: &str,
        descriptor: &RasterDescriptor,
        source: &mut dyn StripSource,
    ) -> TiffResult<()> {
        info!("Writing GeoTIFF to {}", output_path);
        self.logger.log(&format!("Writing GeoTIFF to {}", output_path))?;

        let file = File::create(output_path)?;
        let mut writer = BufWriter::with_capacity(1024 * 1024, file);
        GeoTiffWriter::new().write(&mut writer, descriptor, source)
    }
}
