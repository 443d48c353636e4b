//! Whole-file GeoTIFF writing
//!
//! Combines the header, the directory and the strip data into a complete
//! single-directory file. Pixel bytes come from a `StripSource`, the
//! narrow interface to the raster data model: one call per band, bytes
//! already encoded in the directory's common sample type.

use log::info;
use std::io::{Seek, SeekFrom, Write};

use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableSink;
use crate::raster::descriptor::RasterDescriptor;
use crate::tiff::constants::header;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::header::TiffHeader;
use crate::tiff::ifd::TiffIfd;

/// Supplies the encoded pixel bytes of one band per call
///
/// Bytes must match the directory's common sample type and the writer's
/// byte order; the writer validates the length against the strip byte
/// count but never inspects the samples.
pub trait StripSource {
    /// Encoded pixel bytes for a band
    fn strip_bytes(&mut self, band_index: usize) -> TiffResult<Vec<u8>>;
}

/// A strip source over pre-encoded in-memory band buffers
pub struct MemoryStripSource {
    bands: Vec<Vec<u8>>,
}

impl MemoryStripSource {
    /// Creates a source over one buffer per band
    pub fn new(bands: Vec<Vec<u8>>) -> Self {
        MemoryStripSource { bands }
    }
}

impl StripSource for MemoryStripSource {
    fn strip_bytes(&mut self, band_index: usize) -> TiffResult<Vec<u8>> {
        self.bands
            .get(band_index)
            .cloned()
            .ok_or_else(|| TiffError::GenericError(format!("no data for band {}", band_index)))
    }
}

/// Writes complete single-directory GeoTIFF files
pub struct GeoTiffWriter {
    byte_order: ByteOrder,
}

impl Default for GeoTiffWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoTiffWriter {
    /// Creates a writer emitting little-endian files
    pub fn new() -> Self {
        GeoTiffWriter {
            byte_order: ByteOrder::LittleEndian,
        }
    }

    /// Writes the descriptor's image as a complete file: header at 0,
    /// directory at the fixed first-IFD offset, strip data at the
    /// layout's strip region
    pub fn write(
        &self,
        sink: &mut dyn SeekableSink,
        descriptor: &RasterDescriptor,
        source: &mut dyn StripSource,
    ) -> TiffResult<()> {
        let ifd = TiffIfd::new(descriptor)?;
        let handler = self.byte_order.create_handler();

        info!("Writing GeoTIFF '{}' ({} bytes total)",
              descriptor.name(), header::HEADER_SIZE as u64 + ifd.required_entire_size()?);

        TiffHeader::new(self.byte_order, header::HEADER_SIZE).write(sink)?;
        let layout = ifd.write(sink, &*handler, header::HEADER_SIZE as i64, 0)?;

        let offsets = ifd.relative_strip_offsets()?;
        let byte_counts = ifd.strip_byte_counts()?;
        for (band_index, (&offset, &byte_count)) in offsets.iter().zip(byte_counts.iter()).enumerate() {
            let data = source.strip_bytes(band_index)?;
            if data.len() as u32 != byte_count {
                return Err(TiffError::GenericError(format!(
                    "band {} supplied {} bytes, strip expects {}",
                    band_index, data.len(), byte_count)));
            }
            sink.seek(SeekFrom::Start(layout.strips_start as u64 + offset as u64))?;
            sink.write_all(&data)?;
        }

        sink.flush()?;
        Ok(())
    }
}
