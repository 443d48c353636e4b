//! TIFF/GeoTIFF writing module
//!
//! This module provides structures and functions for building and
//! serializing TIFF image file directories and GeoTIFF files.

pub mod errors;
pub mod entry;
pub mod entry_set;
pub(crate) mod types;
pub mod geokeys;
pub mod ifd;
pub mod header;
pub mod writer;
mod builders;
pub(crate) mod constants;
#[cfg(test)]
mod tests;

pub use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use errors::{TiffError, TiffResult};
pub use entry::DirectoryEntry;
pub use entry_set::DirectoryEntrySet;
pub use types::TiffValue;
pub use geokeys::{get_key_name, get_tag_name, is_geotiff_tag, GeoKeyEntry, GeoTiffMetadata, ModelTiePoint};
pub use ifd::{IfdLayout, TiffIfd};
pub use header::TiffHeader;
pub use writer::{GeoTiffWriter, MemoryStripSource, StripSource};
