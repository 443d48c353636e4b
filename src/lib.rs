pub mod io;
pub mod raster;
pub mod tiff;
pub mod utils;
pub mod api;

pub use crate::api::RasterForge;

pub use raster::{common_sample_type, RasterBand, RasterDataType, RasterDescriptor};
pub use tiff::{GeoTiffMetadata, GeoTiffWriter, MemoryStripSource, ModelTiePoint, StripSource, TiffIfd};
