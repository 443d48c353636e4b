//! Raster image description
//!
//! This module provides the image-side data model consumed by the TIFF
//! writer: band sample types and the descriptor of the image to encode.

pub mod data_type;
pub mod descriptor;

pub use data_type::{common_sample_type, RasterDataType};
pub use descriptor::{RasterBand, RasterDescriptor};
