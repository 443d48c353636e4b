//! Directory builder strategy modules
//!
//! This module contains the strategy implementations that populate a
//! directory entry set, organized by functionality category.

pub mod basic_tags;
pub mod geo_tags;
pub mod metadata_tags;
