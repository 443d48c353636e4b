//! Seekable sink trait and implementations
//!
//! This module provides a unified trait for output streams that support
//! both writing and seeking operations.

use std::io::{Seek, Write};

/// Trait for sinks that can both write and seek
///
/// This trait combines the Write and Seek traits for use with
/// the various writers throughout the application. Non-seekable
/// streams are unsupported; directory serialization relies on
/// repositioning within the output.
pub trait SeekableSink: Write + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Write + Seek + Send + Sync> SeekableSink for T {}
