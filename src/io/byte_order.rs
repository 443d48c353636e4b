//! Byte order handling for TIFF files
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when writing TIFF data.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::Result;

use crate::io::seekable::SeekableSink;
use crate::tiff::constants::header;

/// Represents the byte order of a TIFF file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian byte order (II)
    LittleEndian,
    /// Big-endian byte order (MM)
    BigEndian,
}

impl ByteOrder {
    /// Returns the two-byte marker written at the start of the header
    pub fn marker(&self) -> [u8; 2] {
        match self {
            ByteOrder::LittleEndian => header::LITTLE_ENDIAN_MARKER,
            ByteOrder::BigEndian => header::BIG_ENDIAN_MARKER,
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (II)",
            ByteOrder::BigEndian => "Big Endian (MM)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler: Send + Sync {
    /// Write a u16 value
    fn write_u16(&self, sink: &mut dyn SeekableSink, value: u16) -> Result<()>;

    /// Write a u32 value
    fn write_u32(&self, sink: &mut dyn SeekableSink, value: u32) -> Result<()>;

    /// Write an f64 value
    fn write_f64(&self, sink: &mut dyn SeekableSink, value: f64) -> Result<()>;

    /// Write a rational value (two u32 values as numerator/denominator)
    fn write_rational(&self, sink: &mut dyn SeekableSink, numerator: u32, denominator: u32) -> Result<()>;
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn write_u16(&self, sink: &mut dyn SeekableSink, value: u16) -> Result<()> {
        sink.write_u16::<LittleEndian>(value)
    }

    fn write_u32(&self, sink: &mut dyn SeekableSink, value: u32) -> Result<()> {
        sink.write_u32::<LittleEndian>(value)
    }

    fn write_f64(&self, sink: &mut dyn SeekableSink, value: f64) -> Result<()> {
        sink.write_f64::<LittleEndian>(value)
    }

    fn write_rational(&self, sink: &mut dyn SeekableSink, numerator: u32, denominator: u32) -> Result<()> {
        sink.write_u32::<LittleEndian>(numerator)?;
        sink.write_u32::<LittleEndian>(denominator)
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn write_u16(&self, sink: &mut dyn SeekableSink, value: u16) -> Result<()> {
        sink.write_u16::<BigEndian>(value)
    }

    fn write_u32(&self, sink: &mut dyn SeekableSink, value: u32) -> Result<()> {
        sink.write_u32::<BigEndian>(value)
    }

    fn write_f64(&self, sink: &mut dyn SeekableSink, value: f64) -> Result<()> {
        sink.write_f64::<BigEndian>(value)
    }

    fn write_rational(&self, sink: &mut dyn SeekableSink, numerator: u32, denominator: u32) -> Result<()> {
        sink.write_u32::<BigEndian>(numerator)?;
        sink.write_u32::<BigEndian>(denominator)
    }
}
