//! TIFF file header
//!
//! The classic header is 8 bytes: the byte-order marker, the version
//! number 42 and the offset of the first directory.

use std::io::{Seek, SeekFrom, Write};

use crate::io::byte_order::ByteOrder;
use crate::io::seekable::SeekableSink;
use crate::tiff::constants::header;
use crate::tiff::errors::TiffResult;

/// The fixed-size header at the start of every TIFF file
#[derive(Debug, Clone, Copy)]
pub struct TiffHeader {
    byte_order: ByteOrder,
    first_ifd_offset: u32,
}

impl TiffHeader {
    /// Creates a header pointing at the first directory
    pub fn new(byte_order: ByteOrder, first_ifd_offset: u32) -> Self {
        TiffHeader {
            byte_order,
            first_ifd_offset,
        }
    }

    /// The byte order the file is written in
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Offset of the first directory
    pub fn first_ifd_offset(&self) -> u32 {
        self.first_ifd_offset
    }

    /// Writes the header at the start of the sink
    pub fn write(&self, sink: &mut dyn SeekableSink) -> TiffResult<()> {
        let handler = self.byte_order.create_handler();
        sink.seek(SeekFrom::Start(0))?;
        sink.write_all(&self.byte_order.marker())?;
        handler.write_u16(sink, header::TIFF_VERSION)?;
        handler.write_u32(sink, self.first_ifd_offset)?;
        Ok(())
    }
}
