//! Directory entry structure and serialization
//!
//! A directory entry is one 12-byte record of the IFD: tag, field type,
//! count and a 4-byte slot holding either the values themselves (when they
//! fit) or the absolute offset of an out-of-line value block.

use log::debug;

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableSink;
use crate::tiff::errors::{TiffError, TiffResult};
use crate::tiff::types::TiffValue;
use crate::utils::tag_utils;
use std::fmt;
use std::io::{Seek, SeekFrom, Write};

/// Encoded size of one directory entry record
pub const BYTES_PER_ENTRY: u32 = 12;

/// Size of the inline value slot in a classic TIFF entry
const INLINE_VALUE_SIZE: u32 = 4;

/// One tag entry of an image file directory
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    tag: u16,
    value: TiffValue,
}

impl DirectoryEntry {
    /// Creates a new directory entry
    pub fn new(tag: u16, value: TiffValue) -> Self {
        debug!("Creating directory entry: tag={} ({}), type={}, count={}",
               tag, tag_utils::get_tag_name(tag), value.field_type(), value.count());
        DirectoryEntry { tag, value }
    }

    /// TIFF tag identifier
    pub fn tag(&self) -> u16 {
        self.tag
    }

    /// The entry's values
    pub fn value(&self) -> &TiffValue {
        &self.value
    }

    /// TIFF field type code
    pub fn field_type(&self) -> u16 {
        self.value.field_type()
    }

    /// Number of values
    pub fn count(&self) -> u32 {
        self.value.count()
    }

    /// Total encoded size of the values in bytes
    pub fn values_size_in_bytes(&self) -> u32 {
        self.value.size_in_bytes()
    }

    /// Whether the values exceed the inline slot and have to be stored
    /// in a referenced out-of-line block
    pub fn must_values_be_referenced(&self) -> bool {
        self.values_size_in_bytes() > INLINE_VALUE_SIZE
    }

    /// Writes the 12-byte entry record at the sink's current position.
    ///
    /// Inline values are written into the 4-byte slot, zero-padded.
    /// Referenced values are written at `values_offset`, which must have
    /// been assigned by layout computation; the sink position is left
    /// unspecified afterwards, callers reposition per entry.
    pub fn write(
        &self,
        sink: &mut dyn SeekableSink,
        handler: &dyn ByteOrderHandler,
        values_offset: Option<u32>,
    ) -> TiffResult<()> {
        if self.must_values_be_referenced() && values_offset.is_none() {
            return Err(TiffError::GenericError(format!(
                "entry {} needs a value offset before it can be written", self.tag)));
        }

        handler.write_u16(sink, self.tag)?;
        handler.write_u16(sink, self.field_type())?;
        handler.write_u32(sink, self.count())?;

        match values_offset {
            Some(offset) => {
                handler.write_u32(sink, offset)?;
                sink.seek(SeekFrom::Start(offset as u64))?;
                self.value.write(sink, handler)?;
            }
            None => {
                self.value.write(sink, handler)?;
                let padding = INLINE_VALUE_SIZE - self.values_size_in_bytes();
                for _ in 0..padding {
                    sink.write_all(&[0u8])?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag: {} ({}), Type: {}, Count: {}, Size: {} bytes",
               self.tag,
               tag_utils::get_tag_name(self.tag),
               self.field_type(),
               self.count(),
               self.values_size_in_bytes())
    }
}
