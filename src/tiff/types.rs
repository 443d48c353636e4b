//! Typed TIFF directory values
//!
//! Each directory entry carries an array of values of a single TIFF field
//! type. The set of field types a writer emits is fixed by the TIFF spec,
//! so the values are modelled as a closed sum type: each variant knows its
//! field type code, its element size and how to serialize itself.

use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableSink;
use crate::tiff::constants::field_types;
use crate::tiff::errors::TiffResult;
use std::io::Write;

/// Values of one directory entry
#[derive(Debug, Clone, PartialEq)]
pub enum TiffValue {
    /// 16-bit unsigned integers (field type 3)
    Short(Vec<u16>),
    /// 32-bit unsigned integers (field type 4)
    Long(Vec<u32>),
    /// Unsigned rationals, numerator/denominator pairs (field type 5)
    Rational(Vec<(u32, u32)>),
    /// 64-bit IEEE floats (field type 12)
    Double(Vec<f64>),
    /// NUL-terminated byte string (field type 2)
    Ascii(String),
}

impl TiffValue {
    /// TIFF field type code for this value
    pub fn field_type(&self) -> u16 {
        match self {
            TiffValue::Short(_) => field_types::SHORT,
            TiffValue::Long(_) => field_types::LONG,
            TiffValue::Rational(_) => field_types::RATIONAL,
            TiffValue::Double(_) => field_types::DOUBLE,
            TiffValue::Ascii(_) => field_types::ASCII,
        }
    }

    /// Size of a single element in bytes
    pub fn element_size(&self) -> u32 {
        match self {
            TiffValue::Ascii(_) => 1,
            TiffValue::Short(_) => 2,
            TiffValue::Long(_) => 4,
            TiffValue::Rational(_) | TiffValue::Double(_) => 8,
        }
    }

    /// Number of values. For ASCII this counts bytes including the
    /// trailing NUL, as the TIFF spec requires.
    pub fn count(&self) -> u32 {
        match self {
            TiffValue::Short(values) => values.len() as u32,
            TiffValue::Long(values) => values.len() as u32,
            TiffValue::Rational(values) => values.len() as u32,
            TiffValue::Double(values) => values.len() as u32,
            TiffValue::Ascii(text) => text.len() as u32 + 1,
        }
    }

    /// Total encoded size in bytes
    pub fn size_in_bytes(&self) -> u32 {
        self.element_size() * self.count()
    }

    /// Serializes the values at the sink's current position
    pub fn write(&self, sink: &mut dyn SeekableSink, handler: &dyn ByteOrderHandler) -> TiffResult<()> {
        match self {
            TiffValue::Short(values) => {
                for &value in values {
                    handler.write_u16(sink, value)?;
                }
            }
            TiffValue::Long(values) => {
                for &value in values {
                    handler.write_u32(sink, value)?;
                }
            }
            TiffValue::Rational(values) => {
                for &(numerator, denominator) in values {
                    handler.write_rational(sink, numerator, denominator)?;
                }
            }
            TiffValue::Double(values) => {
                for &value in values {
                    handler.write_f64(sink, value)?;
                }
            }
            TiffValue::Ascii(text) => {
                sink.write_all(text.as_bytes())?;
                sink.write_all(&[0u8])?;
            }
        }
        Ok(())
    }
}
