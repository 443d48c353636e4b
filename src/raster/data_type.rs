//! Band sample types and the common-type policy
//!
//! TIFF stores one BitsPerSample/SampleFormat set at the directory level,
//! so an image whose bands use different numeric types has to be widened
//! to a single sample type before its directory can be built. The policy
//! lives in `common_sample_type`.

use crate::tiff::errors::{TiffError, TiffResult};

/// Numeric type of a single raster band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterDataType {
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 32-bit IEEE floating point
    Float32,
    /// 64-bit IEEE floating point
    Float64,
}

impl RasterDataType {
    /// Size of a single element of this type in bytes
    pub fn elem_size(&self) -> u32 {
        match self {
            RasterDataType::Int8 | RasterDataType::UInt8 => 1,
            RasterDataType::Int16 | RasterDataType::UInt16 => 2,
            RasterDataType::Int32 | RasterDataType::UInt32 | RasterDataType::Float32 => 4,
            RasterDataType::Float64 => 8,
        }
    }

    /// Whether this is an integer type, signed or unsigned
    pub fn is_integer(&self) -> bool {
        !self.is_floating_point()
    }

    /// Whether this is an unsigned integer type
    pub fn is_unsigned_integer(&self) -> bool {
        matches!(self, RasterDataType::UInt8 | RasterDataType::UInt16 | RasterDataType::UInt32)
    }

    /// Whether this is a signed integer type
    pub fn is_signed_integer(&self) -> bool {
        matches!(self, RasterDataType::Int8 | RasterDataType::Int16 | RasterDataType::Int32)
    }

    /// Whether this is a floating point type
    pub fn is_floating_point(&self) -> bool {
        matches!(self, RasterDataType::Float32 | RasterDataType::Float64)
    }

    /// Returns a human-readable name for this type
    pub fn name(&self) -> &'static str {
        match self {
            RasterDataType::Int8 => "int8",
            RasterDataType::Int16 => "int16",
            RasterDataType::Int32 => "int32",
            RasterDataType::UInt8 => "uint8",
            RasterDataType::UInt16 => "uint16",
            RasterDataType::UInt32 => "uint32",
            RasterDataType::Float32 => "float32",
            RasterDataType::Float64 => "float64",
        }
    }

    /// The next wider signed type able to hold every value of an
    /// unsigned type, where one exists
    fn widened_signed(&self) -> Option<RasterDataType> {
        match self {
            RasterDataType::UInt8 => Some(RasterDataType::Int16),
            RasterDataType::UInt16 => Some(RasterDataType::Int32),
            _ => None,
        }
    }
}

/// Picks the widest of two types of the same category
fn max_by_size(a: Option<RasterDataType>, b: RasterDataType) -> Option<RasterDataType> {
    match a {
        Some(current) if current.elem_size() >= b.elem_size() => Some(current),
        _ => Some(b),
    }
}

/// Computes the single sample type used for the whole directory.
///
/// Precedence:
/// 1. any 64-bit float band -> Float64
/// 2. any float band -> Float64 when an integer band is wider than 16 bits
///    (a 32-bit float cannot hold a full 32-bit integer range), Float32 otherwise
/// 3. any unsigned band -> the widest unsigned type when no signed band exists;
///    with signed bands present and an unsigned type at least as wide, the
///    unsigned type is widened to the next signed type, falling back to
///    Float64 when none exists
/// 4. any signed band -> the widest signed type
/// 5. otherwise the band set is unsupported
pub fn common_sample_type(band_types: &[RasterDataType]) -> TiffResult<RasterDataType> {
    let mut max_signed: Option<RasterDataType> = None;
    let mut max_unsigned: Option<RasterDataType> = None;
    let mut max_float: Option<RasterDataType> = None;

    for &data_type in band_types {
        if data_type.is_signed_integer() {
            max_signed = max_by_size(max_signed, data_type);
        }
        if data_type.is_unsigned_integer() {
            max_unsigned = max_by_size(max_unsigned, data_type);
        }
        if data_type.is_floating_point() {
            max_float = max_by_size(max_float, data_type);
        }
    }

    if max_float == Some(RasterDataType::Float64) {
        return Ok(RasterDataType::Float64);
    }

    if max_float.is_some() {
        let wide_signed = matches!(max_signed, Some(t) if t.elem_size() > 2);
        let wide_unsigned = matches!(max_unsigned, Some(t) if t.elem_size() > 2);
        if wide_signed || wide_unsigned {
            return Ok(RasterDataType::Float64);
        }
        return Ok(RasterDataType::Float32);
    }

    if let Some(unsigned) = max_unsigned {
        match max_signed {
            None => return Ok(unsigned),
            Some(signed) if unsigned.elem_size() >= signed.elem_size() => {
                return Ok(unsigned.widened_signed().unwrap_or(RasterDataType::Float64));
            }
            // A wider signed type already covers the unsigned range
            Some(_) => {}
        }
    }

    if let Some(signed) = max_signed {
        return Ok(signed);
    }

    Err(TiffError::UnsupportedSampleType(
        "no band with a known numeric category".to_string(),
    ))
}
