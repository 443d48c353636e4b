//! Tests for the common-sample-type policy

extern crate std;

use crate::raster::data_type::{common_sample_type, RasterDataType};
use crate::raster::data_type::RasterDataType::*;
use crate::tiff::errors::TiffError;

#[test]
fn test_single_band_keeps_its_type() {
    for data_type in [Int8, Int16, Int32, UInt8, UInt16, UInt32, Float32, Float64] {
        std::assert_eq!(common_sample_type(&[data_type]).unwrap(), data_type);
    }
}

#[test]
fn test_float64_dominates() {
    std::assert_eq!(common_sample_type(&[Float64, UInt8]).unwrap(), Float64);
    std::assert_eq!(common_sample_type(&[Int32, Float64, Float32]).unwrap(), Float64);
}

#[test]
fn test_float32_with_narrow_integers() {
    // Integer widths up to 16 bits fit a 32-bit float
    std::assert_eq!(common_sample_type(&[Float32, UInt8]).unwrap(), Float32);
    std::assert_eq!(common_sample_type(&[Float32, Int16]).unwrap(), Float32);
    std::assert_eq!(common_sample_type(&[Float32, UInt16, Int8]).unwrap(), Float32);
}

#[test]
fn test_float32_with_wide_integers_widens() {
    // A 32-bit integer range does not fit a 32-bit float
    std::assert_eq!(common_sample_type(&[Float32, Int32]).unwrap(), Float64);
    std::assert_eq!(common_sample_type(&[Float32, UInt32]).unwrap(), Float64);
}

#[test]
fn test_unsigned_only_keeps_widest_unsigned() {
    std::assert_eq!(common_sample_type(&[UInt8, UInt16]).unwrap(), UInt16);
    std::assert_eq!(common_sample_type(&[UInt32, UInt8]).unwrap(), UInt32);
}

#[test]
fn test_mixed_sign_widens_unsigned() {
    // An unsigned type at least as wide as the signed one is promoted to
    // the next signed type able to hold its full range
    std::assert_eq!(common_sample_type(&[UInt8, Int8]).unwrap(), Int16);
    std::assert_eq!(common_sample_type(&[UInt16, Int16]).unwrap(), Int32);
    std::assert_eq!(common_sample_type(&[UInt16, Int8]).unwrap(), Int32);
}

#[test]
fn test_mixed_sign_with_uint32_falls_back_to_float() {
    // No signed integer type holds a full 32-bit unsigned range
    std::assert_eq!(common_sample_type(&[UInt32, Int8]).unwrap(), Float64);
    std::assert_eq!(common_sample_type(&[UInt32, Int32]).unwrap(), Float64);
}

#[test]
fn test_wider_signed_covers_unsigned() {
    std::assert_eq!(common_sample_type(&[UInt8, Int32]).unwrap(), Int32);
    std::assert_eq!(common_sample_type(&[UInt8, Int16]).unwrap(), Int16);
}

#[test]
fn test_signed_only_keeps_widest_signed() {
    std::assert_eq!(common_sample_type(&[Int8, Int16]).unwrap(), Int16);
    std::assert_eq!(common_sample_type(&[Int32, Int8, Int16]).unwrap(), Int32);
}

#[test]
fn test_empty_band_set_is_unsupported() {
    match common_sample_type(&[]) {
        Err(TiffError::UnsupportedSampleType(_)) => {}
        other => panic!("expected UnsupportedSampleType, got {:?}", other),
    }
}

#[test]
fn test_resolution_is_commutative() {
    let cases: Vec<Vec<RasterDataType>> = vec![
        vec![UInt8, Float32, Int32],
        vec![UInt16, Int16, UInt8],
        vec![Int8, UInt32, Float32],
        vec![UInt8, UInt16, Int32, Float32],
    ];

    for bands in cases {
        let expected = common_sample_type(&bands).unwrap();
        // Exercise every rotation and the full reversal of the band order
        for start in 0..bands.len() {
            let mut rotated = bands.clone();
            rotated.rotate_left(start);
            std::assert_eq!(common_sample_type(&rotated).unwrap(), expected,
                            "rotation {} of {:?}", start, bands);
        }
        let mut reversed = bands.clone();
        reversed.reverse();
        std::assert_eq!(common_sample_type(&reversed).unwrap(), expected);
    }
}
