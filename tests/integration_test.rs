//! Integration tests for GeoTIFF file writing

extern crate std;

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Seek, SeekFrom};

use rasterforge::{
    GeoTiffMetadata, GeoTiffWriter, MemoryStripSource, ModelTiePoint, RasterBand, RasterDataType,
    RasterDescriptor, RasterForge,
};

/// A raw directory record read back from the serialized file
#[derive(Debug, Clone, Copy)]
struct RawEntry {
    tag: u16,
    field_type: u16,
    count: u32,
    value_or_offset: u32,
}

fn read_directory(buffer: &[u8], ifd_offset: u64) -> Vec<RawEntry> {
    let mut cursor = Cursor::new(buffer);
    cursor.seek(SeekFrom::Start(ifd_offset)).unwrap();
    let count = cursor.read_u16::<LittleEndian>().unwrap();
    (0..count)
        .map(|_| RawEntry {
            tag: cursor.read_u16::<LittleEndian>().unwrap(),
            field_type: cursor.read_u16::<LittleEndian>().unwrap(),
            count: cursor.read_u32::<LittleEndian>().unwrap(),
            value_or_offset: cursor.read_u32::<LittleEndian>().unwrap(),
        })
        .collect()
}

fn find_entry(entries: &[RawEntry], tag: u16) -> RawEntry {
    entries
        .iter()
        .copied()
        .find(|entry| entry.tag == tag)
        .unwrap_or_else(|| panic!("tag {} not found", tag))
}

fn test_descriptor() -> RasterDescriptor {
    let mut descriptor = RasterDescriptor::new("test-scene", 3, 2);
    descriptor.add_band(RasterBand::new("radiance_1", RasterDataType::Int16));
    descriptor.add_band(RasterBand::new("radiance_2", RasterDataType::Int16));
    descriptor.set_text_metadata("<Metadata><Scene>test-scene</Scene></Metadata>");

    let mut geo = GeoTiffMetadata::new();
    geo.add_geo_short_param(1024, 1); // GTModelTypeGeoKey = projected
    geo.add_geo_ascii_param(1026, "WGS 84 / UTM 33N"); // GTCitationGeoKey
    geo.add_geo_short_param(3072, 32633); // ProjectedCSTypeGeoKey
    geo.set_model_pixel_scale(10.0, 10.0, 0.0);
    geo.add_model_tie_point(ModelTiePoint::new(0.0, 0.0, 0.0, 500000.0, 4649776.0, 0.0));
    descriptor.set_geo_metadata(geo);

    descriptor
}

/// Two 3x2 strips of consecutive 16-bit values, little-endian
fn test_strips() -> Vec<Vec<u8>> {
    (0..2i16)
        .map(|band| {
            let mut data = Vec::with_capacity(12);
            for value in 0..6i16 {
                data.extend_from_slice(&(value + band * 100).to_le_bytes());
            }
            data
        })
        .collect()
}

#[test]
fn test_complete_geotiff_write() {
    let descriptor = test_descriptor();
    let mut source = MemoryStripSource::new(test_strips());

    let mut cursor = Cursor::new(Vec::new());
    GeoTiffWriter::new()
        .write(&mut cursor, &descriptor, &mut source)
        .unwrap();
    let buffer = cursor.into_inner();

    // Header: "II", version 42, first directory at offset 8
    std::assert_eq!(&buffer[0..2], &[0x49, 0x49]);
    std::assert_eq!(&buffer[2..4], &[42, 0]);
    std::assert_eq!(&buffer[4..8], &[8, 0, 0, 0]);

    let entries = read_directory(&buffer, 8);

    // Entries are sorted ascending by tag, each tag unique
    for pair in entries.windows(2) {
        std::assert!(pair[0].tag < pair[1].tag);
    }

    // Structural tags
    std::assert_eq!(find_entry(&entries, 256).value_or_offset, 3); // ImageWidth
    std::assert_eq!(find_entry(&entries, 257).value_or_offset, 2); // ImageLength
    std::assert_eq!(find_entry(&entries, 259).value_or_offset, 1); // Compression = none
    std::assert_eq!(find_entry(&entries, 262).value_or_offset, 1); // BlackIsZero
    std::assert_eq!(find_entry(&entries, 277).value_or_offset, 2); // SamplesPerPixel
    std::assert_eq!(find_entry(&entries, 278).value_or_offset, 2); // RowsPerStrip = height
    std::assert_eq!(find_entry(&entries, 284).value_or_offset, 2); // Planar configuration

    // Two 16-bit bands: BitsPerSample fits the inline slot as two shorts
    let bits = find_entry(&entries, 258);
    std::assert_eq!(bits.count, 2);
    std::assert_eq!(bits.value_or_offset, 16 | (16 << 16));

    // SampleFormat: signed integer, replicated per band
    let sample_format = find_entry(&entries, 339);
    std::assert_eq!(sample_format.count, 2);
    std::assert_eq!(sample_format.value_or_offset, 2 | (2 << 16));

    // Strip byte counts: 3x2x2 bytes per band, stored out of line
    let byte_counts_entry = find_entry(&entries, 279);
    let mut reader = Cursor::new(&buffer);
    reader.seek(SeekFrom::Start(byte_counts_entry.value_or_offset as u64)).unwrap();
    let counts: Vec<u32> = (0..2).map(|_| reader.read_u32::<LittleEndian>().unwrap()).collect();
    std::assert_eq!(counts, vec![12, 12]);

    // Strip offsets point at back-to-back strips inside the file
    let offsets_entry = find_entry(&entries, 273);
    reader.seek(SeekFrom::Start(offsets_entry.value_or_offset as u64)).unwrap();
    let offsets: Vec<u32> = (0..2).map(|_| reader.read_u32::<LittleEndian>().unwrap()).collect();
    std::assert_eq!(offsets[1], offsets[0] + 12);

    // The strip data itself
    let strips = test_strips();
    let first = offsets[0] as usize;
    let second = offsets[1] as usize;
    std::assert_eq!(&buffer[first..first + 12], strips[0].as_slice());
    std::assert_eq!(&buffer[second..second + 12], strips[1].as_slice());
    std::assert_eq!(buffer.len(), second + 12);

    // GeoKey directory: header, then keys ascending; the citation string
    // lives in the ASCII params block
    let key_directory = find_entry(&entries, 34735);
    std::assert_eq!(key_directory.count, 16);
    reader.seek(SeekFrom::Start(key_directory.value_or_offset as u64)).unwrap();
    let keys: Vec<u16> = (0..16).map(|_| reader.read_u16::<LittleEndian>().unwrap()).collect();
    std::assert_eq!(keys, vec![
        1, 1, 0, 3,
        1024, 0, 1, 1,
        1026, 34737, 17, 0,
        3072, 0, 1, 32633,
    ]);

    let ascii_params = find_entry(&entries, 34737);
    let start = ascii_params.value_or_offset as usize;
    std::assert_eq!(&buffer[start..start + ascii_params.count as usize], b"WGS 84 / UTM 33N|\0");

    // Pixel scale and tie point present, no transformation matrix
    std::assert_eq!(find_entry(&entries, 33550).count, 3);
    std::assert_eq!(find_entry(&entries, 33922).count, 6);
    std::assert!(!entries.iter().any(|entry| entry.tag == 34264));

    // The description and the embedded metadata blob
    let description = find_entry(&entries, 270);
    let start = description.value_or_offset as usize;
    std::assert_eq!(&buffer[start..start + description.count as usize], b"test-scene\0");

    let metadata = find_entry(&entries, 65000);
    std::assert_eq!(metadata.field_type, 2);
    let start = metadata.value_or_offset as usize;
    std::assert_eq!(
        &buffer[start..start + metadata.count as usize],
        b"<Metadata><Scene>test-scene</Scene></Metadata>\0"
    );
}

#[test]
fn test_mismatched_strip_length_rejected() {
    let descriptor = test_descriptor();
    // Second band one byte short
    let mut strips = test_strips();
    strips[1].pop();
    let mut source = MemoryStripSource::new(strips);

    let mut cursor = Cursor::new(Vec::new());
    let result = GeoTiffWriter::new().write(&mut cursor, &descriptor, &mut source);
    std::assert!(result.is_err());
}

#[test]
fn test_api_write_file_and_describe() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("scene.tif");
    let log = dir.path().join("rasterforge.log");

    let forge = RasterForge::new(Some(log.to_str().unwrap())).unwrap();
    let descriptor = test_descriptor();

    let plan = forge.describe(&descriptor).unwrap();
    std::assert!(plan.contains("Common sample type: int16"));
    std::assert!(plan.contains("GeoKeyDirectory"));

    let mut source = MemoryStripSource::new(test_strips());
    forge
        .write_file(output.to_str().unwrap(), &descriptor, &mut source)
        .unwrap();

    let bytes = std::fs::read(&output).unwrap();
    std::assert_eq!(&bytes[0..4], &[0x49, 0x49, 42, 0]);
    let entries = read_directory(&bytes, 8);
    std::assert_eq!(find_entry(&entries, 256).value_or_offset, 3);
}
