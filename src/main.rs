use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use rasterforge::utils::logger::Logger;
use rasterforge::{
    common_sample_type, GeoTiffMetadata, MemoryStripSource, ModelTiePoint, RasterBand,
    RasterDataType, RasterDescriptor, RasterForge,
};

fn main() {
    let matches = ClapCommand::new("RasterForge")
        .version("1.0")
        .about("Construct and write GeoTIFF files")
        .arg(
            Arg::new("output")
                .help("Output GeoTIFF file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Image width in pixels")
                .value_name("PIXELS")
                .default_value("256"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Image height in pixels")
                .value_name("PIXELS")
                .default_value("256"),
        )
        .arg(
            Arg::new("bands")
                .long("bands")
                .help("Comma-separated band types (int8, int16, int32, uint8, uint16, uint32, float32, float64)")
                .value_name("TYPES")
                .default_value("uint16"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .help("Image name written as the description tag")
                .value_name("NAME")
                .default_value("rasterforge-test-image"),
        )
        .arg(
            Arg::new("pixel-scale")
                .long("pixel-scale")
                .help("Model pixel scale as 'x,y'")
                .value_name("SCALE")
                .required(false),
        )
        .arg(
            Arg::new("tiepoint")
                .long("tiepoint")
                .help("Tie point as 'i,j,x,y' linking a pixel to model coordinates")
                .value_name("TIEPOINT")
                .required(false),
        )
        .arg(
            Arg::new("epsg")
                .long("epsg")
                .help("EPSG code for the coordinate reference system")
                .value_name("CODE")
                .required(false),
        )
        .arg(
            Arg::new("citation")
                .long("citation")
                .help("Citation text for the coordinate reference system")
                .value_name("TEXT")
                .required(false),
        )
        .arg(
            Arg::new("metadata")
                .long("metadata")
                .help("Free-text metadata embedded in the output")
                .value_name("TEXT")
                .required(false),
        )
        .arg(
            Arg::new("describe")
                .long("describe")
                .help("Print the layout plan instead of writing the file")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(e) = Logger::init_global_logger("rasterforge.log") {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&matches) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let output = matches.get_one::<String>("output").unwrap();
    let width: u32 = matches.get_one::<String>("width").unwrap().parse()?;
    let height: u32 = matches.get_one::<String>("height").unwrap().parse()?;
    let name = matches.get_one::<String>("name").unwrap();

    let band_types = parse_band_types(matches.get_one::<String>("bands").unwrap())?;

    let mut descriptor = RasterDescriptor::new(name, width, height);
    for (index, &data_type) in band_types.iter().enumerate() {
        descriptor.add_band(RasterBand::new(&format!("band_{}", index + 1), data_type));
    }

    if let Some(metadata) = matches.get_one::<String>("metadata") {
        descriptor.set_text_metadata(metadata);
    }

    if let Some(geo) = build_geo_metadata(matches)? {
        descriptor.set_geo_metadata(geo);
    }

    let forge = RasterForge::new(None)?;

    if matches.get_flag("describe") {
        println!("{}", forge.describe(&descriptor)?);
        return Ok(());
    }

    let sample_type = common_sample_type(&band_types)?;
    let bands = band_types
        .iter()
        .enumerate()
        .map(|(index, _)| ramp_strip(width, height, index, sample_type))
        .collect();
    let mut source = MemoryStripSource::new(bands);

    forge.write_file(output, &descriptor, &mut source)?;
    println!("Wrote {}", output);
    Ok(())
}

/// Parses the comma-separated band type list
fn parse_band_types(spec: &str) -> Result<Vec<RasterDataType>, String> {
    spec.split(',')
        .map(|name| match name.trim() {
            "int8" => Ok(RasterDataType::Int8),
            "int16" => Ok(RasterDataType::Int16),
            "int32" => Ok(RasterDataType::Int32),
            "uint8" => Ok(RasterDataType::UInt8),
            "uint16" => Ok(RasterDataType::UInt16),
            "uint32" => Ok(RasterDataType::UInt32),
            "float32" => Ok(RasterDataType::Float32),
            "float64" => Ok(RasterDataType::Float64),
            other => Err(format!("Unknown band type: {}", other)),
        })
        .collect()
}

/// Builds geo metadata from the CLI arguments, if any were given
fn build_geo_metadata(matches: &clap::ArgMatches) -> Result<Option<GeoTiffMetadata>, String> {
    let pixel_scale = matches.get_one::<String>("pixel-scale");
    let tiepoint = matches.get_one::<String>("tiepoint");
    let epsg = matches.get_one::<String>("epsg");
    let citation = matches.get_one::<String>("citation");

    if pixel_scale.is_none() && tiepoint.is_none() && epsg.is_none() && citation.is_none() {
        return Ok(None);
    }

    let mut geo = GeoTiffMetadata::new();

    if let Some(code) = epsg {
        let code: u16 = code.parse().map_err(|_| format!("Invalid EPSG code: {}", code))?;
        // Model type 2 is geographic, 1 is projected; geographic CRS codes
        // live in the 4000-4999 EPSG block
        if (4000..5000).contains(&code) {
            geo.add_geo_short_param(1024, 2); // GTModelTypeGeoKey
            geo.add_geo_short_param(2048, code); // GeographicTypeGeoKey
        } else {
            geo.add_geo_short_param(1024, 1); // GTModelTypeGeoKey
            geo.add_geo_short_param(3072, code); // ProjectedCSTypeGeoKey
        }
    }

    if let Some(text) = citation {
        geo.add_geo_ascii_param(1026, text); // GTCitationGeoKey
    }

    if let Some(scale) = pixel_scale {
        let values = parse_doubles(scale, 2, "pixel-scale")?;
        geo.set_model_pixel_scale(values[0], values[1], 0.0);
    }

    if let Some(point) = tiepoint {
        let values = parse_doubles(point, 4, "tiepoint")?;
        geo.add_model_tie_point(ModelTiePoint::new(
            values[0], values[1], 0.0, values[2], values[3], 0.0,
        ));
    }

    Ok(Some(geo))
}

/// Parses a comma-separated list of doubles with a fixed arity
fn parse_doubles(spec: &str, expected: usize, what: &str) -> Result<Vec<f64>, String> {
    let values: Result<Vec<f64>, _> = spec.split(',').map(|v| v.trim().parse::<f64>()).collect();
    let values = values.map_err(|_| format!("Invalid {} value: {}", what, spec))?;
    if values.len() != expected {
        return Err(format!("Expected {} values for {}, got {}", expected, what, values.len()));
    }
    Ok(values)
}

/// Encodes a diagonal ramp test pattern for one band in the common
/// sample type, little-endian
fn ramp_strip(width: u32, height: u32, band_index: usize, sample_type: RasterDataType) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * sample_type.elem_size()) as usize);
    for y in 0..height {
        for x in 0..width {
            let value = (x + y + band_index as u32) as f64;
            match sample_type {
                RasterDataType::Int8 => data.push((value as i64 & 0x7f) as u8),
                RasterDataType::UInt8 => data.push((value as i64 & 0xff) as u8),
                RasterDataType::Int16 | RasterDataType::UInt16 => {
                    data.extend_from_slice(&(value as u16).to_le_bytes())
                }
                RasterDataType::Int32 | RasterDataType::UInt32 => {
                    data.extend_from_slice(&(value as u32).to_le_bytes())
                }
                RasterDataType::Float32 => data.extend_from_slice(&(value as f32).to_le_bytes()),
                RasterDataType::Float64 => data.extend_from_slice(&value.to_le_bytes()),
            }
        }
    }
    data
}
