//! Unit tests for the TIFF writing module


mod sample_type_tests;
mod geo_tags_tests;
