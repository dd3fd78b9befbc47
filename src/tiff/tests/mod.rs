//! Tests for the TIFF/EXIF module

mod types_tests;
mod values_tests;
