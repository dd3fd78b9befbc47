//! Tests for tag value decoding

extern crate std;

use crate::io::{ByteOrder, ByteReader};
use crate::test_utils::{FixtureValue, TiffFixture};
use crate::tiff::ifd::IFDEntry;
use crate::tiff::types::TagValue;
use crate::tiff::values::read_tag_value;

/// Decodes the first IFD0 entry of a stream built from `fixture`
fn decode_first(fixture: TiffFixture) -> Option<TagValue> {
    let order = if fixture.big_endian { ByteOrder::BigEndian } else { ByteOrder::LittleEndian };
    let data = fixture.build();
    let reader = ByteReader::new(&data);
    let entry = IFDEntry::read(&reader, 10, order).unwrap();
    read_tag_value(&reader, &entry, 0, order).unwrap()
}

#[test]
fn test_single_short_is_inline() {
    let value = decode_first(TiffFixture::little_endian().ifd0(0x0112, FixtureValue::Shorts(vec![6])));
    std::assert_eq!(value, Some(TagValue::Integer(6)));
}

#[test]
fn test_short_pair_is_inline_and_triple_is_not() {
    let pair = decode_first(TiffFixture::big_endian().ifd0(0x0212, FixtureValue::Shorts(vec![2, 1])));
    std::assert_eq!(pair, Some(TagValue::IntegerList(vec![2, 1])));

    let triple = decode_first(TiffFixture::big_endian().ifd0(0x0102, FixtureValue::Shorts(vec![8, 8, 8])));
    std::assert_eq!(triple, Some(TagValue::IntegerList(vec![8, 8, 8])));
}

#[test]
fn test_bytes_inline_and_out_of_line() {
    let four = decode_first(TiffFixture::little_endian().ifd0(0x9000, FixtureValue::Undefined(vec![1, 2, 3, 4])));
    std::assert_eq!(four, Some(TagValue::IntegerList(vec![1, 2, 3, 4])));

    let six = decode_first(TiffFixture::little_endian().ifd0(0x9000, FixtureValue::Bytes(vec![9, 8, 7, 6, 5, 4])));
    std::assert_eq!(six, Some(TagValue::IntegerList(vec![9, 8, 7, 6, 5, 4])));

    let one = decode_first(TiffFixture::little_endian().ifd0(0xA300, FixtureValue::Undefined(vec![3])));
    std::assert_eq!(one, Some(TagValue::Integer(3)));
}

#[test]
fn test_ascii_drops_terminator() {
    let short = decode_first(TiffFixture::little_endian().ifd0(0x010F, FixtureValue::Ascii("Nik".to_string())));
    std::assert_eq!(short, Some(TagValue::Text("Nik".to_string())));

    let long = decode_first(TiffFixture::big_endian().ifd0(0x010F, FixtureValue::Ascii("NIKON CORPORATION".to_string())));
    std::assert_eq!(long, Some(TagValue::Text("NIKON CORPORATION".to_string())));
}

#[test]
fn test_ascii_with_zero_count_is_empty() {
    let value = decode_first(TiffFixture::little_endian().ifd0(0x010F, FixtureValue::Raw(2, 0, 0)));
    std::assert_eq!(value, Some(TagValue::Text(String::new())));
}

#[test]
fn test_longs() {
    let single = decode_first(TiffFixture::big_endian().ifd0(0x0100, FixtureValue::Longs(vec![4000])));
    std::assert_eq!(single, Some(TagValue::Integer(4000)));

    let list = decode_first(TiffFixture::little_endian().ifd0(0x0111, FixtureValue::Longs(vec![100, 200])));
    std::assert_eq!(list, Some(TagValue::IntegerList(vec![100, 200])));
}

#[test]
fn test_signed_long() {
    let value = decode_first(TiffFixture::little_endian().ifd0(0x9999, FixtureValue::SLongs(vec![-42])));
    std::assert_eq!(value, Some(TagValue::Integer(-42)));
}

#[test]
fn test_rationals() {
    let single = decode_first(TiffFixture::little_endian().ifd0(0x011A, FixtureValue::Rationals(vec![(300, 1)])));
    std::assert_eq!(single, Some(TagValue::Real(300.0)));

    let list = decode_first(TiffFixture::big_endian().ifd0(0x0002, FixtureValue::Rationals(vec![(52, 1), (30, 1), (1234, 100)])));
    std::assert_eq!(list, Some(TagValue::RealList(vec![52.0, 30.0, 12.34])));
}

#[test]
fn test_signed_rational() {
    let value = decode_first(TiffFixture::big_endian().ifd0(0x9204, FixtureValue::SRationals(vec![(-2, 3)])));
    std::assert_eq!(value, Some(TagValue::Real(-2.0 / 3.0)));
}

#[test]
fn test_zero_denominator_yields_ieee_sentinels() {
    let inf = decode_first(TiffFixture::little_endian().ifd0(0x011A, FixtureValue::Rationals(vec![(5, 0)])));
    std::assert_eq!(inf, Some(TagValue::Real(f64::INFINITY)));

    let nan = decode_first(TiffFixture::little_endian().ifd0(0x011A, FixtureValue::Rationals(vec![(0, 0)])));
    std::assert!(nan.unwrap().as_real().unwrap().is_nan());
}

#[test]
fn test_unknown_field_type_is_absent() {
    let value = decode_first(TiffFixture::little_endian().ifd0(0x0100, FixtureValue::Raw(11, 1, 0)));
    std::assert_eq!(value, None);
}

#[test]
fn test_out_of_line_value_past_buffer_fails() {
    let data = TiffFixture::little_endian()
        .ifd0(0x0111, FixtureValue::Raw(4, 3, 0xFFFF))
        .build();
    let reader = ByteReader::new(&data);
    let entry = IFDEntry::read(&reader, 10, ByteOrder::LittleEndian).unwrap();

    std::assert!(read_tag_value(&reader, &entry, 0, ByteOrder::LittleEndian).is_err());
}

#[test]
fn test_huge_count_fails_without_allocating() {
    let data = TiffFixture::little_endian()
        .ifd0(0x0111, FixtureValue::Raw(5, u32::MAX, 8))
        .build();
    let reader = ByteReader::new(&data);
    let entry = IFDEntry::read(&reader, 10, ByteOrder::LittleEndian).unwrap();

    std::assert!(read_tag_value(&reader, &entry, 0, ByteOrder::LittleEndian).is_err());
}
