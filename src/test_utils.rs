//! Fixture builders for unit tests
//!
//! Assembles TIFF streams, EXIF/APP1 segments, Photoshop IPTC blocks and
//! XMP packets into synthetic JPEG buffers.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

/// Value of a fixture entry, serialized in the stream's byte order
#[derive(Debug, Clone)]
pub enum FixtureValue {
    Bytes(Vec<u8>),
    Undefined(Vec<u8>),
    Ascii(String),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    SLongs(Vec<i32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Entry written verbatim: field type, count, value/offset field
    Raw(u16, u32, u32),
}

#[derive(Debug, Clone)]
pub struct FixtureEntry {
    pub tag: u16,
    pub value: FixtureValue,
}

impl FixtureEntry {
    pub fn new(tag: u16, value: FixtureValue) -> Self {
        FixtureEntry { tag, value }
    }
}

/// Builds a TIFF stream with IFD0 and optional Exif, GPS and IFD1 directories
#[derive(Debug, Clone, Default)]
pub struct TiffFixture {
    pub big_endian: bool,
    pub ifd0: Vec<FixtureEntry>,
    pub exif: Option<Vec<FixtureEntry>>,
    pub gps: Option<Vec<FixtureEntry>>,
    pub ifd1: Option<Vec<FixtureEntry>>,
    /// Thumbnail bytes, referenced from IFD1 through JpegIFOffset/JpegIFByteCount
    pub thumbnail: Option<Vec<u8>>,
}

struct Writer {
    big_endian: bool,
    buf: Vec<u8>,
}

impl Writer {
    fn u16(&mut self, v: u16) {
        if self.big_endian {
            self.buf.write_u16::<BigEndian>(v).unwrap();
        } else {
            self.buf.write_u16::<LittleEndian>(v).unwrap();
        }
    }

    fn u32(&mut self, v: u32) {
        if self.big_endian {
            self.buf.write_u32::<BigEndian>(v).unwrap();
        } else {
            self.buf.write_u32::<LittleEndian>(v).unwrap();
        }
    }

    fn i32(&mut self, v: i32) {
        if self.big_endian {
            self.buf.write_i32::<BigEndian>(v).unwrap();
        } else {
            self.buf.write_i32::<LittleEndian>(v).unwrap();
        }
    }
}

/// Field type, count and serialized payload of a value
fn encode(value: &FixtureValue, big_endian: bool) -> (u16, u32, Vec<u8>) {
    let mut w = Writer { big_endian, buf: Vec::new() };
    let (field_type, count) = match value {
        FixtureValue::Bytes(v) => {
            w.buf.extend_from_slice(v);
            (1, v.len() as u32)
        }
        FixtureValue::Undefined(v) => {
            w.buf.extend_from_slice(v);
            (7, v.len() as u32)
        }
        FixtureValue::Ascii(s) => {
            w.buf.extend_from_slice(s.as_bytes());
            w.buf.push(0);
            (2, s.len() as u32 + 1)
        }
        FixtureValue::Shorts(v) => {
            v.iter().for_each(|&x| w.u16(x));
            (3, v.len() as u32)
        }
        FixtureValue::Longs(v) => {
            v.iter().for_each(|&x| w.u32(x));
            (4, v.len() as u32)
        }
        FixtureValue::SLongs(v) => {
            v.iter().for_each(|&x| w.i32(x));
            (9, v.len() as u32)
        }
        FixtureValue::Rationals(v) => {
            v.iter().for_each(|&(n, d)| {
                w.u32(n);
                w.u32(d);
            });
            (5, v.len() as u32)
        }
        FixtureValue::SRationals(v) => {
            v.iter().for_each(|&(n, d)| {
                w.i32(n);
                w.i32(d);
            });
            (10, v.len() as u32)
        }
        FixtureValue::Raw(field_type, count, _) => (*field_type, *count),
    };
    (field_type, count, w.buf)
}

fn data_size(entries: &[FixtureEntry], big_endian: bool) -> usize {
    entries
        .iter()
        .map(|e| encode(&e.value, big_endian).2.len())
        .filter(|&len| len > 4)
        .map(|len| len + len % 2)
        .sum()
}

fn dir_size(entries: &[FixtureEntry]) -> usize {
    2 + entries.len() * 12 + 4
}

impl TiffFixture {
    pub fn little_endian() -> Self {
        TiffFixture::default()
    }

    pub fn big_endian() -> Self {
        TiffFixture { big_endian: true, ..TiffFixture::default() }
    }

    pub fn ifd0(mut self, tag: u16, value: FixtureValue) -> Self {
        self.ifd0.push(FixtureEntry::new(tag, value));
        self
    }

    pub fn exif(mut self, tag: u16, value: FixtureValue) -> Self {
        self.exif.get_or_insert_with(Vec::new).push(FixtureEntry::new(tag, value));
        self
    }

    pub fn gps(mut self, tag: u16, value: FixtureValue) -> Self {
        self.gps.get_or_insert_with(Vec::new).push(FixtureEntry::new(tag, value));
        self
    }

    pub fn ifd1(mut self, tag: u16, value: FixtureValue) -> Self {
        self.ifd1.get_or_insert_with(Vec::new).push(FixtureEntry::new(tag, value));
        self
    }

    pub fn thumbnail(mut self, data: Vec<u8>) -> Self {
        self.thumbnail = Some(data);
        self
    }

    /// Serializes the stream, starting with the byte order marker
    pub fn build(&self) -> Vec<u8> {
        let be = self.big_endian;
        let mut ifd0 = self.ifd0.clone();
        let exif = self.exif.clone().unwrap_or_default();
        let gps = self.gps.clone().unwrap_or_default();
        let mut ifd1 = self.ifd1.clone().unwrap_or_default();

        // Pointer entries are inline LONGs, so they can be sized before their values are known
        if self.exif.is_some() {
            ifd0.push(FixtureEntry::new(0x8769, FixtureValue::Longs(vec![0])));
        }
        if self.gps.is_some() {
            ifd0.push(FixtureEntry::new(0x8825, FixtureValue::Longs(vec![0])));
        }
        if let Some(thumb) = &self.thumbnail {
            ifd1.push(FixtureEntry::new(0x0201, FixtureValue::Longs(vec![0])));
            ifd1.push(FixtureEntry::new(0x0202, FixtureValue::Longs(vec![thumb.len() as u32])));
        }

        let ifd0_offset = 8;
        let exif_offset = ifd0_offset + dir_size(&ifd0) + data_size(&ifd0, be);
        let gps_offset = exif_offset
            + if self.exif.is_some() { dir_size(&exif) + data_size(&exif, be) } else { 0 };
        let ifd1_offset = gps_offset
            + if self.gps.is_some() { dir_size(&gps) + data_size(&gps, be) } else { 0 };
        let thumb_offset = ifd1_offset
            + if self.ifd1.is_some() || self.thumbnail.is_some() { dir_size(&ifd1) + data_size(&ifd1, be) } else { 0 };

        for entry in ifd0.iter_mut() {
            match entry.tag {
                0x8769 if self.exif.is_some() => entry.value = FixtureValue::Longs(vec![exif_offset as u32]),
                0x8825 if self.gps.is_some() => entry.value = FixtureValue::Longs(vec![gps_offset as u32]),
                _ => {}
            }
        }
        for entry in ifd1.iter_mut() {
            if entry.tag == 0x0201 && self.thumbnail.is_some() {
                entry.value = FixtureValue::Longs(vec![thumb_offset as u32]);
            }
        }

        let has_ifd1 = self.ifd1.is_some() || self.thumbnail.is_some();
        let mut w = Writer { big_endian: be, buf: Vec::new() };
        w.buf.extend_from_slice(if be { b"MM" } else { b"II" });
        w.u16(0x002A);
        w.u32(ifd0_offset as u32);

        write_directory(&mut w, &ifd0, if has_ifd1 { ifd1_offset as u32 } else { 0 });
        if self.exif.is_some() {
            write_directory(&mut w, &exif, 0);
        }
        if self.gps.is_some() {
            write_directory(&mut w, &gps, 0);
        }
        if has_ifd1 {
            write_directory(&mut w, &ifd1, 0);
        }
        if let Some(thumb) = &self.thumbnail {
            w.buf.extend_from_slice(thumb);
        }

        w.buf
    }
}

/// Writes a directory at the writer's current position, followed by its data area
fn write_directory(w: &mut Writer, entries: &[FixtureEntry], next_ifd: u32) {
    let dir_start = w.buf.len();
    let mut data_offset = dir_start + dir_size(entries);
    let mut data = Vec::new();

    w.u16(entries.len() as u16);
    for entry in entries {
        let (field_type, count, payload) = encode(&entry.value, w.big_endian);
        w.u16(entry.tag);
        w.u16(field_type);
        w.u32(count);

        if let FixtureValue::Raw(_, _, value) = entry.value {
            w.u32(value);
        } else if payload.len() <= 4 {
            let mut inline = payload.clone();
            inline.resize(4, 0);
            w.buf.extend_from_slice(&inline);
        } else {
            w.u32(data_offset as u32);
            data.extend_from_slice(&payload);
            if payload.len() % 2 == 1 {
                data.push(0);
            }
            data_offset += payload.len() + payload.len() % 2;
        }
    }
    w.u32(next_ifd);
    w.buf.extend_from_slice(&data);
}

/// Wraps a TIFF stream into an "Exif\0\0" APP1 segment
pub fn app1_exif_segment(tiff: &[u8]) -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE1];
    segment.write_u16::<BigEndian>((2 + 6 + tiff.len()) as u16).unwrap();
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(tiff);
    segment
}

/// A JFIF APP0 segment, present in front of APP1 in many files
pub fn app0_jfif_segment() -> Vec<u8> {
    vec![
        0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01,
        0x00, 0x00,
    ]
}

/// IPTC-IIM record 2 dataset
pub fn iptc_record(dataset: u8, value: &str) -> Vec<u8> {
    let mut record = vec![0x1C, 0x02, dataset];
    record.write_u16::<BigEndian>(value.len() as u16).unwrap();
    record.extend_from_slice(value.as_bytes());
    record
}

/// APP13 segment with a Photoshop 8BIM 0x0404 resource holding `iim`
pub fn app13_iptc_segment(iim: &[u8]) -> Vec<u8> {
    let mut payload = b"Photoshop 3.0\0".to_vec();
    payload.extend_from_slice(b"8BIM");
    payload.extend_from_slice(&[0x04, 0x04]);
    payload.extend_from_slice(&[0x00, 0x00]); // empty padded name
    payload.write_u32::<BigEndian>(iim.len() as u32).unwrap();
    payload.extend_from_slice(iim);

    let mut segment = vec![0xFF, 0xED];
    segment.write_u16::<BigEndian>((payload.len() + 2) as u16).unwrap();
    segment.extend_from_slice(&payload);
    segment
}

/// APP1 segment carrying an XMP packet
pub fn app1_xmp_segment(packet: &str) -> Vec<u8> {
    let mut payload = b"http://ns.adobe.com/xap/1.0/\0".to_vec();
    payload.extend_from_slice(packet.as_bytes());

    let mut segment = vec![0xFF, 0xE1];
    segment.write_u16::<BigEndian>((payload.len() + 2) as u16).unwrap();
    segment.extend_from_slice(&payload);
    segment
}

/// SOI, the given segments, a quantization table stub, SOS with scan data, EOI
pub fn jpeg(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    for segment in segments {
        data.extend_from_slice(segment);
    }
    data.extend_from_slice(&[0xFF, 0xDB, 0x00, 0x04, 0x00, 0x01]);
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x04, 0x01, 0x00]);
    data.extend_from_slice(&[0x12, 0x34, 0x56, 0x78, 0x9A]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// A JPEG whose only metadata is the EXIF segment built from `tiff`
pub fn jpeg_with_exif(tiff: &TiffFixture) -> Vec<u8> {
    jpeg(&[app0_jfif_segment(), app1_exif_segment(&tiff.build())])
}
