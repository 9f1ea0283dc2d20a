//! Test utilities for integration tests.
//!
//! This module provides builders for Exif segments and raw TIFF buffers in
//! either byte order, plus canned maker-note layouts.

use exif_decoder::exif::{PointerTag, TAG_MAKE};

// =============================================================================
// Byte Order
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    pub const BOTH: [ByteOrderType; 2] = [ByteOrderType::LittleEndian, ByteOrderType::BigEndian];

    pub fn marker(self) -> &'static [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => b"II",
            ByteOrderType::BigEndian => b"MM",
        }
    }

    pub fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    pub fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

// =============================================================================
// IFD Builder
// =============================================================================

/// Format codes used by the builders.
pub mod format {
    pub const BYTE: u16 = 1;
    pub const STRING: u16 = 2;
    pub const USHORT: u16 = 3;
    pub const ULONG: u16 = 4;
    pub const URATIONAL: u16 = 5;
    pub const SBYTE: u16 = 6;
    pub const UNDEFINED: u16 = 7;
    pub const SSHORT: u16 = 8;
    pub const SLONG: u16 = 9;
    pub const SRATIONAL: u16 = 10;
    pub const SINGLE: u16 = 11;
    pub const DOUBLE: u16 = 12;
}

struct IfdEntry {
    tag: u16,
    format: u16,
    count: u32,
    data: Vec<u8>,
}

/// Builder for one IFD.
///
/// Values of up to four bytes are stored inline; larger ones are written
/// right after the entry table, with offsets relative to the TIFF header.
pub struct IfdBuilder {
    byte_order: ByteOrderType,
    entries: Vec<IfdEntry>,
    next_ifd: u32,
}

impl IfdBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        Self {
            byte_order,
            entries: Vec::new(),
            next_ifd: 0,
        }
    }

    /// Add an entry with raw value bytes (already in the IFD's byte order).
    pub fn entry(&mut self, tag: u16, format: u16, count: u32, data: Vec<u8>) -> &mut Self {
        self.entries.push(IfdEntry {
            tag,
            format,
            count,
            data,
        });
        self
    }

    pub fn bytes(&mut self, tag: u16, format: u16, values: &[u8]) -> &mut Self {
        self.entry(tag, format, values.len() as u32, values.to_vec())
    }

    pub fn short(&mut self, tag: u16, values: &[u16]) -> &mut Self {
        let data = values.iter().flat_map(|&v| self.byte_order.u16(v)).collect();
        self.entry(tag, format::USHORT, values.len() as u32, data)
    }

    pub fn sshort(&mut self, tag: u16, values: &[i16]) -> &mut Self {
        let data = values
            .iter()
            .flat_map(|&v| self.byte_order.u16(v as u16))
            .collect();
        self.entry(tag, format::SSHORT, values.len() as u32, data)
    }

    pub fn long(&mut self, tag: u16, values: &[u32]) -> &mut Self {
        let data = values.iter().flat_map(|&v| self.byte_order.u32(v)).collect();
        self.entry(tag, format::ULONG, values.len() as u32, data)
    }

    pub fn slong(&mut self, tag: u16, values: &[i32]) -> &mut Self {
        let data = values
            .iter()
            .flat_map(|&v| self.byte_order.u32(v as u32))
            .collect();
        self.entry(tag, format::SLONG, values.len() as u32, data)
    }

    pub fn rational(&mut self, tag: u16, values: &[(u32, u32)]) -> &mut Self {
        let data = values
            .iter()
            .flat_map(|&(n, d)| {
                let mut pair = self.byte_order.u32(n).to_vec();
                pair.extend_from_slice(&self.byte_order.u32(d));
                pair
            })
            .collect();
        self.entry(tag, format::URATIONAL, values.len() as u32, data)
    }

    pub fn srational(&mut self, tag: u16, values: &[(i32, i32)]) -> &mut Self {
        let data = values
            .iter()
            .flat_map(|&(n, d)| {
                let mut pair = self.byte_order.u32(n as u32).to_vec();
                pair.extend_from_slice(&self.byte_order.u32(d as u32));
                pair
            })
            .collect();
        self.entry(tag, format::SRATIONAL, values.len() as u32, data)
    }

    /// ASCII entry; the terminating NUL is included in the count.
    pub fn ascii(&mut self, tag: u16, value: &str) -> &mut Self {
        let mut data = value.as_bytes().to_vec();
        data.push(0);
        self.entry(tag, format::STRING, data.len() as u32, data)
    }

    pub fn undefined(&mut self, tag: u16, value: &[u8]) -> &mut Self {
        self.bytes(tag, format::UNDEFINED, value)
    }

    /// Pointer entry (Exif, GPS or interoperability sub-IFD) holding `offset`.
    pub fn pointer(&mut self, tag: PointerTag, offset: u32) -> &mut Self {
        self.long(tag.as_u16(), &[offset])
    }

    pub fn next_ifd(&mut self, offset: u32) -> &mut Self {
        self.next_ifd = offset;
        self
    }

    /// Size of the entry table including count and next link.
    pub fn table_size(&self) -> usize {
        2 + 12 * self.entries.len() + 4
    }

    /// Serialize as if placed at `offset` from the TIFF header.
    pub fn build_at(&self, offset: u32) -> Vec<u8> {
        let order = self.byte_order;
        let mut table = Vec::with_capacity(self.table_size());
        let mut external = Vec::new();
        let mut data_offset = offset + self.table_size() as u32;

        table.extend_from_slice(&order.u16(self.entries.len() as u16));
        for entry in &self.entries {
            table.extend_from_slice(&order.u16(entry.tag));
            table.extend_from_slice(&order.u16(entry.format));
            table.extend_from_slice(&order.u32(entry.count));

            if entry.data.len() <= 4 {
                let mut inline = entry.data.clone();
                inline.resize(4, 0);
                table.extend_from_slice(&inline);
            } else {
                table.extend_from_slice(&order.u32(data_offset));
                external.extend_from_slice(&entry.data);
                data_offset += entry.data.len() as u32;
            }
        }
        table.extend_from_slice(&order.u32(self.next_ifd));

        table.extend(external);
        table
    }

    /// Serialize an IFD whose values are all inline, independent of position.
    pub fn build_inline(&self) -> Vec<u8> {
        assert!(
            self.entries.iter().all(|e| e.data.len() <= 4),
            "build_inline needs inline-only entries"
        );
        self.build_at(0)
    }
}

// =============================================================================
// TIFF Builder
// =============================================================================

/// Builder for a raw TIFF buffer, with the header at offset 0.
///
/// IFDs and blobs are appended in order; every returned offset is relative to
/// the TIFF header, so the same buffer can be wrapped in an Exif preamble.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    data: Vec<u8>,
}

impl TiffBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        let mut data = Vec::new();
        data.extend_from_slice(byte_order.marker());
        data.extend_from_slice(&byte_order.u16(0x2A));
        data.extend_from_slice(&byte_order.u32(8));
        Self { byte_order, data }
    }

    pub fn byte_order(&self) -> ByteOrderType {
        self.byte_order
    }

    /// Current end of the buffer.
    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    pub fn set_first_ifd(&mut self, offset: u32) -> &mut Self {
        self.patch_u32(4, offset)
    }

    pub fn patch_u32(&mut self, position: u32, value: u32) -> &mut Self {
        let position = position as usize;
        self.data[position..position + 4].copy_from_slice(&self.byte_order.u32(value));
        self
    }

    /// Append an IFD and return its offset.
    pub fn append_ifd(&mut self, ifd: &IfdBuilder) -> u32 {
        let offset = self.len();
        self.data.extend(ifd.build_at(offset));
        offset
    }

    /// Append raw bytes and return their offset.
    pub fn append_bytes(&mut self, bytes: &[u8]) -> u32 {
        let offset = self.len();
        self.data.extend_from_slice(bytes);
        offset
    }

    /// Rewrite the next-IFD link of the IFD at `ifd_offset`.
    pub fn set_next_ifd(&mut self, ifd_offset: u32, next: u32) -> &mut Self {
        let at = ifd_offset as usize;
        let count = match self.byte_order {
            ByteOrderType::LittleEndian => u16::from_le_bytes([self.data[at], self.data[at + 1]]),
            ByteOrderType::BigEndian => u16::from_be_bytes([self.data[at], self.data[at + 1]]),
        };
        self.patch_u32(ifd_offset + 2 + 12 * count as u32, next)
    }

    /// The raw TIFF buffer.
    pub fn build(self) -> Vec<u8> {
        self.data
    }

    /// The buffer wrapped as an Exif APP1 payload.
    pub fn build_exif(self) -> Vec<u8> {
        exif_segment(&self.data)
    }
}

/// Prefix a TIFF buffer with the `Exif\0\0` preamble.
pub fn exif_segment(tiff: &[u8]) -> Vec<u8> {
    let mut segment = b"Exif\0\0".to_vec();
    segment.extend_from_slice(tiff);
    segment
}

// =============================================================================
// Maker Note Fixtures
// =============================================================================

/// Tag stored in every maker-note IFD built by [`makernote_ifd`].
pub const MAKERNOTE_TEST_TAG: u16 = 0x0001;

/// Value of [`MAKERNOTE_TEST_TAG`].
pub const MAKERNOTE_TEST_VALUE: u16 = 7;

/// Tag written to IFD0 right after the maker note.
pub const TRAILING_TAG: u16 = 0x9999;

/// Value of [`TRAILING_TAG`]; asymmetric so a byte-order mix-up shows.
pub const TRAILING_VALUE: u16 = 0x0102;

/// A one-entry maker-note IFD in `byte_order`.
pub fn makernote_ifd(byte_order: ByteOrderType) -> Vec<u8> {
    IfdBuilder::new(byte_order)
        .short(MAKERNOTE_TEST_TAG, &[MAKERNOTE_TEST_VALUE])
        .build_inline()
}

/// `header` padded with zeros to `ifd_start`, followed by a maker-note IFD.
pub fn makernote_blob(header: &[u8], ifd_start: usize, byte_order: ByteOrderType) -> Vec<u8> {
    let mut blob = header.to_vec();
    blob.resize(ifd_start, 0);
    blob.extend(makernote_ifd(byte_order));
    blob
}

/// An Exif segment whose IFD0 holds Make (when given), MakerNote and
/// [`TRAILING_TAG`], in that order.
pub fn build_exif_with_makernote(
    byte_order: ByteOrderType,
    make: Option<&str>,
    blob: &[u8],
) -> Vec<u8> {
    let mut ifd0 = IfdBuilder::new(byte_order);
    if let Some(make) = make {
        ifd0.ascii(TAG_MAKE, make);
    }
    ifd0.undefined(PointerTag::MakerNote.as_u16(), blob);
    ifd0.short(TRAILING_TAG, &[TRAILING_VALUE]);

    let mut tiff = TiffBuilder::new(byte_order);
    tiff.append_ifd(&ifd0);
    tiff.build_exif()
}
