//! TIFF header parsing.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order ("II" = little-endian, "MM" = big-endian)
//! Bytes 2-3: Magic (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD, relative to the start of the header
//! ```
//!
//! In an Exif segment the header starts after the 6-byte `Exif\0\0`
//! preamble; in a raw TIFF file it starts at byte 0.

use bytes::Bytes;

use crate::error::ExifError;

use super::reader::{ByteOrder, ByteReader};

/// TIFF magic number following the byte order marker
const TIFF_MAGIC: u16 = 0x002A;

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the structure
    pub byte_order: ByteOrder,

    /// Absolute position of the header in the segment; IFD pointers are relative to it
    pub tiff_header_offset: usize,

    /// Absolute position of the first IFD (not yet bounds-checked)
    pub first_ifd_offset: usize,
}

impl TiffHeader {
    /// Parse the TIFF header starting at `tiff_header_offset`.
    ///
    /// # Errors
    /// - `InvalidByteOrder` if the marker is not `II` or `MM`
    /// - `InvalidMagic` if the magic number is not 42
    /// - `OutOfBounds` if the segment ends inside the header
    pub fn parse(data: &Bytes, tiff_header_offset: usize) -> Result<Self, ExifError> {
        // The marker is checked byte-for-byte, so the order used to read it is irrelevant
        let marker = ByteReader::new(data, ByteOrder::BigEndian).read_raw(tiff_header_offset, 2)?;
        let byte_order = ByteOrder::from_marker(marker).ok_or_else(|| {
            ExifError::InvalidByteOrder(String::from_utf8_lossy(marker).into_owned())
        })?;

        let reader = ByteReader::new(data, byte_order);
        let magic = reader.read_u16(tiff_header_offset + 2)?;
        if magic != TIFF_MAGIC {
            return Err(ExifError::InvalidMagic(magic));
        }

        let first_ifd = reader.read_u32(tiff_header_offset + 4)?;

        Ok(TiffHeader {
            byte_order,
            tiff_header_offset,
            first_ifd_offset: tiff_header_offset.saturating_add(first_ifd as usize),
        })
    }
}
