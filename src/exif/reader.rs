//! Bounds-checked, byte-order aware access to an Exif segment.
//!
//! Every multi-byte value in a TIFF structure is stored in the byte order
//! declared by the two-byte marker at the start of the TIFF header:
//!
//! ```text
//! "II" (0x4949) -> little-endian ("Intel")
//! "MM" (0x4D4D) -> big-endian ("Motorola")
//! ```
//!
//! [`ByteReader`] pairs the segment with the byte order in effect. It is
//! `Copy`, so a different byte order for one sub-tree (Fujifilm maker notes)
//! is just a re-ordered copy stored with that sub-tree.

use bytes::Bytes;

use crate::error::ExifError;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Interpret a two-byte byte order marker.
    ///
    /// Returns `None` for anything other than exactly `II` or `MM`.
    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            b"II" => Some(ByteOrder::LittleEndian),
            b"MM" => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Read a u16 from the first two bytes of a slice.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 2 bytes.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        let raw = [bytes[0], bytes[1]];
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(raw),
            ByteOrder::BigEndian => u16::from_be_bytes(raw),
        }
    }

    /// Read a u32 from the first four bytes of a slice.
    ///
    /// # Panics
    /// Panics if the slice has fewer than 4 bytes.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        let raw = [bytes[0], bytes[1], bytes[2], bytes[3]];
        match self {
            ByteOrder::LittleEndian => u32::from_le_bytes(raw),
            ByteOrder::BigEndian => u32::from_be_bytes(raw),
        }
    }
}

// =============================================================================
// ByteReader
// =============================================================================

/// Bounds-checked reader over an immutable segment.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a Bytes,
    byte_order: ByteOrder,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a Bytes, byte_order: ByteOrder) -> Self {
        Self { data, byte_order }
    }

    /// A copy of this reader that decodes with `byte_order`.
    #[inline]
    pub fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Validate that `width` bytes can be read at `offset`, returning the end offset.
    #[inline]
    fn check(&self, offset: usize, width: usize) -> Result<usize, ExifError> {
        match offset.checked_add(width) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(ExifError::out_of_bounds(offset, self.data.len())),
        }
    }

    /// Borrow `len` bytes at `offset`.
    pub fn read_raw(&self, offset: usize, len: usize) -> Result<&'a [u8], ExifError> {
        let end = self.check(offset, len)?;
        let data: &'a Bytes = self.data;
        Ok(&data[offset..end])
    }

    /// Zero-copy slice of `len` bytes at `offset`.
    pub fn read_slice(&self, offset: usize, len: usize) -> Result<Bytes, ExifError> {
        let end = self.check(offset, len)?;
        Ok(self.data.slice(offset..end))
    }

    #[inline]
    pub fn read_u8(&self, offset: usize) -> Result<u8, ExifError> {
        self.check(offset, 1)?;
        Ok(self.data[offset])
    }

    #[inline]
    pub fn read_i8(&self, offset: usize) -> Result<i8, ExifError> {
        self.read_u8(offset).map(|b| b as i8)
    }

    #[inline]
    pub fn read_u16(&self, offset: usize) -> Result<u16, ExifError> {
        let end = self.check(offset, 2)?;
        Ok(self.byte_order.read_u16(&self.data[offset..end]))
    }

    #[inline]
    pub fn read_u32(&self, offset: usize) -> Result<u32, ExifError> {
        let end = self.check(offset, 4)?;
        Ok(self.byte_order.read_u32(&self.data[offset..end]))
    }

    /// Whether the bytes at `offset` equal `prefix`.
    ///
    /// A prefix that would run past the end never matches.
    pub fn starts_with(&self, offset: usize, prefix: &[u8]) -> bool {
        self.read_raw(offset, prefix.len())
            .map(|bytes| bytes == prefix)
            .unwrap_or(false)
    }
}

// =============================================================================
// Tests
// =============================================================================
