//! Tag ids the decoder itself interprets.
//!
//! Everything else is stored verbatim under its numeric id; naming tags is
//! the job of a description layer.

/// Camera manufacturer string, used to pick a maker-note layout
pub const TAG_MAKE: u16 = 0x010F;

/// Compression of the IFD1 thumbnail (shares its id with IFD0 compression)
pub const TAG_THUMBNAIL_COMPRESSION: u16 = 0x0103;

/// Offset of the thumbnail, relative to the TIFF header
pub const TAG_THUMBNAIL_OFFSET: u16 = 0x0201;

/// Length of the thumbnail in bytes
pub const TAG_THUMBNAIL_LENGTH: u16 = 0x0202;

/// Synthetic tag holding the extracted thumbnail bytes
pub const TAG_THUMBNAIL_DATA: u16 = 0xF001;

/// Tags whose value is a pointer to another structure rather than data.
///
/// Entries with these ids are followed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PointerTag {
    /// Offset of the Exif sub-IFD
    ExifOffset = 0x8769,

    /// Offset of the GPS sub-IFD
    GpsInfoOffset = 0x8825,

    /// Offset of the interoperability sub-IFD
    InteropOffset = 0xA005,

    /// Vendor maker-note blob
    MakerNote = 0x927C,
}

impl PointerTag {
    /// Create a PointerTag from its numeric value.
    ///
    /// Returns `None` for ordinary data tags.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x8769 => Some(PointerTag::ExifOffset),
            0x8825 => Some(PointerTag::GpsInfoOffset),
            0xA005 => Some(PointerTag::InteropOffset),
            0x927C => Some(PointerTag::MakerNote),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}
