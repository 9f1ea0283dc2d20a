use thiserror::Error;

/// Errors that can occur while decoding an Exif or TIFF segment.
///
/// None of these escape the public extraction entry points. Each one is
/// recorded on the directory that was being processed, using its `Display`
/// text, and decoding continues wherever the format allows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// A read would run past the end of the segment
    #[error("attempt to read data outside of exif segment (index {offset} where max index is {max_index})")]
    OutOfBounds { offset: usize, max_index: isize },

    /// Segment is too small to hold a preamble and a TIFF header
    #[error("Exif data segment must contain at least 14 bytes")]
    SegmentTooShort,

    /// Segment does not start with the `Exif\0\0` preamble
    #[error("Exif data segment doesn't begin with 'Exif'")]
    BadPreamble,

    /// Byte order marker is neither `II` nor `MM`
    #[error("Unclear distinction between Motorola/Intel byte ordering: {0}")]
    InvalidByteOrder(String),

    /// TIFF magic number is not 42
    #[error("Invalid Exif start - should have 0x2A at offset 8 in Exif header")]
    InvalidMagic(u16),

    /// First IFD offset lies past the end of the segment
    #[error("First exif directory offset is beyond end of Exif data segment")]
    FirstIfdBeyondEnd,

    /// IFD start offset lies outside the segment
    #[error("Ignored directory marked to start outside data segment")]
    DirectoryOutsideSegment(usize),

    /// IFD entry table would run past the end of the segment
    #[error("Illegally sized directory")]
    IllegalDirectorySize { offset: usize, entry_count: u16 },

    /// Entry format code is outside 1..=12
    #[error("Invalid format code: {0}")]
    InvalidFormatCode(u16),

    /// Entry component count has its sign bit set
    #[error("Negative component count in EXIF")]
    NegativeComponentCount(u32),

    /// Entry value pointer lies outside the segment
    #[error("Illegal pointer offset value in EXIF")]
    IllegalPointerOffset,

    /// Entry value would run past the end of the segment
    #[error("Illegal number of bytes: {0}")]
    IllegalByteCount(u64),

    /// Nikon maker note with an unknown sub-version byte
    #[error("Unsupported Nikon makernote data ignored.")]
    UnsupportedNikonMakernote(u8),

    /// Konica/Minolta maker note layout
    #[error("Unsupported Konica/Minolta data ignored.")]
    UnsupportedKonicaMinoltaMakernote,

    /// Maker note from an unrecognized vendor
    #[error("Unsupported makernote data ignored.")]
    UnsupportedMakernote,

    /// Thumbnail length or range is invalid
    #[error("Bad thumbnail length detected.")]
    BadThumbnailLength,

    /// Thumbnail could not be extracted for another reason
    #[error("Unable to extract thumbnail: {0}")]
    Thumbnail(String),
}

impl ExifError {
    /// Build an out-of-bounds error for a read at `offset` in a buffer of `len` bytes.
    pub fn out_of_bounds(offset: usize, len: usize) -> Self {
        ExifError::OutOfBounds {
            offset,
            max_index: len as isize - 1,
        }
    }
}
