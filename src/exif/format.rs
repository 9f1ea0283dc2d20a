//! Exif/TIFF value format codes.
//!
//! Each IFD entry declares one of twelve format codes. The code fixes the
//! size of one component, which together with the component count decides
//! whether the value sits inline in the entry or behind a pointer.

/// Format code of an IFD entry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum FormatCode {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// NUL-terminated 8-bit text
    String = 2,

    /// Unsigned 16-bit integer
    UShort = 3,

    /// Unsigned 32-bit integer
    ULong = 4,

    /// Two unsigned 32-bit integers (numerator, denominator)
    URational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque bytes
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two signed 32-bit integers (numerator, denominator)
    SRational = 10,

    /// IEEE single precision float
    Single = 11,

    /// IEEE double precision float
    Double = 12,
}

impl FormatCode {
    /// Highest valid format code.
    pub const MAX: u16 = 12;

    /// Largest value size that is stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: u64 = 4;

    /// Create a FormatCode from its numeric value.
    ///
    /// Returns `None` for anything outside 1..=12.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FormatCode::Byte),
            2 => Some(FormatCode::String),
            3 => Some(FormatCode::UShort),
            4 => Some(FormatCode::ULong),
            5 => Some(FormatCode::URational),
            6 => Some(FormatCode::SByte),
            7 => Some(FormatCode::Undefined),
            8 => Some(FormatCode::SShort),
            9 => Some(FormatCode::SLong),
            10 => Some(FormatCode::SRational),
            11 => Some(FormatCode::Single),
            12 => Some(FormatCode::Double),
            _ => None,
        }
    }

    /// Size of a single component of this format in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> u64 {
        match self {
            FormatCode::Byte | FormatCode::String | FormatCode::SByte | FormatCode::Undefined => 1,
            FormatCode::UShort | FormatCode::SShort => 2,
            FormatCode::ULong | FormatCode::SLong | FormatCode::Single => 4,
            FormatCode::URational | FormatCode::SRational | FormatCode::Double => 8,
        }
    }

    /// Total value size for `count` components.
    #[inline]
    pub const fn byte_count(self, count: u32) -> u64 {
        count as u64 * self.size_in_bytes()
    }

    /// Whether a value of `count` components fits in the entry itself.
    #[inline]
    pub const fn fits_inline(self, count: u32) -> bool {
        self.byte_count(count) <= Self::INLINE_THRESHOLD
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}
