//! Directory kinds.
//!
//! Every decoded tag belongs to exactly one logical table. The same numeric
//! tag id means different things in different kinds, so each kind owns its
//! own [`Directory`](super::Directory).

use serde::Serialize;

/// The logical table a set of decoded tags belongs to.
///
/// The set of kinds is closed: maker notes from vendors not listed here are
/// reported as unsupported rather than decoded into a generic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DirectoryKind {
    /// Root table: IFD0, the Exif sub-IFD and IFD1 all merge here
    Exif,

    /// GPS sub-IFD
    Gps,

    /// Interoperability sub-IFD
    Interop,

    /// Olympus maker note (also used by Epson, Agfa and some Minolta models)
    Olympus,

    /// Nikon maker note with the `Nikon\0\x01` header
    NikonType1,

    /// Nikon maker note with an embedded TIFF header, or headerless
    NikonType2,

    /// Sony maker note
    Sony,

    /// Kodak maker note
    Kodak,

    /// Canon maker note
    Canon,

    /// Casio maker note without a header
    CasioType1,

    /// Casio maker note with the `QVC` header (also Pentax `AOC` notes)
    CasioType2,

    /// Fujifilm maker note (always little-endian)
    Fujifilm,

    /// Pentax / Asahi maker note
    Pentax,

    /// Kyocera maker note
    Kyocera,

    /// Panasonic maker note
    Panasonic,

    /// JPEG image properties, filled by the SOF segment reader
    Jpeg,
}

impl DirectoryKind {
    /// All directory kinds, in their display order.
    pub const ALL: [DirectoryKind; 16] = [
        DirectoryKind::Exif,
        DirectoryKind::Gps,
        DirectoryKind::Interop,
        DirectoryKind::Olympus,
        DirectoryKind::NikonType1,
        DirectoryKind::NikonType2,
        DirectoryKind::Sony,
        DirectoryKind::Kodak,
        DirectoryKind::Canon,
        DirectoryKind::CasioType1,
        DirectoryKind::CasioType2,
        DirectoryKind::Fujifilm,
        DirectoryKind::Pentax,
        DirectoryKind::Kyocera,
        DirectoryKind::Panasonic,
        DirectoryKind::Jpeg,
    ];

    /// Get a human-readable name for the directory kind.
    pub const fn name(self) -> &'static str {
        match self {
            DirectoryKind::Exif => "Exif",
            DirectoryKind::Gps => "GPS",
            DirectoryKind::Interop => "Interoperability",
            DirectoryKind::Olympus => "Olympus Makernote",
            DirectoryKind::NikonType1 => "Nikon Makernote (Type 1)",
            DirectoryKind::NikonType2 => "Nikon Makernote (Type 2)",
            DirectoryKind::Sony => "Sony Makernote",
            DirectoryKind::Kodak => "Kodak Makernote",
            DirectoryKind::Canon => "Canon Makernote",
            DirectoryKind::CasioType1 => "Casio Makernote (Type 1)",
            DirectoryKind::CasioType2 => "Casio Makernote (Type 2)",
            DirectoryKind::Fujifilm => "Fujifilm Makernote",
            DirectoryKind::Pentax => "Pentax Makernote",
            DirectoryKind::Kyocera => "Kyocera/Contax Makernote",
            DirectoryKind::Panasonic => "Panasonic Makernote",
            DirectoryKind::Jpeg => "Jpeg",
        }
    }
}
