//! Maker note layout detection.
//!
//! Vendors embed their own IFD-like structures in the MakerNote tag. Their
//! layout is recognised by sniffing the leading bytes of the blob and the
//! camera make. A layout decides which directory kind receives the tags,
//! where the IFD starts, which base IFD pointers are relative to, and in
//! rare cases a byte order that differs from the enclosing TIFF.
//!
//! Rules are tried in order and the first match wins:
//!
//! | Signature / make                        | Kind        | IFD start         | Pointer base |
//! |-----------------------------------------|-------------|-------------------|--------------|
//! | `OLYMP`, `EPSON`, `AGFA`                | Olympus     | +8                | TIFF header  |
//! | make `NIKON*`, `Nikon`, version 1       | Nikon 1     | +8                | TIFF header  |
//! | make `NIKON*`, `Nikon`, version 2       | Nikon 2     | +18               | blob + 10    |
//! | make `NIKON*`, no header                | Nikon 2     | +0                | TIFF header  |
//! | `SONY CAM`, `SONY DSC`                  | Sony        | +12               | TIFF header  |
//! | `KDK`                                   | Kodak       | +20               | TIFF header  |
//! | make `Canon`                            | Canon       | +0                | TIFF header  |
//! | make `CASIO*`, `QVC\0\0\0`              | Casio 2     | +6                | TIFF header  |
//! | make `CASIO*`                           | Casio 1     | +0                | TIFF header  |
//! | `FUJIFILM` or make `Fujifilm`           | Fujifilm    | +u32 at +8 (LE)   | TIFF header  |
//! | make `MINOLTA*`                         | Olympus     | +0                | TIFF header  |
//! | `KC`, `MINOL`, `MLY`, `+M+M+M+M`        | unsupported |                   |              |
//! | `KYOCERA`                               | Kyocera     | +22               | TIFF header  |
//! | `Panasonic\0\0\0`                       | Panasonic   | +12               | TIFF header  |
//! | `AOC\0`                                 | Casio 2     | +6                | blob         |
//! | make `PENTAX*`, `ASAHI*`                | Pentax      | +0                | blob         |
//!
//! Fujifilm maker notes are always little-endian.

use crate::error::ExifError;
use crate::metadata::DirectoryKind;

use super::reader::{ByteOrder, ByteReader};

/// Where and how to walk a maker note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakernoteLayout {
    /// Directory receiving the maker-note tags
    pub kind: DirectoryKind,

    /// Absolute offset of the maker-note IFD
    pub ifd_offset: usize,

    /// Base that IFD pointers inside the maker note are relative to
    pub tiff_header_offset: usize,

    /// Byte order forced for the maker-note subtree, if it differs from the TIFF's
    pub byte_order: Option<ByteOrder>,
}

impl MakernoteLayout {
    fn new(kind: DirectoryKind, ifd_offset: usize, tiff_header_offset: usize) -> Self {
        MakernoteLayout {
            kind,
            ifd_offset,
            tiff_header_offset,
            byte_order: None,
        }
    }
}

/// Camera make, trimmed and compared case-insensitively.
struct Make<'s>(Option<&'s str>);

impl Make<'_> {
    fn is(&self, name: &str) -> bool {
        self.0.is_some_and(|make| make.trim().eq_ignore_ascii_case(name))
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.0.is_some_and(|make| {
            let make = make.trim();
            make.len() >= prefix.len()
                && make.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        })
    }
}

/// Pick the layout of the maker note whose blob starts at `blob_offset`.
///
/// `tiff_header_offset` is the base used by the enclosing IFD and `make` the
/// camera make recorded so far, if any.
///
/// # Errors
/// - `UnsupportedNikonMakernote` for a `Nikon` header with an unknown version
/// - `UnsupportedKonicaMinoltaMakernote` for Konica/Minolta layouts
/// - `UnsupportedMakernote` when nothing matches
/// - `OutOfBounds` if a header field needed to locate the IFD is missing
pub fn select_layout(
    reader: ByteReader<'_>,
    blob_offset: usize,
    tiff_header_offset: usize,
    make: Option<&str>,
) -> Result<MakernoteLayout, ExifError> {
    let make = Make(make);
    let has_prefix = |prefix: &[u8]| reader.starts_with(blob_offset, prefix);
    let at = |delta: usize| blob_offset.saturating_add(delta);
    let layout = |kind, delta| MakernoteLayout::new(kind, at(delta), tiff_header_offset);

    if has_prefix(b"OLYMP") || has_prefix(b"EPSON") || has_prefix(b"AGFA") {
        return Ok(layout(DirectoryKind::Olympus, 8));
    }

    if make.starts_with("NIKON") {
        if !has_prefix(b"Nikon") {
            // IFD starts right away (Coolpix 775, E990, D1)
            return Ok(layout(DirectoryKind::NikonType2, 0));
        }
        return match reader.read_u8(at(6))? {
            1 => Ok(layout(DirectoryKind::NikonType1, 8)),
            // Embedded TIFF header at +10; pointers are relative to it
            2 => Ok(MakernoteLayout::new(DirectoryKind::NikonType2, at(18), at(10))),
            version => Err(ExifError::UnsupportedNikonMakernote(version)),
        };
    }

    if has_prefix(b"SONY CAM") || has_prefix(b"SONY DSC") {
        return Ok(layout(DirectoryKind::Sony, 12));
    }

    if has_prefix(b"KDK") {
        return Ok(layout(DirectoryKind::Kodak, 20));
    }

    if make.is("Canon") {
        return Ok(layout(DirectoryKind::Canon, 0));
    }

    if make.starts_with("CASIO") {
        if has_prefix(b"QVC\0\0\0") {
            return Ok(layout(DirectoryKind::CasioType2, 6));
        }
        return Ok(layout(DirectoryKind::CasioType1, 0));
    }

    if has_prefix(b"FUJIFILM") || make.is("Fujifilm") {
        // The IFD offset after the signature is relative to the blob itself
        let reader = reader.with_byte_order(ByteOrder::LittleEndian);
        let ifd_start = reader.read_u32(at(8))?;
        return Ok(MakernoteLayout {
            byte_order: Some(ByteOrder::LittleEndian),
            ..layout(DirectoryKind::Fujifilm, ifd_start as usize)
        });
    }

    if make.starts_with("MINOLTA") {
        return Ok(layout(DirectoryKind::Olympus, 0));
    }

    if has_prefix(b"KC") || has_prefix(b"MINOL") || has_prefix(b"MLY") || has_prefix(b"+M+M+M+M")
    {
        return Err(ExifError::UnsupportedKonicaMinoltaMakernote);
    }

    if has_prefix(b"KYOCERA") {
        return Ok(layout(DirectoryKind::Kyocera, 22));
    }

    if has_prefix(b"Panasonic\0\0\0") {
        return Ok(layout(DirectoryKind::Panasonic, 12));
    }

    if has_prefix(b"AOC\0") {
        return Ok(MakernoteLayout::new(DirectoryKind::CasioType2, at(6), blob_offset));
    }

    if make.starts_with("PENTAX") || make.starts_with("ASAHI") {
        return Ok(MakernoteLayout::new(DirectoryKind::Pentax, blob_offset, blob_offset));
    }

    Err(ExifError::UnsupportedMakernote)
}

// =============================================================================
// Tests
// =============================================================================
