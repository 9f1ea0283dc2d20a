//! # Exif Decoder
//!
//! A tolerant decoder for the Exif/TIFF tag directories embedded in JPEG and
//! TIFF files, including the vendor-specific maker notes written by most
//! camera manufacturers.
//!
//! The decoder works on one already-isolated byte segment: the payload of a
//! JPEG APP1 Exif segment (starting with `Exif\0\0`) or a whole raw TIFF
//! file. Malformed, truncated or cyclic input never panics; whatever can be
//! decoded is kept and every problem is recorded as an error string on the
//! directory it was found in.
//!
//! ## Architecture
//!
//! - [`exif`] - byte-order aware reader, IFD walker, tag value decoder,
//!   maker-note layout detection and thumbnail extraction
//! - [`metadata`] - the caller-owned store of decoded directories
//! - [`config`] - CLI configuration for the `exif-decoder` binary
//! - [`error`] - the error type behind every recorded error string
//!
//! ## Example
//!
//! ```
//! use exif_decoder::{read_tiff, DirectoryKind, TagValue};
//!
//! let tiff: &[u8] = &[
//!     b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // Header, first IFD at 8
//!     0x01, 0x00, // 1 entry
//!     0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, // Orientation = 6
//!     0x00, 0x00, 0x00, 0x00, // No next IFD
//! ];
//!
//! let metadata = read_tiff(tiff);
//! let exif = metadata.directory(DirectoryKind::Exif).unwrap();
//! assert_eq!(exif.get(0x0112), Some(&TagValue::Int(6)));
//! assert!(!exif.has_errors());
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod metadata;

// Re-export commonly used types
pub use config::{Config, InputMode, OutputFormat};
pub use error::ExifError;
pub use exif::{
    read_exif_segment, read_tiff, ByteOrder, ByteReader, DirectoryWalker, ExifReader, FormatCode,
    MakernoteLayout, PointerTag, TiffHeader, EXIF_PREAMBLE, TIFF_HEADER_START_OFFSET,
};
pub use metadata::{Directory, DirectoryKind, Metadata, Rational, TagValue};
