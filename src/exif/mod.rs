//! Exif/TIFF directory decoder.
//!
//! This module decodes the TIFF structure carried by an Exif APP1 segment
//! (or a raw TIFF file) into a [`Metadata`](crate::Metadata) store.
//!
//! # Key Concepts
//!
//! - **Byte order**: declared by the TIFF header (`II` = little-endian,
//!   `MM` = big-endian). Fujifilm maker notes are always little-endian.
//!
//! - **IFD (Image File Directory)**: a table of 12-byte entries followed by a
//!   link to the next IFD. Pointer tags lead to the Exif, GPS and
//!   interoperability sub-IFDs and to the vendor maker note.
//!
//! - **Inline vs offset values**: values of up to four bytes are stored in
//!   the entry; larger ones live at an offset relative to the TIFF header
//!   (or to a vendor-specific base inside some maker notes).
//!
//! - **Tolerance**: every offset is bounds-checked, IFD offsets are visited
//!   at most once, and failures are recorded on the directory being decoded
//!   instead of aborting the whole segment.

mod decoder;
mod extractor;
mod format;
mod header;
mod makernote;
mod reader;
mod tags;
mod thumbnail;
mod walker;

pub use decoder::decode_value;
pub use extractor::{
    has_exif_preamble, read_exif_segment, read_tiff, ExifReader, EXIF_PREAMBLE,
    TIFF_HEADER_START_OFFSET,
};
pub use format::FormatCode;
pub use header::TiffHeader;
pub use makernote::{select_layout, MakernoteLayout};
pub use reader::{ByteOrder, ByteReader};
pub use tags::{
    PointerTag, TAG_MAKE, TAG_THUMBNAIL_COMPRESSION, TAG_THUMBNAIL_DATA, TAG_THUMBNAIL_LENGTH,
    TAG_THUMBNAIL_OFFSET,
};
pub use thumbnail::store_thumbnail;
pub use walker::DirectoryWalker;
