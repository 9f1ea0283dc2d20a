//! Entry points for decoding a whole segment.

use bytes::Bytes;
use tracing::debug;

use crate::error::ExifError;
use crate::metadata::{DirectoryKind, Metadata};

use super::header::TiffHeader;
use super::reader::ByteReader;
use super::thumbnail::store_thumbnail;
use super::walker::DirectoryWalker;

/// Preamble that starts every Exif APP1 segment
pub const EXIF_PREAMBLE: &[u8; 6] = b"Exif\0\0";

/// Position of the TIFF header in an Exif segment
pub const TIFF_HEADER_START_OFFSET: usize = 6;

/// An Exif segment must be strictly longer than this
const MIN_SEGMENT_LENGTH: usize = 14;

/// Where the first IFD normally starts in an Exif segment; used when the
/// header points past the end of the data
const FALLBACK_FIRST_IFD_OFFSET: usize = 14;

/// Whether `data` starts with the Exif preamble.
pub fn has_exif_preamble(data: &[u8]) -> bool {
    data.starts_with(EXIF_PREAMBLE)
}

/// Decodes one Exif segment or raw TIFF buffer into a [`Metadata`] store.
///
/// Decoding never fails: problems are recorded as error strings on the
/// directory being decoded, and everything that could be read is kept.
///
/// # Example
///
/// ```
/// use exif_decoder::{DirectoryKind, ExifReader, Metadata};
///
/// let mut metadata = Metadata::new();
/// ExifReader::new(&b"not exif"[..]).extract(&mut metadata);
///
/// let exif = metadata.directory(DirectoryKind::Exif).unwrap();
/// assert_eq!(exif.errors(), ["Exif data segment must contain at least 14 bytes"]);
/// ```
#[derive(Debug, Clone)]
pub struct ExifReader {
    data: Bytes,
}

impl ExifReader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// The segment being decoded.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Decode an Exif segment starting with the `Exif\0\0` preamble.
    pub fn extract(&self, metadata: &mut Metadata) {
        let directory = metadata.get_or_create_directory(DirectoryKind::Exif);

        if self.data.len() <= MIN_SEGMENT_LENGTH {
            directory.add_error(ExifError::SegmentTooShort.to_string());
            return;
        }
        if !has_exif_preamble(&self.data) {
            directory.add_error(ExifError::BadPreamble.to_string());
            return;
        }

        self.extract_ifd(metadata, TIFF_HEADER_START_OFFSET);
    }

    /// Decode a raw TIFF buffer (TIFF header at byte 0, no preamble).
    pub fn extract_tiff(&self, metadata: &mut Metadata) {
        self.extract_ifd(metadata, 0);
    }

    fn extract_ifd(&self, metadata: &mut Metadata, tiff_header_offset: usize) {
        metadata.get_or_create_directory(DirectoryKind::Exif);

        let header = match TiffHeader::parse(&self.data, tiff_header_offset) {
            Ok(header) => header,
            Err(err) => {
                metadata
                    .get_or_create_directory(DirectoryKind::Exif)
                    .add_error(err.to_string());
                return;
            }
        };

        let mut first_ifd_offset = header.first_ifd_offset;
        if first_ifd_offset >= self.data.len().saturating_sub(1) {
            metadata
                .get_or_create_directory(DirectoryKind::Exif)
                .add_error(ExifError::FirstIfdBeyondEnd.to_string());
            first_ifd_offset = FALLBACK_FIRST_IFD_OFFSET;
        }

        debug!(
            len = self.data.len(),
            byte_order = ?header.byte_order,
            tiff_header_offset = header.tiff_header_offset,
            first_ifd_offset,
            "Decoding TIFF structure"
        );

        let reader = ByteReader::new(&self.data, header.byte_order);

        // IFD0 is merged with the Exif sub-IFD
        let mut walker = DirectoryWalker::new(metadata);
        walker.walk(
            reader,
            DirectoryKind::Exif,
            first_ifd_offset,
            header.tiff_header_offset,
        );

        store_thumbnail(
            reader,
            metadata.get_or_create_directory(DirectoryKind::Exif),
            header.tiff_header_offset,
        );
    }
}

/// Decode an Exif segment into a fresh [`Metadata`].
pub fn read_exif_segment(data: impl Into<Bytes>) -> Metadata {
    let mut metadata = Metadata::new();
    ExifReader::new(data).extract(&mut metadata);
    metadata
}

/// Decode a raw TIFF buffer into a fresh [`Metadata`].
pub fn read_tiff(data: impl Into<Bytes>) -> Metadata {
    let mut metadata = Metadata::new();
    ExifReader::new(data).extract_tiff(&mut metadata);
    metadata
}
