//! Thumbnail extraction.
//!
//! IFD1 describes an embedded JPEG thumbnail with an offset and a length.
//! Because IFD1 merges into the Exif directory, this runs once after the
//! whole tree has been walked.

use bytes::Bytes;

use crate::error::ExifError;
use crate::metadata::Directory;

use super::reader::ByteReader;
use super::tags::{
    TAG_THUMBNAIL_COMPRESSION, TAG_THUMBNAIL_DATA, TAG_THUMBNAIL_LENGTH, TAG_THUMBNAIL_OFFSET,
};

/// Copy the thumbnail referenced by `directory` into [`TAG_THUMBNAIL_DATA`].
///
/// Does nothing unless the compression, offset and length tags are all
/// present. Problems with the referenced range are recorded on `directory`.
pub fn store_thumbnail(
    reader: ByteReader<'_>,
    directory: &mut Directory,
    tiff_header_offset: usize,
) {
    if !directory.contains_tag(TAG_THUMBNAIL_COMPRESSION) {
        return;
    }
    if !directory.contains_tag(TAG_THUMBNAIL_LENGTH)
        || !directory.contains_tag(TAG_THUMBNAIL_OFFSET)
    {
        return;
    }

    match thumbnail_bytes(reader, directory, tiff_header_offset) {
        Ok(thumbnail) => directory.set_byte_array(TAG_THUMBNAIL_DATA, thumbnail),
        Err(err) => directory.add_error(err.to_string()),
    }
}

fn thumbnail_bytes(
    reader: ByteReader<'_>,
    directory: &Directory,
    tiff_header_offset: usize,
) -> Result<Bytes, ExifError> {
    let offset = directory
        .get_int(TAG_THUMBNAIL_OFFSET)
        .ok_or_else(|| ExifError::Thumbnail("thumbnail offset is not an integer".to_string()))?;
    let length = directory
        .get_int(TAG_THUMBNAIL_LENGTH)
        .ok_or_else(|| ExifError::Thumbnail("thumbnail length is not an integer".to_string()))?;

    let start = (tiff_header_offset as i64).saturating_add(offset);
    if length < 1 || start.saturating_add(length) > reader.len() as i64 {
        return Err(ExifError::BadThumbnailLength);
    }
    if start < 0 {
        return Err(ExifError::Thumbnail(format!(
            "thumbnail offset {} is before the segment start",
            offset
        )));
    }

    reader
        .read_slice(start as usize, length as usize)
        .map_err(|err| ExifError::Thumbnail(err.to_string()))
}
