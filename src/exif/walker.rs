//! IFD walker.
//!
//! # IFD Structure
//!
//! ```text
//! 2 bytes            entry count N
//! N x 12 bytes       entries:
//!                      2 bytes tag id
//!                      2 bytes format code
//!                      4 bytes component count
//!                      4 bytes value (if it fits) or pointer to the value
//! 4 bytes            offset of the next IFD (0 = none)
//! ```
//!
//! Pointers are relative to a base (normally the TIFF header, but some maker
//! notes use their own). Every pointer is bounds-checked before use, and the
//! start offset of every IFD is remembered so cyclic or repeated links are
//! visited once.
//!
//! Directories are kept on an explicit stack rather than the call stack. A
//! sub-directory is pushed on top of its parent and finished (including its
//! own next-IFD chain) before the parent's remaining entries are read, so
//! arbitrarily long chains of links or pointers decode in bounded stack space.
//!
//! Failures are recorded on the directory being decoded. A bad entry is
//! skipped; a bad directory header abandons that directory only.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::ExifError;
use crate::metadata::{DirectoryKind, Metadata};

use super::decoder::decode_value;
use super::format::FormatCode;
use super::makernote::select_layout;
use super::reader::ByteReader;
use super::tags::{PointerTag, TAG_MAKE};

/// Size of one IFD entry in bytes
const ENTRY_SIZE: usize = 12;

/// Size of the entry count at the start of an IFD
const ENTRY_COUNT_SIZE: usize = 2;

/// Size of the next-IFD link at the end of an IFD
const NEXT_IFD_SIZE: usize = 4;

/// Offset of entry `index` in the IFD starting at `ifd_offset`.
#[inline]
fn entry_offset(ifd_offset: usize, index: usize) -> usize {
    ifd_offset + ENTRY_COUNT_SIZE + ENTRY_SIZE * index
}

/// Directory a pointer tag leads to, or `None` for maker notes.
fn subdirectory_kind(pointer: PointerTag) -> Option<DirectoryKind> {
    match pointer {
        PointerTag::ExifOffset => Some(DirectoryKind::Exif),
        PointerTag::GpsInfoOffset => Some(DirectoryKind::Gps),
        PointerTag::InteropOffset => Some(DirectoryKind::Interop),
        PointerTag::MakerNote => None,
    }
}

/// An IFD to descend into.
#[derive(Clone, Copy)]
struct Target<'a> {
    reader: ByteReader<'a>,
    kind: DirectoryKind,
    ifd_offset: usize,
    tiff_header_offset: usize,
}

/// An IFD whose header has been validated and whose entries are being read.
#[derive(Clone, Copy)]
struct Frame<'a> {
    target: Target<'a>,
    entry_count: usize,
    next_entry: usize,
}

/// Walks one directory tree, writing into a caller-owned [`Metadata`].
///
/// The byte order travels with the [`ByteReader`] of each directory, so a
/// sub-tree decoded with another order never affects its caller.
pub struct DirectoryWalker<'m> {
    metadata: &'m mut Metadata,
    visited: HashSet<usize>,
}

impl<'m> DirectoryWalker<'m> {
    pub fn new(metadata: &'m mut Metadata) -> Self {
        Self {
            metadata,
            visited: HashSet::new(),
        }
    }

    /// Offsets of every IFD processed so far.
    pub fn visited(&self) -> &HashSet<usize> {
        &self.visited
    }

    /// Decode the IFD at `ifd_offset` (and everything it links to) into `kind`.
    ///
    /// Offsets already visited during this walk are skipped silently.
    pub fn walk(
        &mut self,
        reader: ByteReader<'_>,
        kind: DirectoryKind,
        ifd_offset: usize,
        tiff_header_offset: usize,
    ) {
        let mut stack = Vec::new();
        self.enter(
            &mut stack,
            Target {
                reader,
                kind,
                ifd_offset,
                tiff_header_offset,
            },
        );

        while let Some(frame) = stack.last_mut() {
            if frame.next_entry < frame.entry_count {
                let entry = entry_offset(frame.target.ifd_offset, frame.next_entry);
                frame.next_entry += 1;
                let target = frame.target;

                match self.process_entry(target, entry) {
                    Ok(Some(child)) => self.enter(&mut stack, child),
                    Ok(None) => {}
                    Err(err) => self.record(target.kind, err),
                }
                continue;
            }

            let Some(frame) = stack.pop() else { break };
            match next_ifd(frame) {
                Ok(Some(next)) => self.enter(&mut stack, next),
                Ok(None) => {}
                Err(err) => self.record(frame.target.kind, err),
            }
        }
    }

    /// Validate the header of `target` and push it onto `stack`.
    fn enter<'a>(&mut self, stack: &mut Vec<Frame<'a>>, target: Target<'a>) {
        let kind = target.kind;
        self.metadata.get_or_create_directory(kind);

        if !self.visited.insert(target.ifd_offset) {
            trace!(
                directory = kind.name(),
                ifd_offset = target.ifd_offset,
                "IFD already visited"
            );
            return;
        }

        debug!(
            directory = kind.name(),
            ifd_offset = target.ifd_offset,
            tiff_header_offset = target.tiff_header_offset,
            byte_order = ?target.reader.byte_order(),
            depth = stack.len(),
            "Walking IFD"
        );

        match directory_entry_count(target) {
            Ok(entry_count) => stack.push(Frame {
                target,
                entry_count,
                next_entry: 0,
            }),
            Err(err) => self.record(kind, err),
        }
    }

    fn record(&mut self, kind: DirectoryKind, err: ExifError) {
        self.metadata
            .get_or_create_directory(kind)
            .add_error(err.to_string());
    }

    /// Decode one entry, returning the sub-directory it points to, if any.
    fn process_entry<'a>(
        &mut self,
        target: Target<'a>,
        entry: usize,
    ) -> Result<Option<Target<'a>>, ExifError> {
        let Target {
            reader,
            kind,
            tiff_header_offset,
            ..
        } = target;

        let tag = reader.read_u16(entry)?;

        let format_code = reader.read_u16(entry + 2)?;
        let format =
            FormatCode::from_u16(format_code).ok_or(ExifError::InvalidFormatCode(format_code))?;

        let count = reader.read_u32(entry + 4)?;
        if count > i32::MAX as u32 {
            return Err(ExifError::NegativeComponentCount(count));
        }

        let value_offset = value_offset(reader, format, count, entry, tiff_header_offset)?;

        trace!(
            directory = kind.name(),
            tag,
            ?format,
            count,
            value_offset,
            "IFD entry"
        );

        if let Some(pointer) = PointerTag::from_u16(tag) {
            return match subdirectory_kind(pointer) {
                Some(sub_kind) => {
                    let pointer = reader.read_u32(value_offset)?;
                    Ok(Some(Target {
                        reader,
                        kind: sub_kind,
                        ifd_offset: tiff_header_offset.saturating_add(pointer as usize),
                        tiff_header_offset,
                    }))
                }
                None => Ok(self.process_makernote(reader, value_offset, tiff_header_offset)),
            };
        }

        let value = decode_value(reader, format, count, value_offset)?;
        self.metadata.get_or_create_directory(kind).set(tag, value);
        Ok(None)
    }

    /// Locate the vendor directory of a maker-note blob.
    ///
    /// Unsupported layouts are recorded on the Exif directory.
    fn process_makernote<'a>(
        &mut self,
        reader: ByteReader<'a>,
        blob_offset: usize,
        tiff_header_offset: usize,
    ) -> Option<Target<'a>> {
        let exif = self.metadata.directory(DirectoryKind::Exif)?;
        let make = exif.get_string(TAG_MAKE).map(str::to_owned);

        match select_layout(reader, blob_offset, tiff_header_offset, make.as_deref()) {
            Ok(layout) => {
                debug!(
                    make = make.as_deref().unwrap_or(""),
                    directory = layout.kind.name(),
                    ifd_offset = layout.ifd_offset,
                    "Decoding maker note"
                );
                let reader = match layout.byte_order {
                    Some(byte_order) => reader.with_byte_order(byte_order),
                    None => reader,
                };
                Some(Target {
                    reader,
                    kind: layout.kind,
                    ifd_offset: layout.ifd_offset,
                    tiff_header_offset: layout.tiff_header_offset,
                })
            }
            Err(err) => {
                self.record(DirectoryKind::Exif, err);
                None
            }
        }
    }
}

/// Check that the whole entry table of `target` fits the segment.
fn directory_entry_count(target: Target<'_>) -> Result<usize, ExifError> {
    let Target {
        reader, ifd_offset, ..
    } = target;
    if ifd_offset >= reader.len() {
        return Err(ExifError::DirectoryOutsideSegment(ifd_offset));
    }

    let entry_count = reader.read_u16(ifd_offset)?;
    let directory_length = ENTRY_COUNT_SIZE + ENTRY_SIZE * entry_count as usize + NEXT_IFD_SIZE;
    if ifd_offset + directory_length > reader.len() {
        return Err(ExifError::IllegalDirectorySize {
            offset: ifd_offset,
            entry_count,
        });
    }

    Ok(entry_count as usize)
}

/// The optional link to the next IFD of the same kind.
fn next_ifd(frame: Frame<'_>) -> Result<Option<Target<'_>>, ExifError> {
    let target = frame.target;
    let next = target
        .reader
        .read_u32(entry_offset(target.ifd_offset, frame.entry_count))?;
    if next == 0 {
        return Ok(None);
    }

    let next = target.tiff_header_offset.saturating_add(next as usize);
    if next >= target.reader.len() || next < target.ifd_offset {
        // Out of range or backwards links are a known, tolerated malformation
        debug!(directory = target.kind.name(), next, "Ignoring next IFD link");
        return Ok(None);
    }

    Ok(Some(Target {
        ifd_offset: next,
        ..target
    }))
}

/// Resolve where the value of the entry at `entry` lives.
///
/// Values larger than four bytes sit behind a pointer relative to
/// `tiff_header_offset`; smaller ones are stored in the entry itself.
fn value_offset(
    reader: ByteReader<'_>,
    format: FormatCode,
    count: u32,
    entry: usize,
    tiff_header_offset: usize,
) -> Result<usize, ExifError> {
    let len = reader.len() as u64;
    let byte_count = format.byte_count(count);

    let offset = if format.fits_inline(count) {
        entry + 8
    } else {
        let pointer = reader.read_u32(entry + 8)?;
        if pointer as u64 + byte_count > len {
            return Err(ExifError::IllegalPointerOffset);
        }
        tiff_header_offset.saturating_add(pointer as usize)
    };

    if offset as u64 > len {
        return Err(ExifError::IllegalPointerOffset);
    }
    if offset as u64 + byte_count > len {
        return Err(ExifError::IllegalByteCount(byte_count));
    }

    Ok(offset)
}

// =============================================================================
// Tests
// =============================================================================
