//! Tag value decoding.
//!
//! Turns the bytes behind one IFD entry into a [`TagValue`]. The walker has
//! already validated the format code and the value range; the decoder still
//! reads through the bounds-checked [`ByteReader`] so it can be used on its own.
//!
//! Single- and double-precision entries are not decoded as IEEE floats:
//! each component is read as one signed byte, like the byte formats. Those
//! codes are rarely used for floating-point data in Exif, and consumers rely
//! on this raw form.

use tracing::trace;

use crate::error::ExifError;
use crate::metadata::{Rational, TagValue};

use super::format::FormatCode;
use super::reader::ByteReader;

/// Decode `count` components of `format` located at `offset`.
///
/// A count of one yields a scalar, any other count (including zero) an array.
/// Strings stop at the first NUL within `count` bytes.
///
/// # Errors
/// `OutOfBounds` if the value would run past the end of the segment.
pub fn decode_value(
    reader: ByteReader<'_>,
    format: FormatCode,
    count: u32,
    offset: usize,
) -> Result<TagValue, ExifError> {
    let byte_count = usize::try_from(format.byte_count(count))
        .map_err(|_| ExifError::out_of_bounds(offset, reader.len()))?;
    let raw = reader.read_raw(offset, byte_count)?;
    let order = reader.byte_order();
    let count = count as usize;

    trace!(?format, count, offset, "Decoding tag value");

    let value = match format {
        FormatCode::Undefined => TagValue::ByteArray(reader.read_slice(offset, count)?),
        FormatCode::String => {
            let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
            TagValue::String(String::from_utf8_lossy(&raw[..end]).into_owned())
        }
        FormatCode::URational | FormatCode::SRational => {
            let signed = format == FormatCode::SRational;
            let rationals: Vec<Rational> = raw
                .chunks_exact(8)
                .map(|pair| {
                    let numerator = order.read_u32(&pair[..4]);
                    let denominator = order.read_u32(&pair[4..]);
                    if signed {
                        Rational::new(numerator as i32 as i64, denominator as i32 as i64)
                    } else {
                        Rational::new(numerator as i64, denominator as i64)
                    }
                })
                .collect();
            match rationals.as_slice() {
                [single] if count == 1 => TagValue::Rational(*single),
                _ => TagValue::RationalArray(rationals),
            }
        }
        FormatCode::Byte | FormatCode::SByte | FormatCode::Single | FormatCode::Double => {
            int_value(raw[..count].iter().map(|&b| b as i8 as i64).collect())
        }
        FormatCode::UShort => int_value(
            raw.chunks_exact(2)
                .map(|c| order.read_u16(c) as i64)
                .collect(),
        ),
        FormatCode::SShort => int_value(
            raw.chunks_exact(2)
                .map(|c| order.read_u16(c) as i16 as i64)
                .collect(),
        ),
        FormatCode::ULong => int_value(
            raw.chunks_exact(4)
                .map(|c| order.read_u32(c) as i64)
                .collect(),
        ),
        FormatCode::SLong => int_value(
            raw.chunks_exact(4)
                .map(|c| order.read_u32(c) as i32 as i64)
                .collect(),
        ),
    };

    Ok(value)
}

fn int_value(values: Vec<i64>) -> TagValue {
    match values.as_slice() {
        [single] => TagValue::Int(*single),
        _ => TagValue::IntArray(values),
    }
}

// =============================================================================
// Tests
// =============================================================================
