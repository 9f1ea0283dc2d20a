//! Maker note integration tests.
//!
//! Tests verify:
//! - Every vendor signature and camera make routes to its directory
//! - Unsupported layouts are recorded on the Exif directory
//! - A little-endian Fujifilm maker note inside a big-endian file does not
//!   change how the rest of the file is decoded

use exif_decoder::{read_exif_segment, DirectoryKind, Metadata, TagValue};

use super::test_utils::{
    build_exif_with_makernote, makernote_blob, ByteOrderType, MAKERNOTE_TEST_TAG,
    MAKERNOTE_TEST_VALUE, TRAILING_TAG, TRAILING_VALUE,
};

fn decode(order: ByteOrderType, make: Option<&str>, blob: &[u8]) -> Metadata {
    read_exif_segment(build_exif_with_makernote(order, make, blob))
}

/// Decode in both byte orders and check the maker note landed in `kind`.
fn assert_routes_to(make: Option<&str>, header: &[u8], ifd_start: usize, kind: DirectoryKind) {
    for order in ByteOrderType::BOTH {
        let blob = makernote_blob(header, ifd_start, order);
        let metadata = decode(order, make, &blob);

        let exif = metadata.directory(DirectoryKind::Exif).unwrap();
        assert!(
            !exif.has_errors(),
            "{:?} ({:?}): {:?}",
            kind,
            order,
            exif.errors()
        );
        assert_eq!(exif.get_int(TRAILING_TAG), Some(TRAILING_VALUE as i64));

        let makernote = metadata
            .directory(kind)
            .unwrap_or_else(|| panic!("{:?} directory missing ({:?})", kind, order));
        assert_eq!(
            makernote.get(MAKERNOTE_TEST_TAG),
            Some(&TagValue::Int(MAKERNOTE_TEST_VALUE as i64)),
            "{:?} ({:?})",
            kind,
            order
        );
        assert!(!makernote.has_errors());
    }
}

fn assert_rejected(make: Option<&str>, header: &[u8], message: &str) {
    for order in ByteOrderType::BOTH {
        let blob = makernote_blob(header, header.len().max(8), order);
        let metadata = decode(order, make, &blob);

        let exif = metadata.directory(DirectoryKind::Exif).unwrap();
        assert_eq!(exif.errors(), [message]);
        assert_eq!(exif.get_int(TRAILING_TAG), Some(TRAILING_VALUE as i64));
        assert_eq!(metadata.directory_count(), 1, "no maker-note directory expected");
    }
}

// =============================================================================
// Signature Routing
// =============================================================================

#[test]
fn test_olympus_family_signatures() {
    assert_routes_to(None, b"OLYMP\0\x01\0", 8, DirectoryKind::Olympus);
    assert_routes_to(Some("SEIKO EPSON CORP."), b"EPSON\0\x01\0", 8, DirectoryKind::Olympus);
    assert_routes_to(Some("AGFA"), b"AGFA \0\x01\0", 8, DirectoryKind::Olympus);
}

#[test]
fn test_nikon_type1() {
    assert_routes_to(Some("NIKON"), b"Nikon\0\x01\0", 8, DirectoryKind::NikonType1);
}

#[test]
fn test_nikon_type2_with_embedded_header() {
    let header = b"Nikon\0\x02\x10\0\0MM\0\x2A\0\0\0\x08";
    assert_routes_to(
        Some("NIKON CORPORATION"),
        header,
        18,
        DirectoryKind::NikonType2,
    );
}

#[test]
fn test_nikon_type2_without_header() {
    assert_routes_to(Some("NIKON"), b"", 0, DirectoryKind::NikonType2);
    assert_routes_to(Some("Nikon"), b"", 0, DirectoryKind::NikonType2);
}

#[test]
fn test_sony() {
    assert_routes_to(Some("SONY"), b"SONY DSC \0\0\0", 12, DirectoryKind::Sony);
    assert_routes_to(Some("SONY"), b"SONY CAM \0\0\0", 12, DirectoryKind::Sony);
}

#[test]
fn test_kodak() {
    assert_routes_to(
        Some("EASTMAN KODAK COMPANY"),
        b"KDK INFO",
        20,
        DirectoryKind::Kodak,
    );
}

#[test]
fn test_canon() {
    assert_routes_to(Some("Canon"), b"", 0, DirectoryKind::Canon);
    assert_routes_to(Some("Canon   "), b"", 0, DirectoryKind::Canon);
}

#[test]
fn test_casio() {
    assert_routes_to(
        Some("CASIO COMPUTER CO.,LTD."),
        b"QVC\0\0\0",
        6,
        DirectoryKind::CasioType2,
    );
    assert_routes_to(Some("CASIO"), b"", 0, DirectoryKind::CasioType1);
}

#[test]
fn test_minolta_make_uses_olympus_layout() {
    assert_routes_to(Some("MINOLTA CO.,LTD"), b"", 0, DirectoryKind::Olympus);
}

#[test]
fn test_kyocera() {
    assert_routes_to(Some("KYOCERA"), b"KYOCERA            ", 22, DirectoryKind::Kyocera);
}

#[test]
fn test_panasonic() {
    assert_routes_to(
        Some("Panasonic"),
        b"Panasonic\0\0\0",
        12,
        DirectoryKind::Panasonic,
    );
}

#[test]
fn test_aoc_signature_wins_over_pentax_make() {
    assert_routes_to(
        Some("PENTAX Corporation"),
        b"AOC\0MM",
        6,
        DirectoryKind::CasioType2,
    );
}

#[test]
fn test_pentax_and_asahi_makes() {
    assert_routes_to(Some("PENTAX Corporation"), b"", 0, DirectoryKind::Pentax);
    assert_routes_to(Some("Asahi Optical Co.,Ltd"), b"", 0, DirectoryKind::Pentax);
}

// =============================================================================
// Fujifilm Byte Order
// =============================================================================

fn fujifilm_blob() -> Vec<u8> {
    let mut header = b"FUJIFILM".to_vec();
    header.extend_from_slice(&12u32.to_le_bytes());
    makernote_blob(&header, 12, ByteOrderType::LittleEndian)
}

#[test]
fn test_fujifilm_in_little_endian_file() {
    let metadata = decode(ByteOrderType::LittleEndian, Some("FUJIFILM"), &fujifilm_blob());

    let fuji = metadata.directory(DirectoryKind::Fujifilm).unwrap();
    assert_eq!(fuji.get_int(MAKERNOTE_TEST_TAG), Some(MAKERNOTE_TEST_VALUE as i64));
}

#[test]
fn test_fujifilm_in_big_endian_file_restores_order() {
    let metadata = decode(ByteOrderType::BigEndian, Some("FUJIFILM"), &fujifilm_blob());

    let fuji = metadata.directory(DirectoryKind::Fujifilm).unwrap();
    assert_eq!(fuji.get_int(MAKERNOTE_TEST_TAG), Some(MAKERNOTE_TEST_VALUE as i64));
    assert!(!fuji.has_errors());

    // Entry after the maker note is still read big-endian
    let exif = metadata.directory(DirectoryKind::Exif).unwrap();
    assert_eq!(exif.get_int(TRAILING_TAG), Some(TRAILING_VALUE as i64));
    assert!(!exif.has_errors());
}

// =============================================================================
// Unsupported Layouts
// =============================================================================

#[test]
fn test_unknown_vendor() {
    assert_rejected(
        Some("Acme Imaging"),
        b"ACME\0\0",
        "Unsupported makernote data ignored.",
    );
    assert_rejected(None, b"ACME\0\0", "Unsupported makernote data ignored.");
}

#[test]
fn test_konica_minolta_signatures() {
    let headers: [&[u8]; 4] = [b"KC", b"MINOL", b"MLY0", b"+M+M+M+M"];
    for header in headers {
        assert_rejected(None, header, "Unsupported Konica/Minolta data ignored.");
    }
}

#[test]
fn test_nikon_unknown_version() {
    assert_rejected(
        Some("NIKON"),
        b"Nikon\0\x03\0",
        "Unsupported Nikon makernote data ignored.",
    );
}

#[test]
fn test_signature_without_make() {
    let blob = makernote_blob(b"OLYMP\0\x01\0", 8, ByteOrderType::BigEndian);
    let metadata = decode(ByteOrderType::BigEndian, None, &blob);

    assert!(metadata.contains_directory(DirectoryKind::Olympus));
    assert!(!metadata.contains_directory(DirectoryKind::Canon));
}
