//! Tests for tag-character descriptors

use tpmwire::codec::{pack_format, parse_format, unpack_format, FieldKind, PackField, UnpackField};
use tpmwire::TpmError;

#[test]
fn test_parse_format_tags() {
    let kinds = parse_format("bwds").unwrap();
    assert_eq!(
        kinds,
        vec![FieldKind::U8, FieldKind::U16, FieldKind::U32, FieldKind::Bytes]
    );
}

#[test]
fn test_parse_format_unknown_tag() {
    let result = parse_format("wdx");
    assert!(matches!(result, Err(TpmError::Format(_))));
}

#[test]
fn test_field_kind_widths() {
    assert_eq!(FieldKind::U8.width(), Some(1));
    assert_eq!(FieldKind::U16.width(), Some(2));
    assert_eq!(FieldKind::U32.width(), Some(4));
    assert_eq!(FieldKind::Bytes.width(), None);
    assert_eq!(FieldKind::from_tag('d').unwrap().tag(), 'd');
}

#[test]
fn test_pack_format_header() {
    let mut buf = [0u8; 10];
    pack_format(
        &mut buf,
        "wdd",
        &[
            PackField::U16 { offset: 0, value: 0x8001 },
            PackField::U32 { offset: 2, value: 10 },
            PackField::U32 { offset: 6, value: 0x17A },
        ],
    )
    .unwrap();
    assert_eq!(buf, [0x80, 0x01, 0, 0, 0, 10, 0, 0, 0x01, 0x7A]);
}

#[test]
fn test_pack_format_count_mismatch() {
    let mut buf = [0u8; 10];
    let result = pack_format(&mut buf, "wd", &[PackField::U16 { offset: 0, value: 1 }]);
    assert!(matches!(result, Err(TpmError::Format(_))));
    assert_eq!(buf, [0u8; 10]);
}

#[test]
fn test_pack_format_kind_mismatch() {
    let mut buf = [0u8; 10];
    let result = pack_format(&mut buf, "b", &[PackField::U32 { offset: 0, value: 1 }]);
    assert!(matches!(result, Err(TpmError::Format(_))));
    assert_eq!(buf, [0u8; 10]);
}

#[test]
fn test_unpack_format_reads_fields() {
    let buf = [0x80, 0x01, 0, 0, 0, 10, 0, 0, 0, 0];
    let (mut tag, mut size) = (0u16, 0u32);
    unpack_format(
        &buf,
        "wd",
        &mut [
            UnpackField::U16 { offset: 0, out: &mut tag },
            UnpackField::U32 { offset: 2, out: &mut size },
        ],
    )
    .unwrap();
    assert_eq!(tag, 0x8001);
    assert_eq!(size, 10);
}

#[test]
fn test_unpack_format_unknown_tag() {
    let buf = [0u8; 4];
    let mut value = 0u8;
    let result = unpack_format(&buf, "q", &mut [UnpackField::U8 { offset: 0, out: &mut value }]);
    assert!(matches!(result, Err(TpmError::Format(_))));
}
