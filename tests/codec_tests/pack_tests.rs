//! Tests for packing fields into buffers
//!
//! These tests verify:
//! - Big-endian placement of integer fields
//! - Verbatim byte-string copies
//! - Last-write-wins on overlapping fields
//! - Bounds checks leave the buffer untouched

use tpmwire::codec::{pack, PackField, Packer};
use tpmwire::TpmError;

// =============================================================================
// Placement Tests
// =============================================================================

#[test]
fn test_pack_u8() {
    let mut buf = [0u8; 4];
    Packer::new().u8(2, 0xAB).pack(&mut buf).unwrap();
    assert_eq!(buf, [0x00, 0x00, 0xAB, 0x00]);
}

#[test]
fn test_pack_u16_big_endian() {
    let mut buf = [0u8; 4];
    Packer::new().u16(1, 0x1234).pack(&mut buf).unwrap();
    assert_eq!(buf, [0x00, 0x12, 0x34, 0x00]);
}

#[test]
fn test_pack_u32_big_endian() {
    let mut buf = [0u8; 6];
    Packer::new().u32(2, 0xDEADBEEF).pack(&mut buf).unwrap();
    assert_eq!(buf, [0x00, 0x00, 0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_pack_bytes_verbatim() {
    let mut buf = [0u8; 6];
    Packer::new().bytes(1, &[0x01, 0x02, 0x03]).pack(&mut buf).unwrap();
    assert_eq!(buf, [0x00, 0x01, 0x02, 0x03, 0x00, 0x00]);
}

#[test]
fn test_pack_command_header() {
    // TPM2_SelfTest(fullTest = YES)
    let mut buf = [0u8; 11];
    Packer::new()
        .u16(0, 0x8001)
        .u32(2, 11)
        .u32(6, 0x0000_0143)
        .u8(10, 1)
        .pack(&mut buf)
        .unwrap();

    assert_eq!(
        buf,
        [0x80, 0x01, 0x00, 0x00, 0x00, 0x0B, 0x00, 0x00, 0x01, 0x43, 0x01]
    );
}

#[test]
fn test_pack_slice_of_fields() {
    let data = [0xAA, 0xBB];
    let fields = [
        PackField::U8 { offset: 0, value: 7 },
        PackField::Bytes { offset: 1, data: &data },
    ];
    let mut buf = [0u8; 3];
    pack(&mut buf, &fields).unwrap();
    assert_eq!(buf, [7, 0xAA, 0xBB]);
}

#[test]
fn test_pack_empty_descriptor() {
    let mut buf = [0x55u8; 3];
    pack(&mut buf, &[]).unwrap();
    assert_eq!(buf, [0x55; 3]);
}

// =============================================================================
// Overlap Tests
// =============================================================================

#[test]
fn test_pack_later_field_wins() {
    let mut buf = [0u8; 4];
    Packer::new()
        .u32(0, 0x11223344)
        .u8(1, 0xFF)
        .pack(&mut buf)
        .unwrap();
    assert_eq!(buf, [0x11, 0xFF, 0x33, 0x44]);
}

#[test]
fn test_pack_template_then_override() {
    let template = [0x80, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x7A];
    let mut buf = [0u8; 10];
    Packer::new()
        .bytes(0, &template)
        .u32(2, 10)
        .pack(&mut buf)
        .unwrap();
    assert_eq!(&buf[2..6], &[0x00, 0x00, 0x00, 0x0A]);
    assert_eq!(&buf[6..], &template[6..]);
}

// =============================================================================
// Bounds Tests
// =============================================================================

#[test]
fn test_pack_fits_exactly() {
    let mut buf = [0u8; 4];
    Packer::new().u32(0, 1).pack(&mut buf).unwrap();
    assert_eq!(buf, [0, 0, 0, 1]);
}

#[test]
fn test_pack_overflow_each_kind() {
    let mut buf = [0u8; 4];

    let cases: Vec<Packer<'_>> = vec![
        Packer::new().u8(4, 1),
        Packer::new().u16(3, 1),
        Packer::new().u32(1, 1),
        Packer::new().bytes(2, &[1, 2, 3]),
    ];

    for packer in cases {
        let result = packer.pack(&mut buf);
        assert!(
            matches!(result, Err(TpmError::BufferOverflow { capacity: 4, .. })),
            "expected overflow for {:?}",
            packer.fields()
        );
    }
    assert_eq!(buf, [0u8; 4]);
}

#[test]
fn test_pack_overflow_reports_field() {
    let mut buf = [0u8; 8];
    let err = Packer::new().u32(6, 1).pack(&mut buf).unwrap_err();
    match err {
        TpmError::BufferOverflow {
            offset,
            width,
            capacity,
        } => {
            assert_eq!(offset, 6);
            assert_eq!(width, 4);
            assert_eq!(capacity, 8);
        }
        other => panic!("Expected BufferOverflow, got {:?}", other),
    }
}

#[test]
fn test_pack_is_atomic_on_overflow() {
    let mut buf = [0u8; 8];
    let result = Packer::new()
        .u32(0, 0xFFFFFFFF)
        .u16(2, 0xFFFF)
        .u32(7, 1)
        .pack(&mut buf);

    assert!(matches!(result, Err(TpmError::BufferOverflow { .. })));
    assert_eq!(buf, [0u8; 8], "no field may be written when any is out of range");
}

#[test]
fn test_pack_offset_near_usize_max() {
    let mut buf = [0u8; 8];
    let result = Packer::new().u32(usize::MAX - 1, 1).pack(&mut buf);
    assert!(matches!(result, Err(TpmError::BufferOverflow { .. })));
}

#[test]
fn test_pack_empty_bytes_at_end() {
    let mut buf = [0u8; 4];
    Packer::new().bytes(4, &[]).pack(&mut buf).unwrap();
    assert_eq!(buf, [0u8; 4]);
}

#[test]
fn test_pack_into_zero_capacity() {
    let mut buf: [u8; 0] = [];
    let result = Packer::new().u8(0, 1).pack(&mut buf);
    assert!(matches!(result, Err(TpmError::BufferOverflow { capacity: 0, .. })));
}
