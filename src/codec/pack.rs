//! Packing
//!
//! Writes typed fields into a caller-owned buffer.

use crate::error::{Result, TpmError};
use super::{field_range, PackField};

/// Pack `fields` into `buffer`, in order
///
/// The buffer length is the capacity. All fields are checked against it
/// before the first write, so on `BufferOverflow` the buffer is untouched.
/// Overlapping fields are allowed: the later one wins.
pub fn pack(buffer: &mut [u8], fields: &[PackField<'_>]) -> Result<()> {
    let capacity = buffer.len();

    for field in fields {
        let (offset, width) = (field.offset(), field.width());
        if field_range(offset, width, capacity).is_none() {
            return Err(TpmError::BufferOverflow {
                offset,
                width,
                capacity,
            });
        }
    }

    for field in fields {
        let start = field.offset();
        match *field {
            PackField::U8 { value, .. } => buffer[start] = value,
            PackField::U16 { value, .. } => {
                buffer[start..start + 2].copy_from_slice(&value.to_be_bytes())
            }
            PackField::U32 { value, .. } => {
                buffer[start..start + 4].copy_from_slice(&value.to_be_bytes())
            }
            PackField::Bytes { data, .. } => {
                buffer[start..start + data.len()].copy_from_slice(data)
            }
        }
    }

    Ok(())
}

/// Builder collecting pack fields in descriptor order
///
/// ```
/// use tpmwire::codec::Packer;
///
/// let mut buf = [0u8; 12];
/// Packer::new()
///     .u16(0, 0x8001)
///     .u32(2, 12)
///     .u32(6, 0x144)
///     .u16(10, 0)
///     .pack(&mut buf)
///     .unwrap();
/// assert_eq!(&buf[..6], &[0x80, 0x01, 0, 0, 0, 12]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Packer<'a> {
    fields: Vec<PackField<'a>>,
}

impl<'a> Packer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, offset: usize, value: u8) -> Self {
        self.fields.push(PackField::U8 { offset, value });
        self
    }

    pub fn u16(mut self, offset: usize, value: u16) -> Self {
        self.fields.push(PackField::U16 { offset, value });
        self
    }

    pub fn u32(mut self, offset: usize, value: u32) -> Self {
        self.fields.push(PackField::U32 { offset, value });
        self
    }

    pub fn bytes(mut self, offset: usize, data: &'a [u8]) -> Self {
        self.fields.push(PackField::Bytes { offset, data });
        self
    }

    /// Fields collected so far
    pub fn fields(&self) -> &[PackField<'a>] {
        &self.fields
    }

    /// Pack the collected fields into `buffer`
    pub fn pack(&self, buffer: &mut [u8]) -> Result<()> {
        pack(buffer, &self.fields)
    }
}
