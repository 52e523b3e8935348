//! Unpacking
//!
//! Reads typed fields out of a caller-owned buffer into output slots.

use crate::error::{Result, TpmError};
use super::{field_range, UnpackField};

/// Unpack `fields` from the first `buffer.len()` bytes
///
/// Every read is checked before any slot is written, so on `BufferOverrun`
/// no output has been modified.
pub fn unpack(buffer: &[u8], fields: &mut [UnpackField<'_>]) -> Result<()> {
    let size = buffer.len();

    for field in fields.iter() {
        let (offset, width) = (field.offset(), field.width());
        if field_range(offset, width, size).is_none() {
            return Err(TpmError::BufferOverrun {
                offset,
                width,
                size,
            });
        }
    }

    for field in fields.iter_mut() {
        match field {
            UnpackField::U8 { offset, out } => **out = buffer[*offset],
            UnpackField::U16 { offset, out } => {
                **out = u16::from_be_bytes([buffer[*offset], buffer[*offset + 1]]);
            }
            UnpackField::U32 { offset, out } => {
                let start = *offset;
                **out = u32::from_be_bytes([
                    buffer[start],
                    buffer[start + 1],
                    buffer[start + 2],
                    buffer[start + 3],
                ]);
            }
            UnpackField::Bytes { offset, out } => {
                let start = *offset;
                let len = out.len();
                out.copy_from_slice(&buffer[start..start + len]);
            }
        }
    }

    Ok(())
}

/// Builder collecting output slots in descriptor order
#[derive(Debug, Default)]
pub struct Unpacker<'a> {
    fields: Vec<UnpackField<'a>>,
}

impl<'a> Unpacker<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(mut self, offset: usize, out: &'a mut u8) -> Self {
        self.fields.push(UnpackField::U8 { offset, out });
        self
    }

    pub fn u16(mut self, offset: usize, out: &'a mut u16) -> Self {
        self.fields.push(UnpackField::U16 { offset, out });
        self
    }

    pub fn u32(mut self, offset: usize, out: &'a mut u32) -> Self {
        self.fields.push(UnpackField::U32 { offset, out });
        self
    }

    /// Copy `out.len()` bytes starting at `offset`
    pub fn bytes(mut self, offset: usize, out: &'a mut [u8]) -> Self {
        self.fields.push(UnpackField::Bytes { offset, out });
        self
    }

    /// Unpack from `buffer`, consuming the builder and releasing the slots
    pub fn unpack(mut self, buffer: &[u8]) -> Result<()> {
        unpack(buffer, &mut self.fields)
    }
}
