//! Field descriptors
//!
//! Typed replacements for the tag-character descriptors: each entry carries
//! its own offset and value (for packing) or output slot (for unpacking).

use crate::error::{Result, TpmError};

/// Kind of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    Bytes,
}

impl FieldKind {
    /// Map a descriptor tag character to a field kind
    pub fn from_tag(tag: char) -> Result<Self> {
        match tag {
            'b' => Ok(FieldKind::U8),
            'w' => Ok(FieldKind::U16),
            'd' => Ok(FieldKind::U32),
            's' => Ok(FieldKind::Bytes),
            _ => Err(TpmError::Format(format!("Unknown field tag: {:?}", tag))),
        }
    }

    /// Descriptor tag character for this kind
    pub fn tag(self) -> char {
        match self {
            FieldKind::U8 => 'b',
            FieldKind::U16 => 'w',
            FieldKind::U32 => 'd',
            FieldKind::Bytes => 's',
        }
    }

    /// Fixed encoded width, `None` for byte strings
    pub fn width(self) -> Option<usize> {
        match self {
            FieldKind::U8 => Some(1),
            FieldKind::U16 => Some(2),
            FieldKind::U32 => Some(4),
            FieldKind::Bytes => None,
        }
    }
}

/// A value to write at an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackField<'a> {
    U8 { offset: usize, value: u8 },
    U16 { offset: usize, value: u16 },
    U32 { offset: usize, value: u32 },
    Bytes { offset: usize, data: &'a [u8] },
}

impl PackField<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            PackField::U8 { .. } => FieldKind::U8,
            PackField::U16 { .. } => FieldKind::U16,
            PackField::U32 { .. } => FieldKind::U32,
            PackField::Bytes { .. } => FieldKind::Bytes,
        }
    }

    pub fn offset(&self) -> usize {
        match *self {
            PackField::U8 { offset, .. }
            | PackField::U16 { offset, .. }
            | PackField::U32 { offset, .. }
            | PackField::Bytes { offset, .. } => offset,
        }
    }

    /// Number of bytes this field occupies on the wire
    pub fn width(&self) -> usize {
        match self {
            PackField::Bytes { data, .. } => data.len(),
            other => other.kind().width().unwrap_or(0),
        }
    }
}

/// An output slot to fill from an offset
///
/// Byte-string slots read exactly `out.len()` bytes.
#[derive(Debug)]
pub enum UnpackField<'a> {
    U8 { offset: usize, out: &'a mut u8 },
    U16 { offset: usize, out: &'a mut u16 },
    U32 { offset: usize, out: &'a mut u32 },
    Bytes { offset: usize, out: &'a mut [u8] },
}

impl UnpackField<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            UnpackField::U8 { .. } => FieldKind::U8,
            UnpackField::U16 { .. } => FieldKind::U16,
            UnpackField::U32 { .. } => FieldKind::U32,
            UnpackField::Bytes { .. } => FieldKind::Bytes,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            UnpackField::U8 { offset, .. }
            | UnpackField::U16 { offset, .. }
            | UnpackField::U32 { offset, .. }
            | UnpackField::Bytes { offset, .. } => *offset,
        }
    }

    /// Number of bytes this field reads from the buffer
    pub fn width(&self) -> usize {
        match self {
            UnpackField::Bytes { out, .. } => out.len(),
            other => other.kind().width().unwrap_or(0),
        }
    }
}
