//! Codec Module
//!
//! Offset-driven packing and unpacking of typed fields into fixed-size
//! byte buffers, as used to build TPM commands and pick apart responses.
//!
//! ## Field Types
//! ```text
//! ┌──────┬──────────┬───────┬──────────────────────────────┐
//! │ Tag  │ Kind     │ Width │ Encoding                     │
//! ├──────┼──────────┼───────┼──────────────────────────────┤
//! │ 'b'  │ U8       │ 1     │ single byte                  │
//! │ 'w'  │ U16      │ 2     │ big-endian                   │
//! │ 'd'  │ U32      │ 4     │ big-endian                   │
//! │ 's'  │ Bytes    │ len   │ copied verbatim              │
//! └──────┴──────────┴───────┴──────────────────────────────┘
//! ```
//!
//! ## Semantics
//! - Fields are applied in descriptor order; a later field may overwrite
//!   bytes written by an earlier one.
//! - Every field is bounds-checked before any byte is touched, so a failed
//!   pack leaves the buffer as it was.

mod field;
mod format;
mod pack;
mod unpack;

pub use field::{FieldKind, PackField, UnpackField};
pub use format::{pack_format, parse_format, unpack_format};
pub use pack::{pack, Packer};
pub use unpack::{unpack, Unpacker};

use std::ops::Range;

/// Byte range `[offset, offset + width)` if it fits within `limit`
pub(crate) fn field_range(offset: usize, width: usize, limit: usize) -> Option<Range<usize>> {
    offset
        .checked_add(width)
        .filter(|end| *end <= limit)
        .map(|end| offset..end)
}
