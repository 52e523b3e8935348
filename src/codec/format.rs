//! Tag-character descriptors
//!
//! Some call sites describe a layout as a string of tags (`"wdd"` for a
//! command header, say) next to the fields themselves. These helpers check
//! the fields against such a descriptor before packing or unpacking.

use crate::error::{Result, TpmError};
use super::{pack, unpack, FieldKind, PackField, UnpackField};

/// Parse a descriptor string into field kinds
pub fn parse_format(format: &str) -> Result<Vec<FieldKind>> {
    format.chars().map(FieldKind::from_tag).collect()
}

/// Check that `kinds` line up one-to-one with the descriptor
fn check_against(format: &str, kinds: impl ExactSizeIterator<Item = FieldKind>) -> Result<()> {
    let expected = parse_format(format)?;

    if expected.len() != kinds.len() {
        return Err(TpmError::Format(format!(
            "Descriptor {:?} names {} fields, got {}",
            format,
            expected.len(),
            kinds.len()
        )));
    }

    for (index, (want, got)) in expected.into_iter().zip(kinds).enumerate() {
        if want != got {
            return Err(TpmError::Format(format!(
                "Field {} of {:?}: expected '{}', got '{}'",
                index,
                format,
                want.tag(),
                got.tag()
            )));
        }
    }

    Ok(())
}

/// Pack `fields` after checking them against `format`
pub fn pack_format(buffer: &mut [u8], format: &str, fields: &[PackField<'_>]) -> Result<()> {
    check_against(format, fields.iter().map(PackField::kind))?;
    pack(buffer, fields)
}

/// Unpack into `fields` after checking them against `format`
pub fn unpack_format(buffer: &[u8], format: &str, fields: &mut [UnpackField<'_>]) -> Result<()> {
    check_against(format, fields.iter().map(UnpackField::kind))?;
    unpack(buffer, fields)
}
