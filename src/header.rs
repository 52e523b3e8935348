//! TPM Header Parser
//!
//! Accessors for the fixed header shared by TPM commands and responses.
//!
//! ## Header Layout
//! ```text
//! ┌──────────┬──────────────┬────────────────────────┐
//! │ Tag (2)  │  Size (4)    │ Ordinal / Return (4)   │
//! └──────────┴──────────────┴────────────────────────┘
//!   0          2              6                      10
//! ```
//!
//! All multi-byte fields are big-endian. The tag and, for commands, the
//! ordinal are opaque here.

use crate::codec::Unpacker;
use crate::error::{Result, TpmError};

/// Upper bound for command and response buffers allocated by callers
pub const COMMAND_BUFFER_SIZE: usize = 256;

/// Internal library error, never a real TPM return code
pub const TPM_LIB_ERROR: u32 = !0u32;

/// Return code of a successful TPM command
pub const TPM_SUCCESS: u32 = 0;

pub const TAG_OFFSET: usize = 0;
pub const SIZE_OFFSET: usize = 2;
pub const RETURN_CODE_OFFSET: usize = 6;

/// Bytes needed to read a command's size field
pub const COMMAND_HEADER_MIN: usize = SIZE_OFFSET + 4;

/// Full response header: tag, size and return code
pub const RESPONSE_HEADER_SIZE: usize = RETURN_CODE_OFFSET + 4;

/// Size field of a command, or a `MalformedCommand` error if it is truncated
pub fn try_command_size(command: &[u8]) -> Result<u32> {
    if command.len() < COMMAND_HEADER_MIN {
        return Err(TpmError::MalformedCommand(format!(
            "header needs {} bytes, got {}",
            COMMAND_HEADER_MIN,
            command.len()
        )));
    }

    let mut size = 0u32;
    Unpacker::new().u32(SIZE_OFFSET, &mut size).unpack(command)?;
    Ok(size)
}

/// Return code of a response, or a `MalformedResponse` error if it is truncated
pub fn try_response_return_code(response: &[u8]) -> Result<u32> {
    if response.len() < RESPONSE_HEADER_SIZE {
        return Err(TpmError::MalformedResponse(format!(
            "header needs {} bytes, got {}",
            RESPONSE_HEADER_SIZE,
            response.len()
        )));
    }

    let mut return_code = 0u32;
    Unpacker::new()
        .u32(RETURN_CODE_OFFSET, &mut return_code)
        .unpack(response)?;
    Ok(return_code)
}

/// Total size declared by a TPM command
///
/// Returns [`TPM_LIB_ERROR`] when fewer than 6 bytes are available.
pub fn command_size(command: &[u8]) -> u32 {
    try_command_size(command).unwrap_or(TPM_LIB_ERROR)
}

/// Return code of a TPM response
///
/// Returns [`TPM_LIB_ERROR`] when fewer than 10 bytes are available.
pub fn response_return_code(response: &[u8]) -> u32 {
    try_response_return_code(response).unwrap_or(TPM_LIB_ERROR)
}

/// Decoded response header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeader {
    pub tag: u16,
    pub size: u32,
    pub return_code: u32,
}

impl ResponseHeader {
    pub fn parse(response: &[u8]) -> Result<Self> {
        if response.len() < RESPONSE_HEADER_SIZE {
            return Err(TpmError::MalformedResponse(format!(
                "header needs {} bytes, got {}",
                RESPONSE_HEADER_SIZE,
                response.len()
            )));
        }

        let (mut tag, mut size, mut return_code) = (0u16, 0u32, 0u32);
        Unpacker::new()
            .u16(TAG_OFFSET, &mut tag)
            .u32(SIZE_OFFSET, &mut size)
            .u32(RETURN_CODE_OFFSET, &mut return_code)
            .unpack(response)?;

        Ok(Self {
            tag,
            size,
            return_code,
        })
    }

    pub fn is_success(&self) -> bool {
        self.return_code == TPM_SUCCESS
    }
}
