//! Device Node
//!
//! `TpmDevice` over a byte stream such as `/dev/tpm0`. Each command is
//! written whole; the response is read as a header followed by the number
//! of bytes the header declares.

use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Result, TpmError};
use crate::header::{ResponseHeader, RESPONSE_HEADER_SIZE};
use super::TpmDevice;

/// A stream-backed TPM device
///
/// The kernel driver arbitrates localities, so opening and closing only
/// track which locality this handle believes it holds.
#[derive(Debug)]
pub struct DevNode<S> {
    stream: S,
    locality: Option<u8>,
}

impl DevNode<File> {
    /// Open a character device node for reading and writing
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;
        tracing::debug!("Opened TPM device node {}", path.as_ref().display());
        Ok(Self::new(file))
    }
}

impl<S: Read + Write> DevNode<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            locality: None,
        }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read + Write> TpmDevice for DevNode<S> {
    fn open_locality(&mut self, locality: u8) -> Result<()> {
        if let Some(active) = self.locality {
            return Err(TpmError::LocalityUnavailable {
                locality,
                reason: format!("locality {} already held on this handle", active),
            });
        }
        self.locality = Some(locality);
        Ok(())
    }

    fn close_locality(&mut self, locality: u8) -> Result<()> {
        if self.locality != Some(locality) {
            return Err(TpmError::LockReleaseFailed {
                locality,
                reason: "locality not held on this handle".to_string(),
            });
        }
        self.locality = None;
        Ok(())
    }

    fn xfer(&mut self, command: &[u8], response: &mut [u8]) -> Result<usize> {
        if response.len() < RESPONSE_HEADER_SIZE {
            return Err(TpmError::Transport(format!(
                "response buffer of {} bytes cannot hold a header",
                response.len()
            )));
        }

        self.stream.write_all(command)?;
        self.stream.flush()?;

        // Read header first
        self.stream.read_exact(&mut response[..RESPONSE_HEADER_SIZE])?;
        let size = ResponseHeader::parse(&response[..RESPONSE_HEADER_SIZE])?.size as usize;

        if size < RESPONSE_HEADER_SIZE || size > response.len() {
            return Err(TpmError::Transport(format!(
                "device declared a {}-byte response for a {}-byte buffer",
                size,
                response.len()
            )));
        }

        // Read the rest of the declared response
        self.stream.read_exact(&mut response[RESPONSE_HEADER_SIZE..size])?;
        Ok(size)
    }
}
