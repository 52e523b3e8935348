//! Session
//!
//! Sequences locality acquisition, command/response exchanges and release.

use bytes::Bytes;

use crate::config::Config;
use crate::error::{Result, TpmError};
use crate::header::{
    try_command_size, ResponseHeader, COMMAND_BUFFER_SIZE, RESPONSE_HEADER_SIZE, TPM_LIB_ERROR,
    TPM_SUCCESS,
};
use super::TpmDevice;

/// Outcome of one exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    /// Return code from the response header
    pub return_code: u32,

    /// Number of response bytes the device produced
    pub len: usize,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        self.return_code == TPM_SUCCESS
    }
}

/// An owned response, header included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub return_code: u32,
    pub body: Bytes,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.return_code == TPM_SUCCESS
    }

    /// Response bytes following the 10-byte header
    pub fn payload(&self) -> Bytes {
        self.body.slice(RESPONSE_HEADER_SIZE.min(self.body.len())..)
    }
}

/// An open locality on a TPM device
///
/// Obtained from [`Session::open`]; the locality is released by
/// [`Session::close`], or on drop if the session was never closed.
pub struct Session<'d, D: TpmDevice + ?Sized> {
    device: &'d mut D,
    locality: u8,
    buffer_size: usize,
    closed: bool,
}

impl<'d, D: TpmDevice + ?Sized> Session<'d, D> {
    /// Open locality 0 on `device`
    pub fn open(device: &'d mut D) -> Result<Self> {
        Self::open_with(device, &Config::default())
    }

    /// Open the locality named in `config`
    pub fn open_with(device: &'d mut D, config: &Config) -> Result<Self> {
        config.validate()?;
        let locality = config.locality;

        device
            .open_locality(locality)
            .map_err(|e| match e {
                TpmError::LocalityUnavailable { .. } => e,
                other => TpmError::LocalityUnavailable {
                    locality,
                    reason: other.to_string(),
                },
            })?;

        tracing::debug!("Opened locality {}", locality);

        Ok(Self {
            device,
            locality,
            buffer_size: config.buffer_size,
            closed: false,
        })
    }

    /// Locality held by this session
    pub fn locality(&self) -> u8 {
        self.locality
    }

    /// Send a command and read back the response's return code
    ///
    /// Exactly as many bytes as the command header declares are sent. With
    /// no `response` buffer the reply is drained into a scratch buffer of
    /// `COMMAND_BUFFER_SIZE` bytes and only the return code is kept.
    pub fn send_receive(&mut self, command: &[u8], response: Option<&mut [u8]>) -> Result<Reply> {
        let size = try_command_size(command)? as usize;
        if size < RESPONSE_HEADER_SIZE || size > command.len() {
            return Err(TpmError::MalformedCommand(format!(
                "declared size {} outside [{}, {}]",
                size,
                RESPONSE_HEADER_SIZE,
                command.len()
            )));
        }

        let mut scratch = [0u8; COMMAND_BUFFER_SIZE];
        let buffer = match response {
            Some(buffer) => buffer,
            None => &mut scratch[..],
        };

        let len = self
            .device
            .xfer(&command[..size], buffer)
            .map_err(|e| match e {
                TpmError::Transport(_) => e,
                other => TpmError::Transport(other.to_string()),
            })?;
        if len > buffer.len() {
            return Err(TpmError::Transport(format!(
                "device reported {} response bytes for a {}-byte buffer",
                len,
                buffer.len()
            )));
        }

        let header = ResponseHeader::parse(&buffer[..len])?;
        if header.size as usize > len {
            return Err(TpmError::MalformedResponse(format!(
                "header declares {} bytes, received {}",
                header.size, len
            )));
        }
        if header.return_code == TPM_LIB_ERROR {
            return Err(TpmError::MalformedResponse(
                "return code collides with the library error value".to_string(),
            ));
        }

        tracing::trace!(
            "Exchange on locality {}: sent {} bytes, received {}, rc=0x{:08x}",
            self.locality,
            size,
            len,
            header.return_code
        );

        Ok(Reply {
            return_code: header.return_code,
            len,
        })
    }

    /// [`send_receive`](Self::send_receive) with a numeric result
    ///
    /// `size` carries the usable response capacity in and the response
    /// length out. Any failure yields [`TPM_LIB_ERROR`] and a zero length.
    ///
    /// Without a `response` buffer the reply is drained into scratch space
    /// and `size` only describes the caller's (absent) buffer, so it is left
    /// as passed on success.
    pub fn send_receive_raw(
        &mut self,
        command: &[u8],
        response: Option<&mut [u8]>,
        size: &mut usize,
    ) -> u32 {
        let response = response.map(|buffer| {
            let capacity = (*size).min(buffer.len());
            &mut buffer[..capacity]
        });
        let has_response = response.is_some();

        match self.send_receive(command, response) {
            Ok(reply) => {
                if has_response {
                    *size = reply.len;
                }
                reply.return_code
            }
            Err(e) => {
                tracing::debug!("Exchange failed: {}", e);
                *size = 0;
                e.return_code()
            }
        }
    }

    /// Send a command and return the response as an owned buffer
    pub fn transact(&mut self, command: &[u8]) -> Result<Response> {
        let mut buffer = vec![0u8; self.buffer_size];
        let reply = self.send_receive(command, Some(&mut buffer))?;
        buffer.truncate(reply.len);

        Ok(Response {
            return_code: reply.return_code,
            body: Bytes::from(buffer),
        })
    }

    /// Release the locality
    ///
    /// The session is gone either way; on `LockReleaseFailed` the locality
    /// may still be held by the device.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.release()
    }

    fn release(&mut self) -> Result<()> {
        let locality = self.locality;
        self.device
            .close_locality(locality)
            .map_err(|e| match e {
                TpmError::LockReleaseFailed { .. } => e,
                other => TpmError::LockReleaseFailed {
                    locality,
                    reason: other.to_string(),
                },
            })?;

        tracing::debug!("Closed locality {}", locality);
        Ok(())
    }
}

impl<D: TpmDevice + ?Sized> Drop for Session<'_, D> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        tracing::warn!("Session on locality {} dropped without close", self.locality);
        if let Err(e) = self.release() {
            tracing::warn!("{}", e);
        }
    }
}

impl<D: TpmDevice + ?Sized> std::fmt::Debug for Session<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("locality", &self.locality)
            .field("buffer_size", &self.buffer_size)
            .finish()
    }
}
