//! Device Primitive
//!
//! The blocking driver interface a session is built on.

use crate::error::Result;

/// A TPM device driver
///
/// Implementations move bytes to and from the chip (or firmware, or
/// simulator) and gate access per locality. Each call blocks until the
/// device completes or fails.
pub trait TpmDevice {
    /// Request exclusive access to `locality`
    fn open_locality(&mut self, locality: u8) -> Result<()>;

    /// Release `locality`
    fn close_locality(&mut self, locality: u8) -> Result<()>;

    /// Send `command` and receive the response into `response`
    ///
    /// Returns the number of response bytes written, which must not exceed
    /// `response.len()`.
    fn xfer(&mut self, command: &[u8], response: &mut [u8]) -> Result<usize>;
}

impl<D: TpmDevice + ?Sized> TpmDevice for Box<D> {
    fn open_locality(&mut self, locality: u8) -> Result<()> {
        (**self).open_locality(locality)
    }

    fn close_locality(&mut self, locality: u8) -> Result<()> {
        (**self).close_locality(locality)
    }

    fn xfer(&mut self, command: &[u8], response: &mut [u8]) -> Result<usize> {
        (**self).xfer(command, response)
    }
}
