//! Scripted Device
//!
//! In-memory `TpmDevice` that plays back queued responses. Useful for
//! exercising command builders and sessions without hardware.

use std::collections::VecDeque;

use crate::error::{Result, TpmError};
use crate::header::RESPONSE_HEADER_SIZE;
use super::TpmDevice;

/// Response tag for commands sent without authorization sessions
const TPM_ST_NO_SESSIONS: u16 = 0x8001;

#[derive(Debug)]
enum Step {
    Respond(Vec<u8>),
    Fail(String),
}

/// A device that answers from a script
#[derive(Debug, Default)]
pub struct ScriptedDevice {
    script: VecDeque<Step>,
    sent: Vec<Vec<u8>>,
    active_locality: Option<u8>,
    deny_open: bool,
    deny_close: bool,
    opens: usize,
    closes: usize,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a response with the given return code and payload
    pub fn encode_response(return_code: u32, payload: &[u8]) -> Vec<u8> {
        let size = RESPONSE_HEADER_SIZE + payload.len();
        let mut response = Vec::with_capacity(size);
        response.extend_from_slice(&TPM_ST_NO_SESSIONS.to_be_bytes());
        response.extend_from_slice(&(size as u32).to_be_bytes());
        response.extend_from_slice(&return_code.to_be_bytes());
        response.extend_from_slice(payload);

        response
    }

    /// Queue raw response bytes for the next exchange
    pub fn push_response(&mut self, response: Vec<u8>) {
        self.script.push_back(Step::Respond(response));
    }

    /// Queue a well-formed response
    pub fn push_reply(&mut self, return_code: u32, payload: &[u8]) {
        self.push_response(Self::encode_response(return_code, payload));
    }

    /// Queue a transport failure for the next exchange
    pub fn push_failure(&mut self, reason: impl Into<String>) {
        self.script.push_back(Step::Fail(reason.into()));
    }

    /// Refuse locality requests
    pub fn deny_open(&mut self, deny: bool) {
        self.deny_open = deny;
    }

    /// Refuse locality releases
    pub fn deny_close(&mut self, deny: bool) {
        self.deny_close = deny;
    }

    /// Commands received so far, in order
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    pub fn active_locality(&self) -> Option<u8> {
        self.active_locality
    }

    pub fn open_count(&self) -> usize {
        self.opens
    }

    pub fn close_count(&self) -> usize {
        self.closes
    }

    /// Number of queued steps not yet consumed
    pub fn pending(&self) -> usize {
        self.script.len()
    }
}

impl TpmDevice for ScriptedDevice {
    fn open_locality(&mut self, locality: u8) -> Result<()> {
        if self.deny_open {
            return Err(TpmError::LocalityUnavailable {
                locality,
                reason: "access denied".to_string(),
            });
        }
        if let Some(active) = self.active_locality {
            return Err(TpmError::LocalityUnavailable {
                locality,
                reason: format!("locality {} is active", active),
            });
        }

        self.active_locality = Some(locality);
        self.opens += 1;
        Ok(())
    }

    fn close_locality(&mut self, locality: u8) -> Result<()> {
        if self.active_locality != Some(locality) {
            return Err(TpmError::LockReleaseFailed {
                locality,
                reason: "locality not held".to_string(),
            });
        }
        if self.deny_close {
            return Err(TpmError::LockReleaseFailed {
                locality,
                reason: "release refused".to_string(),
            });
        }

        self.active_locality = None;
        self.closes += 1;
        Ok(())
    }

    fn xfer(&mut self, command: &[u8], response: &mut [u8]) -> Result<usize> {
        if self.active_locality.is_none() {
            return Err(TpmError::Transport("no locality held".to_string()));
        }
        self.sent.push(command.to_vec());

        match self.script.pop_front() {
            Some(Step::Respond(bytes)) => {
                if bytes.len() > response.len() {
                    return Err(TpmError::Transport(format!(
                        "response of {} bytes does not fit a {}-byte buffer",
                        bytes.len(),
                        response.len()
                    )));
                }
                response[..bytes.len()].copy_from_slice(&bytes);
                Ok(bytes.len())
            }
            Some(Step::Fail(reason)) => Err(TpmError::Transport(reason)),
            None => Err(TpmError::Transport("no response queued".to_string())),
        }
    }
}
