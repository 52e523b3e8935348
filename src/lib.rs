//! # tpmwire
//!
//! Wire-format and transport core for talking to a TPM:
//! - Offset-driven, bounds-checked packing of big-endian fields
//! - Header accessors for command size and response return code
//! - Locality-scoped sessions over a blocking device primitive
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Command builders (callers)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ pack
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Codec                                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Header    │◄─────────│   Session   │
//!   │  (size/rc)  │          │ (locality)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │ xfer
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  TpmDevice  │
//!                           │  (driver)   │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod header;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TpmError, Result};
pub use config::Config;
pub use header::{command_size, response_return_code, COMMAND_BUFFER_SIZE, TPM_LIB_ERROR};
pub use transport::{Session, TpmDevice};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tpmwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
