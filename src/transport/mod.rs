//! Transport Module
//!
//! Locality-scoped sessions over a blocking TPM device.
//!
//! ## Session Lifecycle
//! ```text
//!   Session::open ──► Open (locality held) ──► Session::close
//!                        │        ▲
//!                        └────────┘
//!                      send_receive
//! ```
//!
//! A `Session` mutably borrows its device, so a device can have at most one
//! open session and commands can only be sent while a locality is held.

mod device;
mod dev_node;
mod scripted;
mod session;

pub use device::TpmDevice;
pub use dev_node::DevNode;
pub use scripted::ScriptedDevice;
pub use session::{Reply, Response, Session};
