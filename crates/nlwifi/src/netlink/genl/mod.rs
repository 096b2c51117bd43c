//! Generic Netlink (GENL) support.
//!
//! Generic Netlink extends the standard netlink protocol with dynamically
//! allocated family ids (resolved through the control family) and
//! family-specific commands and attributes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ Nl80211Connection                       │
//! │ (Family-specific high-level API)        │
//! └────────────────┬────────────────────────┘
//!                  │ exchange::execute
//! ┌────────────────▼────────────────────────┐
//! │ impl GenlTransport                      │
//! │ (GenlConnection, or a test double)      │
//! └────────────────┬────────────────────────┘
//!                  │
//! ┌────────────────▼────────────────────────┐
//! │ NetlinkSocket (NETLINK_GENERIC)         │
//! └─────────────────────────────────────────┘
//! ```

mod connection;
pub mod exchange;
mod header;
mod message;
mod transport;

pub use connection::{FamilyInfo, GenlConnection};
pub use header::{GENL_HDRLEN, GenlMsgHdr};
pub use message::GenlMessage;
pub use transport::{GenlTransport, RequestKind};

pub mod nl80211;

// Control family constants (fixed, not dynamically assigned)
pub const GENL_ID_CTRL: u16 = 0x10;

/// Control family commands
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlCmd {
    Unspec = 0,
    NewFamily = 1,
    DelFamily = 2,
    GetFamily = 3,
}

/// Control family attributes
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtrlAttr {
    Unspec = 0,
    FamilyId = 1,
    FamilyName = 2,
    Version = 3,
    HdrSize = 4,
    MaxAttr = 5,
}
