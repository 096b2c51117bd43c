//! Generic netlink command messages.

use super::header::{GENL_HDRLEN, GenlMsgHdr};
use crate::netlink::attr::AttrIter;
use crate::netlink::error::Result;

/// A generic netlink message: GENL header plus encoded attributes.
///
/// This is what a family-specific layer builds for requests and decodes from
/// replies. The netlink framing (`nlmsghdr`) is added and stripped by the
/// transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenlMessage {
    /// Command and version.
    pub header: GenlMsgHdr,
    /// Attribute stream following the header.
    pub data: Vec<u8>,
}

impl GenlMessage {
    /// Create a message for the given command.
    pub fn new(cmd: u8, version: u8, data: Vec<u8>) -> Self {
        Self {
            header: GenlMsgHdr::new(cmd, version),
            data,
        }
    }

    /// Decode a message from a netlink payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let header = GenlMsgHdr::from_bytes(payload)?;
        Ok(Self {
            header,
            data: payload[GENL_HDRLEN..].to_vec(),
        })
    }

    /// The command byte.
    pub fn cmd(&self) -> u8 {
        self.header.cmd
    }

    /// Iterate over the top-level attributes.
    pub fn attrs(&self) -> AttrIter<'_> {
        AttrIter::new(&self.data)
    }
}
