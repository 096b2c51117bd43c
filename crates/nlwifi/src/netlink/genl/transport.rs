//! The transport seam between a family client and the kernel.

use std::future::Future;

use super::connection::FamilyInfo;
use super::message::GenlMessage;
use crate::netlink::error::Result;
use crate::netlink::message::{NLM_F_ACK, NLM_F_DUMP, NLM_F_REQUEST, NetlinkMessage};

/// How a request expects the kernel to reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// A single reply message.
    Request,
    /// A multipart reply terminated by `NLMSG_DONE`.
    Dump,
    /// An acknowledgement (or error) only.
    Acknowledge,
}

impl RequestKind {
    /// The `nlmsg_flags` to send with this kind of request.
    pub fn flags(self) -> u16 {
        match self {
            Self::Request => NLM_F_REQUEST,
            Self::Dump => NLM_F_REQUEST | NLM_F_DUMP,
            Self::Acknowledge => NLM_F_REQUEST | NLM_F_ACK,
        }
    }
}

/// Sends generic netlink messages and collects the replies.
///
/// [`GenlConnection`](super::GenlConnection) is the socket-backed
/// implementation. Send and receive are separate steps; callers that share a
/// transport must serialize each send/receive pair themselves.
pub trait GenlTransport: Send + Sync {
    /// Look up a family by name.
    fn resolve_family(&self, name: &str) -> impl Future<Output = Result<FamilyInfo>> + Send;

    /// Frame and send a message, returning the sequence number used.
    fn send(
        &self,
        msg: &GenlMessage,
        family_id: u16,
        flags: u16,
    ) -> impl Future<Output = Result<u32>> + Send;

    /// Collect the replies to the request sent with `seq`.
    ///
    /// `NLMSG_DONE` and `NLMSG_NOOP` are consumed; error messages (including
    /// ACKs) are returned as-is.
    fn receive(&self, seq: u32) -> impl Future<Output = Result<Vec<NetlinkMessage>>> + Send;

    /// Release the underlying resources. Later calls fail with `Error::Closed`.
    fn close(&mut self) -> Result<()>;
}
