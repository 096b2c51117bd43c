//! Request/response exchange over a [`GenlTransport`].

use tracing::{debug, trace};

use super::message::GenlMessage;
use super::transport::{GenlTransport, RequestKind};
use crate::netlink::error::{Error, Result};
use crate::netlink::message::NetlinkMessage;

/// Send one request and decode its replies.
///
/// The caller is responsible for making the send/receive pair atomic with
/// respect to other users of the same transport.
pub async fn execute<T: GenlTransport>(
    transport: &T,
    family_id: u16,
    msg: &GenlMessage,
    kind: RequestKind,
) -> Result<Vec<GenlMessage>> {
    let seq = transport.send(msg, family_id, kind.flags()).await?;
    debug!(
        family_id,
        cmd = msg.cmd(),
        ?kind,
        seq,
        len = msg.data.len(),
        "sent generic netlink request"
    );

    let replies = transport.receive(seq).await?;
    trace!(seq, count = replies.len(), "received replies");
    classify(replies)
}

/// Turn raw replies into generic netlink messages.
///
/// Any error reply with a non-zero code fails the exchange. A leading
/// acknowledgement is dropped; an acknowledgement anywhere else is treated as
/// a malformed reply set.
pub fn classify(replies: Vec<NetlinkMessage>) -> Result<Vec<GenlMessage>> {
    for reply in &replies {
        if let Some(code) = reply.error_code()?
            && code != 0
        {
            return Err(Error::from_errno(code));
        }
    }

    let mut messages = Vec::with_capacity(replies.len());
    for (pos, reply) in replies.iter().enumerate() {
        if reply.is_ack() {
            if pos == 0 {
                debug!(seq = reply.header.nlmsg_seq, "absorbed acknowledgement");
                continue;
            }
            return Err(Error::InvalidMessage(format!(
                "unexpected acknowledgement at reply {}",
                pos
            )));
        }

        trace!(
            msg_type = reply.header.nlmsg_type,
            len = reply.payload.len(),
            "decoding reply"
        );
        messages.push(GenlMessage::from_payload(&reply.payload)?);
    }

    Ok(messages)
}
