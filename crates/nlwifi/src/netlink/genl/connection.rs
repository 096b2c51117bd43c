//! Socket-backed generic netlink transport with family resolution.

use tracing::{debug, trace};

use super::exchange::classify;
use super::header::GenlMsgHdr;
use super::message::GenlMessage;
use super::transport::{GenlTransport, RequestKind};
use super::{CtrlAttr, CtrlCmd, GENL_ID_CTRL};
use crate::netlink::attr::get;
use crate::netlink::builder::MessageBuilder;
use crate::netlink::error::{Error, Result};
use crate::netlink::message::{MessageIter, NetlinkMessage};
use crate::netlink::socket::NetlinkSocket;
use zerocopy::IntoBytes;

/// Information about a Generic Netlink family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyInfo {
    /// Dynamically assigned family ID (used as nlmsg_type).
    pub id: u16,
    /// Family version.
    pub version: u8,
    /// Header size (additional bytes after genlmsghdr).
    pub hdr_size: u32,
    /// Maximum attribute number.
    pub max_attr: u32,
}

impl FamilyInfo {
    /// Decode a `CTRL_CMD_NEWFAMILY` reply.
    pub fn from_message(msg: &GenlMessage) -> Result<Self> {
        let mut id: Option<u16> = None;
        let mut version: u8 = 0;
        let mut hdr_size: u32 = 0;
        let mut max_attr: u32 = 0;

        for attr in msg.attrs() {
            let (attr_type, payload) = attr?;
            match attr_type {
                t if t == CtrlAttr::FamilyId as u16 => {
                    id = Some(get::u16_ne(payload)?);
                }
                t if t == CtrlAttr::Version as u16 => {
                    version = get::u32_ne(payload)? as u8;
                }
                t if t == CtrlAttr::HdrSize as u16 => {
                    hdr_size = get::u32_ne(payload)?;
                }
                t if t == CtrlAttr::MaxAttr as u16 => {
                    max_attr = get::u32_ne(payload)?;
                }
                _ => {}
            }
        }

        let id = id.ok_or(Error::MissingAttribute {
            attr: "CTRL_ATTR_FAMILY_ID",
        })?;

        Ok(Self {
            id,
            version,
            hdr_size,
            max_attr,
        })
    }
}

/// Generic Netlink connection over a `NETLINK_GENERIC` socket.
///
/// # Example
///
/// ```rust,no_run
/// use nlwifi::netlink::genl::GenlConnection;
///
/// # async fn example() -> nlwifi::Result<()> {
/// let conn = GenlConnection::new()?;
/// let family = conn.get_family("nl80211").await?;
/// println!("nl80211 family ID: {}", family.id);
/// # Ok(())
/// # }
/// ```
pub struct GenlConnection {
    socket: Option<NetlinkSocket>,
}

impl GenlConnection {
    /// Create a new Generic Netlink connection.
    pub fn new() -> Result<Self> {
        Ok(Self {
            socket: Some(NetlinkSocket::new()?),
        })
    }

    /// Create a GENL connection from an existing socket.
    pub fn from_socket(socket: NetlinkSocket) -> Self {
        Self {
            socket: Some(socket),
        }
    }

    fn socket(&self) -> Result<&NetlinkSocket> {
        self.socket.as_ref().ok_or(Error::Closed)
    }

    /// Check if [`close`](GenlTransport::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.socket.is_none()
    }

    /// Get information about a Generic Netlink family.
    ///
    /// Every call queries the kernel; family ids can change when modules
    /// are reloaded.
    pub async fn get_family(&self, name: &str) -> Result<FamilyInfo> {
        let mut builder = MessageBuilder::new(GENL_ID_CTRL, RequestKind::Request.flags());
        builder.append_bytes(GenlMsgHdr::new(CtrlCmd::GetFamily as u8, 1).as_bytes());
        builder.append_attr_str(CtrlAttr::FamilyName as u16, name);

        let seq = self.send_raw(builder).await?;
        let replies = self.receive(seq).await?;

        let not_found = || Error::FamilyNotFound {
            name: name.to_string(),
        };

        let messages = match classify(replies) {
            Ok(messages) => messages,
            Err(e) if e.errno() == Some(libc::ENOENT) => return Err(not_found()),
            Err(e) => return Err(e),
        };

        let info = FamilyInfo::from_message(messages.first().ok_or_else(not_found)?)?;
        debug!(family = name, id = info.id, version = info.version, "resolved family");
        Ok(info)
    }

    async fn send_raw(&self, mut builder: MessageBuilder) -> Result<u32> {
        let socket = self.socket()?;
        let seq = socket.next_seq();
        builder.set_seq(seq);
        builder.set_pid(socket.pid());
        socket.send(&builder.finish()).await?;
        Ok(seq)
    }
}

impl GenlTransport for GenlConnection {
    async fn resolve_family(&self, name: &str) -> Result<FamilyInfo> {
        self.get_family(name).await
    }

    async fn send(&self, msg: &GenlMessage, family_id: u16, flags: u16) -> Result<u32> {
        let mut builder = MessageBuilder::new(family_id, flags);
        builder.append_bytes(msg.header.as_bytes());
        builder.append_bytes(&msg.data);
        self.send_raw(builder).await
    }

    async fn receive(&self, seq: u32) -> Result<Vec<NetlinkMessage>> {
        let socket = self.socket()?;
        let mut replies = Vec::new();

        loop {
            let data = socket.recv_msg().await?;
            let mut matched = false;
            let mut multi = false;
            let mut done = false;

            for result in MessageIter::new(&data) {
                let (header, payload) = result?;

                if header.nlmsg_seq != seq {
                    trace!(seq = header.nlmsg_seq, expected = seq, "skipping stale message");
                    continue;
                }

                matched = true;
                multi |= header.is_multi();

                if header.is_done() {
                    // A failed dump reports its errno in the DONE payload
                    if let Some(code) = payload.get(..4)
                        && let Ok(errno) = get::i32_ne(code)
                        && errno < 0
                    {
                        return Err(Error::from_errno(errno));
                    }
                    done = true;
                    break;
                }

                if header.is_noop() {
                    continue;
                }

                trace!(
                    msg_type = header.nlmsg_type,
                    flags = header.nlmsg_flags,
                    len = payload.len(),
                    "received message"
                );
                replies.push(NetlinkMessage::new(header, payload.to_vec()));
            }

            if done || (matched && !multi) {
                break;
            }
        }

        Ok(replies)
    }

    fn close(&mut self) -> Result<()> {
        if self.socket.take().is_some() {
            debug!("closed generic netlink socket");
        }
        Ok(())
    }
}
