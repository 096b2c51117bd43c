//! Test fixtures: an in-memory transport and canned kernel replies.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::netlink::attr::{AttrEncoder, AttrValue};
use crate::netlink::genl::{FamilyInfo, GenlMessage, GenlMsgHdr, GenlTransport};
use crate::netlink::message::{NLM_F_MULTI, NetlinkMessage, NlMsgHdr, NlMsgType};
use crate::netlink::{Error, Result};
use zerocopy::IntoBytes;

/// Family id the mock hands out for nl80211.
pub const NL80211_ID: u16 = 0x1c;

/// Two hand-assembled `NEW_INTERFACE` payloads (GENL header + attributes)
/// laid out like an `iw dev` dump on x86_64: a station on channel 1 and a
/// monitor vif.
pub static INTERFACE_DUMP: &[&[u8]] = &[
    &[
        0x07, 0x01, 0x00, 0x00, // cmd NEW_INTERFACE, version 1
        0x08, 0x00, 0x03, 0x00, 0x03, 0x00, 0x00, 0x00, // IFINDEX 3
        0x0a, 0x00, 0x04, 0x00, b'w', b'l', b'a', b'n', b'0', 0x00, 0x00, 0x00, // IFNAME
        0x08, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, // WIPHY 0
        0x08, 0x00, 0x05, 0x00, 0x02, 0x00, 0x00, 0x00, // IFTYPE station
        0x0c, 0x00, 0x99, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // WDEV 1
        0x0a, 0x00, 0x06, 0x00, 0xe8, 0xb1, 0xfc, 0x01, 0x02, 0x0f, 0x00, 0x00, // MAC
        0x08, 0x00, 0x2e, 0x00, 0x05, 0x00, 0x00, 0x00, // GENERATION 5
        0x08, 0x00, 0x26, 0x00, 0x6c, 0x09, 0x00, 0x00, // WIPHY_FREQ 2412
        0x08, 0x00, 0x27, 0x00, 0x01, 0x00, 0x00, 0x00, // WIPHY_CHANNEL_TYPE HT20
        0x08, 0x00, 0x9f, 0x00, 0x01, 0x00, 0x00, 0x00, // CHANNEL_WIDTH 20
        0x08, 0x00, 0xa0, 0x00, 0x6c, 0x09, 0x00, 0x00, // CENTER_FREQ1 2412
        0x05, 0x00, 0xf8, 0x00, 0x00, 0x00, 0x00, 0x00, // attribute 248, not in the decoder's table
    ],
    &[
        0x07, 0x01, 0x00, 0x00,
        0x08, 0x00, 0x03, 0x00, 0x04, 0x00, 0x00, 0x00, // IFINDEX 4
        0x09, 0x00, 0x04, 0x00, b'm', b'o', b'n', b'0', 0x00, 0x00, 0x00, 0x00, // IFNAME
        0x08, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, // WIPHY 0
        0x08, 0x00, 0x05, 0x00, 0x06, 0x00, 0x00, 0x00, // IFTYPE monitor
        0x0c, 0x00, 0x99, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // WDEV 2
        0x0a, 0x00, 0x06, 0x00, 0xe8, 0xb1, 0xfc, 0x01, 0x02, 0x0f, 0x00, 0x00, // MAC
        0x08, 0x00, 0x2e, 0x00, 0x05, 0x00, 0x00, 0x00, // GENERATION 5
    ],
];

/// Encode a list of raw attributes into a stream.
pub fn nested(attrs: &[(u16, AttrValue)]) -> Vec<u8> {
    let mut enc = AttrEncoder::new();
    for (attr_type, value) in attrs {
        value.encode(*attr_type, &mut enc).unwrap();
    }
    enc.finish()
}

/// A data reply from the nl80211 family.
pub fn data_reply(cmd: u8, attrs: &[u8]) -> NetlinkMessage {
    let mut payload = GenlMsgHdr::new(cmd, 1).as_bytes().to_vec();
    payload.extend_from_slice(attrs);
    NetlinkMessage::new(NlMsgHdr::new(NL80211_ID, NLM_F_MULTI), payload)
}

/// An error reply with the given (negative) errno.
pub fn error_reply(errno: i32) -> NetlinkMessage {
    let mut payload = errno.to_ne_bytes().to_vec();
    payload.extend_from_slice(NlMsgHdr::default().as_bytes());
    NetlinkMessage::new(NlMsgHdr::new(NlMsgType::ERROR, 0), payload)
}

/// A positive acknowledgement.
pub fn ack() -> NetlinkMessage {
    error_reply(0)
}

/// A request as seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct Sent {
    pub msg: GenlMessage,
    pub family_id: u16,
    pub flags: u16,
    pub seq: u32,
}

/// Records requests and answers each one with the next queued reply set.
///
/// Replies are re-stamped with the sequence number being received.
pub struct MockTransport {
    family: Option<FamilyInfo>,
    seq: AtomicU32,
    sent: Mutex<Vec<Sent>>,
    received: Mutex<Vec<u32>>,
    replies: Mutex<VecDeque<Vec<NetlinkMessage>>>,
    closed: bool,
}

impl MockTransport {
    /// A transport on which nl80211 is registered.
    pub fn new() -> Self {
        Self {
            family: Some(FamilyInfo {
                id: NL80211_ID,
                version: 1,
                hdr_size: 0,
                max_attr: 337,
            }),
            seq: AtomicU32::new(1),
            sent: Mutex::new(Vec::new()),
            received: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            closed: false,
        }
    }

    /// A transport on which no family can be resolved.
    pub fn without_family() -> Self {
        Self {
            family: None,
            ..Self::new()
        }
    }

    /// A transport reporting the given nl80211 family version.
    pub fn with_version(version: u8) -> Self {
        let mut transport = Self::new();
        if let Some(family) = transport.family.as_mut() {
            family.version = version;
        }
        transport
    }

    /// Queue the replies for the next request.
    pub fn push_replies(&self, replies: Vec<NetlinkMessage>) {
        self.replies.lock().unwrap().push_back(replies);
    }

    /// Every request sent so far.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Sequence numbers passed to `receive`, in call order.
    pub fn received(&self) -> Vec<u32> {
        self.received.lock().unwrap().clone()
    }
}

impl GenlTransport for MockTransport {
    async fn resolve_family(&self, name: &str) -> Result<FamilyInfo> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.family.ok_or_else(|| Error::FamilyNotFound {
            name: name.to_string(),
        })
    }

    async fn send(&self, msg: &GenlMessage, family_id: u16, flags: u16) -> Result<u32> {
        if self.closed {
            return Err(Error::Closed);
        }
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.sent.lock().unwrap().push(Sent {
            msg: msg.clone(),
            family_id,
            flags,
            seq,
        });
        Ok(seq)
    }

    async fn receive(&self, seq: u32) -> Result<Vec<NetlinkMessage>> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.received.lock().unwrap().push(seq);
        let mut replies = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no reply queued for request");
        for reply in &mut replies {
            reply.header.nlmsg_seq = seq;
        }
        Ok(replies)
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
