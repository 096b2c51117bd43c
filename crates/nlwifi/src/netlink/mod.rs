//! Async generic netlink plumbing for Linux.
//!
//! Layers, bottom up:
//!
//! - [`attr`]: `nlattr` TLV encoding, strict iteration, typed values
//! - [`message`] and [`MessageBuilder`]: `nlmsghdr` framing
//! - [`NetlinkSocket`]: a non-blocking `NETLINK_GENERIC` socket on tokio
//! - [`genl`]: generic netlink headers, family resolution, the request
//!   exchange and the [`genl::nl80211`] client
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nlwifi::netlink::genl::nl80211::Nl80211Connection;
//!
//! # async fn example() -> nlwifi::Result<()> {
//! let conn = Nl80211Connection::new().await?;
//! for station in conn.station_info("wlan0").await? {
//!     println!("{}: {} dBm", station.hardware_addr, station.signal);
//! }
//! # Ok(())
//! # }
//! ```

pub mod attr;
mod builder;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod genl;
mod interface_ref;
pub mod message;
mod socket;

pub use attr::{AttrEncoder, AttrIter, AttrValue, NlAttr, WireType};
pub use builder::MessageBuilder;
pub use error::{Error, Result};
pub use interface_ref::InterfaceRef;
pub use message::{MessageIter, NLMSG_HDRLEN, NetlinkMessage, NlMsgHdr, NlMsgType};
pub use socket::NetlinkSocket;
