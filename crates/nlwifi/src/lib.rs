//! Async nl80211 (WiFi) client for Linux.
//!
//! This crate talks to the kernel's `nl80211` generic netlink family over a
//! raw netlink socket. It lists wireless interfaces, tunes channels and
//! widths, switches interface modes, connects to open and WPA2-PSK networks
//! and reads BSS and station statistics.
//!
//! # Features
//!
//! - `serde` - `Serialize` for the domain types
//! - `integration` - live tests against the host's nl80211
//!
//! # Example
//!
//! ```rust,no_run
//! use nlwifi::{InterfaceType, Nl80211Connection};
//!
//! #[tokio::main]
//! async fn main() -> nlwifi::Result<()> {
//!     let conn = Nl80211Connection::new().await?;
//!
//!     for iface in conn.interfaces().await? {
//!         if iface.iftype == InterfaceType::Station {
//!             println!("{} on {} MHz", iface.name, iface.frequency);
//!         }
//!     }
//!
//!     conn.connect("wlan0", "cafe", "hunter22").await?;
//!     Ok(())
//! }
//! ```

pub mod netlink;
pub mod util;

// Re-export common types at crate root for convenience
pub use netlink::genl::nl80211::{
    Bss, BssStatus, ChannelWidth, InterfaceType, Nl80211Connection, StationInfo, WifiInterface,
};
pub use netlink::{Error, InterfaceRef, Result};
pub use util::MacAddr;
