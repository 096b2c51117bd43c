//! WiFi configuration via the nl80211 Generic Netlink family.
//!
//! # Example
//!
//! ```rust,no_run
//! use nlwifi::netlink::genl::nl80211::Nl80211Connection;
//!
//! # async fn example() -> nlwifi::Result<()> {
//! let conn = Nl80211Connection::new().await?;
//!
//! for iface in conn.interfaces().await? {
//!     println!("{}: {} ({})", iface.index, iface.name, iface.iftype);
//! }
//!
//! conn.set_channel("wlan0", 6).await?;
//! let bss = conn.bss("wlan0").await?;
//! println!("associated with {} on {} MHz", bss.ssid, bss.frequency);
//! # Ok(())
//! # }
//! ```

mod attrs;
mod channel;
mod connection;
pub mod ie;
mod parse;
pub mod request;
mod types;

pub use attrs::{Attribute, Nl80211Attr};
pub use channel::{channel_to_frequency, frequency_to_channel};
pub use connection::Nl80211Connection;
pub use ie::InformationElement;
pub use parse::{parse_bss, parse_interfaces, parse_station_info};
pub use request::derive_pmk;
pub use types::{Bss, BssStatus, ChannelWidth, InterfaceType, StationInfo, WifiInterface};

/// nl80211 Generic Netlink family name.
pub const NL80211_GENL_NAME: &str = "nl80211";

/// nl80211 version this client is written against. Requests carry the
/// version the kernel reports at family resolution.
pub const NL80211_GENL_VERSION: u8 = 1;

/// nl80211 GENL commands.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nl80211Cmd {
    Unspec = 0,
    GetWiphy = 1,
    SetWiphy = 2,
    NewWiphy = 3,
    GetInterface = 5,
    SetInterface = 6,
    NewInterface = 7,
    GetStation = 17,
    NewStation = 19,
    GetScan = 32,
    NewScanResults = 34,
    Connect = 46,
    Disconnect = 48,
}

/// Station info attributes (nested in `NL80211_ATTR_STA_INFO`).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaInfoAttr {
    Unspec = 0,
    InactiveTime = 1,
    RxBytes = 2,
    TxBytes = 3,
    Signal = 7,
    TxBitrate = 8,
    RxPackets = 9,
    TxPackets = 10,
    TxRetries = 11,
    TxFailed = 12,
    RxBitrate = 14,
    ConnectedTime = 16,
    BeaconLoss = 18,
    RxBytes64 = 23,
    TxBytes64 = 24,
}

/// Rate info attributes (nested in the station bitrate attributes).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateInfoAttr {
    Unspec = 0,
    Bitrate = 1,
    Bitrate32 = 5,
}

/// BSS attributes (nested in `NL80211_ATTR_BSS`).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BssAttr {
    Unspec = 0,
    Bssid = 1,
    Frequency = 2,
    BeaconInterval = 4,
    InformationElements = 6,
    Status = 9,
    SeenMsAgo = 10,
}

/// `NL80211_WPA_VERSION_2`.
pub const WPA_VERSION_2: u32 = 1 << 1;

/// CCMP-128 cipher suite selector (00-0F-AC:4).
pub const CIPHER_SUITE_CCMP: u32 = 0x000f_ac04;

/// PSK AKM suite selector (00-0F-AC:2).
pub const AKM_SUITE_PSK: u32 = 0x000f_ac02;

/// `NL80211_AUTHTYPE_OPEN_SYSTEM`.
pub const AUTHTYPE_OPEN_SYSTEM: u32 = 0;
