//! nl80211 domain types.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::netlink::error::{Error, Result};
use crate::util::MacAddr;

/// Operating mode of a wireless interface (`enum nl80211_iftype`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum InterfaceType {
    #[default]
    Unspecified = 0,
    AdHoc = 1,
    Station = 2,
    AccessPoint = 3,
    ApVlan = 4,
    Wds = 5,
    Monitor = 6,
    MeshPoint = 7,
    P2pClient = 8,
    P2pGroupOwner = 9,
    P2pDevice = 10,
    Ocb = 11,
    Nan = 12,
}

impl InterfaceType {
    /// Short keyword accepted by [`FromStr`].
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::AdHoc => "adhoc",
            Self::Station => "station",
            Self::AccessPoint => "ap",
            Self::ApVlan => "ap-vlan",
            Self::Wds => "wds",
            Self::Monitor => "monitor",
            Self::MeshPoint => "mesh",
            Self::P2pClient => "p2p-client",
            Self::P2pGroupOwner => "p2p-go",
            Self::P2pDevice => "p2p-device",
            Self::Ocb => "ocb",
            Self::Nan => "nan",
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unspecified => "unspecified",
            Self::AdHoc => "ad-hoc",
            Self::Station => "station",
            Self::AccessPoint => "access point",
            Self::ApVlan => "AP VLAN",
            Self::Wds => "wireless distribution",
            Self::Monitor => "monitor",
            Self::MeshPoint => "mesh point",
            Self::P2pClient => "P2P client",
            Self::P2pGroupOwner => "P2P group owner",
            Self::P2pDevice => "P2P device",
            Self::Ocb => "outside context of BSS",
            Self::Nan => "near-me area network",
        };
        f.write_str(s)
    }
}

impl TryFrom<u32> for InterfaceType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Ok(match value {
            0 => Self::Unspecified,
            1 => Self::AdHoc,
            2 => Self::Station,
            3 => Self::AccessPoint,
            4 => Self::ApVlan,
            5 => Self::Wds,
            6 => Self::Monitor,
            7 => Self::MeshPoint,
            8 => Self::P2pClient,
            9 => Self::P2pGroupOwner,
            10 => Self::P2pDevice,
            11 => Self::Ocb,
            12 => Self::Nan,
            other => {
                return Err(Error::InvalidAttribute(format!(
                    "unknown interface type {}",
                    other
                )));
            }
        })
    }
}

impl FromStr for InterfaceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "unspecified" => Self::Unspecified,
            "adhoc" | "ibss" => Self::AdHoc,
            "station" | "managed" => Self::Station,
            "ap" => Self::AccessPoint,
            "ap-vlan" => Self::ApVlan,
            "wds" => Self::Wds,
            "monitor" => Self::Monitor,
            "mesh" => Self::MeshPoint,
            "p2p-client" => Self::P2pClient,
            "p2p-go" => Self::P2pGroupOwner,
            "p2p-device" => Self::P2pDevice,
            "ocb" => Self::Ocb,
            "nan" => Self::Nan,
            _ => {
                return Err(Error::InvalidMessage(format!(
                    "unknown interface type '{}'",
                    s
                )));
            }
        })
    }
}

/// Client status within a BSS (`enum nl80211_bss_status`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BssStatus {
    Authenticated = 0,
    Associated = 1,
    IbssJoined = 2,
}

impl fmt::Display for BssStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Authenticated => "authenticated",
            Self::Associated => "associated",
            Self::IbssJoined => "IBSS joined",
        })
    }
}

impl TryFrom<u32> for BssStatus {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::Authenticated),
            1 => Ok(Self::Associated),
            2 => Ok(Self::IbssJoined),
            other => Err(Error::InvalidAttribute(format!(
                "unknown BSS status {}",
                other
            ))),
        }
    }
}

/// Channel width (`enum nl80211_chan_width`).
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChannelWidth {
    NoHt20 = 0,
    Mhz20 = 1,
    Mhz40 = 2,
    Mhz80 = 3,
    Mhz80P80 = 4,
    Mhz160 = 5,
    Mhz5 = 6,
    Mhz10 = 7,
    Mhz1 = 8,
    Mhz2 = 9,
    Mhz4 = 10,
    Mhz8 = 11,
    Mhz16 = 12,
    Mhz320 = 13,
}

impl ChannelWidth {
    const NAMES: [(Self, &'static str); 14] = [
        (Self::NoHt20, "20-noht"),
        (Self::Mhz20, "20"),
        (Self::Mhz40, "40"),
        (Self::Mhz80, "80"),
        (Self::Mhz80P80, "80+80"),
        (Self::Mhz160, "160"),
        (Self::Mhz5, "5"),
        (Self::Mhz10, "10"),
        (Self::Mhz1, "1"),
        (Self::Mhz2, "2"),
        (Self::Mhz4, "4"),
        (Self::Mhz8, "8"),
        (Self::Mhz16, "16"),
        (Self::Mhz320, "320"),
    ];

    fn as_str(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(w, _)| *w == self)
            .map_or("?", |(_, name)| *name)
    }
}

impl fmt::Display for ChannelWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", self.as_str())
    }
}

impl FromStr for ChannelWidth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim_end_matches("MHz").trim();
        Self::NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(w, _)| *w)
            .ok_or_else(|| Error::InvalidMessage(format!("unknown channel width '{}'", s)))
    }
}

/// A wireless interface as reported by `GET_INTERFACE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WifiInterface {
    /// Kernel interface index.
    pub index: u32,
    pub name: String,
    pub hardware_addr: MacAddr,
    /// Index of the owning wiphy.
    pub phy: u32,
    pub iftype: InterfaceType,
    /// Wireless device identifier.
    pub device: u64,
    /// Operating frequency in MHz, 0 if not reported.
    pub frequency: u32,
}

/// The basic service set an interface is associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bss {
    pub ssid: String,
    pub bssid: MacAddr,
    /// Frequency in MHz.
    pub frequency: u32,
    pub beacon_interval: Duration,
    /// Time since the BSS was last seen in a scan.
    pub last_seen: Duration,
    pub status: BssStatus,
}

/// Statistics for a station (peer) of an interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StationInfo {
    pub hardware_addr: MacAddr,
    pub connected: Duration,
    pub inactive: Duration,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u32,
    pub tx_packets: u32,
    /// Receive bitrate in bits per second.
    pub rx_bitrate: u64,
    /// Transmit bitrate in bits per second.
    pub tx_bitrate: u64,
    /// Signal strength in dBm.
    pub signal: i8,
    pub tx_retries: u32,
    pub tx_failed: u32,
    pub beacon_loss: u32,
}
