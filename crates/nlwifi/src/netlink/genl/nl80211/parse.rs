//! Decoding nl80211 replies into domain types.

use std::time::Duration;

use super::attrs::{Attribute, Nl80211Attr};
use super::ie::{IE_SSID, parse_elements};
use super::types::{Bss, BssStatus, InterfaceType, StationInfo, WifiInterface};
use super::{BssAttr, RateInfoAttr, StaInfoAttr};
use crate::netlink::attr::{AttrIter, AttrValue, get};
use crate::netlink::error::{Error, Result};
use crate::netlink::genl::GenlMessage;
use crate::util::MacAddr;

/// Beacon intervals are reported in time units of 1024 microseconds.
const TU_MICROS: u64 = 1024;

/// Rate info bitrates are in units of 100 kbit/s.
const BITRATE_UNIT: u64 = 100_000;

/// Decode every message of a `GET_INTERFACE` reply.
pub fn parse_interfaces(messages: &[GenlMessage]) -> Result<Vec<WifiInterface>> {
    messages
        .iter()
        .map(|msg| parse_interface(msg).map_err(|e| e.during("parsing interface")))
        .collect()
}

fn parse_interface(msg: &GenlMessage) -> Result<WifiInterface> {
    let mut iface = WifiInterface::default();

    for attr in msg.attrs() {
        let (attr_type, payload) = attr?;
        let Some(Attribute { attr, value }) = Attribute::decode(attr_type, payload)? else {
            continue;
        };

        match (attr, value) {
            (Nl80211Attr::Ifindex, AttrValue::U32(v)) => iface.index = v,
            (Nl80211Attr::Ifname, AttrValue::String(v)) => iface.name = v,
            (Nl80211Attr::Mac, AttrValue::Bytes(v)) => {
                iface.hardware_addr = MacAddr::try_from(v.as_slice())?;
            }
            (Nl80211Attr::Wiphy, AttrValue::U32(v)) => iface.phy = v,
            (Nl80211Attr::Iftype, AttrValue::U32(v)) => iface.iftype = InterfaceType::try_from(v)?,
            (Nl80211Attr::Wdev, AttrValue::U64(v)) => iface.device = v,
            (Nl80211Attr::WiphyFreq, AttrValue::U32(v)) => iface.frequency = v,
            _ => {}
        }
    }

    Ok(iface)
}

/// Find the BSS the interface is associated with in a `GET_SCAN` reply.
///
/// Only an entry carrying a status attribute counts; every other entry is
/// skipped after a structural check. Returns `None` if no entry qualifies.
pub fn parse_bss(messages: &[GenlMessage]) -> Result<Option<Bss>> {
    for msg in messages {
        for attr in msg.attrs() {
            let (attr_type, payload) = attr.map_err(|e| e.during("parsing BSS"))?;
            if attr_type != Nl80211Attr::Bss as u16 {
                continue;
            }

            if has_attr(payload, BssAttr::Status as u16).map_err(|e| e.during("parsing BSS"))? {
                return parse_bss_attrs(payload)
                    .map(Some)
                    .map_err(|e| e.during("parsing BSS"));
            }
        }
    }

    Ok(None)
}

fn has_attr(data: &[u8], wanted: u16) -> Result<bool> {
    for attr in AttrIter::new(data) {
        if attr?.0 == wanted {
            return Ok(true);
        }
    }
    Ok(false)
}

fn parse_bss_attrs(data: &[u8]) -> Result<Bss> {
    let mut ssid = String::new();
    let mut bssid = MacAddr::default();
    let mut frequency = 0;
    let mut beacon_interval = Duration::ZERO;
    let mut last_seen = Duration::ZERO;
    let mut status = None;

    for attr in AttrIter::new(data) {
        let (attr_type, payload) = attr?;
        match attr_type {
            t if t == BssAttr::Bssid as u16 => {
                bssid = MacAddr::try_from(payload)?;
            }
            t if t == BssAttr::Frequency as u16 => {
                frequency = get::u32_ne(payload)?;
            }
            t if t == BssAttr::BeaconInterval as u16 => {
                let tu = get::u16_ne(payload)? as u64;
                beacon_interval = Duration::from_micros(tu * TU_MICROS);
            }
            t if t == BssAttr::SeenMsAgo as u16 => {
                last_seen = Duration::from_millis(get::u32_ne(payload)? as u64);
            }
            t if t == BssAttr::Status as u16 => {
                status = Some(BssStatus::try_from(get::u32_ne(payload)?)?);
            }
            t if t == BssAttr::InformationElements as u16 => {
                for ie in parse_elements(payload)? {
                    if ie.id == IE_SSID {
                        ssid = decode_ssid(ie.data);
                    }
                }
            }
            _ => {}
        }
    }

    let status = status.ok_or(Error::MissingAttribute { attr: "BSS_STATUS" })?;

    Ok(Bss {
        ssid,
        bssid,
        frequency,
        beacon_interval,
        last_seen,
        status,
    })
}

/// Decode an SSID, replacing each byte that is not valid UTF-8 with U+FFFD.
pub(crate) fn decode_ssid(bytes: &[u8]) -> String {
    let mut ssid = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        ssid.push_str(chunk.valid());
        for _ in chunk.invalid() {
            ssid.push(char::REPLACEMENT_CHARACTER);
        }
    }
    ssid
}

/// Decode every message of a `GET_STATION` reply.
pub fn parse_station_info(messages: &[GenlMessage]) -> Result<Vec<StationInfo>> {
    messages
        .iter()
        .map(|msg| parse_station(msg).map_err(|e| e.during("parsing station info")))
        .collect()
}

fn parse_station(msg: &GenlMessage) -> Result<StationInfo> {
    let mut info = StationInfo::default();

    for attr in msg.attrs() {
        let (attr_type, payload) = attr?;
        match attr_type {
            t if t == Nl80211Attr::Mac as u16 => {
                info.hardware_addr = MacAddr::try_from(payload)?;
            }
            t if t == Nl80211Attr::StaInfo as u16 => {
                parse_sta_info(payload, &mut info)?;
                return Ok(info);
            }
            _ => {}
        }
    }

    Err(Error::MissingAttribute { attr: "STA_INFO" })
}

fn parse_sta_info(data: &[u8], info: &mut StationInfo) -> Result<()> {
    for attr in AttrIter::new(data) {
        let (attr_type, payload) = attr?;
        match attr_type {
            t if t == StaInfoAttr::ConnectedTime as u16 => {
                info.connected = Duration::from_secs(get::u32_ne(payload)? as u64);
            }
            t if t == StaInfoAttr::InactiveTime as u16 => {
                info.inactive = Duration::from_millis(get::u32_ne(payload)? as u64);
            }
            // 64-bit counters always win; 32-bit ones only fill an empty slot
            t if t == StaInfoAttr::RxBytes64 as u16 => {
                info.rx_bytes = get::u64_ne(payload)?;
            }
            t if t == StaInfoAttr::TxBytes64 as u16 => {
                info.tx_bytes = get::u64_ne(payload)?;
            }
            t if t == StaInfoAttr::RxBytes as u16 => {
                let v = get::u32_ne(payload)?;
                if info.rx_bytes == 0 {
                    info.rx_bytes = v as u64;
                }
            }
            t if t == StaInfoAttr::TxBytes as u16 => {
                let v = get::u32_ne(payload)?;
                if info.tx_bytes == 0 {
                    info.tx_bytes = v as u64;
                }
            }
            t if t == StaInfoAttr::Signal as u16 => {
                info.signal = get::u8(payload)? as i8;
            }
            t if t == StaInfoAttr::RxPackets as u16 => {
                info.rx_packets = get::u32_ne(payload)?;
            }
            t if t == StaInfoAttr::TxPackets as u16 => {
                info.tx_packets = get::u32_ne(payload)?;
            }
            t if t == StaInfoAttr::TxRetries as u16 => {
                info.tx_retries = get::u32_ne(payload)?;
            }
            t if t == StaInfoAttr::TxFailed as u16 => {
                info.tx_failed = get::u32_ne(payload)?;
            }
            t if t == StaInfoAttr::BeaconLoss as u16 => {
                info.beacon_loss = get::u32_ne(payload)?;
            }
            t if t == StaInfoAttr::RxBitrate as u16 => {
                info.rx_bitrate = parse_rate_info(payload)?;
            }
            t if t == StaInfoAttr::TxBitrate as u16 => {
                info.tx_bitrate = parse_rate_info(payload)?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Decode a nested rate info set into bits per second.
pub(crate) fn parse_rate_info(data: &[u8]) -> Result<u64> {
    let mut bitrate: u64 = 0;

    for attr in AttrIter::new(data) {
        let (attr_type, payload) = attr?;
        match attr_type {
            t if t == RateInfoAttr::Bitrate32 as u16 => {
                bitrate = get::u32_ne(payload)? as u64;
            }
            t if t == RateInfoAttr::Bitrate as u16 => {
                let v = get::u16_ne(payload)?;
                if bitrate == 0 {
                    bitrate = v as u64;
                }
            }
            _ => {}
        }
    }

    Ok(bitrate * BITRATE_UNIT)
}
