//! Top-level nl80211 attributes and their wire types.

use crate::netlink::attr::{AttrEncoder, AttrValue, WireType};
use crate::netlink::error::{Error, Result};

/// The nl80211 attributes this client sends or understands.
///
/// Attribute numbers are fixed by the kernel ABI (`enum nl80211_attrs`).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nl80211Attr {
    Wiphy = 1,
    WiphyName = 2,
    Ifindex = 3,
    Ifname = 4,
    Iftype = 5,
    Mac = 6,
    StaInfo = 21,
    WiphyFreq = 38,
    WiphyChannelType = 39,
    Generation = 46,
    Bss = 47,
    Ssid = 52,
    AuthType = 53,
    CipherSuitesPairwise = 73,
    CipherSuiteGroup = 74,
    WpaVersions = 75,
    AkmSuites = 76,
    Wdev = 153,
    ChannelWidth = 159,
    CenterFreq1 = 160,
    Pmk = 254,
    Want1x4wayHs = 257,
}

impl Nl80211Attr {
    /// Every known attribute.
    pub const ALL: [Self; 22] = [
        Self::Wiphy,
        Self::WiphyName,
        Self::Ifindex,
        Self::Ifname,
        Self::Iftype,
        Self::Mac,
        Self::StaInfo,
        Self::WiphyFreq,
        Self::WiphyChannelType,
        Self::Generation,
        Self::Bss,
        Self::Ssid,
        Self::AuthType,
        Self::CipherSuitesPairwise,
        Self::CipherSuiteGroup,
        Self::WpaVersions,
        Self::AkmSuites,
        Self::Wdev,
        Self::ChannelWidth,
        Self::CenterFreq1,
        Self::Pmk,
        Self::Want1x4wayHs,
    ];

    /// The payload representation of this attribute.
    pub const fn wire_type(self) -> WireType {
        match self {
            Self::Wiphy
            | Self::Ifindex
            | Self::Iftype
            | Self::WiphyFreq
            | Self::WiphyChannelType
            | Self::Generation
            | Self::AuthType
            | Self::CipherSuitesPairwise
            | Self::CipherSuiteGroup
            | Self::WpaVersions
            | Self::AkmSuites
            | Self::ChannelWidth
            | Self::CenterFreq1 => WireType::U32,
            Self::Wdev => WireType::U64,
            Self::WiphyName | Self::Ifname => WireType::String,
            Self::Mac | Self::Ssid | Self::Pmk => WireType::Bytes,
            Self::StaInfo | Self::Bss => WireType::Nested,
            Self::Want1x4wayHs => WireType::Flag,
        }
    }

    /// Look up an attribute by its number.
    pub fn from_u16(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|a| *a as u16 == value)
    }

    /// Kernel name of the attribute, for error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wiphy => "WIPHY",
            Self::WiphyName => "WIPHY_NAME",
            Self::Ifindex => "IFINDEX",
            Self::Ifname => "IFNAME",
            Self::Iftype => "IFTYPE",
            Self::Mac => "MAC",
            Self::StaInfo => "STA_INFO",
            Self::WiphyFreq => "WIPHY_FREQ",
            Self::WiphyChannelType => "WIPHY_CHANNEL_TYPE",
            Self::Generation => "GENERATION",
            Self::Bss => "BSS",
            Self::Ssid => "SSID",
            Self::AuthType => "AUTH_TYPE",
            Self::CipherSuitesPairwise => "CIPHER_SUITES_PAIRWISE",
            Self::CipherSuiteGroup => "CIPHER_SUITE_GROUP",
            Self::WpaVersions => "WPA_VERSIONS",
            Self::AkmSuites => "AKM_SUITES",
            Self::Wdev => "WDEV",
            Self::ChannelWidth => "CHANNEL_WIDTH",
            Self::CenterFreq1 => "CENTER_FREQ1",
            Self::Pmk => "PMK",
            Self::Want1x4wayHs => "WANT_1X_4WAY_HS",
        }
    }
}

/// A typed top-level nl80211 attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub attr: Nl80211Attr,
    pub value: AttrValue,
}

impl Attribute {
    /// A 32-bit attribute.
    pub fn u32(attr: Nl80211Attr, value: u32) -> Self {
        Self {
            attr,
            value: AttrValue::U32(value),
        }
    }

    /// A 64-bit attribute.
    pub fn u64(attr: Nl80211Attr, value: u64) -> Self {
        Self {
            attr,
            value: AttrValue::U64(value),
        }
    }

    /// An opaque byte-string attribute.
    pub fn bytes(attr: Nl80211Attr, value: impl Into<Vec<u8>>) -> Self {
        Self {
            attr,
            value: AttrValue::Bytes(value.into()),
        }
    }

    /// A NUL-terminated string attribute.
    pub fn string(attr: Nl80211Attr, value: impl Into<String>) -> Self {
        Self {
            attr,
            value: AttrValue::String(value.into()),
        }
    }

    /// A presence-only attribute.
    pub fn flag(attr: Nl80211Attr) -> Self {
        Self {
            attr,
            value: AttrValue::Flag,
        }
    }

    /// Append this attribute to an encoder.
    pub fn encode(&self, enc: &mut AttrEncoder) -> Result<()> {
        if self.value.wire_type() != self.attr.wire_type() {
            return Err(Error::InvalidAttribute(format!(
                "{} expects {:?}, got {:?}",
                self.attr.name(),
                self.attr.wire_type(),
                self.value.wire_type()
            )));
        }
        self.value.encode(self.attr as u16, enc)
    }

    /// Decode a raw record.
    ///
    /// Returns `Ok(None)` for attribute numbers this client does not know.
    pub fn decode(attr_type: u16, payload: &[u8]) -> Result<Option<Self>> {
        let Some(attr) = Nl80211Attr::from_u16(attr_type) else {
            return Ok(None);
        };
        let value = AttrValue::decode(attr.wire_type(), payload)
            .map_err(|e| e.during(attr.name()))?;
        Ok(Some(Self { attr, value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::attr::AttrIter;

    fn sample(attr: Nl80211Attr) -> AttrValue {
        match attr.wire_type() {
            WireType::U8 => AttrValue::U8(0x5a),
            WireType::U16 => AttrValue::U16(0x1234),
            WireType::U32 => AttrValue::U32(0x000f_ac04),
            WireType::U64 => AttrValue::U64(0x1_0000_0001),
            WireType::I8 => AttrValue::I8(-42),
            WireType::I16 => AttrValue::I16(-4242),
            WireType::I32 => AttrValue::I32(-424_242),
            WireType::I64 => AttrValue::I64(-42),
            WireType::String => AttrValue::String("phy0".into()),
            WireType::Bytes => AttrValue::Bytes(vec![0xe8, 0xb1, 0xfc, 0x01, 0x02, 0x0f]),
            WireType::Flag => AttrValue::Flag,
            WireType::Nested => AttrValue::Nested(vec![8, 0, 9, 0, 1, 0, 0, 0]),
        }
    }

    #[test]
    fn test_every_attribute_roundtrips() {
        for attr in Nl80211Attr::ALL {
            let original = Attribute {
                attr,
                value: sample(attr),
            };
            let mut enc = AttrEncoder::new();
            original.encode(&mut enc).unwrap();
            let buf = enc.finish();

            let (kind, payload) = AttrIter::new(&buf).next().unwrap().unwrap();
            assert_eq!(kind, attr as u16);
            let decoded = Attribute::decode(kind, payload).unwrap().unwrap();
            assert_eq!(decoded, original, "{}", attr.name());
        }
    }

    #[test]
    fn test_from_u16_covers_all() {
        for attr in Nl80211Attr::ALL {
            assert_eq!(Nl80211Attr::from_u16(attr as u16), Some(attr));
        }
        assert_eq!(Nl80211Attr::from_u16(0), None);
        assert_eq!(Nl80211Attr::from_u16(999), None);
    }

    #[test]
    fn test_unknown_attribute_is_skipped() {
        assert_eq!(Attribute::decode(999, &[1, 2, 3, 4]).unwrap(), None);
    }

    #[test]
    fn test_decode_wrong_width_names_attribute() {
        let err = Attribute::decode(Nl80211Attr::Ifindex as u16, &[3, 0]).unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().starts_with("IFINDEX:"));
    }

    #[test]
    fn test_encode_rejects_mismatched_value() {
        let attr = Attribute {
            attr: Nl80211Attr::Ifindex,
            value: AttrValue::String("wlan0".into()),
        };
        let mut enc = AttrEncoder::new();
        assert!(attr.encode(&mut enc).is_err());
        assert!(enc.is_empty());
    }

    #[test]
    fn test_constructor_mismatch_fails_at_encode() {
        let attr = Attribute::string(Nl80211Attr::Ifindex, "wlan0");
        let mut enc = AttrEncoder::new();
        let err = attr.encode(&mut enc).unwrap_err();
        assert!(matches!(err, Error::InvalidAttribute(_)));
        assert!(err.to_string().contains("IFINDEX"));
        assert!(enc.is_empty());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(
            Attribute::u32(Nl80211Attr::WiphyFreq, 2437).value,
            AttrValue::U32(2437)
        );
        assert_eq!(
            Attribute::u64(Nl80211Attr::Wdev, 1).value,
            AttrValue::U64(1)
        );
        assert_eq!(
            Attribute::bytes(Nl80211Attr::Ssid, b"Hello".to_vec()).value,
            AttrValue::Bytes(b"Hello".to_vec())
        );
        assert_eq!(
            Attribute::string(Nl80211Attr::Ifname, "wlan0").value,
            AttrValue::String("wlan0".into())
        );
        assert_eq!(
            Attribute::flag(Nl80211Attr::Want1x4wayHs).value,
            AttrValue::Flag
        );
    }
}
