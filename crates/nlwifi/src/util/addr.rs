//! Hardware (MAC) address type.

use std::fmt;
use std::str::FromStr;

use crate::netlink::{Error, Result};

/// A 6-byte IEEE 802 hardware address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Create an address from its octets.
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// The address octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check if all octets are zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAttribute(format!("invalid MAC address: {}", s));

        let mut mac = [0u8; 6];
        let mut parts = s.split(':');
        for octet in mac.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.len() != 2 {
                return Err(invalid());
            }
            *octet = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(mac))
    }
}

impl TryFrom<&[u8]> for MacAddr {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        bytes.try_into().map(Self).map_err(|_| {
            Error::InvalidAttribute(format!(
                "hardware address has {} bytes, expected 6",
                bytes.len()
            ))
        })
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mac() {
        let mac: MacAddr = "aa:bb:cc:dd:ee:ff".parse().unwrap();
        assert_eq!(mac.octets(), [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);

        assert!("aa:bb:cc:dd:ee".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:ff:00".parse::<MacAddr>().is_err());
        assert!("aa:bb:cc:dd:ee:zz".parse::<MacAddr>().is_err());
        assert!("a:bb:cc:dd:ee:ff".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_format_mac() {
        let mac = MacAddr::new([0xe8, 0xb1, 0xfc, 0x01, 0x02, 0x0f]);
        assert_eq!(mac.to_string(), "e8:b1:fc:01:02:0f");
    }

    #[test]
    fn test_mac_from_bytes() {
        let mac = MacAddr::try_from(&[1u8, 2, 3, 4, 5, 6][..]).unwrap();
        assert_eq!(mac, MacAddr::new([1, 2, 3, 4, 5, 6]));

        let err = MacAddr::try_from(&[1u8, 2, 3][..]).unwrap_err();
        assert!(err.is_decode());
        assert!(MacAddr::try_from(&[0u8; 8][..]).is_err());
    }
}
