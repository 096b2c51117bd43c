//! Building nl80211 request messages.

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;

use super::attrs::{Attribute, Nl80211Attr};
use super::{AKM_SUITE_PSK, AUTHTYPE_OPEN_SYSTEM, CIPHER_SUITE_CCMP, Nl80211Cmd, WPA_VERSION_2};
use crate::netlink::attr::AttrEncoder;
use crate::netlink::error::Result;
use crate::netlink::genl::GenlMessage;

/// PBKDF2 iteration count fixed by IEEE 802.11i.
const PMK_ITERATIONS: u32 = 4096;

/// Length of a pairwise master key.
pub const PMK_LEN: usize = 32;

/// Encode attributes, in order, into a command message.
pub fn build(cmd: Nl80211Cmd, version: u8, attrs: &[Attribute]) -> Result<GenlMessage> {
    let mut enc = AttrEncoder::new();
    for attr in attrs {
        attr.encode(&mut enc)?;
    }
    Ok(GenlMessage::new(cmd as u8, version, enc.finish()))
}

/// Derive the WPA2 pairwise master key from a passphrase and SSID.
pub fn derive_pmk(passphrase: &str, ssid: &str) -> [u8; PMK_LEN] {
    let mut pmk = [0u8; PMK_LEN];
    pbkdf2_hmac::<Sha1>(passphrase.as_bytes(), ssid.as_bytes(), PMK_ITERATIONS, &mut pmk);
    pmk
}

/// Attributes for a `CONNECT` request.
///
/// An empty passphrase requests an open network; anything else requests
/// WPA2-PSK with CCMP and an in-kernel 4-way handshake.
pub fn connect_attributes(ifindex: u32, ssid: &str, passphrase: &str) -> Vec<Attribute> {
    let mut attrs = vec![
        Attribute::u32(Nl80211Attr::Ifindex, ifindex),
        Attribute::bytes(Nl80211Attr::Ssid, ssid.as_bytes()),
    ];

    if !passphrase.is_empty() {
        attrs.extend([
            Attribute::u32(Nl80211Attr::WpaVersions, WPA_VERSION_2),
            Attribute::u32(Nl80211Attr::CipherSuiteGroup, CIPHER_SUITE_CCMP),
            Attribute::u32(Nl80211Attr::CipherSuitesPairwise, CIPHER_SUITE_CCMP),
            Attribute::u32(Nl80211Attr::AkmSuites, AKM_SUITE_PSK),
            Attribute::flag(Nl80211Attr::Want1x4wayHs),
            Attribute::bytes(Nl80211Attr::Pmk, derive_pmk(passphrase, ssid)),
        ]);
    }

    attrs.push(Attribute::u32(Nl80211Attr::AuthType, AUTHTYPE_OPEN_SYSTEM));
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::attr::AttrValue;
    use crate::netlink::genl::GenlMsgHdr;
    use crate::netlink::genl::nl80211::InterfaceType;

    #[test]
    fn test_build_get_interface() {
        let msg = build(
            Nl80211Cmd::GetInterface,
            1,
            &[Attribute::u32(Nl80211Attr::Ifindex, 3)],
        )
        .unwrap();
        assert_eq!(msg.header, GenlMsgHdr::new(5, 1));
        assert_eq!(msg.data, [8, 0, 3, 0, 3, 0, 0, 0]);
    }

    #[test]
    fn test_build_set_wiphy() {
        let msg = build(
            Nl80211Cmd::SetWiphy,
            1,
            &[
                Attribute::u32(Nl80211Attr::Ifindex, 5),
                Attribute::u32(Nl80211Attr::WiphyFreq, 11),
            ],
        )
        .unwrap();
        assert_eq!(msg.cmd(), 2);
        assert_eq!(msg.data, [8, 0, 3, 0, 5, 0, 0, 0, 8, 0, 38, 0, 11, 0, 0, 0]);
    }

    #[test]
    fn test_build_set_interface() {
        let msg = build(
            Nl80211Cmd::SetInterface,
            1,
            &[
                Attribute::u32(Nl80211Attr::Ifindex, 6),
                Attribute::u32(Nl80211Attr::Iftype, InterfaceType::Monitor as u32),
            ],
        )
        .unwrap();
        assert_eq!(msg.header, GenlMsgHdr::new(6, 1));
        assert_eq!(msg.data, [8, 0, 3, 0, 6, 0, 0, 0, 8, 0, 5, 0, 6, 0, 0, 0]);
    }

    #[test]
    fn test_build_without_attributes() {
        let msg = build(Nl80211Cmd::GetInterface, 1, &[]).unwrap();
        assert!(msg.data.is_empty());
    }

    #[test]
    fn test_build_stops_at_first_bad_attribute() {
        let attrs = [
            Attribute::u32(Nl80211Attr::Ifindex, 3),
            Attribute {
                attr: Nl80211Attr::Ssid,
                value: AttrValue::Bytes(vec![0; u16::MAX as usize]),
            },
        ];
        assert!(build(Nl80211Cmd::Connect, 1, &attrs).is_err());
    }

    #[test]
    fn test_pmk_test_vector() {
        // IEEE 802.11i-2004, Annex H.4.1
        let pmk = derive_pmk("password", "IEEE");
        assert_eq!(
            pmk,
            [
                0xf4, 0x2c, 0x6f, 0xc5, 0x2d, 0xf0, 0xeb, 0xef, 0x9e, 0xbb, 0x4b, 0x90, 0xb3,
                0x8a, 0x5f, 0x90, 0x2e, 0x83, 0xfe, 0x1b, 0x13, 0x5a, 0x70, 0xe2, 0x3a, 0xed,
                0x76, 0x2e, 0x97, 0x10, 0xa1, 0x2e,
            ]
        );
    }

    #[test]
    fn test_connect_open_network() {
        let attrs = connect_attributes(3, "cafe", "");
        let kinds: Vec<_> = attrs.iter().map(|a| a.attr).collect();
        assert_eq!(
            kinds,
            [Nl80211Attr::Ifindex, Nl80211Attr::Ssid, Nl80211Attr::AuthType]
        );
        assert_eq!(attrs[1].value, AttrValue::Bytes(b"cafe".to_vec()));
        assert_eq!(attrs[2].value, AttrValue::U32(0));
    }

    #[test]
    fn test_connect_wpa2_psk() {
        let attrs = connect_attributes(3, "IEEE", "password");
        let kinds: Vec<_> = attrs.iter().map(|a| a.attr).collect();
        assert_eq!(
            kinds,
            [
                Nl80211Attr::Ifindex,
                Nl80211Attr::Ssid,
                Nl80211Attr::WpaVersions,
                Nl80211Attr::CipherSuiteGroup,
                Nl80211Attr::CipherSuitesPairwise,
                Nl80211Attr::AkmSuites,
                Nl80211Attr::Want1x4wayHs,
                Nl80211Attr::Pmk,
                Nl80211Attr::AuthType,
            ]
        );
        assert_eq!(attrs[2].value, AttrValue::U32(2));
        assert_eq!(attrs[3].value, AttrValue::U32(0x000f_ac04));
        assert_eq!(attrs[4].value, AttrValue::U32(0x000f_ac04));
        assert_eq!(attrs[5].value, AttrValue::U32(0x000f_ac02));
        assert_eq!(attrs[6].value, AttrValue::Flag);
        assert_eq!(
            attrs[7].value,
            AttrValue::Bytes(derive_pmk("password", "IEEE").to_vec())
        );

        // The whole set encodes
        let msg = build(Nl80211Cmd::Connect, 1, &attrs).unwrap();
        assert_eq!(msg.cmd(), 46);
    }
}
