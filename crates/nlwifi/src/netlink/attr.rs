//! Netlink attribute (nlattr) handling.
//!
//! Attributes are TLV records: a 4-byte header `{len: u16, type: u16}`
//! followed by the payload and zero padding up to a 4-byte boundary. `len`
//! counts the header and the unpadded payload.

use super::error::{Error, Result};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = 4;

/// Largest payload a single attribute can carry.
pub const NLA_MAX_PAYLOAD: usize = u16::MAX as usize - NLA_HDRLEN;

/// Netlink attribute header (mirrors struct nlattr).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct NlAttr {
    /// Length including header.
    pub nla_len: u16,
    /// Attribute type, possibly with flag bits.
    pub nla_type: u16,
}

/// Attribute type flags.
pub const NLA_F_NESTED: u16 = 1 << 15;
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

impl NlAttr {
    /// Get the attribute type without flags.
    pub fn kind(&self) -> u16 {
        self.nla_type & NLA_TYPE_MASK
    }

    /// Check if this is a nested attribute.
    pub fn is_nested(&self) -> bool {
        self.nla_type & NLA_F_NESTED != 0
    }

    /// Read the header from the front of `data`.
    ///
    /// The header is copied out, so `data` may sit at any alignment.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from_prefix(data)
            .map(|(r, _)| r)
            .map_err(|_| Error::Truncated {
                expected: NLA_HDRLEN,
                actual: data.len(),
            })
    }
}

/// Iterator over netlink attributes in a buffer.
///
/// Yields `(type, payload)` pairs with the flag bits masked off the type.
/// A malformed record yields one error and ends the iteration. Padding after
/// the final record may be absent.
pub struct AttrIter<'a> {
    data: &'a [u8],
}

impl<'a> AttrIter<'a> {
    /// Create a new attribute iterator.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl<'a> Iterator for AttrIter<'a> {
    type Item = Result<(u16, &'a [u8])>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.data.is_empty() {
            return None;
        }

        let attr = match NlAttr::from_bytes(self.data) {
            Ok(a) => a,
            Err(e) => {
                self.data = &[];
                return Some(Err(e));
            }
        };

        let len = attr.nla_len as usize;
        if len < NLA_HDRLEN || len > self.data.len() {
            let remaining = self.data.len();
            self.data = &[];
            return Some(Err(Error::InvalidAttribute(format!(
                "attribute length {} out of range ({} bytes left)",
                len, remaining
            ))));
        }

        let payload = &self.data[NLA_HDRLEN..len];
        let advance = nla_align(len).min(self.data.len());
        self.data = &self.data[advance..];

        Some(Ok((attr.kind(), payload)))
    }
}

/// Appends attribute records to a byte buffer.
#[derive(Debug, Default)]
pub struct AttrEncoder {
    buf: Vec<u8>,
}

impl AttrEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record with the given type and payload.
    pub fn push(&mut self, attr_type: u16, payload: &[u8]) -> Result<()> {
        if payload.len() > NLA_MAX_PAYLOAD {
            return Err(Error::InvalidAttribute(format!(
                "payload of {} bytes exceeds attribute limit",
                payload.len()
            )));
        }

        let hdr = NlAttr {
            nla_len: (NLA_HDRLEN + payload.len()) as u16,
            nla_type: attr_type,
        };
        self.buf.extend_from_slice(hdr.as_bytes());
        self.buf.extend_from_slice(payload);
        let padded = nla_align(self.buf.len());
        self.buf.resize(padded, 0);
        Ok(())
    }

    /// Number of encoded bytes so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been encoded.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the encoder, returning the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Wire representation of an attribute payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    String,
    Bytes,
    Flag,
    Nested,
}

/// A decoded attribute payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    String(String),
    Bytes(Vec<u8>),
    Flag,
    /// Raw bytes of a nested attribute stream.
    Nested(Vec<u8>),
}

impl AttrValue {
    /// The wire type this value encodes as.
    pub fn wire_type(&self) -> WireType {
        match self {
            Self::U8(_) => WireType::U8,
            Self::U16(_) => WireType::U16,
            Self::U32(_) => WireType::U32,
            Self::U64(_) => WireType::U64,
            Self::I8(_) => WireType::I8,
            Self::I16(_) => WireType::I16,
            Self::I32(_) => WireType::I32,
            Self::I64(_) => WireType::I64,
            Self::String(_) => WireType::String,
            Self::Bytes(_) => WireType::Bytes,
            Self::Flag => WireType::Flag,
            Self::Nested(_) => WireType::Nested,
        }
    }

    /// Append this value as one record of type `attr_type`.
    pub fn encode(&self, attr_type: u16, enc: &mut AttrEncoder) -> Result<()> {
        match self {
            Self::U8(v) => enc.push(attr_type, &[*v]),
            Self::U16(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::U32(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::U64(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::I8(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::I16(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::I32(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::I64(v) => enc.push(attr_type, &v.to_ne_bytes()),
            Self::String(s) => {
                let mut payload = Vec::with_capacity(s.len() + 1);
                payload.extend_from_slice(s.as_bytes());
                payload.push(0);
                enc.push(attr_type, &payload)
            }
            Self::Bytes(b) => enc.push(attr_type, b),
            Self::Flag => enc.push(attr_type, &[]),
            Self::Nested(b) => enc.push(attr_type | NLA_F_NESTED, b),
        }
    }

    /// Decode a payload according to its wire type.
    pub fn decode(wire: WireType, data: &[u8]) -> Result<Self> {
        Ok(match wire {
            WireType::U8 => Self::U8(get::u8(data)?),
            WireType::U16 => Self::U16(get::u16_ne(data)?),
            WireType::U32 => Self::U32(get::u32_ne(data)?),
            WireType::U64 => Self::U64(get::u64_ne(data)?),
            WireType::I8 => Self::I8(get::u8(data)? as i8),
            WireType::I16 => Self::I16(get::u16_ne(data)? as i16),
            WireType::I32 => Self::I32(get::i32_ne(data)?),
            WireType::I64 => Self::I64(get::u64_ne(data)? as i64),
            WireType::String => Self::String(get::string(data)?.to_string()),
            WireType::Bytes => Self::Bytes(data.to_vec()),
            WireType::Flag => Self::Flag,
            WireType::Nested => Self::Nested(data.to_vec()),
        })
    }
}

/// Helper functions for extracting typed values from attribute payloads.
///
/// Numeric helpers require the payload to be exactly the width of the type.
pub mod get {
    use super::*;

    fn exact<const N: usize>(data: &[u8], what: &str) -> Result<[u8; N]> {
        data.try_into().map_err(|_| {
            Error::InvalidAttribute(format!(
                "{} attribute has {} bytes, expected {}",
                what,
                data.len(),
                N
            ))
        })
    }

    /// Extract a u8 value.
    pub fn u8(data: &[u8]) -> Result<u8> {
        exact::<1>(data, "u8").map(|b| b[0])
    }

    /// Extract a u16 value (native endian).
    pub fn u16_ne(data: &[u8]) -> Result<u16> {
        exact(data, "u16").map(u16::from_ne_bytes)
    }

    /// Extract a u32 value (native endian).
    pub fn u32_ne(data: &[u8]) -> Result<u32> {
        exact(data, "u32").map(u32::from_ne_bytes)
    }

    /// Extract a u64 value (native endian).
    pub fn u64_ne(data: &[u8]) -> Result<u64> {
        exact(data, "u64").map(u64::from_ne_bytes)
    }

    /// Extract an i32 value (native endian).
    pub fn i32_ne(data: &[u8]) -> Result<i32> {
        exact(data, "i32").map(i32::from_ne_bytes)
    }

    /// Extract a null-terminated string.
    pub fn string(data: &[u8]) -> Result<&str> {
        let len = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        std::str::from_utf8(&data[..len])
            .map_err(|e| Error::InvalidAttribute(format!("invalid UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_one(attr_type: u16, value: &AttrValue) -> Vec<u8> {
        let mut enc = AttrEncoder::new();
        value.encode(attr_type, &mut enc).unwrap();
        enc.finish()
    }

    #[test]
    fn test_nla_align() {
        assert_eq!(nla_align(0), 0);
        assert_eq!(nla_align(1), 4);
        assert_eq!(nla_align(4), 4);
        assert_eq!(nla_align(5), 8);
    }

    #[test]
    fn test_encode_u32() {
        let bytes = encode_one(3, &AttrValue::U32(3));
        assert_eq!(bytes, [8, 0, 3, 0, 3, 0, 0, 0]);
    }

    #[test]
    fn test_encode_pads_to_alignment() {
        // 5-byte payload: len field 9, record padded to 12
        let bytes = encode_one(52, &AttrValue::Bytes(b"hello".to_vec()));
        assert_eq!(bytes.len(), 12);
        assert_eq!(u16::from_ne_bytes([bytes[0], bytes[1]]), 9);
        assert_eq!(&bytes[9..], &[0, 0, 0]);
    }

    #[test]
    fn test_encode_string_is_nul_terminated() {
        let bytes = encode_one(4, &AttrValue::String("wlan0".into()));
        assert_eq!(u16::from_ne_bytes([bytes[0], bytes[1]]), 10);
        assert_eq!(&bytes[4..10], b"wlan0\0");
        assert_eq!(bytes.len(), 12);
    }

    #[test]
    fn test_encode_flag_and_nested() {
        let flag = encode_one(257, &AttrValue::Flag);
        assert_eq!(flag, [4, 0, 1, 1]);

        let nested = encode_one(21, &AttrValue::Nested(vec![8, 0, 2, 0, 1, 0, 0, 0]));
        let hdr = NlAttr::from_bytes(&nested).unwrap();
        assert!(hdr.is_nested());
        assert_eq!(hdr.kind(), 21);
    }

    #[test]
    fn test_encode_rejects_oversized_payload() {
        let mut enc = AttrEncoder::new();
        let big = vec![0u8; NLA_MAX_PAYLOAD + 1];
        assert!(matches!(
            enc.push(6, &big),
            Err(Error::InvalidAttribute(_))
        ));
        assert!(enc.is_empty());

        enc.push(6, &big[..NLA_MAX_PAYLOAD]).unwrap();
        assert_eq!(enc.len(), nla_align(u16::MAX as usize));
    }

    #[test]
    fn test_iter_records_in_order() {
        let mut enc = AttrEncoder::new();
        enc.push(3, &5u32.to_ne_bytes()).unwrap();
        enc.push(52, b"abc").unwrap();
        enc.push(38, &11u32.to_ne_bytes()).unwrap();
        let buf = enc.finish();

        let attrs: Vec<_> = AttrIter::new(&buf).collect::<Result<_>>().unwrap();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0], (3, &5u32.to_ne_bytes()[..]));
        assert_eq!(attrs[1], (52, &b"abc"[..]));
        assert_eq!(attrs[2], (38, &11u32.to_ne_bytes()[..]));
    }

    #[test]
    fn test_iter_empty_and_missing_final_padding() {
        assert_eq!(AttrIter::new(&[]).count(), 0);

        // 1-byte payload, no trailing padding
        let buf = [5, 0, 1, 0, 0xaa];
        let attrs: Vec<_> = AttrIter::new(&buf).collect::<Result<_>>().unwrap();
        assert_eq!(attrs, vec![(1, &[0xaa][..])]);
    }

    #[test]
    fn test_iter_unaligned_buffer() {
        let mut enc = AttrEncoder::new();
        enc.push(3, &7u32.to_ne_bytes()).unwrap();
        enc.push(4, b"wlan0\0").unwrap();
        let encoded = enc.finish();

        // Shift the stream one byte off any natural alignment
        let mut backing = vec![0u8];
        backing.extend_from_slice(&encoded);
        let stream = &backing[1..];

        let attrs: Vec<_> = AttrIter::new(stream).collect::<Result<_>>().unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0], (3, &7u32.to_ne_bytes()[..]));
        assert_eq!(attrs[1], (4, &b"wlan0\0"[..]));

        let hdr = NlAttr::from_bytes(stream).unwrap();
        assert_eq!(hdr.nla_len, 8);
    }

    #[test]
    fn test_iter_masks_type_flags() {
        let buf = [4, 0, 21, 0x80];
        let (kind, payload) = AttrIter::new(&buf).next().unwrap().unwrap();
        assert_eq!(kind, 21);
        assert!(payload.is_empty());
    }

    #[test]
    fn test_iter_rejects_malformed() {
        // short header
        let mut it = AttrIter::new(&[8, 0, 3]);
        assert!(it.next().unwrap().is_err());
        assert!(it.next().is_none());

        // length shorter than the header
        assert!(AttrIter::new(&[2, 0, 3, 0]).next().unwrap().is_err());

        // length past end of buffer
        assert!(AttrIter::new(&[12, 0, 3, 0, 1, 0, 0, 0]).next().unwrap().is_err());
    }

    #[test]
    fn test_value_roundtrip_every_wire_type() {
        let values = [
            AttrValue::U8(7),
            AttrValue::U16(0xbeef),
            AttrValue::U32(2437),
            AttrValue::U64(1 << 40),
            AttrValue::I8(-60),
            AttrValue::I16(-1234),
            AttrValue::I32(-100_000),
            AttrValue::I64(-(1 << 40)),
            AttrValue::String("wlan0".into()),
            AttrValue::Bytes(vec![0xde, 0xad, 0xbe]),
            AttrValue::Flag,
            AttrValue::Nested(vec![4, 0, 1, 0]),
        ];
        for value in values {
            let buf = encode_one(9, &value);
            let (kind, payload) = AttrIter::new(&buf).next().unwrap().unwrap();
            assert_eq!(kind, 9);
            let decoded = AttrValue::decode(value.wire_type(), payload).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_value_roundtrip_boundaries() {
        let values = [
            AttrValue::U8(0),
            AttrValue::U8(u8::MAX),
            AttrValue::U16(u16::MAX),
            AttrValue::U32(0),
            AttrValue::U32(u32::MAX),
            AttrValue::U64(u64::MAX),
            AttrValue::I8(i8::MIN),
            AttrValue::I32(i32::MIN),
            AttrValue::I64(i64::MAX),
            AttrValue::String(String::new()),
            AttrValue::Bytes(Vec::new()),
            AttrValue::Nested(Vec::new()),
        ];
        for value in values {
            let buf = encode_one(1, &value);
            assert_eq!(buf.len() % NLA_ALIGNTO, 0);
            let (_, payload) = AttrIter::new(&buf).next().unwrap().unwrap();
            assert_eq!(AttrValue::decode(value.wire_type(), payload).unwrap(), value);
        }
    }

    #[test]
    fn test_decode_requires_exact_width() {
        assert!(AttrValue::decode(WireType::U32, &[1, 0, 0]).is_err());
        assert!(AttrValue::decode(WireType::U32, &[1, 0, 0, 0, 0]).is_err());
        assert!(AttrValue::decode(WireType::U16, &[1]).is_err());
        assert!(get::u64_ne(&[0; 4]).is_err());
    }

    #[test]
    fn test_decode_string_stops_at_nul() {
        let v = AttrValue::decode(WireType::String, b"wlan0\0garbage").unwrap();
        assert_eq!(v, AttrValue::String("wlan0".into()));
        let v = AttrValue::decode(WireType::String, b"wlan1").unwrap();
        assert_eq!(v, AttrValue::String("wlan1".into()));
    }

    #[test]
    fn test_decode_flag_ignores_payload() {
        assert_eq!(
            AttrValue::decode(WireType::Flag, &[1, 2, 3]).unwrap(),
            AttrValue::Flag
        );
    }
}
