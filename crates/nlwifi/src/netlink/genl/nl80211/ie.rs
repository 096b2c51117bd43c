//! 802.11 information elements.
//!
//! Elements are `{id: u8, len: u8, data: [u8; len]}` records packed back to
//! back with no padding.

use winnow::binary::u8 as byte;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take;

use crate::netlink::error::{Error, Result};

type PResult<T> = core::result::Result<T, ErrMode<ContextError>>;

/// Element id of the SSID element.
pub const IE_SSID: u8 = 0;

/// One information element, borrowing its data from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InformationElement<'a> {
    pub id: u8,
    pub data: &'a [u8],
}

impl<'a> InformationElement<'a> {
    fn parse(input: &mut &'a [u8]) -> PResult<Self> {
        let id = byte.parse_next(input)?;
        let len = byte.parse_next(input)?;
        let data: &'a [u8] = take(len as usize).parse_next(input)?;
        Ok(Self { id, data })
    }
}

/// Parse a run of information elements.
///
/// An empty buffer yields no elements. A truncated header or a length that
/// runs past the end of the buffer fails the whole parse.
pub fn parse_elements(data: &[u8]) -> Result<Vec<InformationElement<'_>>> {
    let mut input = data;
    let mut elements = Vec::new();

    while !input.is_empty() {
        let offset = data.len() - input.len();
        let element = InformationElement::parse(&mut input).map_err(|_| {
            Error::InvalidElement(format!("truncated element at offset {}", offset))
        })?;
        elements.push(element);
    }

    Ok(elements)
}
