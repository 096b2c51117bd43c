//! Channel number to center frequency mapping.

use crate::netlink::error::{Error, Result};

/// Supported (channel, MHz) pairs.
static CHANNELS: &[(u32, u32)] = &[
    // 2.4 GHz
    (1, 2412),
    (2, 2417),
    (3, 2422),
    (4, 2427),
    (5, 2432),
    (6, 2437),
    (7, 2442),
    (8, 2447),
    (9, 2452),
    (10, 2457),
    (11, 2462),
    (12, 2467),
    (13, 2472),
    (14, 2484),
    // 5 GHz UNII-1 and UNII-2
    (36, 5180),
    (40, 5200),
    (44, 5220),
    (48, 5240),
    (52, 5260),
    (56, 5280),
    (60, 5300),
    (64, 5320),
    // UNII-2 extended
    (100, 5500),
    (104, 5520),
    (108, 5540),
    (112, 5560),
    (116, 5580),
    (120, 5600),
    (124, 5620),
    (128, 5640),
    (132, 5660),
    (136, 5680),
    (140, 5700),
    (144, 5720),
    // UNII-3
    (149, 5745),
    (153, 5765),
    (157, 5785),
    (161, 5805),
    (165, 5825),
];

/// Look up the center frequency (MHz) of a channel.
pub fn channel_to_frequency(channel: u32) -> Result<u32> {
    CHANNELS
        .iter()
        .find(|(ch, _)| *ch == channel)
        .map(|(_, freq)| *freq)
        .ok_or(Error::InvalidChannel { channel })
}

/// Look up the channel for a center frequency (MHz).
pub fn frequency_to_channel(frequency: u32) -> Option<u32> {
    CHANNELS
        .iter()
        .find(|(_, freq)| *freq == frequency)
        .map(|(ch, _)| *ch)
}
