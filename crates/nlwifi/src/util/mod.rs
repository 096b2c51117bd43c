//! Shared utilities for nlwifi.

pub mod addr;
pub mod ifname;

pub use addr::MacAddr;
pub use ifname::name_to_index;
