//! Interface name and index utilities.
//!
//! Names are resolved through `/sys/class/net`, which reflects the network
//! namespace of the calling process.

use crate::netlink::{Error, InterfaceRef, Result};

/// Maximum interface name length (including null terminator).
pub const IFNAMSIZ: usize = 16;

/// Validate an interface name.
pub fn validate(name: &str) -> Result<()> {
    let invalid = |why: &str| Error::InvalidMessage(format!("invalid interface name '{}': {}", name, why));

    if name.is_empty() {
        return Err(invalid("empty name"));
    }

    if name.len() >= IFNAMSIZ {
        return Err(invalid("name too long"));
    }

    if name.contains('/') || name.contains('\0') || name.chars().any(char::is_whitespace) {
        return Err(invalid("name contains invalid characters"));
    }

    Ok(())
}

/// Convert an interface name to index.
pub fn name_to_index(name: &str) -> Result<u32> {
    let not_found = || Error::InterfaceNotFound {
        name: name.to_string(),
    };

    validate(name).map_err(|_| not_found())?;

    let path = format!("/sys/class/net/{}/ifindex", name);
    let content = std::fs::read_to_string(&path).map_err(|_| not_found())?;

    content.trim().parse().map_err(|_| not_found())
}

/// Resolve an interface reference to its index.
pub fn resolve(iface: &InterfaceRef) -> Result<u32> {
    match iface {
        InterfaceRef::Index(idx) => Ok(*idx),
        InterfaceRef::Name(name) => name_to_index(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(validate("wlan0").is_ok());
        assert!(validate("wlp2s0").is_ok());
        assert!(validate("").is_err());
        assert!(validate("a-very-long-interface-name").is_err());
        assert!(validate("wlan/0").is_err());
        assert!(validate("wlan 0").is_err());
    }

    #[test]
    fn test_resolve_index_passes_through() {
        assert_eq!(resolve(&InterfaceRef::index(7)).unwrap(), 7);
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let err = name_to_index("nlwifi-nope0").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::InterfaceNotFound { ref name } if name == "nlwifi-nope0"));

        let err = resolve(&InterfaceRef::name("bad/name")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_loopback() {
        // Every Linux namespace has a loopback device
        if std::path::Path::new("/sys/class/net/lo/ifindex").exists() {
            assert!(name_to_index("lo").unwrap() > 0);
        }
    }
}
