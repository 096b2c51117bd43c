//! nl80211 connection for querying and configuring wireless interfaces.

use tokio::sync::Mutex;
use tracing::debug;

use super::attrs::{Attribute, Nl80211Attr};
use super::channel::channel_to_frequency;
use super::parse::{parse_bss, parse_interfaces, parse_station_info};
use super::request::{build, connect_attributes};
use super::types::{Bss, ChannelWidth, InterfaceType, StationInfo, WifiInterface};
use super::{NL80211_GENL_NAME, Nl80211Cmd};
use crate::netlink::error::{Error, Result};
use crate::netlink::genl::exchange;
use crate::netlink::genl::{FamilyInfo, GenlConnection, GenlMessage, GenlTransport, RequestKind};
use crate::netlink::interface_ref::InterfaceRef;
use crate::util::ifname;

/// Connection for nl80211 WiFi operations.
///
/// Wraps a [`GenlTransport`] together with the resolved nl80211 family.
/// Each request/reply exchange holds an internal lock, so a shared handle
/// can be used from several tasks without their replies interleaving.
///
/// Interface arguments accept a name (`"wlan0"`) or an index (`3u32`).
pub struct Nl80211Connection<T: GenlTransport = GenlConnection> {
    transport: T,
    family: FamilyInfo,
    lock: Mutex<()>,
}

impl Nl80211Connection<GenlConnection> {
    /// Open a generic netlink socket and resolve the nl80211 family.
    ///
    /// Fails with [`Error::FamilyNotFound`] when the kernel has no nl80211
    /// (no `cfg80211` module loaded).
    pub async fn new() -> Result<Self> {
        Self::with_transport(GenlConnection::new()?).await
    }
}

impl<T: GenlTransport> Nl80211Connection<T> {
    /// Resolve the nl80211 family over an existing transport.
    pub async fn with_transport(transport: T) -> Result<Self> {
        let family = transport.resolve_family(NL80211_GENL_NAME).await?;
        debug!(id = family.id, version = family.version, "nl80211 connection ready");
        Ok(Self {
            transport,
            family,
            lock: Mutex::new(()),
        })
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The dynamically assigned nl80211 family id.
    pub fn family_id(&self) -> u16 {
        self.family.id
    }

    /// The nl80211 family version reported by the kernel.
    pub fn family_version(&self) -> u8 {
        self.family.version
    }

    /// Release the transport. Later operations fail with [`Error::Closed`].
    ///
    /// Closing twice is harmless.
    pub fn close(&mut self) -> Result<()> {
        self.transport.close()
    }

    async fn exchange(
        &self,
        cmd: Nl80211Cmd,
        kind: RequestKind,
        attrs: &[Attribute],
    ) -> Result<Vec<GenlMessage>> {
        let msg = build(cmd, self.family.version, attrs)?;
        let _guard = self.lock.lock().await;
        exchange::execute(&self.transport, self.family.id, &msg, kind).await
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// List every wireless interface.
    pub async fn interfaces(&self) -> Result<Vec<WifiInterface>> {
        let replies = self
            .exchange(Nl80211Cmd::GetInterface, RequestKind::Dump, &[])
            .await
            .map_err(|e| e.with_context("listing interfaces"))?;
        parse_interfaces(&replies)
    }

    /// Find a wireless interface by name.
    ///
    /// Scans the full interface dump, so names that are not wireless are
    /// reported as [`Error::InterfaceNotFound`].
    pub async fn interface_by_name(&self, name: &str) -> Result<WifiInterface> {
        self.interfaces()
            .await?
            .into_iter()
            .find(|iface| iface.name == name)
            .ok_or_else(|| Error::InterfaceNotFound {
                name: name.to_string(),
            })
    }

    /// Query a single wireless interface.
    pub async fn interface(&self, iface: impl Into<InterfaceRef>) -> Result<WifiInterface> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        let replies = self
            .exchange(
                Nl80211Cmd::GetInterface,
                RequestKind::Request,
                &[Attribute::u32(Nl80211Attr::Ifindex, ifindex)],
            )
            .await
            .map_err(|e| e.with_context(format!("querying {}", iface)))?;

        parse_interfaces(&replies)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InterfaceNotFound {
                name: iface.to_string(),
            })
    }

    /// Get the BSS the interface is currently associated with.
    ///
    /// Returns [`Error::BssNotFound`] when the interface is not associated.
    pub async fn bss(&self, iface: impl Into<InterfaceRef>) -> Result<Bss> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        let replies = self
            .exchange(
                Nl80211Cmd::GetScan,
                RequestKind::Dump,
                &[Attribute::u32(Nl80211Attr::Ifindex, ifindex)],
            )
            .await
            .map_err(|e| e.with_context(format!("reading scan results on {}", iface)))?;

        parse_bss(&replies)?.ok_or_else(|| Error::BssNotFound {
            interface: iface.to_string(),
        })
    }

    /// Get station statistics for the interface.
    ///
    /// On a client interface this is the access point it is associated with.
    /// Returns [`Error::StationNotFound`] when the kernel reports no station.
    pub async fn station_info(&self, iface: impl Into<InterfaceRef>) -> Result<Vec<StationInfo>> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        let replies = self
            .exchange(
                Nl80211Cmd::GetStation,
                RequestKind::Dump,
                &[Attribute::u32(Nl80211Attr::Ifindex, ifindex)],
            )
            .await
            .map_err(|e| e.with_context(format!("reading station info on {}", iface)))?;

        let stations = parse_station_info(&replies)?;
        if stations.is_empty() {
            return Err(Error::StationNotFound {
                interface: iface.to_string(),
            });
        }
        Ok(stations)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Tune the interface to a channel number.
    ///
    /// The channel is checked against the supported table before anything is
    /// sent; unknown channels fail with [`Error::InvalidChannel`].
    pub async fn set_channel(&self, iface: impl Into<InterfaceRef>, channel: u32) -> Result<()> {
        let frequency = channel_to_frequency(channel)?;
        self.set_frequency(iface, frequency).await
    }

    /// Tune the interface to a center frequency in MHz.
    pub async fn set_frequency(&self, iface: impl Into<InterfaceRef>, frequency: u32) -> Result<()> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        self.exchange(
            Nl80211Cmd::SetWiphy,
            RequestKind::Acknowledge,
            &[
                Attribute::u32(Nl80211Attr::Ifindex, ifindex),
                Attribute::u32(Nl80211Attr::WiphyFreq, frequency),
            ],
        )
        .await
        .map_err(|e| e.with_context(format!("setting {} MHz on {}", frequency, iface)))?;

        Ok(())
    }

    /// Set the channel width of the interface.
    pub async fn set_channel_width(
        &self,
        iface: impl Into<InterfaceRef>,
        width: ChannelWidth,
    ) -> Result<()> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        self.exchange(
            Nl80211Cmd::SetWiphy,
            RequestKind::Acknowledge,
            &[
                Attribute::u32(Nl80211Attr::Ifindex, ifindex),
                Attribute::u32(Nl80211Attr::ChannelWidth, width as u32),
            ],
        )
        .await
        .map_err(|e| e.with_context(format!("setting width {} on {}", width, iface)))?;

        Ok(())
    }

    /// Change the operating mode of the interface.
    ///
    /// The kernel usually refuses this with `EBUSY` while the interface is up.
    pub async fn set_interface_type(
        &self,
        iface: impl Into<InterfaceRef>,
        iftype: InterfaceType,
    ) -> Result<()> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        self.exchange(
            Nl80211Cmd::SetInterface,
            RequestKind::Acknowledge,
            &[
                Attribute::u32(Nl80211Attr::Ifindex, ifindex),
                Attribute::u32(Nl80211Attr::Iftype, iftype as u32),
            ],
        )
        .await
        .map_err(|e| e.with_context(format!("setting {} to {}", iface, iftype.keyword())))?;

        Ok(())
    }

    /// Connect to a network.
    ///
    /// An empty `passphrase` connects to an open network; otherwise the
    /// kernel runs a WPA2-PSK handshake with a key derived from the
    /// passphrase and SSID. Success means the kernel accepted the request,
    /// not that the association completed.
    pub async fn connect(
        &self,
        iface: impl Into<InterfaceRef>,
        ssid: &str,
        passphrase: &str,
    ) -> Result<()> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;
        let attrs = connect_attributes(ifindex, ssid, passphrase);

        self.exchange(Nl80211Cmd::Connect, RequestKind::Acknowledge, &attrs)
            .await
            .map_err(|e| e.with_context(format!("connecting {} to {:?}", iface, ssid)))?;

        Ok(())
    }

    /// Disconnect the interface from its current network.
    pub async fn disconnect(&self, iface: impl Into<InterfaceRef>) -> Result<()> {
        let iface = iface.into();
        let ifindex = ifname::resolve(&iface)?;

        self.exchange(
            Nl80211Cmd::Disconnect,
            RequestKind::Acknowledge,
            &[Attribute::u32(Nl80211Attr::Ifindex, ifindex)],
        )
        .await
        .map_err(|e| e.with_context(format!("disconnecting {}", iface)))?;

        Ok(())
    }
}
