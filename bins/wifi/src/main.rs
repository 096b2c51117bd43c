//! wifi - wireless interface management utility
//!
//! Queries and configures wireless interfaces via nl80211.

mod output;

use clap::{Parser, Subcommand};
use nlwifi::{ChannelWidth, InterfaceRef, InterfaceType, Nl80211Connection, Result};

#[derive(Parser)]
#[command(name = "wifi")]
#[command(about = "WiFi management utility", long_about = None)]
#[command(version)]
struct Cli {
    /// Output JSON.
    #[arg(short = 'j', long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List wireless interfaces
    #[command(visible_alias = "ls")]
    List,

    /// Show one wireless interface
    Show {
        /// Interface name or index
        interface: InterfaceRef,
    },

    /// Tune to a channel number
    SetChannel {
        /// Interface name or index
        interface: InterfaceRef,
        /// Channel number (1-14, 36-165)
        channel: u32,
    },

    /// Tune to a center frequency
    SetFreq {
        /// Interface name or index
        interface: InterfaceRef,
        /// Frequency in MHz
        frequency: u32,
    },

    /// Set the channel width
    SetWidth {
        /// Interface name or index
        interface: InterfaceRef,
        /// Width in MHz (20-noht, 20, 40, 80, 80+80, 160, 320, ...)
        width: ChannelWidth,
    },

    /// Change the interface mode
    SetType {
        /// Interface name or index
        interface: InterfaceRef,
        /// Mode (station, ap, monitor, adhoc, mesh, ...)
        #[arg(value_name = "TYPE")]
        iftype: InterfaceType,
    },

    /// Connect to a network
    Connect {
        /// Interface name or index
        interface: InterfaceRef,
        /// Network name
        ssid: String,
        /// WPA2 passphrase (omit for an open network)
        #[arg(long)]
        psk: Option<String>,
    },

    /// Disconnect from the current network
    Disconnect {
        /// Interface name or index
        interface: InterfaceRef,
    },

    /// Show the associated BSS
    Bss {
        /// Interface name or index
        interface: InterfaceRef,
    },

    /// Show station statistics
    #[command(visible_alias = "sta")]
    Station {
        /// Interface name or index
        interface: InterfaceRef,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    let conn = Nl80211Connection::new().await?;

    match cli.command {
        Command::List => {
            let interfaces = conn.interfaces().await?;
            output::print_interfaces(&interfaces, json)
        }
        Command::Show { interface } => {
            let iface = conn.interface(interface).await?;
            output::print_interfaces(std::slice::from_ref(&iface), json)
        }
        Command::SetChannel { interface, channel } => {
            conn.set_channel(interface, channel).await
        }
        Command::SetFreq {
            interface,
            frequency,
        } => conn.set_frequency(interface, frequency).await,
        Command::SetWidth { interface, width } => conn.set_channel_width(interface, width).await,
        Command::SetType { interface, iftype } => {
            conn.set_interface_type(interface, iftype).await
        }
        Command::Connect {
            interface,
            ssid,
            psk,
        } => {
            conn.connect(interface, &ssid, psk.as_deref().unwrap_or(""))
                .await
        }
        Command::Disconnect { interface } => conn.disconnect(interface).await,
        Command::Bss { interface } => {
            let bss = conn.bss(interface).await?;
            output::print_bss(&bss, json)
        }
        Command::Station { interface } => {
            let stations = conn.station_info(interface).await?;
            output::print_stations(&stations, json)
        }
    }
}
