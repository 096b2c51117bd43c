//! Text and JSON output for wifi.

use std::io::{self, Write};
use std::time::Duration;

use nlwifi::netlink::genl::nl80211::frequency_to_channel;
use nlwifi::{Bss, Result, StationInfo, WifiInterface};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

pub fn print_interfaces(interfaces: &[WifiInterface], json: bool) -> Result<()> {
    if json {
        return print_json(interfaces);
    }

    for iface in interfaces {
        println!("{}: {}", iface.index, iface.name);
        println!("\ttype {}", iface.iftype);
        println!("\taddr {}", iface.hardware_addr);
        println!("\twiphy {}  wdev 0x{:x}", iface.phy, iface.device);
        if iface.frequency != 0 {
            println!("\t{}", format_frequency(iface.frequency));
        }
    }
    Ok(())
}

pub fn print_bss(bss: &Bss, json: bool) -> Result<()> {
    if json {
        return print_json(bss);
    }

    println!("BSS {} ({})", bss.bssid, bss.status);
    println!("\tSSID: {}", bss.ssid);
    println!("\t{}", format_frequency(bss.frequency));
    println!("\tbeacon interval: {} TU", bss.beacon_interval.as_micros() / 1024);
    println!("\tlast seen: {} ms ago", bss.last_seen.as_millis());
    Ok(())
}

pub fn print_stations(stations: &[StationInfo], json: bool) -> Result<()> {
    if json {
        return print_json(stations);
    }

    for sta in stations {
        println!("Station {}", sta.hardware_addr);
        println!("\tconnected time:\t{}", format_secs(sta.connected));
        println!("\tinactive time:\t{} ms", sta.inactive.as_millis());
        println!("\trx bytes:\t{} ({})", sta.rx_bytes, format_bytes(sta.rx_bytes));
        println!("\trx packets:\t{}", sta.rx_packets);
        println!("\ttx bytes:\t{} ({})", sta.tx_bytes, format_bytes(sta.tx_bytes));
        println!("\ttx packets:\t{}", sta.tx_packets);
        println!("\ttx retries:\t{}", sta.tx_retries);
        println!("\ttx failed:\t{}", sta.tx_failed);
        println!("\tbeacon loss:\t{}", sta.beacon_loss);
        println!("\tsignal:\t\t{} dBm", sta.signal);
        println!("\trx bitrate:\t{}", format_bitrate(sta.rx_bitrate));
        println!("\ttx bitrate:\t{}", format_bitrate(sta.tx_bitrate));
    }
    Ok(())
}

fn format_frequency(mhz: u32) -> String {
    match frequency_to_channel(mhz) {
        Some(ch) => format!("{} MHz (channel {})", mhz, ch),
        None => format!("{} MHz", mhz),
    }
}

fn format_secs(d: Duration) -> String {
    format!("{} seconds", d.as_secs())
}

/// Format a byte count with binary units.
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    let mut value = bytes as f64;
    let mut unit = None;
    for u in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = Some(u);
    }

    match unit {
        Some(u) => format!("{:.2} {}", value, u),
        None => format!("{} B", bytes),
    }
}

/// Format a bit rate the way `iw` does (MBit/s with one decimal).
fn format_bitrate(bits_per_sec: u64) -> String {
    if bits_per_sec == 0 {
        return "unknown".to_string();
    }
    format!("{:.1} MBit/s", bits_per_sec as f64 / 1_000_000.0)
}
