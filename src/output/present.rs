//! Canonical string encodings of addresses.

use itertools::Itertools;
use std::net::IpAddr;

pub use crate::models::{compress, expand, normalized};

/// `d.c.b.a.in-addr.arpa.` or the 32 reversed nibbles under `ip6.arpa.`.
pub fn reverse_dns_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            format!("{}.{}.{}.{}.in-addr.arpa.", o[3], o[2], o[1], o[0])
        }
        IpAddr::V6(v6) => {
            let nibbles = format!("{:032x}", u128::from(v6));
            format!("{}.ip6.arpa.", nibbles.chars().rev().join("."))
        }
    }
}

fn grouped_bits(bits: &str, width: usize, sep: &str) -> String {
    let chunks = bits.chars().chunks(width);
    let grouped = chunks
        .into_iter()
        .map(|chunk| chunk.collect::<String>())
        .join(sep);
    grouped
}

/// Four dot-separated 8-bit groups.
pub fn binary_v4(value: u32) -> String {
    grouped_bits(&format!("{value:032b}"), 8, ".")
}

/// Eight colon-separated 16-bit groups.
pub fn binary_v6(value: u128) -> String {
    grouped_bits(&format!("{value:0128b}"), 16, ":")
}

/// Binary view of an address (or mask rendered as an address).
pub fn binary_view(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => binary_v4(u32::from(v4)),
        IpAddr::V6(v6) => binary_v6(u128::from(v6)),
    }
}

/// `0x` + uppercase hex, no padding.
pub fn hex_view(value: u128) -> String {
    format!("0x{value:X}")
}

/// Integer value of an address, widened to `u128`.
pub fn int_value(ip: IpAddr) -> u128 {
    match ip {
        IpAddr::V4(v4) => u32::from(v4) as u128,
        IpAddr::V6(v6) => u128::from(v6),
    }
}
