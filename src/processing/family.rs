//! IPv4 <-> IPv6 embedding transforms and EUI-64 construction.

use crate::error::ConvertError;
use crate::models::{is_mapped_v6, MacAddress, Network};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// The 6to4 prefix `2002::/16`.
const SIX_TO_FOUR_PREFIX: u128 = 0x2002 << 112;

/// Only a /64 can be combined with a 64-bit interface id.
const EUI64_PREFIX_LEN: u8 = 64;

/// `::ffff:a.b.c.d`: low 32 bits carry the IPv4 value, bits 32-47 are ones.
pub fn to_mapped_ipv6(v4: Ipv4Addr) -> Ipv6Addr {
    Ipv6Addr::from(0xFFFF_0000_0000u128 | u32::from(v4) as u128)
}

/// `2002:WWXX:YYZZ::/48` where `WWXXYYZZ` is the IPv4 value in hex.
pub fn to_6to4(v4: Ipv4Addr) -> Network {
    let bits = SIX_TO_FOUR_PREFIX | ((u32::from(v4) as u128) << 80);
    Network::new(IpAddr::V6(Ipv6Addr::from(bits)), 48)
        .unwrap_or_else(|_| unreachable!("48 is a valid IPv6 prefix length"))
}

/// The IPv4 address carried by an address in `::ffff:0:0/96`. Any other
/// address yields `None`; that is an answer, not a failure.
pub fn from_mapped_ipv6(v6: Ipv6Addr) -> Option<Ipv4Addr> {
    if is_mapped_v6(v6) {
        Some(Ipv4Addr::from(u128::from(v6) as u32))
    } else {
        None
    }
}

/// Modified EUI-64 interface id: flip the universal/local bit of the first
/// byte, then splice `FF:FE` between the third and fourth byte.
pub fn mac_to_eui64_interface_id(mac: &MacAddress) -> u64 {
    let b = mac.as_bytes();
    let eui = [b[0] ^ 0x02, b[1], b[2], 0xFF, 0xFE, b[3], b[4], b[5]];
    log::trace!("eui64 bytes for {mac}: {eui:02x?}");
    u64::from_be_bytes(eui)
}

/// Four zero-padded 16-bit hex groups, e.g. `0211:22ff:fe33:4455`.
pub fn format_interface_id(iid: u64) -> String {
    format!(
        "{:04x}:{:04x}:{:04x}:{:04x}",
        (iid >> 48) & 0xFFFF,
        (iid >> 32) & 0xFFFF,
        (iid >> 16) & 0xFFFF,
        iid & 0xFFFF
    )
}

/// Combine an IPv6 /64 prefix with the EUI-64 interface id of `mac`.
pub fn build_eui64_address(prefix: &Network, mac: &MacAddress) -> Result<Ipv6Addr, ConvertError> {
    let network = match prefix.addr() {
        IpAddr::V6(v6) if prefix.mask() == EUI64_PREFIX_LEN => v6,
        _ => {
            return Err(ConvertError::Domain(format!(
                "Prefix must be IPv6 /64, got {prefix}"
            )))
        }
    };
    let iid = mac_to_eui64_interface_id(mac);
    Ok(Ipv6Addr::from(u128::from(network) | iid as u128))
}
