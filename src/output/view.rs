//! Binary/hex views of an address or a network.

use super::present::{
    binary_v4, binary_v6, binary_view, compress, expand, hex_view, int_value, normalized,
    reverse_dns_name,
};
use crate::error::ConvertError;
use crate::models::{host_mask, Flags, Network};
use crate::parser::{parse_address, parse_network};
use crate::processing::from_mapped_ipv6;
use serde::{Serialize, Serializer};
use std::net::{IpAddr, Ipv4Addr};

/// Network-shaped view.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkView {
    pub version: u8,
    pub input: String,
    pub network: String,
    pub broadcast: Option<String>,
    pub prefixlen: u8,
    pub netmask: String,
    pub hostmask: Option<String>,
    pub network_bin: String,
    pub network_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_bin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_hex: Option<String>,
    pub netmask_bin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netmask_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostmask_bin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostmask_hex: Option<String>,
    /// IPv6 only: `(2^128 - 1) XOR (2^(128 - prefixlen) - 1)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_mask_hex: Option<String>,
}

/// Address-shaped view.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AddressView {
    pub version: u8,
    pub input: String,
    pub normalized: String,
    pub binary: String,
    pub hex: String,
    /// Decimal string; IPv6 values do not fit a JSON integer.
    #[serde(serialize_with = "as_decimal")]
    pub int: u128,
    #[serde(flatten)]
    pub flags: Flags,
    pub reverse_dns: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4_mapped: Option<String>,
}

fn as_decimal<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BinHexView {
    Network(NetworkView),
    Address(AddressView),
}

/// Network view for input containing `/`, address view otherwise.
pub fn bin_hex_view(raw: &str) -> Result<BinHexView, ConvertError> {
    if raw.contains('/') {
        let net = parse_network(raw)?;
        return Ok(BinHexView::Network(network_view(raw, &net)));
    }
    let ip = parse_address(raw)?;
    Ok(BinHexView::Address(address_view(raw, ip)))
}

pub fn network_view(raw: &str, net: &Network) -> NetworkView {
    let mask = net.netmask_bits();
    let mut view = NetworkView {
        version: net.version(),
        input: raw.to_string(),
        network: normalized(net.lo()),
        broadcast: None,
        prefixlen: net.mask(),
        netmask: net.mask().to_string(),
        hostmask: None,
        network_bin: binary_view(net.lo()),
        network_hex: hex_view(int_value(net.lo())),
        broadcast_bin: None,
        broadcast_hex: None,
        netmask_bin: binary_v6(mask),
        netmask_hex: None,
        hostmask_bin: None,
        hostmask_hex: None,
        prefix_mask_hex: Some(hex_view(mask)),
    };

    if let IpAddr::V4(hi) = net.hi() {
        let mask = mask as u32;
        // prefix length was validated by `Network::new`
        let host = u32::from(host_mask(net.mask()).unwrap_or(Ipv4Addr::UNSPECIFIED));
        view.broadcast = Some(hi.to_string());
        view.broadcast_bin = Some(binary_v4(u32::from(hi)));
        view.broadcast_hex = Some(hex_view(u32::from(hi) as u128));
        view.netmask = Ipv4Addr::from(mask).to_string();
        view.netmask_bin = binary_v4(mask);
        view.netmask_hex = Some(hex_view(mask as u128));
        view.hostmask = Some(Ipv4Addr::from(host).to_string());
        view.hostmask_bin = Some(binary_v4(host));
        view.hostmask_hex = Some(hex_view(host as u128));
        view.prefix_mask_hex = None;
    }
    view
}

pub fn address_view(raw: &str, ip: IpAddr) -> AddressView {
    let mut view = AddressView {
        version: if ip.is_ipv4() { 4 } else { 6 },
        input: raw.to_string(),
        normalized: normalized(ip),
        binary: binary_view(ip),
        hex: hex_view(int_value(ip)),
        int: int_value(ip),
        flags: Flags::for_addr(ip),
        reverse_dns: reverse_dns_name(ip),
        compressed: None,
        expanded: None,
        ipv4_mapped: None,
    };
    if let IpAddr::V6(v6) = ip {
        view.compressed = Some(compress(v6));
        view.expanded = Some(expand(v6));
        view.ipv4_mapped = from_mapped_ipv6(v6).map(|v4| v4.to_string());
    }
    view
}
