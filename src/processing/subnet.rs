//! CIDR subnet analysis.
//!
//! Produces the bounds, masks, counts and classification of a network plus a
//! few sample hosts spread across it.

use crate::models::{host_mask, AddressCount, Flags, Network};
use crate::output::present;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr};

/// Most sample hosts reported for one network.
const MAX_SAMPLES: u128 = 4;

/// Networks smaller than this have no usable range and no samples.
const MIN_ADDRESSES_FOR_HOSTS: u128 = 4;

/// Result of [`analyze`].
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetInfo {
    /// 4 or 6.
    pub version: u8,
    pub network: String,
    /// IPv4 only.
    pub broadcast: Option<String>,
    /// Dotted mask for IPv4, the prefix length restated for IPv6.
    pub netmask: String,
    /// IPv4 only.
    pub hostmask: Option<String>,
    pub prefixlen: u8,
    pub num_addresses: AddressCount,
    /// IPv4 with at least 4 addresses only.
    pub first_usable: Option<String>,
    pub last_usable: Option<String>,
    #[serde(flatten)]
    pub flags: Flags,
    pub sample_hosts: Vec<String>,
}

/// Analyze a network. Never fails: tiny networks (/31, /32, /127, /128) just
/// report no usable range and no samples.
pub fn analyze(net: &Network) -> SubnetInfo {
    let count = net.num_addresses();
    let big_enough = count.at_least(MIN_ADDRESSES_FOR_HOSTS);
    log::debug!("analyze {net}: {count} addresses");

    let (broadcast, netmask, hostmask) = match net.hi() {
        IpAddr::V4(hi) => {
            let mask = net.netmask_bits() as u32;
            (
                Some(hi.to_string()),
                Ipv4Addr::from(mask).to_string(),
                host_mask(net.mask()).ok().map(|m| m.to_string()),
            )
        }
        IpAddr::V6(_) => (None, net.mask().to_string(), None),
    };

    let (first_usable, last_usable) = match (net.lo(), net.hi()) {
        (IpAddr::V4(lo), IpAddr::V4(hi)) if big_enough => (
            Some(Ipv4Addr::from(u32::from(lo) + 1).to_string()),
            Some(Ipv4Addr::from(u32::from(hi) - 1).to_string()),
        ),
        _ => (None, None),
    };

    SubnetInfo {
        version: net.version(),
        network: present::normalized(net.lo()),
        broadcast,
        netmask,
        hostmask,
        prefixlen: net.mask(),
        num_addresses: count,
        first_usable,
        last_usable,
        flags: Flags::for_network(net),
        sample_hosts: sample_hosts(net)
            .into_iter()
            .map(present::normalized)
            .collect(),
    }
}

/// Up to four hosts at offsets `i * max(count / 10, 1)` for `i` in
/// `1..min(5, count - 1)`, stopping at the first offset past the end.
pub fn sample_hosts(net: &Network) -> Vec<IpAddr> {
    let count = net.num_addresses();
    if !count.at_least(MIN_ADDRESSES_FOR_HOSTS) {
        return Vec::new();
    }

    let step = count.tenth().max(1);
    // count >= 4 here, so count - 1 >= 3
    let end = (MAX_SAMPLES + 1).min(count.last_offset());
    (1..end)
        .map_while(|i| i.checked_mul(step).and_then(|offset| net.nth(offset)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_network;

    fn info(s: &str) -> SubnetInfo {
        analyze(&parse_network(s).unwrap())
    }

    #[test]
    fn test_analyze_slash_24() {
        let i = info("192.0.2.77/24");
        assert_eq!(i.version, 4);
        assert_eq!(i.network, "192.0.2.0");
        assert_eq!(i.broadcast.as_deref(), Some("192.0.2.255"));
        assert_eq!(i.netmask, "255.255.255.0");
        assert_eq!(i.hostmask.as_deref(), Some("0.0.0.255"));
        assert_eq!(i.prefixlen, 24);
        assert_eq!(i.num_addresses.as_u128(), Some(256));
        assert_eq!(i.first_usable.as_deref(), Some("192.0.2.1"));
        assert_eq!(i.last_usable.as_deref(), Some("192.0.2.254"));
        assert!(i.flags.is_private);
        assert_eq!(
            i.sample_hosts,
            vec!["192.0.2.25", "192.0.2.50", "192.0.2.75", "192.0.2.100"]
        );
    }

    #[test]
    fn test_analyze_slash_30() {
        let i = info("192.0.2.0/30");
        assert_eq!(i.num_addresses.as_u128(), Some(4));
        assert_eq!(i.first_usable.as_deref(), Some("192.0.2.1"));
        assert_eq!(i.last_usable.as_deref(), Some("192.0.2.2"));
        assert_eq!(i.sample_hosts, vec!["192.0.2.1", "192.0.2.2"]);
    }

    #[test]
    fn test_analyze_tiny_networks() {
        for s in ["192.0.2.0/31", "192.0.2.1/32", "2001:db8::/127", "2001:db8::1/128"] {
            let i = info(s);
            assert_eq!(i.first_usable, None, "{s}");
            assert_eq!(i.last_usable, None, "{s}");
            assert!(i.sample_hosts.is_empty(), "{s}");
        }
        assert_eq!(info("192.0.2.0/31").broadcast.as_deref(), Some("192.0.2.1"));
    }

    #[test]
    fn test_analyze_slash_29_stride() {
        // 8 addresses: step 1, offsets 1..=4
        let i = info("10.0.0.0/29");
        assert_eq!(
            i.sample_hosts,
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]
        );
        // 16 addresses: still step 1
        let i = info("10.0.0.0/28");
        assert_eq!(i.sample_hosts, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.4"]);
    }

    #[test]
    fn test_analyze_ipv6() {
        let i = info("2001:db8::/64");
        assert_eq!(i.version, 6);
        assert_eq!(i.network, "2001:db8::");
        assert_eq!(i.broadcast, None);
        assert_eq!(i.netmask, "64");
        assert_eq!(i.hostmask, None);
        assert_eq!(i.first_usable, None);
        assert_eq!(i.num_addresses.as_u128(), Some(1u128 << 64));
        assert_eq!(i.sample_hosts.len(), 4);
        assert_eq!(i.sample_hosts[0], "2001:db8::1999:9999:9999:9999");
    }

    #[test]
    fn test_analyze_whole_ipv6_space() {
        let i = info("::/0");
        assert_eq!(i.num_addresses.as_u128(), None);
        assert_eq!(
            i.num_addresses.to_string(),
            "340282366920938463463374607431768211456"
        );
        assert_eq!(i.sample_hosts.len(), 4);
        assert!(!i.flags.is_private);
    }

    #[test]
    fn test_subnet_info_json_fields() {
        let json = serde_json::to_value(info("10.0.0.0/8")).unwrap();
        assert_eq!(json["num_addresses"], "16777216");
        assert_eq!(json["is_private"], true);
        assert_eq!(json["is_loopback"], false);
        assert_eq!(json["prefixlen"], 8);
        assert_eq!(json["sample_hosts"][0], "10.25.153.153");
    }

    #[test]
    fn test_subnet_info_json_large_counts() {
        let json = serde_json::to_value(info("2001:db8::/64")).unwrap();
        assert_eq!(json["num_addresses"], "18446744073709551616");
        let json = serde_json::to_value(info("::/0")).unwrap();
        assert_eq!(json["num_addresses"], "340282366920938463463374607431768211456");
        let json = serde_json::to_value(info("::/1")).unwrap();
        assert_eq!(json["num_addresses"], "170141183460469231731687303715884105728");
    }
}
