//! Special-purpose address tables and the classification flags derived from
//! them (IANA IPv4/IPv6 special-purpose registries).

use super::ipv4::get_cidr_mask;
use super::ipv6::get_cidr_mask_v6;
use super::network::Network;
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

type BlockV4 = (u32, u8);
type BlockV6 = (u128, u8);

/// Not globally reachable IPv4 blocks.
const PRIVATE_V4: &[BlockV4] = &[
    (0x0000_0000, 8), // 0.0.0.0/8
    (0x0A00_0000, 8), // 10.0.0.0/8
    (0x7F00_0000, 8), // 127.0.0.0/8
    (0xA9FE_0000, 16), // 169.254.0.0/16
    (0xAC10_0000, 12), // 172.16.0.0/12
    (0xC000_0000, 24), // 192.0.0.0/24
    (0xC000_00AA, 31), // 192.0.0.170/31
    (0xC000_0200, 24), // 192.0.2.0/24
    (0xC0A8_0000, 16), // 192.168.0.0/16
    (0xC612_0000, 15), // 198.18.0.0/15
    (0xC633_6400, 24), // 198.51.100.0/24
    (0xCB00_7100, 24), // 203.0.113.0/24
    (0xF000_0000, 4), // 240.0.0.0/4
    (0xFFFF_FFFF, 32), // 255.255.255.255/32
];

/// Globally reachable carve-outs inside [`PRIVATE_V4`].
const PRIVATE_V4_EXCEPTIONS: &[BlockV4] = &[
    (0xC000_0009, 32), // 192.0.0.9/32
    (0xC000_000A, 32), // 192.0.0.10/32
];

const MULTICAST_V4: BlockV4 = (0xE000_0000, 4);
const RESERVED_V4: BlockV4 = (0xF000_0000, 4);
const LINK_LOCAL_V4: BlockV4 = (0xA9FE_0000, 16);
const LOOPBACK_V4: BlockV4 = (0x7F00_0000, 8);

const PRIVATE_V6: &[BlockV6] = &[
    (0x1, 128), // ::1/128
    (0x0, 128), // ::/128
    (0xFFFF_0000_0000, 96), // ::ffff:0:0/96
    (0x0064_FF9B_0001 << 80, 48), // 64:ff9b:1::/48
    (0x0100 << 112, 64), // 100::/64
    (0x2001 << 112, 23), // 2001::/23
    (0x2001_0DB8 << 96, 32), // 2001:db8::/32
    (0x2002 << 112, 16), // 2002::/16
    (0x3FFF << 112, 20), // 3fff::/20
    (0xFC00 << 112, 7), // fc00::/7
    (0xFE80 << 112, 10), // fe80::/10
];

const PRIVATE_V6_EXCEPTIONS: &[BlockV6] = &[
    ((0x2001_0001 << 96) | 0x1, 128), // 2001:1::1/128
    ((0x2001_0001 << 96) | 0x2, 128), // 2001:1::2/128
    (0x2001_0003 << 96, 32), // 2001:3::/32
    (0x2001_0004_0112 << 80, 48), // 2001:4:112::/48
    (0x2001_0020 << 96, 28), // 2001:20::/28
    (0x2001_0030 << 96, 28), // 2001:30::/28
];

/// IETF reserved IPv6 blocks.
const RESERVED_V6: &[BlockV6] = &[
    (0x0000 << 112, 8),
    (0x0100 << 112, 8),
    (0x0200 << 112, 7),
    (0x0400 << 112, 6),
    (0x0800 << 112, 5),
    (0x1000 << 112, 4),
    (0x4000 << 112, 3),
    (0x6000 << 112, 3),
    (0x8000 << 112, 3),
    (0xA000 << 112, 3),
    (0xC000 << 112, 3),
    (0xE000 << 112, 4),
    (0xF000 << 112, 5),
    (0xF800 << 112, 6),
    (0xFE00 << 112, 9),
];

const MULTICAST_V6: BlockV6 = (0xFF00 << 112, 8);
const LINK_LOCAL_V6: BlockV6 = (0xFE80 << 112, 10);
const LOOPBACK_V6: BlockV6 = (0x1, 128);

/// Mapped addresses live in `::ffff:0:0/96`.
pub const MAPPED_V6: BlockV6 = (0xFFFF_0000_0000, 96);

fn in_v4(ip: u32, (base, len): BlockV4) -> bool {
    // table lengths are all <= 32
    let mask = get_cidr_mask(len).unwrap_or(u32::MAX);
    ip & mask == base
}

fn in_v6(ip: u128, (base, len): BlockV6) -> bool {
    let mask = get_cidr_mask_v6(len).unwrap_or(u128::MAX);
    ip & mask == base
}

/// True when `ip` lies in `::ffff:0:0/96`.
pub fn is_mapped_v6(ip: Ipv6Addr) -> bool {
    in_v6(u128::from(ip), MAPPED_V6)
}

/// Classification of an address or network against the special-purpose
/// tables.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub is_private: bool,
    pub is_multicast: bool,
    pub is_reserved: bool,
    pub is_link_local: bool,
    pub is_loopback: bool,
}

impl Flags {
    pub fn for_ipv4(ip: Ipv4Addr) -> Flags {
        let bits = u32::from(ip);
        Flags {
            is_private: PRIVATE_V4.iter().any(|b| in_v4(bits, *b))
                && !PRIVATE_V4_EXCEPTIONS.iter().any(|b| in_v4(bits, *b)),
            is_multicast: in_v4(bits, MULTICAST_V4),
            is_reserved: in_v4(bits, RESERVED_V4),
            is_link_local: in_v4(bits, LINK_LOCAL_V4),
            is_loopback: in_v4(bits, LOOPBACK_V4),
        }
    }

    /// A mapped IPv6 address is classified as the IPv4 address it carries.
    pub fn for_ipv6(ip: Ipv6Addr) -> Flags {
        let bits = u128::from(ip);
        if in_v6(bits, MAPPED_V6) {
            return Flags::for_ipv4(Ipv4Addr::from(bits as u32));
        }
        Flags {
            is_private: PRIVATE_V6.iter().any(|b| in_v6(bits, *b))
                && !PRIVATE_V6_EXCEPTIONS.iter().any(|b| in_v6(bits, *b)),
            is_multicast: in_v6(bits, MULTICAST_V6),
            is_reserved: RESERVED_V6.iter().any(|b| in_v6(bits, *b)),
            is_link_local: in_v6(bits, LINK_LOCAL_V6),
            is_loopback: in_v6(bits, LOOPBACK_V6),
        }
    }

    pub fn for_addr(ip: IpAddr) -> Flags {
        match ip {
            IpAddr::V4(v4) => Flags::for_ipv4(v4),
            IpAddr::V6(v6) => Flags::for_ipv6(v6),
        }
    }

    /// A network carries a flag when both its first and last address do.
    /// Private additionally requires both ends inside the same private block
    /// and neither end inside an exception.
    pub fn for_network(net: &Network) -> Flags {
        let lo = Flags::for_addr(net.lo());
        let hi = Flags::for_addr(net.hi());
        Flags {
            is_private: network_is_private(net),
            is_multicast: lo.is_multicast && hi.is_multicast,
            is_reserved: lo.is_reserved && hi.is_reserved,
            is_link_local: lo.is_link_local && hi.is_link_local,
            is_loopback: lo.is_loopback && hi.is_loopback,
        }
    }
}

fn network_is_private(net: &Network) -> bool {
    match (net.lo(), net.hi()) {
        (IpAddr::V4(lo), IpAddr::V4(hi)) => {
            let (lo, hi) = (u32::from(lo), u32::from(hi));
            PRIVATE_V4.iter().any(|b| in_v4(lo, *b) && in_v4(hi, *b))
                && !PRIVATE_V4_EXCEPTIONS
                    .iter()
                    .any(|b| in_v4(lo, *b) || in_v4(hi, *b))
        }
        (IpAddr::V6(lo), IpAddr::V6(hi)) => {
            let (lo, hi) = (u128::from(lo), u128::from(hi));
            PRIVATE_V6.iter().any(|b| in_v6(lo, *b) && in_v6(hi, *b))
                && !PRIVATE_V6_EXCEPTIONS
                    .iter()
                    .any(|b| in_v6(lo, *b) || in_v6(hi, *b))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(s: &str) -> Flags {
        Flags::for_ipv4(s.parse().unwrap())
    }

    fn v6(s: &str) -> Flags {
        Flags::for_ipv6(s.parse().unwrap())
    }

    #[test]
    fn test_ipv4_flags() {
        assert!(v4("10.1.2.3").is_private);
        assert!(v4("172.31.255.255").is_private);
        assert!(!v4("172.32.0.0").is_private);
        assert!(v4("192.0.2.1").is_private);
        assert!(!v4("8.8.8.8").is_private);
        assert!(!v4("192.0.0.9").is_private);
        assert!(v4("192.0.0.8").is_private);
        assert!(v4("127.0.0.1").is_loopback);
        assert!(v4("169.254.10.1").is_link_local);
        assert!(v4("224.0.0.1").is_multicast);
        assert!(v4("250.1.1.1").is_reserved);
        assert_eq!(v4("8.8.8.8"), Flags::default());
    }

    #[test]
    fn test_ipv6_flags() {
        assert!(v6("::1").is_loopback);
        assert!(v6("::1").is_private);
        assert!(v6("fe80::1").is_link_local);
        assert!(v6("ff02::1").is_multicast);
        assert!(v6("fd00::1").is_private);
        assert!(v6("2001:db8::1").is_private);
        assert!(!v6("2001:4860:4860::8888").is_private);
        assert!(!v6("2001:1::1").is_private);
        assert!(v6("2001:1::3").is_private);
        assert!(v6("::").is_reserved);
        assert!(!v6("2001:db8::1").is_reserved);
    }

    #[test]
    fn test_mapped_inherits_ipv4() {
        assert!(v6("::ffff:127.0.0.1").is_loopback);
        assert!(!v6("::ffff:8.8.8.8").is_private);
        assert!(v6("::ffff:10.0.0.1").is_private);
        assert!(is_mapped_v6("::ffff:1.2.3.4".parse().unwrap()));
        assert!(!is_mapped_v6("::1.2.3.4".parse().unwrap()));
    }

    #[test]
    fn test_network_flags() {
        let net: Network = "192.168.0.0/16".parse().unwrap();
        assert!(Flags::for_network(&net).is_private);

        // spans 172.16/12 and beyond
        let net: Network = "172.0.0.0/8".parse().unwrap();
        assert!(!Flags::for_network(&net).is_private);

        let net: Network = "224.0.0.0/24".parse().unwrap();
        assert!(Flags::for_network(&net).is_multicast);

        let net: Network = "192.0.0.9/32".parse().unwrap();
        assert!(!Flags::for_network(&net).is_private);
        let net: Network = "192.0.0.8/29".parse().unwrap();
        assert!(Flags::for_network(&net).is_private);

        let net: Network = "fe80::/64".parse().unwrap();
        let flags = Flags::for_network(&net);
        assert!(flags.is_link_local);
        assert!(flags.is_private);
        assert!(!flags.is_loopback);
    }
}
