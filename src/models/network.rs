//! CIDR network value covering both address families.

use super::ipv4::{broadcast_addr, cut_addr, get_cidr_mask, MAX_LENGTH};
use super::ipv6::{cut_addr_v6, get_cidr_mask_v6, last_addr_v6, AddressCount, MAX_LENGTH_V6};
use super::canonical::normalized;
use crate::error::ConvertError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// An address plus prefix length. `addr` is always the network address: host
/// bits are zeroed on construction.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    addr: IpAddr,
    mask: u8,
}

impl Network {
    /// Build the network containing `addr`, masking off any host bits.
    pub fn new(addr: IpAddr, mask: u8) -> Result<Network, ConvertError> {
        let addr = match addr {
            IpAddr::V4(v4) => IpAddr::V4(cut_addr(v4, mask)?),
            IpAddr::V6(v6) => IpAddr::V6(cut_addr_v6(v6, mask)?),
        };
        Ok(Network { addr, mask })
    }

    /// The network address.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// The prefix length (0-32 or 0-128).
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// 4 or 6.
    pub fn version(&self) -> u8 {
        match self.addr {
            IpAddr::V4(_) => 4,
            IpAddr::V6(_) => 6,
        }
    }

    /// Bit width of the family.
    pub fn max_len(&self) -> u8 {
        match self.addr {
            IpAddr::V4(_) => MAX_LENGTH,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        }
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> IpAddr {
        self.addr
    }

    /// Get the highest address in the subnet (the broadcast address for IPv4).
    pub fn hi(&self) -> IpAddr {
        // mask was validated in `new`, so neither helper can fail here
        match self.addr {
            IpAddr::V4(v4) => IpAddr::V4(broadcast_addr(v4, self.mask).unwrap_or(v4)),
            IpAddr::V6(v6) => IpAddr::V6(last_addr_v6(v6, self.mask).unwrap_or(v6)),
        }
    }

    /// Netmask as an integer of the family width.
    pub fn netmask_bits(&self) -> u128 {
        match self.addr {
            IpAddr::V4(_) => get_cidr_mask(self.mask).unwrap_or(0) as u128,
            IpAddr::V6(_) => get_cidr_mask_v6(self.mask).unwrap_or(0),
        }
    }

    pub fn num_addresses(&self) -> AddressCount {
        AddressCount::from_host_bits(self.max_len() - self.mask)
            .unwrap_or_else(|_| unreachable!("mask <= max_len is checked in Network::new"))
    }

    /// The address at `offset` from the network address, if inside the block.
    pub fn nth(&self, offset: u128) -> Option<IpAddr> {
        if offset > self.num_addresses().last_offset() {
            return None;
        }
        match self.addr {
            IpAddr::V4(v4) => {
                let offset = u32::try_from(offset).ok()?;
                Some(IpAddr::V4(Ipv4Addr::from(u32::from(v4) + offset)))
            }
            IpAddr::V6(v6) => Some(IpAddr::V6(Ipv6Addr::from(u128::from(v6) + offset))),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", normalized(self.addr), self.mask)
    }
}

impl FromStr for Network {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_network(s)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Network {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_masks_host_bits() {
        let n = Network::new(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 5)), 24).unwrap();
        assert_eq!(n.addr, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 0)));
        assert_eq!(n.to_string(), "192.0.2.0/24");
        assert!(Network::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 33).is_err());
    }

    #[test]
    fn test_lo_hi() {
        let n = net("10.0.10.0/24");
        assert_eq!(n.lo().to_string(), "10.0.10.0");
        assert_eq!(n.hi().to_string(), "10.0.10.255");

        let n = net("2001:db8::/126");
        assert_eq!(n.hi(), "2001:db8::3".parse::<IpAddr>().unwrap());
        assert_eq!(n.version(), 6);
    }

    #[test]
    fn test_nth() {
        let n = net("192.0.2.0/30");
        assert_eq!(n.nth(0), Some(n.lo()));
        assert_eq!(n.nth(3), Some(n.hi()));
        assert_eq!(n.nth(4), None);
        assert_eq!(n.nth(2), Some("192.0.2.2".parse().unwrap()));

        let all = net("::/0");
        assert_eq!(all.nth(u128::MAX), Some(IpAddr::V6(Ipv6Addr::from(u128::MAX))));
    }

    #[test]
    fn test_serde_string_form() {
        let n = net("2001:db8::1/64");
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"2001:db8::/64\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
        assert!(serde_json::from_str::<Network>("\"10.0.0.0/40\"").is_err());
    }
}
