//! IPv6 mask and bound arithmetic on native `u128`.

use crate::error::ConvertError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::net::Ipv6Addr;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Decimal rendering of 2^128, the one count a `u128` cannot hold.
const TWO_POW_128: &str = "340282366920938463463374607431768211456";

fn check_len(len: u8) -> Result<(), ConvertError> {
    if len > MAX_LENGTH_V6 {
        Err(ConvertError::Domain(format!(
            "IPv6 prefix length {len} is too long (max {MAX_LENGTH_V6})"
        )))
    } else {
        Ok(())
    }
}

/// Convert a prefix length to a 128-bit mask.
pub fn get_cidr_mask_v6(len: u8) -> Result<u128, ConvertError> {
    check_len(len)?;
    // `u128 << 128` overflows, so /0 is special-cased.
    Ok(match len {
        0 => 0,
        _ => u128::MAX << (MAX_LENGTH_V6 - len),
    })
}

/// Get the network address for a given IPv6 address and prefix length.
pub fn cut_addr_v6(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, ConvertError> {
    let mask = get_cidr_mask_v6(len)?;
    Ok(Ipv6Addr::from(u128::from(addr) & mask))
}

/// Highest address inside the prefix.
pub fn last_addr_v6(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, ConvertError> {
    let mask = get_cidr_mask_v6(len)?;
    Ok(Ipv6Addr::from((u128::from(addr) & mask) | !mask))
}

/// Size of an address block, expressed by its number of host bits so that a
/// whole IPv6 space (2^128) stays representable. Serialised as a decimal
/// string for every block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressCount {
    host_bits: u8,
}

impl AddressCount {
    pub fn from_host_bits(host_bits: u8) -> Result<Self, ConvertError> {
        check_len(host_bits)?;
        Ok(AddressCount { host_bits })
    }

    /// Exact count, `None` only for 2^128.
    pub fn as_u128(&self) -> Option<u128> {
        1u128.checked_shl(self.host_bits as u32)
    }

    /// Offset of the last address in the block (count - 1).
    pub fn last_offset(&self) -> u128 {
        match self.as_u128() {
            Some(count) => count - 1,
            None => u128::MAX,
        }
    }

    /// `count // 10`, computed without overflowing for 2^128.
    pub fn tenth(&self) -> u128 {
        match self.as_u128() {
            Some(count) => count / 10,
            // 2^128 = 10k + 6, so floor((2^128 - 1) / 10) == floor(2^128 / 10)
            None => u128::MAX / 10,
        }
    }

    /// True when the block holds at least `n` addresses.
    pub fn at_least(&self, n: u128) -> bool {
        self.as_u128().map_or(true, |count| count >= n)
    }
}

impl fmt::Display for AddressCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_u128() {
            Some(count) => write!(f, "{count}"),
            None => f.write_str(TWO_POW_128),
        }
    }
}

impl Serialize for AddressCount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
