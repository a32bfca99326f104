//! IPv4 mask and bound arithmetic.
//!
//! All values are plain `u32`/[`Ipv4Addr`]; the prefix length is checked
//! against [`MAX_LENGTH`] before any shift.

use crate::error::ConvertError;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

fn check_len(len: u8) -> Result<(), ConvertError> {
    if len > MAX_LENGTH {
        Err(ConvertError::Domain(format!(
            "IPv4 prefix length {len} is too long (max {MAX_LENGTH})"
        )))
    } else {
        Ok(())
    }
}

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use ip_helper_tool::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, ConvertError> {
    check_len(len)?;
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;

    let mask = (all_bits >> right_len) << right_len;

    Ok(mask as u32)
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ConvertError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, ConvertError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    Ok(Ipv4Addr::from(network_bits | !mask))
}

/// The inverse of the netmask, e.g. `0.0.0.255` for a /24.
pub fn host_mask(len: u8) -> Result<Ipv4Addr, ConvertError> {
    Ok(Ipv4Addr::from(!get_cidr_mask(len)?))
}

/// Prefix length of a contiguous netmask, `None` when the ones are not
/// left-aligned.
pub fn prefix_from_mask(mask: u32) -> Option<u8> {
    let len = mask.leading_ones() as u8;
    if mask.count_ones() as u8 == len {
        Some(len)
    } else {
        None
    }
}
