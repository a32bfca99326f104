//! Address value types.
//!
//! - [`Network`] - CIDR network for either family
//! - [`MacAddress`] - 48-bit hardware address
//! - [`Flags`] - special-purpose classification
//! - `ipv4`/`ipv6` - mask and bound arithmetic
//! - `canonical` - compressed/expanded text forms

mod canonical;
mod ipv4;
mod ipv6;
mod mac;
mod network;
mod ranges;

// Re-export public types
pub use ipv4::{
    broadcast_addr, cut_addr, get_cidr_mask, host_mask, prefix_from_mask, MAX_LENGTH,
};
pub use canonical::{compress, expand, normalized};
pub use ipv6::{cut_addr_v6, get_cidr_mask_v6, last_addr_v6, AddressCount, MAX_LENGTH_V6};
pub use mac::MacAddress;
pub use network::Network;
pub use ranges::{is_mapped_v6, Flags};
