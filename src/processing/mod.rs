//! Address processing logic.
//!
//! - [`family`] - IPv4/IPv6 embeddings and EUI-64 construction
//! - [`subnet`] - CIDR analysis

mod family;
mod subnet;

// Re-export public functions
pub use family::{
    build_eui64_address, format_interface_id, from_mapped_ipv6, mac_to_eui64_interface_id,
    to_6to4, to_mapped_ipv6,
};
pub use subnet::{analyze, sample_hosts, SubnetInfo};
