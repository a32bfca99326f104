//! Output encodings.
//!
//! - [`present`] - canonical string encodings (compressed/expanded, reverse DNS, bin/hex)
//! - [`view`] - structured binary/hex views
//! - [`terminal`] - text rendering of results for the CLI

pub mod present;
mod terminal;
mod view;

pub use terminal::{format_field, render_batch_text, render_text};
pub use view::{address_view, bin_hex_view, network_view, AddressView, BinHexView, NetworkView};
