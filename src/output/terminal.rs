//! Terminal output utilities.
//!
//! Renders a [`ConversionResult`] as aligned `label: value` lines.

use super::view::{AddressView, BinHexView, NetworkView};
use crate::batch::BatchOutcome;
use crate::dispatch::{ConversionResult, Ipv4Summary, Ipv6Summary};
use crate::models::Flags;
use crate::processing::SubnetInfo;
use colored::Colorize;

/// Width of the label column.
const LABEL_WIDTH: usize = 16;

/// Format a value as a right-aligned field of at least `width` characters.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    if value_str.len() >= width {
        value_str
    } else {
        format!("{value_str:>width$}")
    }
}

type Rows = Vec<(&'static str, String)>;

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

fn push_opt(rows: &mut Rows, label: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        rows.push((label, v.clone()));
    }
}

fn flag_rows(rows: &mut Rows, flags: &Flags) {
    rows.push(("private", flags.is_private.to_string()));
    rows.push(("multicast", flags.is_multicast.to_string()));
    rows.push(("reserved", flags.is_reserved.to_string()));
    rows.push(("link_local", flags.is_link_local.to_string()));
    rows.push(("loopback", flags.is_loopback.to_string()));
}

fn ipv4_summary_rows(s: &Ipv4Summary) -> Rows {
    vec![
        ("ipv6_mapped", s.ipv4_mapped.clone()),
        ("6to4", s.six_to_four.clone()),
        ("reverse_dns", s.reverse_dns.clone()),
        ("private", s.is_private.to_string()),
    ]
}

fn ipv6_summary_rows(s: &Ipv6Summary) -> Rows {
    vec![
        ("compressed", s.compressed.clone()),
        ("expanded", s.expanded.clone()),
        ("ipv4_mapped", opt(&s.ipv4_mapped)),
        ("reverse_dns", s.reverse_dns.clone()),
    ]
}

fn subnet_rows(s: &SubnetInfo) -> Rows {
    let mut rows = vec![
        ("version", s.version.to_string()),
        ("network", s.network.clone()),
        ("broadcast", opt(&s.broadcast)),
        ("netmask", s.netmask.clone()),
        ("hostmask", opt(&s.hostmask)),
        ("prefixlen", s.prefixlen.to_string()),
        ("num_addresses", s.num_addresses.to_string()),
        ("first_usable", opt(&s.first_usable)),
        ("last_usable", opt(&s.last_usable)),
    ];
    flag_rows(&mut rows, &s.flags);
    rows.push(("sample_hosts", s.sample_hosts.join(", ")));
    rows
}

fn network_view_rows(v: &NetworkView) -> Rows {
    let mut rows = vec![
        ("kind", "network".to_string()),
        ("version", v.version.to_string()),
        ("network", v.network.clone()),
        ("prefixlen", v.prefixlen.to_string()),
        ("netmask", v.netmask.clone()),
    ];
    push_opt(&mut rows, "broadcast", &v.broadcast);
    push_opt(&mut rows, "hostmask", &v.hostmask);
    rows.push(("network_bin", v.network_bin.clone()));
    rows.push(("network_hex", v.network_hex.clone()));
    push_opt(&mut rows, "broadcast_bin", &v.broadcast_bin);
    push_opt(&mut rows, "broadcast_hex", &v.broadcast_hex);
    rows.push(("netmask_bin", v.netmask_bin.clone()));
    push_opt(&mut rows, "netmask_hex", &v.netmask_hex);
    push_opt(&mut rows, "hostmask_bin", &v.hostmask_bin);
    push_opt(&mut rows, "hostmask_hex", &v.hostmask_hex);
    push_opt(&mut rows, "prefix_mask_hex", &v.prefix_mask_hex);
    rows
}

fn address_view_rows(v: &AddressView) -> Rows {
    let mut rows = vec![
        ("kind", "address".to_string()),
        ("version", v.version.to_string()),
        ("normalized", v.normalized.clone()),
        ("binary", v.binary.clone()),
        ("hex", v.hex.clone()),
        ("int", v.int.to_string()),
    ];
    flag_rows(&mut rows, &v.flags);
    rows.push(("reverse_dns", v.reverse_dns.clone()));
    push_opt(&mut rows, "compressed", &v.compressed);
    push_opt(&mut rows, "expanded", &v.expanded);
    push_opt(&mut rows, "ipv4_mapped", &v.ipv4_mapped);
    rows
}

/// Plain-text rendering: a bare value for single-string results, aligned
/// `label: value` lines for records.
pub fn render_text(result: &ConversionResult) -> String {
    let rows = match result {
        ConversionResult::Text(text) => return text.clone(),
        ConversionResult::NotMapped => {
            return "N/A (not an IPv4-mapped IPv6 address, ::ffff:0:0/96)".to_string()
        }
        ConversionResult::Ipv4Summary(s) => ipv4_summary_rows(s),
        ConversionResult::Ipv6Summary(s) => ipv6_summary_rows(s),
        ConversionResult::Subnet(s) => subnet_rows(s),
        ConversionResult::View(BinHexView::Network(v)) => network_view_rows(v),
        ConversionResult::View(BinHexView::Address(v)) => address_view_rows(v),
    };
    rows.iter()
        .map(|(label, value)| format!("{}: {value}", format_field(label, LABEL_WIDTH)))
        .collect::<Vec<String>>()
        .join("\n")
}

/// One block per outcome, headed `#<n> <action> <input>`. Failed entries
/// show their error in red.
pub fn render_batch_text(outcomes: &[BatchOutcome]) -> String {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| {
            let request = &outcome.request;
            let mut header = format!("#{} {} {}", i + 1, request.action, request.input);
            if let Some(extra) = &request.extra {
                header.push_str(&format!(" (extra: {extra})"));
            }
            let body = match (&outcome.result, &outcome.error) {
                (_, Some(error)) => format!("error: {error}").red().to_string(),
                (Some(result), None) => render_text(result),
                (None, None) => String::new(),
            };
            format!("{}\n{body}", header.bold())
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}
