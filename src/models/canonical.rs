//! Canonical text forms of addresses.

use super::ranges::is_mapped_v6;
use itertools::Itertools;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Eight zero-padded 4-digit hex groups, no elision.
pub fn expand(v6: Ipv6Addr) -> String {
    v6.segments().iter().map(|g| format!("{g:04x}")).join(":")
}

/// Canonical compressed form: the longest run of two or more zero groups
/// (leftmost on a tie) becomes `::`. Mapped addresses keep a dotted tail,
/// `::ffff:a.b.c.d`.
pub fn compress(v6: Ipv6Addr) -> String {
    if is_mapped_v6(v6) {
        let v4 = Ipv4Addr::from(u128::from(v6) as u32);
        return format!("::ffff:{v4}");
    }

    let groups = v6.segments();
    let (mut best_start, mut best_len) = (0, 0);
    let mut run_start = 0;
    let mut run_len = 0;
    for (i, &g) in groups.iter().enumerate() {
        if g == 0 {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
            if run_len > best_len {
                best_start = run_start;
                best_len = run_len;
            }
        } else {
            run_len = 0;
        }
    }

    let hex = |gs: &[u16]| gs.iter().map(|g| format!("{g:x}")).join(":");
    if best_len < 2 {
        return hex(&groups);
    }
    format!(
        "{}::{}",
        hex(&groups[..best_start]),
        hex(&groups[best_start + best_len..])
    )
}

/// Canonical text for either family.
pub fn normalized(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => v4.to_string(),
        IpAddr::V6(v6) => compress(v6),
    }
}
