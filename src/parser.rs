//! Textual address grammars.
//!
//! Detects and parses IPv4, IPv6, CIDR and MAC tokens into typed values.
//! Parsing is done by hand against the dotted-quad and RFC 4291 grammars so
//! the accepted language is exactly the one documented here.

use crate::error::{ConvertError, Grammar};
use crate::models::{prefix_from_mask, MacAddress, Network, MAX_LENGTH, MAX_LENGTH_V6};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classified {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Network(Network),
    Unrecognized,
}

/// Parse a dotted-quad IPv4 address.
///
/// Each of the four groups is a decimal in `0..=255` written without leading
/// zeros (`"0"` is fine, `"00"` and `"010"` are not).
pub fn parse_ipv4(text: &str) -> Result<Ipv4Addr, ConvertError> {
    let err = |reason: String| ConvertError::parse(Grammar::Ipv4, text, reason);

    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(err(format!("expected 4 octets, found {}", parts.len())));
    }

    let mut octets = [0u8; 4];
    for (octet, part) in octets.iter_mut().zip(&parts) {
        if part.is_empty() {
            return Err(err("empty octet".to_string()));
        }
        if part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err(format!("octet '{part}' is not a decimal in 0-255")));
        }
        if part.len() > 1 && part.starts_with('0') {
            return Err(err(format!("leading zeros are not permitted in '{part}'")));
        }
        let value: u16 = part
            .parse()
            .map_err(|_| err(format!("octet '{part}' is not a decimal in 0-255")))?;
        *octet = u8::try_from(value).map_err(|_| err(format!("octet {value} exceeds 255")))?;
    }
    Ok(Ipv4Addr::from(octets))
}

fn parse_hextet(text: &str, group: &str) -> Result<u16, ConvertError> {
    if group.is_empty() || group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConvertError::parse(
            Grammar::Ipv6,
            text,
            format!("group '{group}' must be 1-4 hex digits"),
        ));
    }
    u16::from_str_radix(group, 16)
        .map_err(|e| ConvertError::parse(Grammar::Ipv6, text, e.to_string()))
}

fn parse_hextets(text: &str, groups: &str) -> Result<Vec<u16>, ConvertError> {
    if groups.is_empty() {
        return Ok(Vec::new());
    }
    groups.split(':').map(|g| parse_hextet(text, g)).collect()
}

/// Parse an IPv6 address: up to eight 1-4 digit hex groups, at most one `::`
/// elision, and an optional dotted IPv4 tail standing in for the last two
/// groups (`::ffff:192.0.2.1`).
pub fn parse_ipv6(text: &str) -> Result<Ipv6Addr, ConvertError> {
    let err = |reason: &str| ConvertError::parse(Grammar::Ipv6, text, reason);

    if !text.contains(':') {
        return Err(err("at least one ':' is required"));
    }

    // Rewrite a dotted IPv4 tail as two hex groups.
    let rewritten;
    let mut body = text;
    if let Some(idx) = text.rfind(':') {
        let tail = &text[idx + 1..];
        if tail.contains('.') {
            let v4 = parse_ipv4(tail)
                .map_err(|_| err(&format!("invalid embedded IPv4 tail '{tail}'")))?;
            let bits = u32::from(v4);
            rewritten = format!("{}{:x}:{:x}", &text[..=idx], bits >> 16, bits & 0xFFFF);
            body = &rewritten;
        }
    }

    let hextets: Vec<u16> = match body.matches("::").count() {
        0 => {
            let groups = parse_hextets(text, body)?;
            if groups.len() != 8 {
                return Err(err(&format!(
                    "expected 8 groups without '::', found {}",
                    groups.len()
                )));
            }
            groups
        }
        1 => {
            let (head, tail) = body.split_once("::").unwrap_or((body, ""));
            let head = parse_hextets(text, head)?;
            let tail = parse_hextets(text, tail)?;
            let explicit = head.len() + tail.len();
            if explicit > 7 {
                return Err(err("'::' must stand for at least one group"));
            }
            let mut groups = head;
            groups.resize(8 - tail.len(), 0);
            groups.extend(tail);
            groups
        }
        _ => return Err(err("at most one '::' is permitted")),
    };

    let bits = hextets
        .iter()
        .fold(0u128, |acc, &group| (acc << 16) | group as u128);
    log::trace!("parsed ipv6 {text} => {bits:#034x}");
    Ok(Ipv6Addr::from(bits))
}

/// Parse either address family, IPv4 first.
pub fn parse_address(text: &str) -> Result<IpAddr, ConvertError> {
    if let Ok(v4) = parse_ipv4(text) {
        return Ok(IpAddr::V4(v4));
    }
    match parse_ipv6(text) {
        Ok(v6) => Ok(IpAddr::V6(v6)),
        Err(e) if text.contains(':') => Err(e),
        Err(_) => parse_ipv4(text).map(IpAddr::V4),
    }
}

fn parse_prefix(text: &str, addr: IpAddr, prefix: &str) -> Result<u8, ConvertError> {
    let err = |reason: String| ConvertError::parse(Grammar::Cidr, text, reason);
    let max_len = match addr {
        IpAddr::V4(_) => MAX_LENGTH,
        IpAddr::V6(_) => MAX_LENGTH_V6,
    };

    if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) {
        return match prefix.parse::<u32>() {
            Ok(len) if len <= max_len as u32 => Ok(len as u8),
            _ => Err(err(format!("prefix length '{prefix}' is not in 0-{max_len}"))),
        };
    }

    // IPv4 also accepts a dotted netmask, or failing that a hostmask.
    if addr.is_ipv4() {
        if let Ok(mask) = parse_ipv4(prefix) {
            let bits = u32::from(mask);
            if let Some(len) = prefix_from_mask(bits).or_else(|| prefix_from_mask(!bits)) {
                return Ok(len);
            }
            return Err(err(format!("'{prefix}' is not a valid netmask or hostmask")));
        }
    }
    Err(err(format!("invalid prefix length '{prefix}'")))
}

/// Parse `address[/prefix]`, where `prefix` is a length or, for IPv4, a
/// dotted netmask/hostmask. Host bits are masked off silently; a bare
/// address becomes a /32 or /128.
pub fn parse_network(text: &str) -> Result<Network, ConvertError> {
    parse_network_with(text, false)
}

/// Like [`parse_network`], but with `strict` set an address with host bits
/// set is rejected instead of normalised.
pub fn parse_network_with(text: &str, strict: bool) -> Result<Network, ConvertError> {
    let err = |reason: &str| ConvertError::parse(Grammar::Cidr, text, reason);

    let mut parts = text.split('/');
    let addr_part = parts.next().unwrap_or_default();
    let prefix_part = parts.next();
    if parts.next().is_some() {
        return Err(err("only one '/' is permitted"));
    }

    let addr = parse_address(addr_part).map_err(|e| match e {
        ConvertError::Parse { reason, .. } => ConvertError::parse(Grammar::Cidr, text, reason),
        other => other,
    })?;
    let mask = match prefix_part {
        Some(prefix) => parse_prefix(text, addr, prefix)?,
        None => match addr {
            IpAddr::V4(_) => MAX_LENGTH,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        },
    };

    let network = Network::new(addr, mask)?;
    if strict && network.addr() != addr {
        return Err(err("has host bits set"));
    }
    log::trace!("parsed network {text} => {network}");
    Ok(network)
}

/// Parse a MAC address; any non-hex characters are separators.
pub fn parse_mac(text: &str) -> Result<MacAddress, ConvertError> {
    MacAddress::parse(text)
}

/// Detect the family of `text`: IPv4, then IPv6, then CIDR. Input without a
/// `/` is never reported as a network.
pub fn classify(text: &str) -> Classified {
    if let Ok(v4) = parse_ipv4(text) {
        return Classified::Ipv4(v4);
    }
    if let Ok(v6) = parse_ipv6(text) {
        return Classified::Ipv6(v6);
    }
    if text.contains('/') {
        if let Ok(net) = parse_network(text) {
            return Classified::Network(net);
        }
    }
    Classified::Unrecognized
}
