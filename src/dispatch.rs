//! Action dispatch: the single entry point of the engine.
//!
//! Every call is a pure computation over its arguments; nothing is kept
//! between calls.

use crate::error::ConvertError;
use crate::models::Flags;
use crate::output::present::{compress, expand, normalized, reverse_dns_name};
use crate::output::{bin_hex_view, BinHexView};
use crate::parser::{
    classify, parse_address, parse_ipv4, parse_ipv6, parse_mac, parse_network, Classified,
};
use crate::processing::{
    analyze, build_eui64_address, from_mapped_ipv6, to_6to4, to_mapped_ipv6, SubnetInfo,
};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// The conversion to run. Parsed from and serialised as its snake_case
/// name, e.g. `v4_to_6to4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Detect the family and run the matching bundle of conversions.
    Auto,
    V4ToV6Mapped,
    V4To6to4,
    V6MappedToV4,
    ExpandV6,
    CompressV6,
    SubnetInfo,
    ReverseDns,
    /// Build an address from a MAC (input) and an IPv6 /64 prefix (extra).
    Eui64,
    BinHex,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Auto,
        Action::V4ToV6Mapped,
        Action::V4To6to4,
        Action::V6MappedToV4,
        Action::ExpandV6,
        Action::CompressV6,
        Action::SubnetInfo,
        Action::ReverseDns,
        Action::Eui64,
        Action::BinHex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::Auto => "auto",
            Action::V4ToV6Mapped => "v4_to_v6_mapped",
            Action::V4To6to4 => "v4_to_6to4",
            Action::V6MappedToV4 => "v6_mapped_to_v4",
            Action::ExpandV6 => "expand_v6",
            Action::CompressV6 => "compress_v6",
            Action::SubnetInfo => "subnet_info",
            Action::ReverseDns => "reverse_dns",
            Action::Eui64 => "eui64",
            Action::BinHex => "bin_hex",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.name() == s)
            .ok_or_else(|| ConvertError::UnknownAction(s.to_string()))
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Action, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Action::from_str(&s).map_err(de::Error::custom)
    }
}

/// `auto` bundle for an IPv4 address.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Summary {
    pub ipv4_mapped: String,
    pub six_to_four: String,
    pub reverse_dns: String,
    pub is_private: bool,
}

/// `auto` bundle for an IPv6 address.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Summary {
    pub compressed: String,
    pub expanded: String,
    /// `None` when the address is not in `::ffff:0:0/96`.
    pub ipv4_mapped: Option<String>,
    pub reverse_dns: String,
}

/// What a conversion produced.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ConversionResult {
    Text(String),
    /// `v6_mapped_to_v4` on an address outside `::ffff:0:0/96`.
    NotMapped,
    Ipv4Summary(Ipv4Summary),
    Ipv6Summary(Ipv6Summary),
    Subnet(SubnetInfo),
    View(BinHexView),
}

impl ConversionResult {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConversionResult::Text(text) => Some(text),
            _ => None,
        }
    }
}

fn summarize_ipv4(v4: Ipv4Addr) -> Ipv4Summary {
    Ipv4Summary {
        ipv4_mapped: compress(to_mapped_ipv6(v4)),
        six_to_four: to_6to4(v4).to_string(),
        reverse_dns: reverse_dns_name(IpAddr::V4(v4)),
        is_private: Flags::for_ipv4(v4).is_private,
    }
}

fn summarize_ipv6(v6: Ipv6Addr) -> Ipv6Summary {
    Ipv6Summary {
        compressed: compress(v6),
        expanded: expand(v6),
        ipv4_mapped: from_mapped_ipv6(v6).map(|v4| v4.to_string()),
        reverse_dns: reverse_dns_name(IpAddr::V6(v6)),
    }
}

/// Run `action` on `input`. `extra` is only read by [`Action::Eui64`], where
/// it carries the IPv6 /64 prefix. Both strings are trimmed first.
pub fn convert(
    action: Action,
    input: &str,
    extra: Option<&str>,
) -> Result<ConversionResult, ConvertError> {
    let input = input.trim();
    let extra = extra.map(str::trim).filter(|e| !e.is_empty());
    log::debug!("convert action={action} input='{input}' extra={extra:?}");

    let result = match action {
        Action::Auto => match classify(input) {
            Classified::Ipv4(v4) => {
                log::debug!("auto: detected IPv4");
                ConversionResult::Ipv4Summary(summarize_ipv4(v4))
            }
            Classified::Ipv6(v6) => {
                log::debug!("auto: detected IPv6");
                ConversionResult::Ipv6Summary(summarize_ipv6(v6))
            }
            Classified::Network(net) => {
                log::debug!("auto: detected CIDR");
                ConversionResult::Subnet(analyze(&net))
            }
            Classified::Unrecognized => {
                return Err(ConvertError::Detection {
                    input: input.to_string(),
                })
            }
        },
        Action::V4ToV6Mapped => {
            ConversionResult::Text(compress(to_mapped_ipv6(parse_ipv4(input)?)))
        }
        Action::V4To6to4 => ConversionResult::Text(to_6to4(parse_ipv4(input)?).to_string()),
        Action::V6MappedToV4 => match from_mapped_ipv6(parse_ipv6(input)?) {
            Some(v4) => ConversionResult::Text(v4.to_string()),
            None => ConversionResult::NotMapped,
        },
        Action::ExpandV6 => ConversionResult::Text(expand(parse_ipv6(input)?)),
        Action::CompressV6 => ConversionResult::Text(compress(parse_ipv6(input)?)),
        Action::SubnetInfo => ConversionResult::Subnet(analyze(&parse_network(input)?)),
        Action::ReverseDns => ConversionResult::Text(reverse_dns_name(parse_address(input)?)),
        Action::Eui64 => {
            let prefix = extra.ok_or_else(|| {
                ConvertError::Domain("Provide the IPv6 /64 prefix in extra".to_string())
            })?;
            let mac = parse_mac(input)?;
            let prefix = parse_network(prefix)?;
            let addr = build_eui64_address(&prefix, &mac)?;
            ConversionResult::Text(normalized(IpAddr::V6(addr)))
        }
        Action::BinHex => ConversionResult::View(bin_hex_view(input)?),
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
        assert_eq!(Action::V4To6to4.to_string(), "v4_to_6to4");
        assert_eq!(Action::Eui64.to_string(), "eui64");
        assert!(matches!(
            "v4_to_v5".parse::<Action>(),
            Err(ConvertError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_action_serde_names() {
        assert_eq!(serde_json::to_string(&Action::V4To6to4).unwrap(), "\"v4_to_6to4\"");
        let a: Action = serde_json::from_str("\"v6_mapped_to_v4\"").unwrap();
        assert_eq!(a, Action::V6MappedToV4);
        let err = serde_json::from_str::<Action>("\"v4_to_v5\"").unwrap_err();
        assert!(err.to_string().contains("unknown action 'v4_to_v5'"));
    }

    #[test]
    fn test_auto_ipv4_bundle() {
        let result = convert(Action::Auto, " 203.0.113.5 ", None).unwrap();
        assert_eq!(
            result,
            ConversionResult::Ipv4Summary(Ipv4Summary {
                ipv4_mapped: "::ffff:203.0.113.5".to_string(),
                six_to_four: "2002:cb00:7105::/48".to_string(),
                reverse_dns: "5.113.0.203.in-addr.arpa.".to_string(),
                is_private: true,
            })
        );
    }

    #[test]
    fn test_auto_ipv6_bundle() {
        match convert(Action::Auto, "2001:db8::1", None).unwrap() {
            ConversionResult::Ipv6Summary(s) => {
                assert_eq!(s.compressed, "2001:db8::1");
                assert_eq!(s.expanded, "2001:0db8:0000:0000:0000:0000:0000:0001");
                assert_eq!(s.ipv4_mapped, None);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_auto_network_and_detection_error() {
        assert!(matches!(
            convert(Action::Auto, "192.0.2.0/24", None).unwrap(),
            ConversionResult::Subnet(_)
        ));
        let err = convert(Action::Auto, "zz:zz", None).unwrap_err();
        assert!(err.is_detection());
        assert_eq!(err.to_string(), "could not detect IPv4/IPv6/CIDR");
    }

    #[test]
    fn test_not_mapped_is_soft() {
        assert_eq!(
            convert(Action::V6MappedToV4, "2001:db8::1", None).unwrap(),
            ConversionResult::NotMapped
        );
        assert_eq!(
            convert(Action::V6MappedToV4, "::ffff:203.0.113.5", None)
                .unwrap()
                .as_text(),
            Some("203.0.113.5")
        );
        assert!(convert(Action::V6MappedToV4, "not-v6", None)
            .unwrap_err()
            .is_parse());
        assert_eq!(serde_json::to_string(&ConversionResult::NotMapped).unwrap(), "null");
    }

    #[test]
    fn test_eui64_action() {
        let result = convert(Action::Eui64, "00-11-22-33-44-55", Some("2001:db8::/64")).unwrap();
        assert_eq!(result.as_text(), Some("2001:db8::211:22ff:fe33:4455"));

        assert!(convert(Action::Eui64, "00:11:22:33:44:55", None)
            .unwrap_err()
            .is_domain());
        assert!(convert(Action::Eui64, "00:11:22:33:44:55", Some("  "))
            .unwrap_err()
            .is_domain());
        assert!(convert(Action::Eui64, "00:11:22:33:44:55", Some("2001:db8::/56"))
            .unwrap_err()
            .is_domain());
        assert!(convert(Action::Eui64, "00:11:22", Some("2001:db8::/64"))
            .unwrap_err()
            .is_parse());
    }
}
