//! Error taxonomy for the conversion engine.
//!
//! Every failure is deterministic: the same input always produces the same
//! error, so nothing here is retried.

use std::fmt;

/// The textual grammar an input failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Ipv4,
    Ipv6,
    Cidr,
    Mac,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Grammar::Ipv4 => "IPv4 address",
            Grammar::Ipv6 => "IPv6 address",
            Grammar::Cidr => "CIDR network",
            Grammar::Mac => "MAC address",
        };
        f.write_str(name)
    }
}

/// Errors returned by the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Input does not match the grammar for the requested type.
    #[error("invalid {kind} '{input}': {reason}")]
    Parse {
        kind: Grammar,
        input: String,
        reason: String,
    },

    /// Input parses but violates a semantic precondition.
    #[error("{0}")]
    Domain(String),

    /// `auto` could not place the input in any supported family.
    #[error("could not detect IPv4/IPv6/CIDR")]
    Detection { input: String },

    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

impl ConvertError {
    pub(crate) fn parse(kind: Grammar, input: &str, reason: impl Into<String>) -> Self {
        ConvertError::Parse {
            kind,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ConvertError::Parse { .. })
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, ConvertError::Domain(_))
    }

    pub fn is_detection(&self) -> bool {
        matches!(self, ConvertError::Detection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let e = ConvertError::parse(Grammar::Ipv4, "300.1.1.1", "octet 300 exceeds 255");
        assert_eq!(
            e.to_string(),
            "invalid IPv4 address '300.1.1.1': octet 300 exceeds 255"
        );
        assert!(e.is_parse());
        assert!(!e.is_domain());
    }

    #[test]
    fn test_detection_message_is_verbatim() {
        let e = ConvertError::Detection {
            input: "hello".to_string(),
        };
        assert_eq!(e.to_string(), "could not detect IPv4/IPv6/CIDR");
        assert!(e.is_detection());
    }
}
