// MAC addresses as the controller expects them: lowercase, colon-separated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress(String);

impl MacAddress {
    /// Parse and normalize a MAC address.
    ///
    /// Accepts six two-digit groups joined by `:` or by `-`, or twelve bare
    /// hex digits. Mixed separators and odd groupings are rejected.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let invalid = || Error::InvalidMac(raw.to_owned());

        let octets: Vec<&str> = match (trimmed.contains(':'), trimmed.contains('-')) {
            (true, false) => trimmed.split(':').collect(),
            (false, true) => trimmed.split('-').collect(),
            (false, false) if trimmed.len() == 12 => (0..6)
                .filter_map(|i| trimmed.get(i * 2..i * 2 + 2))
                .collect(),
            _ => return Err(invalid()),
        };

        let well_formed = octets.len() == 6
            && octets
                .iter()
                .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()));
        if !well_formed {
            return Err(invalid());
        }

        Ok(Self(octets.join(":").to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MacAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MacAddress {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dashes() {
        let mac = MacAddress::parse("AA-BB-CC-DD-EE-FF").unwrap();
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn normalizes_case() {
        let mac: MacAddress = "AA:BB:CC:DD:EE:0F".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:0f");
    }

    #[test]
    fn accepts_bare_hex() {
        let mac = MacAddress::parse("001122aabbcc").unwrap();
        assert_eq!(mac.as_str(), "00:11:22:aa:bb:cc");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            MacAddress::parse("not-a-mac"),
            Err(Error::InvalidMac(_))
        ));
        assert!(MacAddress::parse("aa:bb:cc:dd:ee").is_err());
        assert!(MacAddress::parse("aa:bb:cc:dd:ee:gg").is_err());
        assert!(MacAddress::parse("").is_err());
    }

    #[test]
    fn rejects_misgrouped_hex() {
        for raw in [
            "a:ab:bc:cd:de:ef:f",
            "aabb::ccddeeff",
            "::aa-bb-cc-dd-ee-ff::",
            "aa:bbcc-dd:eeff",
            "aabb:ccdd:eeff",
            "aa:bb:cc:dd:ee:ff:",
            "aabbccddeeff0",
        ] {
            assert!(
                matches!(MacAddress::parse(raw), Err(Error::InvalidMac(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let mac = MacAddress::parse("  aa:bb:cc:dd:ee:ff\n").unwrap();
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn deserializes_through_normalization() {
        let mac: MacAddress = serde_json::from_str("\"AA-BB-CC-DD-EE-FF\"").unwrap();
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:ff");
    }
}
