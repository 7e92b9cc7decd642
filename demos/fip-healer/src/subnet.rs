//! Minimal IPv4 CIDR matching — just enough to find which configured
//! subnet a floating IP's address falls into.

use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet {
    network: Ipv4Addr,
    prefix_len: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubnetParseError {
    #[error("expected `ip/prefix_len`, got {0:?}")]
    BadFormat(String),
    #[error("invalid network address {0:?}")]
    BadAddress(String),
    #[error("prefix length {0} out of range for IPv4")]
    BadPrefixLen(u8),
}

impl Subnet {
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Result<Self, SubnetParseError> {
        if prefix_len > 32 {
            return Err(SubnetParseError::BadPrefixLen(prefix_len));
        }
        Ok(Self { network, prefix_len })
    }

    pub fn parse(s: &str) -> Result<Self, SubnetParseError> {
        let (ip_part, prefix_part) =
            s.split_once('/').ok_or_else(|| SubnetParseError::BadFormat(s.to_string()))?;
        let network: Ipv4Addr =
            ip_part.parse().map_err(|_| SubnetParseError::BadAddress(ip_part.to_string()))?;
        let prefix_len: u8 =
            prefix_part.parse().map_err(|_| SubnetParseError::BadFormat(s.to_string()))?;
        Self::new(network, prefix_len)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        if self.prefix_len == 0 {
            return true;
        }
        let mask = u32::MAX << (32 - u32::from(self.prefix_len));
        (u32::from(ip) & mask) == (u32::from(self.network) & mask)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

#[cfg(test)]
#[path = "subnet_tests.rs"]
mod tests;
