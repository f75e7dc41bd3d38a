//! The catalog's single first-class entity: a candidate proxy and what the
//! validator has learned about it.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Protocols a source adapter or the validator can assign to a proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
    Socks4,
    Socks5,
}

impl Protocol {
    /// Parses a protocol name case-insensitively, the way every source
    /// adapter and the `proxy_string()`-style URL builder needs to.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            "socks4" => Some(Protocol::Socks4),
            "socks5" => Some(Protocol::Socks5),
            _ => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Socks4 => "socks4",
            Protocol::Socks5 => "socks5",
        };
        write!(f, "{}", s)
    }
}

/// A candidate proxy, from discovery through validation.
///
/// Identity is `(ip, port, protocol)` — see [`ProxyRecord::eq`] and
/// [`ProxyRecord::hash`]. Every other field is metadata that the validator
/// is free to overwrite in place during a validation cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyRecord {
    pub ip: String,
    pub port: u16,
    pub protocol: Protocol,
    pub country: Option<String>,
    pub anonymity: Option<String>,
    pub source: String,
    pub response_time_ms: Option<f64>,
    pub last_checked: Option<String>,
    #[serde(default)]
    pub is_valid: bool,
}

impl ProxyRecord {
    /// A freshly discovered, unvalidated record as a source adapter would
    /// produce it: `is_valid=false`, no timing, possibly a country.
    pub fn discovered(ip: impl Into<String>, port: u16, protocol: Protocol, source: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            port,
            protocol,
            country: None,
            anonymity: None,
            source: source.into(),
            response_time_ms: None,
            last_checked: None,
            is_valid: false,
        }
    }

    /// `protocol://ip:port`, the string used both as the outbound proxy URL
    /// and for human-readable logging.
    pub fn proxy_string(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.ip, self.port)
    }

    /// The `(ip, port, protocol)` identity triple used for dedup and hashing.
    fn identity(&self) -> (&str, u16, Protocol) {
        (&self.ip, self.port, self.protocol)
    }

    /// Marks the record as processed by the validator right before a probe
    /// attempt, per spec: `is_valid=false`, no timing, `anonymity="N/A"`,
    /// `last_checked` stamped to now.
    pub fn mark_probe_started(&mut self) {
        self.is_valid = false;
        self.response_time_ms = None;
        self.anonymity = Some("N/A".to_string());
        self.last_checked = Some(Utc::now().to_rfc3339());
    }
}

impl fmt::Display for ProxyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.proxy_string())
    }
}

impl PartialEq for ProxyRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ProxyRecord {}

impl Hash for ProxyRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_ignores_metadata() {
        let mut a = ProxyRecord::discovered("1.2.3.4", 8080, Protocol::Http, "source-a");
        let mut b = ProxyRecord::discovered("1.2.3.4", 8080, Protocol::Http, "source-b");
        a.country = Some("FR".to_string());
        b.is_valid = true;
        assert_eq!(a, b);
    }

    #[test]
    fn identity_distinguishes_protocol() {
        let a = ProxyRecord::discovered("1.2.3.4", 8080, Protocol::Http, "s");
        let b = ProxyRecord::discovered("1.2.3.4", 8080, Protocol::Socks5, "s");
        assert_ne!(a, b);
    }

    #[test]
    fn proxy_string_format() {
        let p = ProxyRecord::discovered("10.0.0.1", 3128, Protocol::Socks5, "s");
        assert_eq!(p.proxy_string(), "socks5://10.0.0.1:3128");
    }

    #[test]
    fn protocol_parse_case_insensitive() {
        assert_eq!(Protocol::parse("HTTPS"), Some(Protocol::Https));
        assert_eq!(Protocol::parse("socks4"), Some(Protocol::Socks4));
        assert_eq!(Protocol::parse("ftp"), None);
    }
}
