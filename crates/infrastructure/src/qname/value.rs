use std::fmt;
use std::net::IpAddr;

/// A value recovered from one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValue {
    Text(String),
    Ip(IpAddr),
    /// Unix time, whole seconds.
    Timestamp(u32),
    Integer(u64),
}

impl LabelValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ip(&self) -> Option<IpAddr> {
        match self {
            Self::Ip(ip) => Some(*ip),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<u32> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Ip(ip) => write!(f, "{}", ip),
            Self::Timestamp(ts) => write!(f, "{}", ts),
            Self::Integer(i) => write!(f, "{}", i),
        }
    }
}
