use super::errors::CodecError;
use super::value::LabelValue;
use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Longest label allowed by RFC 1035.
pub const MAX_LABEL_LEN: usize = 63;

/// One named argument of [`LabelComponent::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub required: bool,
}

impl ParamSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    /// The component falls back to its own default when absent.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

impl fmt::Display for ParamSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.required {
            f.write_str(self.name)
        } else {
            write!(f, "[{}]", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Ip(IpAddr),
    Float(f64),
    Integer(u64),
}

impl ArgValue {
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Ip(ip) => ip.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Integer(i) => i.to_string(),
        }
    }

    pub fn to_ip(&self) -> Result<IpAddr, String> {
        match self {
            Self::Ip(ip) => Ok(*ip),
            Self::Text(s) => s
                .parse()
                .map_err(|e| format!("'{}' is not an IP address: {}", s, e)),
            other => Err(format!("{} is not an IP address", other.to_text())),
        }
    }

    pub fn to_f64(&self) -> Result<f64, String> {
        match self {
            Self::Float(f) => Ok(*f),
            Self::Integer(i) => Ok(*i as f64),
            Self::Text(s) => s
                .parse()
                .map_err(|e| format!("'{}' is not a number: {}", s, e)),
            Self::Ip(ip) => Err(format!("{} is not a number", ip)),
        }
    }

    pub fn to_usize(&self) -> Result<usize, String> {
        match self {
            Self::Integer(i) => usize::try_from(*i).map_err(|e| e.to_string()),
            Self::Text(s) => s
                .parse()
                .map_err(|e| format!("'{}' is not a length: {}", s, e)),
            other => Err(format!("{} is not a length", other.to_text())),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<IpAddr> for ArgValue {
    fn from(value: IpAddr) -> Self {
        Self::Ip(value)
    }
}

impl From<Ipv4Addr> for ArgValue {
    fn from(value: Ipv4Addr) -> Self {
        Self::Ip(IpAddr::V4(value))
    }
}

impl From<Ipv6Addr> for ArgValue {
    fn from(value: Ipv6Addr) -> Self {
        Self::Ip(IpAddr::V6(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<u64> for ArgValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ArgValue {
    fn from(value: u32) -> Self {
        Self::Integer(u64::from(value))
    }
}

impl From<usize> for ArgValue {
    fn from(value: usize) -> Self {
        Self::Integer(value as u64)
    }
}

/// Named arguments offered to a template; each component picks the ones it
/// declares in [`LabelComponent::params`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateArgs {
    values: BTreeMap<String, ArgValue>,
}

impl GenerateArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ArgValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Encodes one value into exactly one DNS label.
///
/// `parse` must undo `generate` for every label `generate` can emit.
/// Components whose output cannot be inverted (a hostname, random text)
/// keep the default, which returns the label unchanged.
pub trait LabelComponent: Send + Sync {
    /// Keyword used in templates, including the `$` prefix.
    fn id(&self) -> &'static str;

    /// Arguments `generate` reads, in declaration order.
    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError>;

    fn parse(&self, label: &str) -> Result<LabelValue, CodecError> {
        Ok(LabelValue::Text(label.to_string()))
    }
}

/// Checks that `label` can stand as a single DNS label.
pub fn validate_label(component: &str, label: String) -> Result<String, CodecError> {
    let reason = if label.is_empty() {
        Some("label is empty".to_string())
    } else if label.contains('.') {
        Some("label contains '.'".to_string())
    } else if label.len() > MAX_LABEL_LEN {
        Some(format!(
            "label is {} octets, limit is {}",
            label.len(),
            MAX_LABEL_LEN
        ))
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CodecError::InvalidLabel {
            component: component.to_string(),
            label,
            reason,
        }),
        None => Ok(label),
    }
}
