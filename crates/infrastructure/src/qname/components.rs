use super::base32;
use super::component::{validate_label, ArgValue, GenerateArgs, LabelComponent, ParamSpec};
use super::errors::CodecError;
use super::sequence::SequenceSource;
use super::value::LabelValue;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

const DEFAULT_RANDOM_LENGTH: usize = 8;

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const NUMERIC: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

const KEYWORD_PARAMS: &[ParamSpec] = &[ParamSpec::required("val")];
const IP_PARAMS: &[ParamSpec] = &[ParamSpec::required("ip_addr")];
const TIMESTAMP_PARAMS: &[ParamSpec] = &[ParamSpec::optional("timestamp")];
const LENGTH_PARAMS: &[ParamSpec] = &[ParamSpec::optional("length")];

fn required_arg<'a>(
    component: &str,
    args: &'a GenerateArgs,
    name: &str,
) -> Result<&'a ArgValue, CodecError> {
    args.get(name).ok_or_else(|| CodecError::MissingArgument {
        component: component.to_string(),
        argument: name.to_string(),
    })
}

/// Seconds since the epoch with sub-second precision, either supplied by the
/// caller or read from the clock.
fn timestamp_arg(component: &str, args: &GenerateArgs) -> Result<f64, CodecError> {
    match args.get("timestamp") {
        Some(value) => {
            let ts = value
                .to_f64()
                .map_err(|e| CodecError::invalid_argument(component, "timestamp", e))?;
            if !ts.is_finite() || ts < 0.0 {
                return Err(CodecError::invalid_argument(
                    component,
                    "timestamp",
                    format!("{} is not a valid unix time", ts),
                ));
            }
            Ok(ts)
        }
        None => Ok(chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0),
    }
}

fn length_arg(component: &str, args: &GenerateArgs) -> Result<usize, CodecError> {
    args.get("length")
        .map(|v| v.to_usize())
        .transpose()
        .map_err(|e| CodecError::invalid_argument(component, "length", e))
        .map(|len| len.unwrap_or(DEFAULT_RANDOM_LENGTH))
}

fn random_label(alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[fastrand::usize(..alphabet.len())] as char)
        .collect()
}

/// `$key`: the `val` argument as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordComponent;

impl LabelComponent for KeywordComponent {
    fn id(&self) -> &'static str {
        "$key"
    }

    fn params(&self) -> &'static [ParamSpec] {
        KEYWORD_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let value = required_arg(self.id(), args, "val")?;
        validate_label(self.id(), value.to_text())
    }
}

/// `$ip`: address octets in base32. Seven symbols or fewer is IPv4.
#[derive(Debug, Default, Clone, Copy)]
pub struct IpComponent;

impl IpComponent {
    const IPV4_SYMBOLS: usize = 7;
}

impl LabelComponent for IpComponent {
    fn id(&self) -> &'static str {
        "$ip"
    }

    fn params(&self) -> &'static [ParamSpec] {
        IP_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let ip = required_arg(self.id(), args, "ip_addr")?
            .to_ip()
            .map_err(|e| CodecError::invalid_argument(self.id(), "ip_addr", e))?;
        let label = match ip {
            IpAddr::V4(v4) => base32::encode(&v4.octets()),
            IpAddr::V6(v6) => base32::encode(&v6.octets()),
        };
        validate_label(self.id(), label)
    }

    fn parse(&self, label: &str) -> Result<LabelValue, CodecError> {
        let bytes = base32::decode(label).map_err(|e| CodecError::decode(self.id(), label, e))?;
        let ip = if label.trim_end_matches('=').len() > Self::IPV4_SYMBOLS {
            let octets: [u8; 16] = bytes.try_into().map_err(|b: Vec<u8>| {
                CodecError::decode(self.id(), label, format!("{} octets, IPv6 needs 16", b.len()))
            })?;
            IpAddr::V6(Ipv6Addr::from(octets))
        } else {
            let octets: [u8; 4] = bytes.try_into().map_err(|b: Vec<u8>| {
                CodecError::decode(self.id(), label, format!("{} octets, IPv4 needs 4", b.len()))
            })?;
            IpAddr::V4(Ipv4Addr::from(octets))
        };
        Ok(LabelValue::Ip(ip))
    }
}

/// `$ts`: whole seconds as a big-endian `u32` in base32.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampComponent;

impl LabelComponent for TimestampComponent {
    fn id(&self) -> &'static str {
        "$ts"
    }

    fn params(&self) -> &'static [ParamSpec] {
        TIMESTAMP_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let ts = timestamp_arg(self.id(), args)?;
        if ts > f64::from(u32::MAX) {
            return Err(CodecError::invalid_argument(
                self.id(),
                "timestamp",
                format!("{} does not fit in 32 bits", ts),
            ));
        }
        let seconds = ts.trunc() as u32;
        validate_label(self.id(), base32::encode(&seconds.to_be_bytes()))
    }

    fn parse(&self, label: &str) -> Result<LabelValue, CodecError> {
        let bytes = base32::decode(label).map_err(|e| CodecError::decode(self.id(), label, e))?;
        let octets: [u8; 4] = bytes.try_into().map_err(|b: Vec<u8>| {
            CodecError::decode(self.id(), label, format!("{} octets, expected 4", b.len()))
        })?;
        Ok(LabelValue::Timestamp(u32::from_be_bytes(octets)))
    }
}

/// `$tsu`: the fractional part of the timestamp, in units of 100ns.
#[derive(Debug, Default, Clone, Copy)]
pub struct MicrosecondsComponent;

impl LabelComponent for MicrosecondsComponent {
    fn id(&self) -> &'static str {
        "$tsu"
    }

    fn params(&self) -> &'static [ParamSpec] {
        TIMESTAMP_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let ts = timestamp_arg(self.id(), args)?;
        let fraction = (1e7 * ts.fract()) as u64;
        validate_label(self.id(), fraction.to_string())
    }

    fn parse(&self, label: &str) -> Result<LabelValue, CodecError> {
        label
            .parse::<u64>()
            .map(LabelValue::Integer)
            .map_err(|e| CodecError::decode(self.id(), label, e))
    }
}

/// `$host`: short name of the machine generating the query.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostnameComponent;

impl LabelComponent for HostnameComponent {
    fn id(&self) -> &'static str {
        "$host"
    }

    fn generate(&self, _args: &GenerateArgs) -> Result<String, CodecError> {
        let hostname = hostname::get()
            .map_err(|e| CodecError::invalid_argument(self.id(), "hostname", e))?
            .to_string_lossy()
            .into_owned();
        let short = hostname.split('.').next().unwrap_or_default().to_string();
        validate_label(self.id(), short)
    }
}

/// `$uniq`: next number from a shared [`SequenceSource`].
#[derive(Clone)]
pub struct UniqueComponent {
    sequence: Arc<dyn SequenceSource>,
}

impl UniqueComponent {
    pub fn new(sequence: Arc<dyn SequenceSource>) -> Self {
        Self { sequence }
    }
}

impl LabelComponent for UniqueComponent {
    fn id(&self) -> &'static str {
        "$uniq"
    }

    fn generate(&self, _args: &GenerateArgs) -> Result<String, CodecError> {
        validate_label(self.id(), self.sequence.next_value().to_string())
    }

    fn parse(&self, label: &str) -> Result<LabelValue, CodecError> {
        label
            .parse::<u64>()
            .map(LabelValue::Integer)
            .map_err(|e| CodecError::decode(self.id(), label, e))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAlphaComponent;

impl LabelComponent for RandomAlphaComponent {
    fn id(&self) -> &'static str {
        "$randalpha"
    }

    fn params(&self) -> &'static [ParamSpec] {
        LENGTH_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let len = length_arg(self.id(), args)?;
        validate_label(self.id(), random_label(ALPHA, len))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNumericComponent;

impl LabelComponent for RandomNumericComponent {
    fn id(&self) -> &'static str {
        "$randnum"
    }

    fn params(&self) -> &'static [ParamSpec] {
        LENGTH_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let len = length_arg(self.id(), args)?;
        validate_label(self.id(), random_label(NUMERIC, len))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAlphanumericComponent;

impl LabelComponent for RandomAlphanumericComponent {
    fn id(&self) -> &'static str {
        "$randalphanum"
    }

    fn params(&self) -> &'static [ParamSpec] {
        LENGTH_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let len = length_arg(self.id(), args)?;
        validate_label(self.id(), random_label(ALPHANUMERIC, len))
    }
}

/// `$randb32`: base32 of the timestamp in 10µs units, with its symbols
/// shuffled. Unique-ish per query and not decodable.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomBase32Component;

impl LabelComponent for RandomBase32Component {
    fn id(&self) -> &'static str {
        "$randb32"
    }

    fn params(&self) -> &'static [ParamSpec] {
        TIMESTAMP_PARAMS
    }

    fn generate(&self, args: &GenerateArgs) -> Result<String, CodecError> {
        let ts = timestamp_arg(self.id(), args)?;
        let ticks = (ts * 100_000.0) as u64;
        let mut symbols: Vec<char> = base32::encode(&ticks.to_be_bytes()).chars().collect();
        fastrand::shuffle(&mut symbols);
        validate_label(self.id(), symbols.into_iter().collect())
    }
}
