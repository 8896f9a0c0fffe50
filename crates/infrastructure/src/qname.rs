//! Typed values carried inside DNS labels.
//!
//! A [`LabelComponent`] turns one semantic value (an address, a timestamp, a
//! random token...) into a single label and back. A [`QnameTemplate`]
//! composes components and literal labels into a whole query name.

pub mod base32;
mod component;
mod components;
mod errors;
mod registry;
mod sequence;
mod template;
mod value;

pub use component::{validate_label, ArgValue, GenerateArgs, LabelComponent, ParamSpec};
pub use components::{
    HostnameComponent, IpComponent, KeywordComponent, MicrosecondsComponent, RandomAlphaComponent,
    RandomAlphanumericComponent, RandomBase32Component, RandomNumericComponent,
    TimestampComponent, UniqueComponent,
};
pub use errors::CodecError;
pub use registry::ComponentRegistry;
pub use sequence::{AtomicSequence, SequenceSource};
pub use template::{ParsedQname, QnameTemplate, TemplateToken, COMPONENT_PREFIX};
pub use value::LabelValue;
