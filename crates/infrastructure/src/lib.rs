//! qname-relay Infrastructure Layer
pub mod dns;
pub mod qname;
