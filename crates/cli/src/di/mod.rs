mod relay;

pub use relay::build_relay;
