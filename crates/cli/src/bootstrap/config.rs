use qname_relay_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    Ok(Config::load(path, overrides)?)
}

pub fn log_config(config: &Config) {
    info!(
        bind_address = %config.server.bind_address,
        port = config.server.port,
        backend = %config.backend.socket_addr(),
        backend_domain = %config.backend.domain,
        zone_labels = config.relay.zone_labels,
        transformer = config.relay.transformer.as_str(),
        "Configuration loaded"
    );
}
