//! Client-side helpers around the qname template engine.

use qname_relay_infrastructure::qname::{ComponentRegistry, GenerateArgs, QnameTemplate};

pub fn parse_arg(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

pub fn generate(template: &str, domain: &str, args: &[(String, String)]) -> anyhow::Result<String> {
    let registry = ComponentRegistry::with_defaults();
    let mut generate_args = GenerateArgs::new();
    for (name, value) in args {
        generate_args.insert(name, value.as_str());
    }
    Ok(QnameTemplate::new(template).generate(&registry, domain, &generate_args)?)
}

pub fn parse(template: &str, qname: &str) -> anyhow::Result<Vec<String>> {
    let registry = ComponentRegistry::with_defaults();
    let parsed = QnameTemplate::new(template).parse(&registry, qname)?;
    Ok(parsed
        .iter()
        .map(|(key, value)| format!("{} = {}", key, value))
        .collect())
}

pub fn describe(template: &str) -> anyhow::Result<String> {
    let registry = ComponentRegistry::with_defaults();
    Ok(QnameTemplate::new(template).describe(&registry)?)
}
