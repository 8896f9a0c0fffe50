use super::component::{validate_label, GenerateArgs, LabelComponent};
use super::errors::CodecError;
use super::registry::ComponentRegistry;
use super::value::LabelValue;
use std::fmt;
use std::fmt::Write as _;

/// Marks a template token as a component reference.
pub const COMPONENT_PREFIX: char = '$';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    Component(String),
}

impl TemplateToken {
    fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) | Self::Component(s) => s,
        }
    }
}

/// A dotted pattern such as `$ip.$ts.probe`, one token per label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QnameTemplate {
    tokens: Vec<TemplateToken>,
}

impl QnameTemplate {
    pub fn new(pattern: &str) -> Self {
        let tokens = pattern
            .split('.')
            .filter(|token| !token.is_empty())
            .map(|token| {
                if token.starts_with(COMPONENT_PREFIX) {
                    TemplateToken::Component(token.to_string())
                } else {
                    TemplateToken::Literal(token.to_string())
                }
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Builds `<label>.<label>...<domain>`.
    pub fn generate(
        &self,
        registry: &ComponentRegistry,
        domain: &str,
        args: &GenerateArgs,
    ) -> Result<String, CodecError> {
        let mut labels = Vec::with_capacity(self.tokens.len() + 1);

        for token in &self.tokens {
            match token {
                TemplateToken::Literal(literal) => labels.push(literal.clone()),
                TemplateToken::Component(id) => {
                    let component = registry.get(id)?;
                    let bound = bind_args(component.as_ref(), args)?;
                    let label = component.generate(&bound)?;
                    labels.push(validate_label(id, label)?);
                }
            }
        }

        let domain = domain.trim_start_matches('.');
        if !domain.is_empty() {
            labels.push(domain.to_string());
        }
        Ok(labels.join("."))
    }

    /// Decodes the leading labels of `qname` against the template. Extra
    /// labels on either side are ignored.
    pub fn parse(
        &self,
        registry: &ComponentRegistry,
        qname: &str,
    ) -> Result<ParsedQname, CodecError> {
        let mut parsed = ParsedQname::default();
        let labels = qname.trim_end_matches('.').split('.');

        for (token, label) in self.tokens.iter().zip(labels) {
            match token {
                TemplateToken::Literal(literal) => {
                    if !literal.eq_ignore_ascii_case(label) {
                        return Err(CodecError::LabelMismatch {
                            expected: literal.clone(),
                            found: label.to_string(),
                        });
                    }
                    parsed.insert(literal, LabelValue::Text(label.to_string()));
                }
                TemplateToken::Component(id) => {
                    let component = registry.get(id)?;
                    parsed.insert(id, component.parse(label)?);
                }
            }
        }

        Ok(parsed)
    }

    /// One line per component token: its id and the arguments it takes.
    pub fn describe(&self, registry: &ComponentRegistry) -> Result<String, CodecError> {
        let mut out = String::new();
        for token in &self.tokens {
            if let TemplateToken::Component(id) = token {
                let component = registry.get(id)?;
                let params: Vec<String> =
                    component.params().iter().map(|p| p.to_string()).collect();
                if params.is_empty() {
                    let _ = writeln!(out, "{}: no arguments", id);
                } else {
                    let _ = writeln!(out, "{}: {}", id, params.join(" "));
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for QnameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.tokens.iter().map(TemplateToken::as_str).collect();
        f.write_str(&joined.join("."))
    }
}

fn bind_args(
    component: &dyn LabelComponent,
    args: &GenerateArgs,
) -> Result<GenerateArgs, CodecError> {
    let mut bound = GenerateArgs::new();
    for param in component.params() {
        match args.get(param.name) {
            Some(value) => bound.insert(param.name, value.clone()),
            None if param.required => {
                return Err(CodecError::MissingArgument {
                    component: component.id().to_string(),
                    argument: param.name.to_string(),
                })
            }
            None => {}
        }
    }
    Ok(bound)
}

/// Decoded values keyed by component id (or literal), in template order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedQname {
    entries: Vec<(String, LabelValue)>,
}

impl ParsedQname {
    fn insert(&mut self, key: &str, value: LabelValue) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&LabelValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
