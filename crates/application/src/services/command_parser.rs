use hickory_proto::rr::Name;
use qname_relay_domain::{CommandMapping, ParsedCommand};
use tracing::{debug, warn};

/// Reads the variable-length command section of a query name.
///
/// Labels are read from the root inward. The first `zone_labels` labels are
/// the relay's own zone and are skipped; after that every label that is a
/// keyword of the mapping is followed by one label per declared value kind.
/// Parsing stops at the first label that is not a keyword.
#[derive(Debug, Clone)]
pub struct CommandParser {
    mapping: CommandMapping,
    zone_labels: usize,
}

impl CommandParser {
    pub fn new(mapping: CommandMapping, zone_labels: usize) -> Self {
        Self {
            mapping,
            zone_labels,
        }
    }

    pub fn mapping(&self) -> &CommandMapping {
        &self.mapping
    }

    pub fn zone_labels(&self) -> usize {
        self.zone_labels
    }

    pub fn parse_name(&self, name: &Name) -> ParsedCommand {
        let labels: Vec<String> = name
            .iter()
            .map(|label| String::from_utf8_lossy(label).into_owned())
            .collect();
        self.parse(&labels)
    }

    /// `labels` are the non-root labels in wire order (leaf first).
    ///
    /// Value labels cut off by qname minimization are recorded as `None`, as
    /// are values that fail to cast. `consumed_labels` only counts labels
    /// that were actually present.
    pub fn parse<S: AsRef<str>>(&self, labels: &[S]) -> ParsedCommand {
        let total = labels.len();
        let label_at = |pos: usize| labels[total - 1 - pos].as_ref();

        let mut parsed = ParsedCommand::new();
        let mut pos = self.zone_labels;

        while pos < total {
            let keyword = label_at(pos);
            let Some(kinds) = self.mapping.get(keyword) else {
                break;
            };

            let mut values = Vec::with_capacity(kinds.len());
            for kind in kinds {
                pos += 1;
                if pos >= total {
                    values.push(None);
                    continue;
                }

                let label = label_at(pos);
                match kind.cast(label) {
                    Ok(value) => values.push(Some(value)),
                    Err(e) => {
                        warn!(keyword, label, kind = kind.as_str(), error = %e, "Command value cast failed");
                        values.push(None);
                    }
                }
            }

            if !values.is_empty() && values.iter().all(Option::is_none) {
                debug!(keyword, "Command keyword has no usable values");
            }

            parsed.insert(keyword, values);
            pos += 1;
        }

        parsed.set_consumed_labels(pos.min(total).saturating_sub(self.zone_labels));
        parsed
    }
}
