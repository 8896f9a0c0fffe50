use hickory_proto::op::Message;
use qname_relay_domain::{CommandMapping, ParsedCommand};

/// Rewrites a backend reply according to the command decoded from the
/// original query name.
pub trait ResponseTransformer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Keywords this transformer understands, with the value kinds that
    /// follow each keyword in the query name.
    fn command_mapping(&self) -> CommandMapping;

    /// Mutates `response` in place. Any keyword may be absent and any value
    /// slot may be `None` for truncated or malformed query names.
    fn transform(&self, response: &mut Message, command: &ParsedCommand);
}
