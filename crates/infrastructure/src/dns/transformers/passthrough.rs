use hickory_proto::op::Message;
use qname_relay_application::ports::ResponseTransformer;
use qname_relay_domain::{CommandMapping, ParsedCommand};

/// Understands no keywords and returns the backend reply as restored.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTransformer;

impl ResponseTransformer for PassthroughTransformer {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn command_mapping(&self) -> CommandMapping {
        CommandMapping::new()
    }

    fn transform(&self, _response: &mut Message, _command: &ParsedCommand) {}
}
