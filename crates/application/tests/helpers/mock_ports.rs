#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::Message;
use qname_relay_application::ports::{BackendTransport, ResponseTransformer, TransportResponse};
use qname_relay_domain::{CommandMapping, DomainError, ParsedCommand};
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&[u8]) -> Result<Vec<u8>, DomainError> + Send + Sync>;

pub struct MockBackendTransport {
    responder: Responder,
    requests: Mutex<Vec<Vec<u8>>>,
}

impl MockBackendTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[u8]) -> Result<Vec<u8>, DomainError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(reply: Vec<u8>) -> Self {
        Self::new(move |_| Ok(reply.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_| {
            Err(DomainError::TransportTimeout {
                server: "127.0.0.1:5353".to_string(),
            })
        })
    }

    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn forwarded_messages(&self) -> Vec<Message> {
        self.requests()
            .iter()
            .map(|bytes| Message::from_vec(bytes).unwrap())
            .collect()
    }
}

#[async_trait]
impl BackendTransport for MockBackendTransport {
    async fn exchange(
        &self,
        message_bytes: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        self.requests.lock().unwrap().push(message_bytes.to_vec());
        let bytes = (self.responder)(message_bytes)?;
        Ok(TransportResponse {
            bytes,
            protocol_used: "MOCK",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "MOCK"
    }

    fn server(&self) -> String {
        "mock-backend".to_string()
    }
}

/// Transformer that records every command it receives and leaves the
/// response untouched.
pub struct RecordingTransformer {
    mapping: CommandMapping,
    seen: Mutex<Vec<ParsedCommand>>,
}

impl RecordingTransformer {
    pub fn new(mapping: CommandMapping) -> Self {
        Self {
            mapping,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<ParsedCommand> {
        self.seen.lock().unwrap().clone()
    }
}

impl ResponseTransformer for RecordingTransformer {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn command_mapping(&self) -> CommandMapping {
        self.mapping.clone()
    }

    fn transform(&self, _response: &mut Message, command: &ParsedCommand) {
        self.seen.lock().unwrap().push(command.clone());
    }
}
