#![allow(dead_code)]

use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::opt::{EdnsCode, EdnsOption};
use hickory_proto::rr::rdata::{A, NS, SOA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tokio::net::UdpSocket;

pub const BACKEND_DOMAIN: &str = "backend.test.";

pub fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

pub fn query_message(qname: &str, record_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(name(qname));
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new();
    message
        .set_id(0xbeef)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query);
    message.add_query(query);
    message
}

pub fn query_bytes(qname: &str, record_type: RecordType) -> Vec<u8> {
    query_message(qname, record_type).to_vec().unwrap()
}

/// Authoritative reply carrying `answers` A records for the question name,
/// the backend SOA/NS in authority and, when given, a cookie option.
pub fn authoritative_reply(request: &Message, answers: usize, cookie: Option<&[u8]>) -> Message {
    let qname = request.queries()[0].name().clone();
    let zone = name(BACKEND_DOMAIN);

    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_authoritative(true);
    response.add_queries(request.queries().to_vec());

    for i in 0..answers {
        let octet = (i % 250) as u8 + 1;
        response.add_answer(Record::from_rdata(
            qname.clone(),
            300,
            RData::A(A(Ipv4Addr::new(192, 0, (i / 250) as u8, octet))),
        ));
    }

    response.add_name_server(Record::from_rdata(
        zone.clone(),
        300,
        RData::SOA(SOA::new(
            name("ns1.backend.test."),
            name("hostmaster.backend.test."),
            1,
            3600,
            600,
            86400,
            300,
        )),
    ));
    response.add_name_server(Record::from_rdata(
        zone,
        300,
        RData::NS(NS(name("ns1.backend.test."))),
    ));

    if let Some(cookie) = cookie {
        response
            .extensions_mut()
            .get_or_insert_with(Edns::new)
            .options_mut()
            .insert(EdnsOption::Unknown(10, cookie.to_vec()));
    }
    response
}

pub fn cookie_payload(message: &Message) -> Option<Vec<u8>> {
    match message.extensions().as_ref()?.option(EdnsCode::Cookie)? {
        EdnsOption::Unknown(_, data) => Some(data.clone()),
        _ => None,
    }
}

/// UDP backend on 127.0.0.1 answering each datagram with `respond`;
/// `None` means stay silent.
pub async fn spawn_backend<F>(respond: F) -> SocketAddr
where
    F: Fn(&[u8]) -> Option<Vec<u8>> + Send + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    tokio::spawn(async move {
        let mut buf = vec![0u8; 4096];
        loop {
            let Ok((n, from)) = socket.recv_from(&mut buf).await else {
                break;
            };
            if let Some(reply) = respond(&buf[..n]) {
                let _ = socket.send_to(&reply, from).await;
            }
        }
    });
    addr
}
