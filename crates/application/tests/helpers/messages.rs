#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, NS, SOA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub const BACKEND_DOMAIN: &str = "backend.test.";

pub fn query_bytes(qname: &str, record_type: RecordType) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(qname).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new();
    message
        .set_id(0x1234)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(false);
    message.add_query(query);
    message.to_vec().unwrap()
}

fn response_to(request: &Message) -> Message {
    let mut response = Message::new();
    response
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_authoritative(true);
    response.add_queries(request.queries().to_vec());
    response
}

/// Authoritative answer for the forwarded query: one A record owned by the
/// query name, the backend zone's SOA and NS in authority and a glue record.
pub fn backend_reply(request_bytes: &[u8]) -> Vec<u8> {
    let request = Message::from_vec(request_bytes).unwrap();
    let qname = request.queries()[0].name().clone();
    let zone = Name::from_str(BACKEND_DOMAIN).unwrap();
    let ns_name = Name::from_str("ns1.backend.test.").unwrap();

    let mut response = response_to(&request);
    response.add_answer(Record::from_rdata(
        qname.clone(),
        60,
        RData::A(A(Ipv4Addr::new(192, 0, 2, 1))),
    ));
    response.add_name_server(Record::from_rdata(
        zone.clone(),
        3600,
        RData::SOA(SOA::new(
            ns_name.clone(),
            Name::from_str("hostmaster.backend.test.").unwrap(),
            1,
            3600,
            600,
            86400,
            60,
        )),
    ));
    response.add_name_server(Record::from_rdata(zone, 3600, RData::NS(NS(ns_name.clone()))));
    response.add_additional(Record::from_rdata(
        qname,
        60,
        RData::A(A(Ipv4Addr::new(192, 0, 2, 2))),
    ));
    response.add_additional(Record::from_rdata(
        ns_name,
        3600,
        RData::A(A(Ipv4Addr::new(192, 0, 2, 53))),
    ));
    response.to_vec().unwrap()
}

/// Answer carrying `count` A records, enough to exceed small size limits.
pub fn oversized_reply(request_bytes: &[u8], count: u32) -> Vec<u8> {
    let request = Message::from_vec(request_bytes).unwrap();
    let qname = request.queries()[0].name().clone();

    let mut response = response_to(&request);
    for i in 0..count {
        response.add_answer(Record::from_rdata(
            qname.clone(),
            60,
            RData::A(A(Ipv4Addr::from(0x0a00_0000 + i))),
        ));
    }
    response.to_vec().unwrap()
}
