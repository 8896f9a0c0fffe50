//! Wire-level rewrites applied to messages passing through the relay.

use hickory_proto::error::ProtoError;
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, Record, RecordType};
use qname_relay_domain::DomainError;

/// Drops the last `strip` labels of `qname` and appends `backend_domain`.
pub fn strip_labels(
    qname: &Name,
    strip: usize,
    backend_domain: &Name,
) -> Result<Name, DomainError> {
    let keep = (qname.num_labels() as usize).saturating_sub(strip);
    let kept: Vec<&[u8]> = qname.iter().take(keep).collect();

    Name::from_labels(kept)
        .and_then(|name| name.append_domain(backend_domain))
        .map_err(|e| {
            DomainError::InvalidDomainName(format!(
                "Cannot rebuild '{}' under '{}': {}",
                qname, backend_domain, e
            ))
        })
}

/// Puts the client's query name back into a backend reply.
///
/// Every question or record owned by the forwarded name is renamed to
/// `original_qname`. SOA and NS records owned by the backend zone in the
/// authority section are then moved to the relay's own zone apex, the last
/// `zone_labels` labels of `original_qname`.
pub fn restore_labels(
    response: &mut Message,
    original_qname: &Name,
    backend_domain: &Name,
    zone_labels: usize,
) {
    let Some(forwarded) = response.queries().first().map(|q| q.name().clone()) else {
        return;
    };

    let mut queries = response.take_queries();
    for query in queries.iter_mut() {
        if *query.name() == forwarded {
            query.set_name(original_qname.clone());
        }
    }
    response.add_queries(queries);

    let answers = rename_owner(response.take_answers(), &forwarded, original_qname);
    response.insert_answers(answers);

    let zone_apex = original_qname.trim_to(zone_labels);
    let mut authority = rename_owner(response.take_name_servers(), &forwarded, original_qname);
    for record in authority.iter_mut() {
        if record.name() == backend_domain
            && matches!(record.record_type(), RecordType::SOA | RecordType::NS)
        {
            record.set_name(zone_apex.clone());
        }
    }
    response.insert_name_servers(authority);

    let additionals = rename_owner(response.take_additionals(), &forwarded, original_qname);
    response.insert_additionals(additionals);
}

fn rename_owner(mut records: Vec<Record>, from: &Name, to: &Name) -> Vec<Record> {
    for record in records.iter_mut() {
        if record.name() == from {
            record.set_name(to.clone());
        }
    }
    records
}

/// Serializes `message`, returning `None` when the encoded form is larger
/// than `max_size`.
pub fn encode_within(message: &Message, max_size: u16) -> Result<Option<Vec<u8>>, ProtoError> {
    let bytes = message.to_vec()?;
    Ok((bytes.len() <= max_size as usize).then_some(bytes))
}

/// Keeps only the question (and EDNS) of an oversized reply.
pub fn truncate_sections(message: &mut Message) {
    message.take_answers();
    message.take_name_servers();
    message.take_additionals();
}
