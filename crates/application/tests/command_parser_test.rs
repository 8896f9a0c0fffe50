use qname_relay_application::services::CommandParser;
use qname_relay_domain::{CommandMapping, CommandValue, ValueKind};

fn cookie_mapping() -> CommandMapping {
    CommandMapping::new()
        .with("c-cookie", &[ValueKind::Str])
        .with("s-cookie", &[ValueKind::Str])
        .with("no-edns", &[])
        .with("bad", &[ValueKind::Bool])
}

fn labels(qname: &str) -> Vec<&str> {
    qname.trim_end_matches('.').split('.').collect()
}

fn str_value(s: &str) -> Option<CommandValue> {
    Some(CommandValue::Str(s.to_string()))
}

#[test]
fn test_parse_single_keyword_then_stop() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("exists.none.c-cookie.cookie.example.com"));

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.first_str("c-cookie"), Some("none"));
    assert_eq!(parsed.consumed_labels(), 2);
}

#[test]
fn test_parse_flag_keyword() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("exists.no-edns.cookie.example.com"));

    assert!(parsed.contains("no-edns"));
    assert_eq!(parsed.values("no-edns"), Some(&[][..]));
    assert_eq!(parsed.consumed_labels(), 1);
}

#[test]
fn test_parse_multiple_keywords() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels(
        "again.exists.f.bad.00112233445566778899aabbccddeeff.s-cookie.aabbccdd11223344.c-cookie.cookie.example.com",
    ));

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed.first_str("c-cookie"), Some("aabbccdd11223344"));
    assert_eq!(
        parsed.first_str("s-cookie"),
        Some("00112233445566778899aabbccddeeff")
    );
    assert_eq!(parsed.first_bool("bad"), Some(false));
    assert_eq!(parsed.consumed_labels(), 6);
}

#[test]
fn test_parse_truncated_value_is_none() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    // qname minimization: the value label after "c-cookie" never arrived
    let parsed = parser.parse(&labels("c-cookie.cookie.example.com"));

    assert!(parsed.contains("c-cookie"));
    assert_eq!(parsed.values("c-cookie"), Some(&[None][..]));
    assert_eq!(parsed.consumed_labels(), 1);
}

#[test]
fn test_parse_truncated_multi_value_keeps_present_values() {
    let mapping = CommandMapping::new().with("pair", &[ValueKind::Int, ValueKind::Int]);
    let parser = CommandParser::new(mapping, 2);

    let parsed = parser.parse(&labels("5.pair.example.com"));

    assert_eq!(
        parsed.values("pair"),
        Some(&[Some(CommandValue::Int(5)), None][..])
    );
    assert_eq!(parsed.consumed_labels(), 2);
}

#[test]
fn test_parse_stops_at_unknown_label() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("t.bad.www.no-edns.cookie.example.com"));

    assert!(parsed.contains("no-edns"));
    assert!(!parsed.contains("bad"));
    assert_eq!(parsed.consumed_labels(), 1);
}

#[test]
fn test_parse_nothing_after_zone() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("www.cookie.example.com"));

    assert!(parsed.is_empty());
    assert_eq!(parsed.consumed_labels(), 0);
}

#[test]
fn test_parse_name_shorter_than_zone() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("example.com"));

    assert!(parsed.is_empty());
    assert_eq!(parsed.consumed_labels(), 0);
}

#[test]
fn test_parse_failed_int_cast_is_none_and_continues() {
    let mapping = CommandMapping::new()
        .with("ttl", &[ValueKind::Int])
        .with("flag", &[]);
    let parser = CommandParser::new(mapping, 2);

    let parsed = parser.parse(&labels("flag.soon.ttl.example.com"));

    assert_eq!(parsed.values("ttl"), Some(&[None][..]));
    assert!(parsed.contains("flag"));
    assert_eq!(parsed.consumed_labels(), 3);
}

#[test]
fn test_parse_keyword_is_case_insensitive() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("x.AbCd.C-Cookie.cookie.example.com"));

    assert_eq!(parsed.values("c-cookie"), Some(&[str_value("AbCd")][..]));
    assert_eq!(parsed.consumed_labels(), 2);
}

#[test]
fn test_parse_repeated_keyword_overwrites() {
    let parser = CommandParser::new(cookie_mapping(), 3);
    let parsed = parser.parse(&labels("t.bad.f.bad.cookie.example.com"));

    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.first_bool("bad"), Some(true));
    assert_eq!(parsed.consumed_labels(), 4);
}

#[test]
fn test_parse_zero_zone_labels() {
    let mapping = CommandMapping::new().with("com", &[]);
    let parser = CommandParser::new(mapping, 0);

    let parsed = parser.parse(&labels("example.com"));

    assert!(parsed.contains("com"));
    assert_eq!(parsed.consumed_labels(), 1);
}
