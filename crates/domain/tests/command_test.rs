use qname_relay_domain::command::label_to_bool;
use qname_relay_domain::{CommandMapping, CommandValue, ParsedCommand, ValueKind};

#[test]
fn test_bool_false_labels() {
    for label in ["false", "F", "f", "FALSE", "foo", "0"] {
        assert!(!label_to_bool(label), "{label} should decode to false");
    }
}

#[test]
fn test_bool_true_labels() {
    for label in ["true", "1", "", "anything", "t", "00", "yes"] {
        assert!(label_to_bool(label), "{label} should decode to true");
    }
}

#[test]
fn test_cast_bool_never_fails() {
    assert_eq!(
        ValueKind::Bool.cast("f").unwrap(),
        CommandValue::Bool(false)
    );
    assert_eq!(
        ValueKind::Bool.cast("garbage").unwrap(),
        CommandValue::Bool(true)
    );
}

#[test]
fn test_cast_int() {
    assert_eq!(ValueKind::Int.cast("42").unwrap(), CommandValue::Int(42));
    assert_eq!(ValueKind::Int.cast("-7").unwrap(), CommandValue::Int(-7));
    assert!(ValueKind::Int.cast("forty-two").is_err());
}

#[test]
fn test_cast_str_keeps_label() {
    assert_eq!(
        ValueKind::Str.cast("aabbccdd11223344").unwrap(),
        CommandValue::Str("aabbccdd11223344".to_string())
    );
}

#[test]
fn test_mapping_preserves_declaration_order() {
    let mapping = CommandMapping::new()
        .with("c-cookie", &[ValueKind::Str])
        .with("s-cookie", &[ValueKind::Str])
        .with("no-edns", &[])
        .with("bad", &[ValueKind::Bool]);

    let keywords: Vec<&str> = mapping.keywords().collect();
    assert_eq!(keywords, vec!["c-cookie", "s-cookie", "no-edns", "bad"]);
    assert_eq!(mapping.get("no-edns"), Some(&[][..]));
    assert!(!mapping.contains("exists"));
}

#[test]
fn test_parsed_command_accessors() {
    let mut parsed = ParsedCommand::new()
        .with("c-cookie", vec![Some(CommandValue::Str("none".into()))])
        .with("bad", vec![Some(CommandValue::Bool(true))])
        .with("no-edns", vec![]);
    parsed.set_consumed_labels(5);

    assert_eq!(parsed.first_str("c-cookie"), Some("none"));
    assert_eq!(parsed.first_bool("bad"), Some(true));
    assert!(parsed.contains("no-edns"));
    assert_eq!(parsed.first("no-edns"), None);
    assert_eq!(parsed.consumed_labels(), 5);
    assert_eq!(parsed.len(), 3);
}
