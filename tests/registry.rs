use psrquery::{Nature, Partition, QueryError, Record, Registry, Vocabulary};

#[test]
fn f0_spec() {
    let registry = Registry::global();
    let f0 = registry.lookup("F0").expect("F0 is a catalogue parameter");
    assert!(f0.has_reference());
    assert!(f0.has_error());
    assert_eq!(f0.unit(), Some("Hz"));
    assert_eq!(f0.nature(), Nature::Numeric);
    assert_eq!(f0.partition(), Partition::Timing);
    assert_eq!(registry.supports_error("F0"), Ok(true));
    assert_eq!(registry.unit_of("DM"), Ok(Some("cm^-3 pc")));
}

#[test]
fn unknown_names_fail_consistently() {
    let registry = Registry::global();
    for name in ["BOGUS", "f0", "", " F0"] {
        assert_eq!(registry.lookup(name), Err(QueryError::UnknownParameter(name.to_string())));
        assert!(!registry.contains(name));
        assert!(registry.supports_reference(name).is_err());
    }
}

#[test]
fn categorical_fields_carry_their_vocabulary() {
    let registry = Registry::global();
    assert_eq!(registry.lookup("TYPE").unwrap().vocabulary(), Some(Vocabulary::PulsarType));
    assert_eq!(registry.lookup("BINCOMP").unwrap().vocabulary(), Some(Vocabulary::BinaryCompanion));
    assert_eq!(registry.lookup("ASSOC").unwrap().vocabulary(), Some(Vocabulary::Association));
    let name = registry.lookup("NAME").unwrap();
    assert!(name.is_categorical());
    assert_eq!(name.vocabulary(), None);
}

#[test]
fn vocabularies_are_closed_and_case_sensitive() {
    let registry = Registry::global();
    assert!(registry.is_valid_token(Vocabulary::BinaryCompanion, "He"));
    assert!(!registry.is_valid_token(Vocabulary::BinaryCompanion, "HE"));
    assert!(registry.is_valid_token(Vocabulary::PulsarType, "HE"));
    assert_eq!(registry.vocabularies().count(), 3);
    assert_eq!(
        registry.vocabulary(Vocabulary::PulsarType),
        &["AXP", "BINARY", "HE", "NRAD", "RADIO", "RRAT", "XINS"]
    );
}

#[test]
fn names_are_unique() {
    let registry = Registry::global();
    let mut names: Vec<&str> = registry.all_names().collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn records_with_foreign_keys_are_rejected() {
    let registry = Registry::global();
    assert!(registry.validate_record(&Record::new().with_value("F0", 1.0)).is_ok());
    assert_eq!(
        registry.validate_record(&Record::new().with_value("SPIN", 1.0)),
        Err(QueryError::UnknownParameter("SPIN".into()))
    );
}
