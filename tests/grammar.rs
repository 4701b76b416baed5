use psrquery::{ConditionKind, Interval, Quantity, Query, QueryError, QueryParser, Record, Registry, parse_query};

fn catalogue() -> Vec<Record> {
    vec![
        Record::new()
            .with_value("JNAME", "J0437-4715")
            .with_value("F0", 173.69)
            .with_value("DIST", 0.157)
            .with_value("TYPE", "HE[zrb+16],RADIO")
            .with_value("BINCOMP", "He"),
        Record::new()
            .with_value("JNAME", "J0534+2200")
            .with_value("F0", 29.95)
            .with_value("DIST", 2.0)
            .with_value("TYPE", "HE")
            .with_value("ASSOC", "SNR:Crab[ccl+83]"),
        Record::new()
            .with_value("JNAME", "J0024-7204C")
            .with_value("F0", 173.7)
            .with_value("DIST", 4.69)
            .with_value("ASSOC", "GC:47Tuc"),
    ]
}

fn select(text: &str) -> Vec<String> {
    let records = catalogue();
    let query = parse_query(Registry::global(), text).unwrap();
    query
        .select(&records)
        .filter_map(|r| r.get("JNAME").and_then(|s| s.value.as_text()).map(str::to_string))
        .collect()
}

#[test]
fn millisecond_pulsars_within_a_kiloparsec() {
    assert_eq!(select("F0 > 100 && DIST <= 1000 pc"), vec!["J0437-4715"]);
}

#[test]
fn functions_and_inclusion() {
    assert_eq!(select("type(HE)"), vec!["J0437-4715", "J0534+2200"]);
    assert_eq!(select("ASSOC in (GC, SNR)"), vec!["J0534+2200", "J0024-7204C"]);
    assert_eq!(select("assoc(GC) && exist(DIST)"), vec!["J0024-7204C"]);
    assert_eq!(select("bincomp(He)"), vec!["J0437-4715"]);
}

#[test]
fn keywords_are_case_insensitive_parameters_are_not() {
    assert_eq!(select("EXIST(ASSOC) && Type(HE)"), vec!["J0534+2200"]);
    let err = parse_query(Registry::global(), "f0 > 1").unwrap_err();
    assert_eq!(err, QueryError::UnknownParameter("f0".into()));
}

#[test]
fn whitespace_and_line_breaks() {
    assert_eq!(select("  F0>=173.69\n&&\tF0 <= 173.69  "), vec!["J0437-4715"]);
}

#[test]
fn equality_tolerance_from_the_parser() {
    let records = catalogue();
    let exact = parse_query(Registry::global(), "F0 == 173.7").unwrap();
    assert_eq!(exact.select(&records).count(), 1);
    let loose = QueryParser::new(Registry::global())
        .tolerance(0.05)
        .parse("F0 = 173.7")
        .unwrap();
    assert_eq!(loose.select(&records).count(), 2);
    assert_eq!(loose.conditions()[0].kind(), ConditionKind::Equals);
}

#[test]
fn malformed_queries() {
    let registry = Registry::global();
    for text in ["", "&&", "F0 >", "F0 100", "type()", "exist F0", "F0 > 1 &&"] {
        let err = parse_query(registry, text).unwrap_err();
        assert!(matches!(err, QueryError::Parse { .. }), "{text:?} gave {err:?}");
    }
    let err = parse_query(registry, "F0 > 1\n|| F0 < 0").unwrap_err();
    assert!(matches!(err, QueryError::Parse { line: Some(2), col: Some(1), .. }));
}

#[test]
fn grammar_and_builder_agree() {
    let registry = Registry::global();
    let parsed = parse_query(registry, "DIST <= 2 kpc && bincomp(He, CO)").unwrap();
    let built = Query::new(registry)
        .and("DIST", ConditionKind::Range, Interval::at_most(Quantity::with_unit(2.0, "kpc")))
        .and_then(|q| q.and("BINCOMP", ConditionKind::OneOf, vec!["He", "CO"]))
        .unwrap();
    assert_eq!(parsed.conditions(), built.conditions());
    assert_eq!(parsed.to_string(), built.to_string());
}

#[test]
fn declared_multi_factor_units_can_be_written() {
    let records = vec![
        Record::new().with_value("DM", 2.64).with_value("DIST", 0.157),
        Record::new().with_value("DM", 56.77).with_value("DIST", 2.0),
    ];
    let registry = Registry::global();
    let query = parse_query(registry, "DM >= 30 cm^-3 pc && DIST in (0.157 kpc, 2000 pc)").unwrap();
    let selected: Vec<&Record> = query.select(&records).collect();
    assert_eq!(selected, vec![&records[1]]);
    assert!(parse_query(registry, "DM > 1e-3 m^-3 pc\n&& DM < 100 cm^-3   pc").is_ok());
    let err = parse_query(registry, "DM > 10 cm^-3 kpc s").unwrap_err();
    assert!(matches!(err, QueryError::UnitMismatch { .. }));
}

#[test]
fn quoted_bars_are_text() {
    let records = vec![Record::new().with_value("JNAME", "a||b")];
    let query = parse_query(Registry::global(), r#"JNAME == "a||b""#).unwrap();
    assert_eq!(query.select(&records).count(), 1);
}
