//! Integration tests for CURIE prefix remapping, URI prefix remapping and rewiring

use curies::prelude::*;

const P: &str = "https://example.org";

fn uri(path: &str) -> String {
    format!("{P}/{path}/")
}

fn ab_records() -> Result<Vec<Record>> {
    Ok(vec![
        Record::builder("a", uri("a")).prefix_synonym("x").build()?,
        Record::builder("b", uri("b")).prefix_synonym("y").build()?,
    ])
}

#[test]
fn test_curie_missing_key_is_skipped() -> Result<()> {
    let records = vec![Record::builder("a", uri("a")).prefix_synonym("x").build()?];
    let converter = Converter::new(records.clone())?;
    let remapped = remap_curie_prefixes(&converter, [("b", "c")])?;
    assert_eq!(remapped.records(), records.as_slice());
    Ok(())
}

#[test]
fn test_curie_simple() -> Result<()> {
    let converter = Converter::new([Record::builder("a", uri("a")).prefix_synonym("x").build()?])?;
    let remapped = remap_curie_prefixes(&converter, [("a", "a1")])?;

    let expected = Record::builder("a1", uri("a"))
        .prefix_synonyms(["a", "x"])
        .build()?;
    assert_eq!(remapped.records(), [expected]);
    assert_eq!(remapped.compress(&format!("{P}/a/1")).as_deref(), Some("a1:1"));
    assert_eq!(remapped.standardize_prefix("a").as_deref(), Some("a1"));
    Ok(())
}

#[test]
fn test_curie_to_own_synonym() -> Result<()> {
    let converter = Converter::new([Record::builder("a", uri("a")).prefix_synonym("x").build()?])?;
    let remapped = remap_curie_prefixes(&converter, [("a", "x")])?;

    let expected = Record::builder("x", uri("a")).prefix_synonym("a").build()?;
    assert_eq!(remapped.records(), [expected]);
    Ok(())
}

#[test]
fn test_curie_clash_is_skipped() -> Result<()> {
    let records = ab_records()?;
    let converter = Converter::new(records.clone())?;

    let remapped = remap_curie_prefixes(&converter, [("a", "b")])?;
    assert_eq!(remapped.records(), records.as_slice());

    let remapped = remap_curie_prefixes(&converter, [("a", "y")])?;
    assert_eq!(remapped.records(), records.as_slice());
    Ok(())
}

#[test]
fn test_curie_chain_applied_target_first() -> Result<()> {
    let converter = Converter::new(ab_records()?)?;
    let remapped = remap_curie_prefixes(&converter, [("a", "b"), ("b", "c")])?;

    assert_eq!(remapped.len(), 2);
    let b = remapped.get_record_strict("b")?;
    assert_eq!(b.uri_prefix(), uri("a"));
    assert_eq!(b.prefix_synonyms(), ["a", "x"]);

    let c = remapped.get_record_strict("c")?;
    assert_eq!(c.uri_prefix(), uri("b"));
    assert_eq!(c.prefix_synonyms(), ["y"]);
    Ok(())
}

#[test]
fn test_curie_validation_errors() -> Result<()> {
    let converter = Converter::new(ab_records()?)?;

    assert!(matches!(
        remap_curie_prefixes(&converter, [("a", "a1"), ("x", "a2")]),
        Err(CuriesError::DuplicateRemappingKeys(_))
    ));
    assert!(matches!(
        remap_curie_prefixes(&converter, [("q", "b"), ("r", "y")]),
        Err(CuriesError::DuplicateRemappingValues(_))
    ));
    assert!(matches!(
        remap_curie_prefixes(&converter, [("a", "a1"), ("q", "x")]),
        Err(CuriesError::InconsistentRemapping(_))
    ));
    assert!(matches!(
        remap_curie_prefixes(&Converter::default(), [("b", "c"), ("c", "b")]),
        Err(CuriesError::RemappingCycle)
    ));
    Ok(())
}

#[test]
fn test_uri_transitive_error() {
    let err = remap_uri_prefixes(
        &Converter::default(),
        [
            (uri("nope"), uri("more-nope")),
            (uri("more-nope"), uri("more-more-nope")),
        ],
    )
    .unwrap_err();
    match &err {
        CuriesError::TransitiveRemapping(strings) => assert_eq!(strings, &[uri("more-nope")]),
        other => panic!("expected transitive remapping error, got {other:?}"),
    }
    assert!(err.to_string().contains("more-nope"));
}

#[test]
fn test_uri_missing_key_is_skipped() -> Result<()> {
    let records = vec![Record::new("a", uri("a"))];
    let converter = Converter::new(records.clone())?;
    let remapped = remap_uri_prefixes(&converter, [(uri("nope"), uri("more-nope"))])?;
    assert_eq!(remapped.records(), records.as_slice());
    Ok(())
}

#[test]
fn test_uri_simple_and_synonym() -> Result<()> {
    let converter = Converter::new([Record::builder("a", uri("a"))
        .uri_prefix_synonym(uri("a1"))
        .build()?])?;
    let expected = Record::builder("a", uri("a2"))
        .uri_prefix_synonyms([uri("a"), uri("a1")])
        .build()?;

    let remapped = remap_uri_prefixes(&converter, [(uri("a"), uri("a2"))])?;
    assert_eq!(remapped.records(), [expected.clone()]);

    let remapped = remap_uri_prefixes(&converter, [(uri("a1"), uri("a2"))])?;
    assert_eq!(remapped.records(), [expected]);
    assert_eq!(
        remapped.standardize_uri(&format!("{P}/a1/1")),
        Some(format!("{P}/a2/1"))
    );
    Ok(())
}

#[test]
fn test_uri_clash_is_skipped() -> Result<()> {
    let records = ab_records()?;
    let converter = Converter::new(records.clone())?;
    let remapped = remap_uri_prefixes(&converter, [(uri("a"), uri("b"))])?;
    assert_eq!(remapped.records(), records.as_slice());

    let records = vec![
        Record::new("a", uri("a")),
        Record::builder("b", uri("b"))
            .uri_prefix_synonym(uri("b1"))
            .build()?,
    ];
    let converter = Converter::new(records.clone())?;
    let remapped = remap_uri_prefixes(&converter, [(uri("a"), uri("b1"))])?;
    assert_eq!(remapped.records(), records.as_slice());
    Ok(())
}

#[test]
fn test_rewire_idempotent() -> Result<()> {
    let records = vec![Record::builder("a", uri("a"))
        .uri_prefix_synonym("https://a.org/")
        .build()?];
    let converter = Converter::new(records.clone())?;
    let rewired = rewire(&converter, [("a", uri("a"))])?;
    assert_eq!(rewired.records(), records.as_slice());
    Ok(())
}

#[test]
fn test_rewire_simple() -> Result<()> {
    let converter = Converter::new([Record::builder("a", uri("a"))
        .uri_prefix_synonym("https://a.org/")
        .build()?])?;
    let rewired = rewire(&converter, [("a", uri("a1"))])?;

    let expected = Record::builder("a", uri("a1"))
        .uri_prefix_synonyms(["https://a.org/".to_string(), uri("a")])
        .build()?;
    assert_eq!(rewired.records(), [expected]);
    Ok(())
}

#[test]
fn test_rewire_clash_is_skipped() -> Result<()> {
    let records = vec![Record::new("a", uri("a")), Record::new("b", uri("b"))];
    let converter = Converter::new(records.clone())?;
    let rewired = rewire(&converter, [("b", uri("a"))])?;
    assert_eq!(rewired.records(), records.as_slice());
    Ok(())
}

#[test]
fn test_rewire_promotes_synonym() -> Result<()> {
    let converter = Converter::new([Record::builder("a", uri("a"))
        .uri_prefix_synonym(uri("a1"))
        .build()?])?;
    let rewired = rewire(&converter, [("a", uri("a1"))])?;
    let expected = Record::builder("a", uri("a1"))
        .uri_prefix_synonym(uri("a"))
        .build()?;
    assert_eq!(rewired.records(), [expected]);
    Ok(())
}

#[test]
fn test_rewire_via_prefix_synonym() -> Result<()> {
    let converter = Converter::new([Record::builder("a", uri("a"))
        .prefix_synonym("a1")
        .uri_prefix_synonym(uri("a1"))
        .build()?])?;
    let rewired = rewire(&converter, [("a1", uri("a1"))])?;
    let expected = Record::builder("a", uri("a1"))
        .prefix_synonym("a1")
        .uri_prefix_synonym(uri("a"))
        .build()?;
    assert_eq!(rewired.records(), [expected]);
    Ok(())
}

#[test]
fn test_delimiter_preserved() -> Result<()> {
    let converter = Converter::with_config(
        [Record::new("a", uri("a"))],
        ConverterConfig::default().with_delimiter("_"),
    )?;
    let remapped = remap_curie_prefixes(&converter, [("a", "a1")])?;
    assert_eq!(remapped.delimiter(), "_");
    assert_eq!(remapped.compress(&format!("{P}/a/1")).as_deref(), Some("a1_1"));
    Ok(())
}
