//! Integration tests for URI prefix discovery

use curies::prelude::*;

fn sample_uris() -> Vec<String> {
    let mut uris: Vec<String> = (0..30).map(|i| format!("http://ran.dom/{i:03}")).collect();
    uris.extend((1..=3).map(|i| format!("http://purl.obolibrary.org/obo/GO_{i:07}")));
    uris.push("http://www.w3.org/2000/01/rdf-schema#label".to_string());
    uris
}

#[test]
fn test_discover_assigns_sorted_placeholders() -> Result<()> {
    let uris = sample_uris();
    let converter = discover(uris.iter().map(String::as_str), &DiscoveryConfig::default(), None)?;

    let expected = vec![
        Record::new("ns1", "http://purl.obolibrary.org/obo/GO_"),
        Record::new("ns2", "http://ran.dom/"),
        Record::new("ns3", "http://www.w3.org/2000/01/rdf-schema#"),
    ];
    assert_eq!(converter.records(), expected.as_slice());
    assert_eq!(
        converter.compress("http://ran.dom/002").as_deref(),
        Some("ns2:002")
    );
    assert_eq!(converter.delimiter(), ":");
    Ok(())
}

#[test]
fn test_discover_cutoff() -> Result<()> {
    let uris = sample_uris();
    let uris = || uris.iter().map(String::as_str);

    let converter = discover(uris(), &DiscoveryConfig::default().with_cutoff(3), None)?;
    assert_eq!(
        converter.get_uri_prefixes(false).into_iter().collect::<Vec<_>>(),
        vec!["http://purl.obolibrary.org/obo/GO_", "http://ran.dom/"]
    );
    assert_eq!(converter.get_prefixes(false).into_iter().collect::<Vec<_>>(), vec!["ns1", "ns2"]);

    let converter = discover(uris(), &DiscoveryConfig::default().with_cutoff(4), None)?;
    assert_eq!(converter.records(), [Record::new("ns1", "http://ran.dom/")]);

    // Duplicate URIs count once.
    let repeated = ["http://example.org/x/1"; 5];
    let converter = discover(repeated, &DiscoveryConfig::default().with_cutoff(2), None)?;
    assert!(converter.is_empty());
    Ok(())
}

#[test]
fn test_discover_skips_known_uris() -> Result<()> {
    let known = Converter::from_prefix_map([("GO", "http://purl.obolibrary.org/obo/GO_")])?;
    let uris = sample_uris();

    let converter = discover(
        uris.iter().map(String::as_str),
        &DiscoveryConfig::default().with_metaprefix("x"),
        Some(&known),
    )?;
    let expected = vec![
        Record::new("x1", "http://ran.dom/"),
        Record::new("x2", "http://www.w3.org/2000/01/rdf-schema#"),
    ];
    assert_eq!(converter.records(), expected.as_slice());

    let combined = chain(&[known, converter], true)?;
    assert_eq!(
        combined.compress("http://purl.obolibrary.org/obo/GO_0000001").as_deref(),
        Some("GO:0000001")
    );
    assert_eq!(
        combined.compress("http://ran.dom/007").as_deref(),
        Some("x1:007")
    );
    Ok(())
}

#[test]
fn test_discover_custom_delimiters() -> Result<()> {
    let uris = ["http://purl.obolibrary.org/obo/GO_0000001"];
    let converter = discover(uris, &DiscoveryConfig::default().with_delimiters(["/"]), None)?;
    // `GO_0000001` is not alphanumeric, so `/` alone finds nothing.
    assert!(converter.is_empty());

    let err = discover(uris, &DiscoveryConfig::default().with_delimiters([""]), None).unwrap_err();
    assert!(matches!(err, CuriesError::InvalidConfig(_)));
    Ok(())
}
