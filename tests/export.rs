use std::fs;

use assert_matches::assert_matches;
use serde_json::json;

use salon_cli::error::SalonError;
use salon_cli::export::description_lines;
use salon_cli::repository::result_bindings;

#[test]
fn description_lines_from_results_document() {
    let raw = fs::read_to_string("tests/fixtures/export_bindings.json").unwrap();
    let body: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let lines = description_lines(&result_bindings(body)).unwrap();
    assert_eq!(
        lines,
        vec![
            ">sp|P12345|FOO_HUMAN Foo protein OS=Homo sapiens OX=9606 GN=FOO PE=1".to_string(),
            ">tl|Q99999|BAR_MOUSE Bar protein OS=Mus musculus OX=10090 GN=Bar PE=2".to_string(),
        ]
    );
}

#[test]
fn unknown_existence_iri_fails_the_export() {
    let rows = vec![json!({
        "db": {"type": "literal", "value": "true"},
        "ProteinExistence": {
            "type": "uri",
            "value": "http://purl.uniprot.org/core/Hearsay_Existence"
        }
    })];
    let err = description_lines(&rows).unwrap_err();
    assert_matches!(err, SalonError::UnknownVocabularyValue(_));
}
