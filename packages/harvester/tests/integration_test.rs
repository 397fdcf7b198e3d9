//! End-to-end tests for registry parsing and output generation
//! using a trimmed Seznam OVM export fixture.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;

use ovm_harvester::output::{generate_yaml, save_output, OutputFormat};
use ovm_harvester::ovm::{parse_all_valid_subjects, parse_registry_xml};
use ovm_harvester::types::{Adresa, LegalFormCode, Subjekt};

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("ovm")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn run_pipeline() -> Vec<Subjekt> {
    parse_registry_xml(&load_fixture("seznam.xml")).expect("Failed to parse registry XML")
}

#[test]
fn test_pipeline_subject_count() {
    let subjects = run_pipeline();

    // Two of the five entries lack a required field
    assert_eq!(subjects.len(), 3);
    let codes: Vec<_> = subjects.iter().map(|s| s.zkratka.as_str()).collect();
    assert_eq!(codes, ["TRUTNOV", "MVCR", "NEZNAMA"]);
}

#[test]
fn test_pipeline_municipality() {
    let subjects = run_pipeline();
    let trutnov = &subjects[0];

    assert_eq!(trutnov.nazev, "Město Trutnov");
    assert_eq!(trutnov.ico.as_deref(), Some("00278360"));
    assert_eq!(trutnov.datova_schranka_id.as_deref(), Some("5xwbp4s"));
    assert_eq!(trutnov.pravni_forma.typ, LegalFormCode::Numeric(801));
    assert_eq!(trutnov.pravni_forma.label, "Obec");
    assert_eq!(trutnov.mail, ["podatelna@trutnov.cz", "info@trutnov.cz"]);
    assert_eq!(trutnov.municipality(), Some("Trutnov"));

    let adresa = trutnov.adresa_uradu.as_ref().unwrap();
    assert_eq!(adresa.ulice.as_deref(), Some("Slovanské náměstí"));
    assert_eq!(adresa.cislo_orientacni, None);
    assert_eq!(adresa.kraj.as_deref(), Some("Královéhradecký kraj"));
}

#[test]
fn test_pipeline_state_body_without_address() {
    let subjects = run_pipeline();
    let mvcr = &subjects[1];

    assert_eq!(mvcr.pravni_forma.typ, LegalFormCode::Numeric(325));
    assert!(mvcr.mail.is_empty());
    assert_eq!(mvcr.adresa_uradu, None);
    assert_eq!(mvcr.municipality(), None);
}

#[test]
fn test_pipeline_non_numeric_legal_form() {
    let subjects = run_pipeline();
    let neznama = &subjects[2];

    assert_eq!(
        neznama.pravni_forma.typ,
        LegalFormCode::NonNumeric("n/a".to_string())
    );
    assert_eq!(neznama.adresa_uradu, Some(Adresa::default()));
}

#[test]
fn test_pipeline_is_idempotent() {
    let xml = load_fixture("seznam.xml");
    let doc = roxmltree::Document::parse(&xml).expect("Failed to parse registry XML");

    let first = parse_all_valid_subjects(&doc);
    let second = parse_all_valid_subjects(&doc);
    assert_eq!(first, second);
}

#[test]
fn test_yaml_generation() {
    let subjects = run_pipeline();
    let yaml = generate_yaml(&subjects, "seznam.xml").expect("Failed to generate YAML");

    assert!(yaml.starts_with("---\n"));
    assert!(yaml.contains("count: 3"));
    assert!(yaml.contains("zkratka: TRUTNOV"));
    assert!(yaml.contains("datovaSchrankaID: 5xwbp4s"));

    let parsed: serde_yaml_ng::Value =
        serde_yaml_ng::from_str(&yaml).expect("Generated YAML should be valid");
    let listed = parsed.get("subjects").expect("Should have subjects");
    assert!(listed.is_sequence());
}

#[test]
fn test_save_json_output() {
    let subjects = run_pipeline();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ovm.json");

    save_output(&subjects, "seznam.xml", OutputFormat::Json, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["count"], 3);
    assert_eq!(value["subjects"][2]["pravniForma"]["type"], "n/a");
}
