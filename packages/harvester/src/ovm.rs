//! Seznam OVM export parsing.
//!
//! The export is one namespaced XML document with a `<Subjekt>` element per
//! public-administration body. Required fields are `Zkratka`, `Nazev` and a
//! well-formed `PravniForma`; a `Subjekt` missing any of them is dropped
//! without raising an error.
//!
//! `Subjekt` elements are located by namespace, the e-mail list is walked by
//! namespace-qualified path, but scalar fields and nested records are looked
//! up by local name only. Documents in the wild rely on this mix, so keep it.

use reqwest::blocking::Client;
use roxmltree::{Document, Node};

use crate::config::{EXPORT_DOWNLOAD_ATTEMPTS, OVM_NAMESPACE};
use crate::error::Result;
use crate::http::{bytes_to_string, download_bytes};
use crate::types::{Adresa, LegalFormCode, PravniForma, Subjekt};
use crate::xml::{child_text, find_by_path_ns, find_child, get_attribute, text_content};

/// Local name of the entity element.
const SUBJEKT_TAG: &str = "Subjekt";

/// Path from a `Subjekt` to the individual e-mail leaves.
const EMAIL_PATH: &str = "Email/Polozka/Email";

/// Download the registry export and parse every valid `Subjekt`.
pub fn download_registry(client: &Client, url: &str) -> Result<Vec<Subjekt>> {
    tracing::info!(url, "Downloading registry export");
    let bytes = download_bytes(client, url, EXPORT_DOWNLOAD_ATTEMPTS)?;
    let xml = bytes_to_string(&bytes, "registry export");
    parse_registry_xml(&xml)
}

/// Parse registry XML text and extract every valid `Subjekt`.
///
/// Only malformed XML is an error; invalid entities are skipped.
pub fn parse_registry_xml(xml: &str) -> Result<Vec<Subjekt>> {
    let doc = Document::parse(xml)?;
    Ok(parse_all_valid_subjects(&doc))
}

/// Extract every valid `Subjekt` in document order.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ovm_harvester::ovm::parse_all_valid_subjects;
///
/// let xml = r#"<SeznamOvmIndex xmlns="http://www.czechpoint.cz/spravadat/p/ovm/datafile/seznamovm/v1">
///   <Subjekt>
///     <Zkratka>TRUTNOV</Zkratka>
///     <Nazev>Město Trutnov</Nazev>
///     <PravniForma type="801">Obec</PravniForma>
///   </Subjekt>
///   <Subjekt><Nazev>Bez zkratky</Nazev></Subjekt>
/// </SeznamOvmIndex>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let subjects = parse_all_valid_subjects(&doc);
/// assert_eq!(subjects.len(), 1);
/// assert_eq!(subjects[0].zkratka, "TRUTNOV");
/// ```
pub fn parse_all_valid_subjects(doc: &Document<'_>) -> Vec<Subjekt> {
    let candidates: Vec<Node<'_, '_>> = doc
        .descendants()
        .filter(|n| n.has_tag_name((OVM_NAMESPACE, SUBJEKT_TAG)))
        .collect();

    let subjects: Vec<Subjekt> = candidates.iter().filter_map(|n| parse_subjekt(*n)).collect();

    tracing::debug!(
        candidates = candidates.len(),
        valid = subjects.len(),
        dropped = candidates.len() - subjects.len(),
        "Parsed registry subjects"
    );

    subjects
}

/// Parse a single `<Subjekt>` element.
///
/// Returns `None` when the short code, name or legal form is missing.
pub fn parse_subjekt(elem: Node<'_, '_>) -> Option<Subjekt> {
    let zkratka = child_text(elem, "Zkratka")?;
    let nazev = child_text(elem, "Nazev")?;
    let pravni_forma = find_child(elem, "PravniForma").and_then(parse_pravni_forma)?;

    Some(Subjekt {
        zkratka,
        nazev,
        pravni_forma,
        ico: child_text(elem, "ICO"),
        datova_schranka_id: child_text(elem, "IdDS"),
        mail: parse_emails(elem),
        adresa_uradu: find_child(elem, "AdresaUradu").map(parse_adresa),
    })
}

/// Parse `<PravniForma type="801">Obec</PravniForma>`.
///
/// The `type` attribute is required. An element without text yields an
/// empty label.
fn parse_pravni_forma(elem: Node<'_, '_>) -> Option<PravniForma> {
    let raw_type = get_attribute(elem, "type")?;
    let label = text_content(elem).unwrap_or_default();

    let typ = LegalFormCode::parse(raw_type);
    if let LegalFormCode::NonNumeric(raw) = &typ {
        tracing::debug!(raw_type = %raw, label = %label, "Non-numeric legal form code");
    }

    Some(PravniForma { typ, label })
}

fn parse_adresa(elem: Node<'_, '_>) -> Adresa {
    let parse = |name: &str| child_text(elem, name);
    Adresa {
        ulice: parse("UliceNazev"),
        cislo_domovni: parse("CisloDomovni"),
        cislo_orientacni: parse("CisloOrientacni"),
        obec: parse("ObecNazev"),
        obec_kod: parse("ObecKod"),
        psc: parse("PSC"),
        cast_obce: parse("CastObceNeboKatastralniUzemi"),
        kraj: parse("KrajNazev"),
        adresni_bod: parse("AdresniBod"),
    }
}

/// Collect e-mail addresses, keeping only the first occurrence of each.
fn parse_emails(elem: Node<'_, '_>) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    for leaf in find_by_path_ns(elem, OVM_NAMESPACE, EMAIL_PATH) {
        let email = text_content(leaf).unwrap_or_default();
        if !emails.contains(&email) {
            emails.push(email);
        }
    }
    emails
}
