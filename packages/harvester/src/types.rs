//! Core data types for the harvester.
//!
//! These are the records of the Seznam OVM (list of public-administration
//! bodies). Field names on the wire follow the Czech names of the export.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Legal-form code from the `type` attribute of `<PravniForma>`.
///
/// The attribute is read like a lenient integer parse: leading whitespace and
/// a sign are accepted and trailing garbage after the digits is ignored. An
/// attribute without leading digits does not reject the record; the raw value
/// is kept as [`LegalFormCode::NonNumeric`] so consumers can decide.
///
/// A digit run that does not fit in an `i64` is also kept verbatim as
/// [`LegalFormCode::NonNumeric`] instead of being rounded to a lossy number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegalFormCode {
    Numeric(i64),
    NonNumeric(String),
}

impl LegalFormCode {
    /// Parse a `type` attribute value.
    ///
    /// # Examples
    /// ```
    /// use ovm_harvester::types::LegalFormCode;
    ///
    /// assert_eq!(LegalFormCode::parse("801"), LegalFormCode::Numeric(801));
    /// assert_eq!(LegalFormCode::parse(" 325abc"), LegalFormCode::Numeric(325));
    /// assert_eq!(
    ///     LegalFormCode::parse("obec"),
    ///     LegalFormCode::NonNumeric("obec".to_string())
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => ("-", &trimmed[1..]),
            Some(b'+') => ("", &trimmed[1..]),
            _ => ("", trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return Self::NonNumeric(raw.to_string());
        }

        format!("{sign}{}", &rest[..digits_len])
            .parse()
            .map(Self::Numeric)
            .unwrap_or_else(|_| Self::NonNumeric(raw.to_string()))
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::NonNumeric(_) => None,
        }
    }
}

impl fmt::Display for LegalFormCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::NonNumeric(s) => f.write_str(s),
        }
    }
}

/// Legal-form descriptor (`<PravniForma type="...">label</PravniForma>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PravniForma {
    #[serde(rename = "type")]
    pub typ: LegalFormCode,
    pub label: String,
}

/// Postal address of the office (`<AdresaUradu>`).
///
/// Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adresa {
    pub ulice: Option<String>,
    #[serde(rename = "cisloDomovni")]
    pub cislo_domovni: Option<String>,
    #[serde(rename = "cisloOrientacni")]
    pub cislo_orientacni: Option<String>,
    pub obec: Option<String>,
    #[serde(rename = "obecKod")]
    pub obec_kod: Option<String>,
    #[serde(rename = "PSC")]
    pub psc: Option<String>,
    #[serde(rename = "castObce")]
    pub cast_obce: Option<String>,
    pub kraj: Option<String>,
    #[serde(rename = "adresniBod")]
    pub adresni_bod: Option<String>,
}

impl Adresa {
    /// True when the address element existed but carried no known sub-field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One public-administration body from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subjekt {
    /// Short code (`<Zkratka>`).
    pub zkratka: String,

    /// Display name (`<Nazev>`).
    pub nazev: String,

    #[serde(rename = "pravniForma")]
    pub pravni_forma: PravniForma,

    /// Organisation identifier (IČO).
    #[serde(rename = "ICO")]
    pub ico: Option<String>,

    /// Data-box identifier (`<IdDS>`).
    #[serde(rename = "datovaSchrankaID")]
    pub datova_schranka_id: Option<String>,

    /// E-mail addresses, unique, in first-seen order.
    pub mail: Vec<String>,

    #[serde(rename = "adresaUradu")]
    pub adresa_uradu: Option<Adresa>,
}

impl Subjekt {
    /// Municipality name from the office address, if any.
    ///
    /// This is the natural query for the coat-of-arms lookup.
    #[must_use]
    pub fn municipality(&self) -> Option<&str> {
        self.adresa_uradu
            .as_ref()
            .and_then(|a| a.obec.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}
