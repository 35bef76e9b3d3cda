use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use onerecord_types::PrimitiveKind;

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
pub const XSD_DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

/// Primitive kind → wire datatype IRI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatatypeTable {
    entries: BTreeMap<PrimitiveKind, String>,
}

impl DatatypeTable {
    /// A table with no entries; every primitive is unresolvable.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The XML Schema datatypes used by ONE Record.
    pub fn xsd() -> Self {
        let entries = PrimitiveKind::ALL
            .into_iter()
            .map(|kind| (kind, xsd_iri(kind).to_string()))
            .collect();
        Self { entries }
    }

    /// Datatype IRI for a primitive kind.
    pub fn iri(&self, kind: PrimitiveKind) -> Option<&str> {
        self.entries.get(&kind).map(String::as_str)
    }

    /// Override the IRI of one kind.
    pub fn set(&mut self, kind: PrimitiveKind, iri: impl Into<String>) {
        self.entries.insert(kind, iri.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveKind, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Default for DatatypeTable {
    fn default() -> Self {
        Self::xsd()
    }
}

fn xsd_iri(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::String => XSD_STRING,
        PrimitiveKind::Boolean => XSD_BOOLEAN,
        PrimitiveKind::Double => XSD_DOUBLE,
        PrimitiveKind::Integer => XSD_INTEGER,
        PrimitiveKind::NonNegativeInteger => XSD_NON_NEGATIVE_INTEGER,
        PrimitiveKind::Duration => XSD_DURATION,
        PrimitiveKind::DateTime => XSD_DATE_TIME,
    }
}
