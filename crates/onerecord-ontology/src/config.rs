use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use onerecord_types::PrimitiveKind;

use crate::catalogue::cargo_variants;
use crate::datatype::DatatypeTable;
use crate::error::{OntologyError, OntologyResult};
use crate::registry::{OntologyRegistry, RegistryBuilder};
use crate::variant::VariantDef;

/// Ontology tables as written in a TOML file.
///
/// ```toml
/// extend_builtin = true
///
/// [datatypes]
/// double = "http://www.w3.org/2001/XMLSchema#decimal"
///
/// [[variants]]
/// type_id = "https://example.org/Crate"
/// name = "Crate"
/// parent = "https://onerecord.iata.org/Piece"
///
/// [[variants.fields]]
/// predicate = "https://example.org/Crate#slats"
/// kind = { primitive = "integer" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OntologyConfig {
    /// Start from the built-in cargo catalogue and add `variants` to it.
    #[serde(default = "default_extend_builtin")]
    pub extend_builtin: bool,
    /// Datatype IRI overrides keyed by primitive kind name.
    #[serde(default)]
    pub datatypes: BTreeMap<String, String>,
    #[serde(default)]
    pub variants: Vec<VariantDef>,
}

fn default_extend_builtin() -> bool {
    true
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            extend_builtin: true,
            datatypes: BTreeMap::new(),
            variants: Vec::new(),
        }
    }
}

impl OntologyConfig {
    pub fn from_toml_str(input: &str) -> OntologyResult<Self> {
        toml::from_str(input).map_err(|e| OntologyError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> OntologyResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading ontology config");
        Self::from_toml_str(&input)
    }

    /// Compose the configured tables into a registry.
    pub fn into_registry(self) -> OntologyResult<OntologyRegistry> {
        let mut table = DatatypeTable::xsd();
        for (name, iri) in self.datatypes {
            let kind = PrimitiveKind::ALL
                .into_iter()
                .find(|k| k.name() == name)
                .ok_or_else(|| OntologyError::Config(format!("unknown primitive kind: {name}")))?;
            table.set(kind, iri);
        }

        let mut builder = RegistryBuilder::new().datatypes(table);
        if self.extend_builtin {
            builder = builder.variants(cargo_variants());
        }
        builder.variants(self.variants).build()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::datatype::XSD_STRING;

    const CRATE_TOML: &str = r#"
[datatypes]
double = "http://www.w3.org/2001/XMLSchema#decimal"

[[variants]]
type_id = "https://example.org/Crate"
name = "Crate"
parent = "https://onerecord.iata.org/Piece"

[[variants.fields]]
predicate = "https://example.org/Crate#slats"
kind = { primitive = "integer" }
required = true
"#;

    #[test]
    fn default_config() {
        let c = OntologyConfig::default();
        assert!(c.extend_builtin);
        assert!(c.variants.is_empty());
        let registry = c.into_registry().unwrap();
        assert_eq!(registry.len(), cargo_variants().len());
    }

    #[test]
    fn extends_builtin_catalogue() {
        let registry = OntologyConfig::from_toml_str(CRATE_TOML)
            .unwrap()
            .into_registry()
            .unwrap();
        let v = registry
            .resolve_variant(&["https://onerecord.iata.org/Piece", "https://example.org/Crate"])
            .unwrap();
        assert_eq!(v.name(), "Crate");
        assert!(v.knows("https://onerecord.iata.org/Piece#grossWeight"));
        assert!(v.field("https://example.org/Crate#slats").unwrap().required);
        assert_eq!(
            registry.datatypes().iri(PrimitiveKind::Double),
            Some("http://www.w3.org/2001/XMLSchema#decimal")
        );
        assert_eq!(registry.datatypes().iri(PrimitiveKind::String), Some(XSD_STRING));
    }

    #[test]
    fn standalone_requires_own_parents() {
        let input = format!("extend_builtin = false\n{CRATE_TOML}");
        let err = OntologyConfig::from_toml_str(&input)
            .unwrap()
            .into_registry()
            .unwrap_err();
        assert!(matches!(err, OntologyError::UnknownParent { .. }));
    }

    #[test]
    fn unknown_datatype_name_rejected() {
        let err = OntologyConfig::from_toml_str("[datatypes]\nfloat = \"x\"")
            .unwrap()
            .into_registry()
            .unwrap_err();
        assert!(matches!(err, OntologyError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = OntologyConfig::from_toml_str("variants = 3").unwrap_err();
        assert!(matches!(err, OntologyError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CRATE_TOML.as_bytes()).unwrap();
        let c = OntologyConfig::load(file.path()).unwrap();
        assert_eq!(c.variants.len(), 1);
        assert_eq!(c.variants[0].fields.len(), 1);

        let missing = OntologyConfig::load(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(OntologyError::Io(_))));
    }
}
