use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use onerecord_codec::DecoderConfig;

/// Settings read from the `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Ontology tables layered over (or replacing) the built-in catalogue.
    pub ontology: Option<PathBuf>,
    /// Company identifier sent as the patch requestor.
    pub requestor: Option<String>,
    /// Revision used when the original object carries none.
    pub default_revision: Option<String>,
    pub decoder: DecoderConfig,
}

impl CliConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&input).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config() {
        let c = CliConfig::default();
        assert!(c.ontology.is_none());
        assert!(c.requestor.is_none());
        assert_eq!(c.decoder.max_depth, 64);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "requestor = \"cgnbeerbrewery\"\n\n[decoder]\nmax_depth = 8").unwrap();

        let c = CliConfig::load(file.path()).unwrap();
        assert_eq!(c.requestor.as_deref(), Some("cgnbeerbrewery"));
        assert_eq!(c.decoder.max_depth, 8);
        assert!(c.default_revision.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(CliConfig::load(&dir.path().join("absent.toml")).is_err());
    }
}
