use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity and type of the entity a patch request targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub identity: String,
    #[serde(rename = "type")]
    pub type_id: String,
}

impl EntityRef {
    pub fn new(identity: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            type_id: type_id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.identity, self.type_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_type_key() {
        let r = EntityRef::new("http://x/los/piece-1", "https://onerecord.iata.org/Piece");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["identity"], "http://x/los/piece-1");
        assert_eq!(json["type"], "https://onerecord.iata.org/Piece");

        let parsed: EntityRef = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn display_format() {
        let r = EntityRef::new("id-1", "T");
        assert_eq!(format!("{r}"), "id-1 (T)");
    }
}
