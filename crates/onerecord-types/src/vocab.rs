//! JSON-LD keywords and ONE Record namespaces.

/// JSON-LD identity keyword.
pub const ID_KEY: &str = "@id";

/// JSON-LD type keyword.
pub const TYPE_KEY: &str = "@type";

/// JSON-LD value-object keyword (`{"@value": "...", "@type": "xsd:..."}`).
pub const VALUE_KEY: &str = "@value";

/// Prefix of blank-node identifiers assigned by servers to embedded objects.
pub const BLANK_NODE_PREFIX: &str = "_:";

/// Namespace of the ONE Record cargo ontology.
pub const CARGO_NS: &str = "https://onerecord.iata.org/";

/// Namespace of the ONE Record API ontology.
pub const API_NS: &str = "https://onerecord.iata.org/api/";

/// XML Schema datatype namespace.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// Returns `true` for keys that carry identity/type bookkeeping rather than
/// a property.
pub fn is_reserved_key(key: &str) -> bool {
    key == ID_KEY || key == TYPE_KEY
}

/// IRI of a cargo ontology class, e.g. `cargo_class("Piece")`.
pub fn cargo_class(local: &str) -> String {
    format!("{CARGO_NS}{local}")
}

/// IRI of a cargo ontology property, e.g. `cargo_property("Piece", "upid")`.
pub fn cargo_property(class: &str, property: &str) -> String {
    format!("{CARGO_NS}{class}#{property}")
}

/// IRI of an API ontology class, e.g. `api_class("PatchRequest")`.
pub fn api_class(local: &str) -> String {
    format!("{API_NS}{local}")
}

/// IRI of an API ontology property, e.g. `api_property("Operation", "op")`.
pub fn api_property(class: &str, property: &str) -> String {
    format!("{API_NS}{class}#{property}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_keys() {
        assert!(is_reserved_key("@id"));
        assert!(is_reserved_key("@type"));
        assert!(!is_reserved_key("@value"));
        assert!(!is_reserved_key("https://onerecord.iata.org/Piece#upid"));
    }

    #[test]
    fn iri_builders() {
        assert_eq!(cargo_class("Piece"), "https://onerecord.iata.org/Piece");
        assert_eq!(
            cargo_property("Piece", "grossWeight"),
            "https://onerecord.iata.org/Piece#grossWeight"
        );
        assert_eq!(api_class("PatchRequest"), "https://onerecord.iata.org/api/PatchRequest");
        assert_eq!(
            api_property("Operation", "op"),
            "https://onerecord.iata.org/api/Operation#op"
        );
    }
}
