//! Model-name handling shared by reference sites and declaration sites.

use once_cell::sync::Lazy;
use regex::Regex;

// ------------------------------- Policy ---------------------------------- //

/// Model names that would shadow a native type in the generated code.
const RESERVED: &[(&str, &str)] = &[("Object", "APIObject")];

/// `$ref` prefixes whose tail is a model name in the same document.
const REF_PREFIXES: &[&str] = &["#/definitions/", "#/components/schemas/"];

/// `Base[Param]` → `BaseParam`.
static GENERIC_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^\[]*)\[([^\]]*)\]").expect("static regex")
});

// ------------------------------- Naming ---------------------------------- //

/// Model name a `$ref` points at. Refs outside this document are returned verbatim.
pub fn ref_name(target: &str) -> &str {
    REF_PREFIXES
        .iter()
        .find_map(|prefix| target.strip_prefix(prefix))
        .unwrap_or(target)
}

/// Substitute a reserved model name; anything else passes through.
pub fn substitute_reserved(name: &str) -> &str {
    RESERVED
        .iter()
        .find(|(reserved, _)| *reserved == name)
        .map(|(_, replacement)| *replacement)
        .unwrap_or(name)
}

/// Flatten every `Base[Param]` occurrence to `BaseParam`.
pub fn flatten_generic(name: &str) -> String {
    GENERIC_NAME.replace_all(name, "$1$2").into_owned()
}

/// The identifier a model is declared (and referenced) under.
pub fn declared_identifier(name: &str) -> String {
    flatten_generic(substitute_reserved(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_name_strips_local_prefixes() {
        assert_eq!(ref_name("#/definitions/Pet"), "Pet");
        assert_eq!(ref_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(ref_name("#/definitions/Page[User]"), "Page[User]");
        assert_eq!(ref_name("other.json#/Pet"), "other.json#/Pet");
    }

    #[test]
    fn object_is_reserved() {
        assert_eq!(substitute_reserved("Object"), "APIObject");
        assert_eq!(substitute_reserved("object"), "object");
        assert_eq!(substitute_reserved("ObjectRef"), "ObjectRef");
    }

    #[test]
    fn generic_names_flatten() {
        assert_eq!(flatten_generic("Page[User]"), "PageUser");
        assert_eq!(flatten_generic("Map[String]Of[Int]"), "MapStringOfInt");
        assert_eq!(flatten_generic("Plain"), "Plain");
    }

    #[test]
    fn declared_identifier_applies_both_rules() {
        assert_eq!(declared_identifier("Object"), "APIObject");
        assert_eq!(declared_identifier("List[Object]"), "ListObject");
        assert_eq!(declared_identifier("Pet"), "Pet");
    }
}
