//! Target syntaxes. The translator decides *what* to build; a `Syntax` decides how it reads.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// ————————————————————————————————————————————————————————————————————————————
// MARKERS
// ————————————————————————————————————————————————————————————————————————————

/// Inline failure signal. Its text is deliberately not valid in any target syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    MissingReference(String),
    UnresolvedType(Option<String>),
}

/// Detail text escapes `\` and `>` with a backslash so it cannot close the marker early.
static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<<(missing-reference|unresolved-type)(?:: ((?:[^>\\]|\\.)*))?>>").expect("static regex")
});

impl Marker {
    /// Every marker-shaped span in `text`, in order of appearance.
    ///
    /// Text-level only: a literal that happens to spell a marker is reported too. Use the
    /// markers recorded during translation when the source of the text is known.
    pub fn scan(text: &str) -> Vec<Marker> {
        MARKER
            .captures_iter(text)
            .map(|caps| {
                let detail = caps.get(2).map(|m| unescape_detail(m.as_str()));
                match &caps[1] {
                    "missing-reference" => Marker::MissingReference(detail.unwrap_or_default()),
                    _ => Marker::UnresolvedType(detail),
                }
            })
            .collect()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::MissingReference(name) => write!(f, "<<missing-reference: {}>>", escape_detail(name)),
            Marker::UnresolvedType(Some(ty)) => write!(f, "<<unresolved-type: {}>>", escape_detail(ty)),
            Marker::UnresolvedType(None) => write!(f, "<<unresolved-type>>"),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SYNTAX
// ————————————————————————————————————————————————————————————————————————————

/// Textual form of the generated declarations.
///
/// Sub-expressions handed to `shape`/`array_of`/`declaration` are already rendered and
/// may span several lines.
pub trait Syntax: Sync {
    fn name(&self) -> &'static str;
    /// File extension for generated output, without the dot.
    fn extension(&self) -> &'static str;

    fn string(&self) -> String;
    fn number(&self) -> String;
    fn boolean(&self) -> String;
    /// Object with no declared properties; accepts any shape.
    fn open_object(&self) -> String;
    fn one_of(&self, values: &[Value]) -> String;
    fn array_of(&self, item: &str) -> String;
    fn property(&self, name: &str, ty: &str, required: bool) -> String;
    fn shape(&self, properties: &[String]) -> String;

    fn declaration(&self, identifier: &str, ty: &str) -> String;
    /// Text placed ahead of all declarations.
    fn preamble(&self, source: Option<&str>) -> String;
}

/// React `prop-types` validators.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropTypes;

/// TypeScript type aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScript;

impl Syntax for PropTypes {
    fn name(&self) -> &'static str { "prop-types" }
    fn extension(&self) -> &'static str { "js" }

    fn string(&self) -> String { "PropTypes.string".into() }
    fn number(&self) -> String { "PropTypes.number".into() }
    fn boolean(&self) -> String { "PropTypes.bool".into() }
    fn open_object(&self) -> String { "PropTypes.object".into() }

    fn one_of(&self, values: &[Value]) -> String {
        format!("PropTypes.oneOf({})", pretty_json_array(values))
    }

    fn array_of(&self, item: &str) -> String {
        format!("PropTypes.arrayOf({item})")
    }

    fn property(&self, name: &str, ty: &str, required: bool) -> String {
        let name = property_key(name);
        if required {
            format!("{name}: {ty}.isRequired")
        } else {
            format!("{name}: {ty}")
        }
    }

    fn shape(&self, properties: &[String]) -> String {
        format!("PropTypes.shape({{\n{}\n}})", indent(&properties.join(",\n")))
    }

    fn declaration(&self, identifier: &str, ty: &str) -> String {
        format!("export const {identifier} = {ty};")
    }

    fn preamble(&self, source: Option<&str>) -> String {
        let mut out = String::from("import PropTypes from 'prop-types';");
        if let Some(source) = source {
            out.push_str(&format!("\n\n// generated from {source}"));
        }
        out
    }
}

impl Syntax for TypeScript {
    fn name(&self) -> &'static str { "typescript" }
    fn extension(&self) -> &'static str { "ts" }

    fn string(&self) -> String { "string".into() }
    fn number(&self) -> String { "number".into() }
    fn boolean(&self) -> String { "boolean".into() }
    fn open_object(&self) -> String { "Record<string, unknown>".into() }

    fn one_of(&self, values: &[Value]) -> String {
        if values.is_empty() {
            return "never".into();
        }
        values.iter().map(Value::to_string).collect::<Vec<_>>().join(" | ")
    }

    fn array_of(&self, item: &str) -> String {
        format!("Array<{item}>")
    }

    fn property(&self, name: &str, ty: &str, required: bool) -> String {
        let name = property_key(name);
        let optional = if required { "" } else { "?" };
        format!("{name}{optional}: {ty};")
    }

    fn shape(&self, properties: &[String]) -> String {
        format!("{{\n{}\n}}", indent(&properties.join("\n")))
    }

    fn declaration(&self, identifier: &str, ty: &str) -> String {
        format!("export type {identifier} = {ty};")
    }

    fn preamble(&self, source: Option<&str>) -> String {
        source.map(|s| format!("// generated from {s}")).unwrap_or_default()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Indent every line by one level (two spaces).
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-space pretty JSON, the way `JSON.stringify(v, null, 2)` prints arrays.
fn pretty_json_array(values: &[Value]) -> String {
    // infallible for plain Values
    serde_json::to_string_pretty(values).unwrap_or_else(|_| Value::from(values.to_vec()).to_string())
}

fn escape_detail(detail: &str) -> String {
    detail.replace('\\', "\\\\").replace('>', "\\>")
}

fn unescape_detail(detail: &str) -> String {
    let mut out = String::with_capacity(detail.len());
    let mut chars = detail.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

/// Object key as written in JS/TS: bare when it is an identifier, quoted otherwise.
fn property_key(name: &str) -> String {
    if is_plain_identifier(name) { name.to_string() } else { Value::from(name).to_string() }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn markers_round_trip_through_scan() {
        let text = format!(
            "a: {},\nb: {},\nc: {}",
            Marker::MissingReference("Pet".into()),
            Marker::UnresolvedType(Some("file".into())),
            Marker::UnresolvedType(None),
        );
        assert_eq!(
            Marker::scan(&text),
            vec![
                Marker::MissingReference("Pet".into()),
                Marker::UnresolvedType(Some("file".into())),
                Marker::UnresolvedType(None),
            ]
        );
        assert!(Marker::scan("PropTypes.string").is_empty());
    }

    #[test]
    fn marker_details_with_angle_brackets_survive_scan() {
        let marker = Marker::MissingReference(r"Map<A>B\C".into());
        let text = format!("x: {marker},\ny: {}", Marker::UnresolvedType(Some("a>b".into())));
        assert_eq!(text, "x: <<missing-reference: Map<A\\>B\\\\C>>,\ny: <<unresolved-type: a\\>b>>");
        assert_eq!(
            Marker::scan(&text),
            vec![marker, Marker::UnresolvedType(Some("a>b".into()))]
        );
    }

    #[test]
    fn prop_types_quotes_non_identifier_keys() {
        assert_eq!(PropTypes.property("nick-name", "PropTypes.string", true), "\"nick-name\": PropTypes.string.isRequired");
        assert_eq!(PropTypes.property("$id", "PropTypes.number", false), "$id: PropTypes.number");
    }

    #[test]
    fn prop_types_one_of_is_pretty_json() {
        let out = PropTypes.one_of(&[json!("a"), json!(2)]);
        assert_eq!(out, "PropTypes.oneOf([\n  \"a\",\n  2\n])");
    }

    #[test]
    fn prop_types_shape_indents_nested_lines() {
        let inner = PropTypes.shape(&[PropTypes.property("x", "PropTypes.number", false)]);
        let outer = PropTypes.shape(&[PropTypes.property("inner", &inner, true)]);
        assert_eq!(
            outer,
            "PropTypes.shape({\n  inner: PropTypes.shape({\n    x: PropTypes.number\n  }).isRequired\n})"
        );
    }

    #[test]
    fn typescript_marks_optional_properties() {
        let shape = TypeScript.shape(&[
            TypeScript.property("id", "number", true),
            TypeScript.property("nick-name", "string", false),
        ]);
        assert_eq!(shape, "{\n  id: number;\n  \"nick-name\"?: string;\n}");
        assert_eq!(TypeScript.one_of(&[json!("on"), json!("off")]), "\"on\" | \"off\"");
        assert_eq!(TypeScript.one_of(&[]), "never");
    }

    #[test]
    fn preambles() {
        assert_eq!(
            PropTypes.preamble(Some("petstore.json")),
            "import PropTypes from 'prop-types';\n\n// generated from petstore.json"
        );
        assert_eq!(TypeScript.preamble(None), "");
    }
}
