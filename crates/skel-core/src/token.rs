//! Placeholder token scanning and substitution.
//!
//! Tokens are written `{{.Name}}` where `Name` matches `[A-Za-z_][A-Za-z0-9_]*`.
//! Anything else — `{{ .Name }}`, `{{Name}}`, `{{.9x}}`, unbalanced braces —
//! is not a token and passes through as literal text. The delimiter is an
//! opaque pattern: there are no conditionals, loops, or expressions inside it.
//!
//! Substitution is a single left-to-right pass. Substituted values are never
//! re-scanned, so a value containing `{{.` produces exactly that literal text
//! in the output.

use std::sync::OnceLock;

use regex::Regex;

use crate::values::ValueMap;

/// The bit-exact placeholder pattern: `{{.Identifier}}`.
pub const TOKEN_PATTERN: &str = r"\{\{\.([A-Za-z_][A-Za-z0-9_]*)\}\}";

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern compiles"))
}

/// A single token occurrence within a piece of template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Token name without delimiters, e.g. `AppName`.
    pub name: String,
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset one past the closing `}}`.
    pub end: usize,
}

/// Scan text for every well-formed token occurrence, in order of appearance.
pub fn scan(text: &str) -> Vec<Occurrence> {
    token_regex()
        .find_iter(text)
        .map(|m| {
            // The match is exactly `{{.Name}}`; strip the delimiters.
            let matched = m.as_str();
            Occurrence {
                name: matched[3..matched.len() - 2].to_string(),
                start: m.start(),
                end: m.end(),
            }
        })
        .collect()
}

/// Distinct token names in `text`, in first-seen order.
pub fn distinct_tokens(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for occ in scan(text) {
        if !seen.contains(&occ.name) {
            seen.push(occ.name);
        }
    }
    seen
}

/// Result of a single substitution pass.
#[derive(Debug, Clone)]
pub struct Substitution {
    /// The text with every mapped token replaced. Unmapped tokens are left
    /// as their literal placeholder text; the caller decides whether that
    /// is an error.
    pub text: String,
    /// Names of tokens that had no mapping entry, in first-seen order.
    pub missing: Vec<String>,
}

/// Replace every mapped token occurrence in `text` with its value.
///
/// Single pass, left to right. Non-token text (including whitespace and
/// near-miss syntax like `{{ .X }}`) is preserved byte for byte, and
/// replacement values are never re-scanned for further tokens.
pub fn substitute(text: &str, values: &ValueMap) -> Substitution {
    let mut out = String::with_capacity(text.len());
    let mut missing: Vec<String> = Vec::new();
    let mut last = 0;

    for occ in scan(text) {
        out.push_str(&text[last..occ.start]);
        match values.get(&occ.name) {
            Some(value) => out.push_str(value),
            None => {
                out.push_str(&text[occ.start..occ.end]);
                if !missing.contains(&occ.name) {
                    missing.push(occ.name);
                }
            }
        }
        last = occ.end;
    }
    out.push_str(&text[last..]);

    Substitution { text: out, missing }
}

/// True if `name` is a legal token identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True if `text` contains a `{{.` sequence that does not begin a
/// well-formed token — a probable authoring mistake worth flagging.
pub fn suspicious(text: &str) -> bool {
    let token_starts: Vec<usize> = scan(text).iter().map(|o| o.start).collect();
    let mut from = 0;
    while let Some(idx) = text[from..].find("{{.") {
        let at = from + idx;
        if !token_starts.contains(&at) {
            return true;
        }
        from = at + 3;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> ValueMap {
        let mut map = ValueMap::new();
        for (k, v) in pairs {
            map.set(*k, *v);
        }
        map
    }

    #[test]
    fn test_scan_finds_tokens_in_order() {
        let occs = scan("hello {{.AppName}} v{{.Version}} ({{.AppName}})");
        let names: Vec<_> = occs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["AppName", "Version", "AppName"]);
    }

    #[test]
    fn test_scan_ignores_near_misses() {
        assert!(scan("{{ .AppName }}").is_empty());
        assert!(scan("{{AppName}}").is_empty());
        assert!(scan("{{.9lives}}").is_empty());
        assert!(scan("{{.App").is_empty());
    }

    #[test]
    fn test_distinct_first_seen_order() {
        let tokens = distinct_tokens("{{.B}} {{.A}} {{.B}} {{.C}}");
        assert_eq!(tokens, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let sub = substitute(
            "{{.AppName}} says hi from {{.AppName}}",
            &values(&[("AppName", "ping")]),
        );
        assert_eq!(sub.text, "ping says hi from ping");
        assert!(sub.missing.is_empty());
        assert!(!sub.text.contains("{{.AppName}}"));
    }

    #[test]
    fn test_substitute_preserves_non_token_text() {
        let text = "left {{ .X }} {{.Name}} {{Y}} right";
        let sub = substitute(text, &values(&[("Name", "mid")]));
        assert_eq!(sub.text, "left {{ .X }} mid {{Y}} right");
    }

    #[test]
    fn test_substitute_reports_missing_in_first_seen_order() {
        let sub = substitute("{{.B}} {{.A}} {{.B}}", &values(&[]));
        assert_eq!(sub.missing, vec!["B", "A"]);
        // Literal placeholders stay in place.
        assert_eq!(sub.text, "{{.B}} {{.A}} {{.B}}");
    }

    #[test]
    fn test_no_recursive_expansion() {
        // A value that itself looks like a token must not be re-scanned.
        let sub = substitute(
            "{{.Outer}}",
            &values(&[("Outer", "{{.Inner}}"), ("Inner", "boom")]),
        );
        assert_eq!(sub.text, "{{.Inner}}");
        assert!(sub.missing.is_empty());
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("AppName"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("v2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("9lives"));
        assert!(!is_valid_identifier("has space"));
        assert!(!is_valid_identifier("dash-ed"));
    }

    #[test]
    fn test_suspicious() {
        assert!(suspicious("{{.App Name}}"));
        assert!(suspicious("{{.App"));
        assert!(!suspicious("{{.AppName}}"));
        assert!(!suspicious("plain text"));
        // Well-formed token next to a broken one is still suspicious.
        assert!(suspicious("{{.Ok}} and {{.not ok}}"));
    }
}
