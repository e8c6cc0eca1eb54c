//! Attribute-value escaping for IVR response documents.

/// Substitutions applied by [`escape`], in order.
///
/// `&` must come first so entity output is not re-escaped, and the backslash
/// rule must precede every rule that emits a backslash.
const RULES: [(char, &str); 12] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('\\', "\\\\"),
    ('\'', "\\&apos;"),
    ('"', "\\&quot;"),
    ('\u{0008}', "\\b"),
    ('\t', "\\t"),
    ('\n', "\\n"),
    ('\u{000B}', "\\v"),
    ('\u{000C}', "\\f"),
    ('\r', "\\r"),
];

/// Escape `value` for embedding in an XML attribute.
///
/// Every rule targets a single character and no replacement contains the
/// target of a later rule, so one pass over the input gives the same result
/// as applying the rules one after another.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match RULES.iter().find(|(target, _)| *target == ch) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}

/// True if [`escape`] rewrites `ch`.
pub fn has_rule(ch: char) -> bool {
    RULES.iter().any(|(target, _)| *target == ch)
}
