//! Serialization of a [`ResponseEnvelope`] into the IVR response document.

use std::fmt::Write;

use anyhow::{Result, bail};

use crate::core::escape::{escape, has_rule};
use crate::core::types::{OutputValue, ResponseEnvelope};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0"?>"#;

/// XML 1.0 `Char` production.
pub fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replace characters that cannot appear in the document, even after
/// escaping, with U+FFFD.
pub fn replace_unencodable(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if is_xml_char(ch) || has_rule(ch) {
                ch
            } else {
                '\u{FFFD}'
            }
        })
        .collect()
}

/// Render `envelope` as the response document.
///
/// Variables are renamed `param1..paramN` by position. Text values and the
/// error description are escaped here and nowhere else. Fails if an escaped
/// value still holds a character outside the XML `Char` set.
pub fn encode(envelope: &ResponseEnvelope) -> Result<String> {
    for (position, var) in envelope.variables().iter().enumerate() {
        if let OutputValue::Text(text) = &var.value {
            check_encodable(&format!("param{}", position + 1), &escape(text))?;
        }
    }
    check_encodable("error description", &escape(&envelope.status().description))?;
    Ok(encode_unchecked(envelope))
}

/// Render `envelope` without checking character legality.
///
/// Only for envelopes whose text has been through [`replace_unencodable`].
pub fn encode_unchecked(envelope: &ResponseEnvelope) -> String {
    let mut xml = String::with_capacity(128);
    xml.push_str(XML_DECLARATION);
    xml.push_str("\n<response>\n  <variables>\n");
    for (position, var) in envelope.variables().iter().enumerate() {
        let expr = match &var.value {
            OutputValue::Text(text) => escape(text),
            OutputValue::Number(n) => n.to_string(),
        };
        // Writing into a String cannot fail.
        let _ = writeln!(
            xml,
            r#"    <var name="param{}" expr="{}"/>"#,
            position + 1,
            expr
        );
    }
    xml.push_str("  </variables>\n");
    let status = envelope.status();
    let _ = writeln!(
        xml,
        r#"  <error code="{}" description="{}"/>"#,
        status.code,
        escape(&status.description)
    );
    xml.push_str("</response>\n");
    xml
}

fn check_encodable(field: &str, escaped: &str) -> Result<()> {
    if let Some(ch) = escaped.chars().find(|ch| !is_xml_char(*ch)) {
        bail!(
            "{field} contains U+{:04X}, which is not allowed in XML",
            u32::from(ch)
        );
    }
    Ok(())
}
