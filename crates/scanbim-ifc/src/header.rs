// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP header section parsing
//!
//! Reads `FILE_DESCRIPTION`, `FILE_NAME` and `FILE_SCHEMA` into
//! [`ModelMetadata`]. Unlike the `DATA;` scanner, statement and parameter
//! splitting here skips over quoted strings, because header values such as
//! `'2;1'` routinely contain separators.

use crate::scanner::Lines;
use crate::tokenizer::split_top_level;
use scanbim_model::ModelMetadata;

/// Parse the header section to extract metadata
///
/// Missing sections or records leave the corresponding fields empty.
pub fn parse_header(content: &str) -> ModelMetadata {
    let mut info = ModelMetadata::default();

    let Some(header) = header_section(content) else {
        return info;
    };

    for statement in split_statements(&header) {
        let Some((name, params)) = split_record(statement) else {
            continue;
        };

        match name.as_str() {
            "FILE_DESCRIPTION" => {
                info.file_description = params.first().and_then(|p| first_of_list(p));
            }
            "FILE_NAME" => {
                // FILE_NAME(name, timestamp, author, organization, preprocessor, originating_system, authorization)
                info.file_name = params.first().and_then(|p| unquote(p));
                info.timestamp = params.get(1).and_then(|p| unquote(p));
                info.author = params.get(2).and_then(|p| first_of_list(p));
                info.organization = params.get(3).and_then(|p| first_of_list(p));
                info.preprocessor_version = params.get(4).and_then(|p| unquote(p));
                info.originating_system = params.get(5).and_then(|p| unquote(p));
            }
            "FILE_SCHEMA" => {
                if let Some(schema) = params.first().and_then(|p| first_of_list(p)) {
                    info.schema_version = schema;
                }
            }
            _ => {}
        }
    }

    info
}

/// Lines between a `HEADER;` line and the next `ENDSEC;` line
///
/// Section markers are matched as whole lines, case-insensitively.
fn header_section(content: &str) -> Option<String> {
    let mut lines = Lines::new(content);
    lines.find(|line| line.eq_ignore_ascii_case("HEADER;"))?;
    let section: Vec<&str> = lines
        .take_while(|line| !line.eq_ignore_ascii_case("ENDSEC;"))
        .collect();
    Some(section.join("\n"))
}

/// Split on `;` outside quoted strings
fn split_statements(section: &str) -> Vec<&str> {
    let bytes = section.as_bytes();
    let mut statements = Vec::new();
    let mut in_string = false;
    let mut start = 0;

    for (pos, &b) in bytes.iter().enumerate() {
        match b {
            // '' escapes toggle twice and leave the state unchanged
            b'\'' => in_string = !in_string,
            b';' if !in_string => {
                let statement = section[start..pos].trim();
                if !statement.is_empty() {
                    statements.push(statement);
                }
                start = pos + 1;
            }
            _ => {}
        }
    }

    statements
}

/// Split `NAME(params)` into the upper-cased name and its top-level params
fn split_record(statement: &str) -> Option<(String, Vec<String>)> {
    let open = statement.find('(')?;
    let close = statement.rfind(')')?;
    if close < open {
        return None;
    }
    let name = statement[..open].trim().to_ascii_uppercase();
    let params = split_top_level(&statement[open + 1..close], true);
    Some((name, params))
}

/// Decode a `'text'` value; `$` and empty strings read as `None`
fn unquote(value: &str) -> Option<String> {
    let inner = value.trim().strip_prefix('\'')?.strip_suffix('\'')?;
    let decoded = inner.replace("''", "'");
    if decoded.is_empty() {
        None
    } else {
        Some(decoded)
    }
}

/// First non-empty string of a `('a','b')` list
fn first_of_list(value: &str) -> Option<String> {
    let value = value.trim();
    let inner = value
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value);
    split_top_level(inner, true)
        .iter()
        .find_map(|item| unquote(item))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('test.ifc','2024-01-01T00:00:00',('Author'),('Org, Inc.'),'Preprocessor','App','');
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCCARTESIANPOINT((0.,0.,0.));
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_parse_header() {
        let info = parse_header(TEST_IFC);
        assert_eq!(info.schema_version, "IFC2X3");
        assert_eq!(info.file_name, Some("test.ifc".to_string()));
        assert_eq!(info.timestamp, Some("2024-01-01T00:00:00".to_string()));
        assert_eq!(info.author, Some("Author".to_string()));
        assert_eq!(info.organization, Some("Org, Inc.".to_string()));
        assert_eq!(info.preprocessor_version, Some("Preprocessor".to_string()));
        assert_eq!(info.originating_system, Some("App".to_string()));
        assert_eq!(
            info.file_description,
            Some("ViewDefinition [CoordinationView]".to_string())
        );
    }

    #[test]
    fn test_missing_header_gives_defaults() {
        let info = parse_header("DATA;\n#1=IFCFACE((#2));\nENDSEC;\n");
        assert_eq!(info, ModelMetadata::default());
    }

    #[test]
    fn test_lower_case_markers_and_cr_line_endings() {
        let text = "ISO-10303-21;\rheader;\rFILE_SCHEMA(('IFC4'));\rendsec;\rdata;\rendsec;\r";
        assert_eq!(parse_header(text).schema_version, "IFC4");
    }

    #[test]
    fn test_header_marker_inside_data_is_ignored() {
        let text = "DATA;\n#1=IFCLABEL('HEADER;');\nENDSEC;\n";
        assert_eq!(parse_header(text), ModelMetadata::default());
    }

    #[test]
    fn test_unquote_handles_escapes_and_null() {
        assert_eq!(unquote("'it''s'"), Some("it's".to_string()));
        assert_eq!(unquote("$"), None);
        assert_eq!(unquote("''"), None);
    }
}
