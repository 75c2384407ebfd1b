// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! STEP statement parser using nom combinators
//!
//! Turns one `#id=TYPE(params);` statement into an [`Entity`]. Only the types
//! needed for point/loop/face reconstruction get their first parameter decoded;
//! everything else keeps its parameters as text.

use scanbim_model::{Entity, EntityId, EntityParams, IfcType, NumericValue};
use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    IResult, Parser,
};

// ============================================================================
// Parsing Primitives
// ============================================================================

/// Parse the statement head `#<id> = <TYPE> (`
fn entity_head(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = char('#')(input)?;
    let (input, id) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    let (input, _) = (multispace0, char('='), multispace0).parse(input)?;
    let (input, type_name) =
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)?;
    let (input, _) = (multispace0, char('(')).parse(input)?;
    Ok((input, (id, type_name)))
}

/// Remove one pair of enclosing parentheses, if present
fn strip_parens(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(s)
}

/// Parse one numeric token
///
/// Tokens with `.`, `e` or `E` are floats, everything else integers. Tokens
/// that fail to parse are kept verbatim.
fn number(token: &str) -> NumericValue {
    let bytes = token.as_bytes();
    if token.contains(['.', 'e', 'E']) {
        lexical_core::parse::<f64>(bytes)
            .map(NumericValue::Float)
            .unwrap_or_else(|_| NumericValue::Raw(token.to_string()))
    } else {
        lexical_core::parse::<i64>(bytes)
            .map(NumericValue::Integer)
            .unwrap_or_else(|_| NumericValue::Raw(token.to_string()))
    }
}

// ============================================================================
// Parameter Parsing
// ============================================================================

/// Split a parameter body on top-level commas
///
/// Commas inside nested parentheses do not split. Each piece is trimmed.
pub fn split_params(body: &str) -> Vec<String> {
    split_top_level(body, false)
}

/// Shared splitter; with `quote_aware` set, commas and parentheses inside
/// `'...'` strings are ignored
pub(crate) fn split_top_level(body: &str, quote_aware: bool) -> Vec<String> {
    let mut params = Vec::new();
    let mut buf = String::new();
    let mut depth = 0i32;
    let mut in_string = false;

    for c in body.chars() {
        if quote_aware && c == '\'' {
            // '' inside a string toggles twice and stays in the string
            in_string = !in_string;
        }
        if !in_string {
            match c {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        if c == ',' && depth == 0 && !in_string {
            params.push(buf.trim().to_string());
            buf.clear();
        } else {
            buf.push(c);
        }
    }
    if !buf.is_empty() {
        params.push(buf.trim().to_string());
    }

    params
}

/// Parse a parenthesized number list such as `(1.,2.,3.)`
pub fn parse_number_list(param: &str) -> Vec<NumericValue> {
    strip_parens(param)
        .split(',')
        .map(|part| number(part.trim()))
        .collect()
}

/// Parse a parenthesized reference list such as `(#1,#2,#3)`
///
/// Tokens that are not `#<digits>` are dropped.
pub fn parse_reference_list(param: &str) -> Vec<EntityId> {
    strip_parens(param)
        .split(',')
        .filter_map(|part| {
            let digits = part.trim().strip_prefix('#')?;
            digits.trim().parse::<u32>().ok().map(EntityId)
        })
        .collect()
}

// ============================================================================
// Entity Parsing
// ============================================================================

/// Parse a complete entity statement
///
/// Format: `#123=IFCCARTESIANPOINT((0.,0.,0.));`
///
/// Returns `None` for anything that does not match the statement grammar.
pub fn parse_statement(statement: &str) -> Option<Entity> {
    let (rest, (id_str, type_name)) = entity_head(statement).ok()?;
    let body = rest.strip_suffix(");")?;
    let id: u32 = id_str.parse().ok()?;

    let ifc_type = IfcType::parse(type_name);
    let params = split_params(body);

    let payload = if ifc_type.has_numeric_payload() {
        EntityParams::NumericTuple(
            params
                .first()
                .map(|p| parse_number_list(p))
                .unwrap_or_default(),
        )
    } else if ifc_type.has_reference_payload() {
        EntityParams::ReferenceList(
            params
                .first()
                .map(|p| parse_reference_list(p))
                .unwrap_or_default(),
        )
    } else {
        EntityParams::RawParamList(params)
    };

    Some(Entity::new(EntityId(id), ifc_type, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_entity_head() {
        let (remaining, (id, name)) = entity_head("#12 = IfcWall ('a');").unwrap();
        assert_eq!(id, "12");
        assert_eq!(name, "IfcWall");
        assert_eq!(remaining, "'a');");
    }

    #[test]
    fn test_parse_cartesian_point() {
        let entity = parse_statement("#1=IFCCARTESIANPOINT((1.0,2.0,3.0));").unwrap();
        assert_eq!(entity.id, EntityId(1));
        assert_eq!(entity.ifc_type, IfcType::IfcCartesianPoint);
        assert_eq!(
            entity.params,
            EntityParams::NumericTuple(vec![
                NumericValue::Float(1.0),
                NumericValue::Float(2.0),
                NumericValue::Float(3.0),
            ])
        );
    }

    #[test]
    fn test_parse_trailing_dot_and_exponent() {
        let entity = parse_statement("#2=IFCCARTESIANPOINT((1.,-2.5E-3,4));").unwrap();
        let numbers = entity.numbers().unwrap();
        assert_eq!(numbers[0], NumericValue::Float(1.0));
        assert_relative_eq!(numbers[1].as_f64().unwrap(), -0.0025);
        assert_eq!(numbers[2], NumericValue::Integer(4));
    }

    #[test]
    fn test_non_numeric_token_kept_raw() {
        let entity = parse_statement("#3=IFCDIRECTION((1.,$,abc));").unwrap();
        let numbers = entity.numbers().unwrap();
        assert_eq!(numbers[0], NumericValue::Float(1.0));
        assert_eq!(numbers[1], NumericValue::Raw("$".to_string()));
        assert_eq!(numbers[2], NumericValue::Raw("abc".to_string()));
    }

    #[test]
    fn test_type_name_is_upper_cased() {
        let entity = parse_statement("#7=IfcPolyLoop((#1,#2,#3));").unwrap();
        assert_eq!(entity.ifc_type, IfcType::IfcPolyLoop);
        assert_eq!(entity.ifc_type.name(), "IFCPOLYLOOP");

        let entity = parse_statement("#8=IfcWall('guid',$,#2);").unwrap();
        assert_eq!(entity.ifc_type.name(), "IFCWALL");
    }

    #[test]
    fn test_parse_reference_lists() {
        let entity = parse_statement("#4=IFCPOLYLOOP((#1, #2 ,#3));").unwrap();
        assert_eq!(
            entity.references(),
            Some(&[EntityId(1), EntityId(2), EntityId(3)][..])
        );

        let face = parse_statement("#5=IFCFACE((#6,$,7));").unwrap();
        assert_eq!(face.references(), Some(&[EntityId(6)][..]));
    }

    #[test]
    fn test_other_types_keep_raw_params() {
        let entity = parse_statement("#6=IFCFACEBOUND(#4,.T.);").unwrap();
        assert_eq!(entity.ifc_type, IfcType::IfcFaceBound);
        assert_eq!(
            entity.params,
            EntityParams::RawParamList(vec!["#4".to_string(), ".T.".to_string()])
        );
    }

    #[test]
    fn test_split_params_respects_nesting() {
        let params = split_params("'a',(1,2,(3,4)),$, #5");
        assert_eq!(params, vec!["'a'", "(1,2,(3,4))", "$", "#5"]);
        assert!(split_params("").is_empty());
    }

    #[test]
    fn test_malformed_statements_are_skipped() {
        assert!(parse_statement("IFCWALL('a');").is_none());
        assert!(parse_statement("#=IFCWALL('a');").is_none());
        assert!(parse_statement("#1 IFCWALL('a');").is_none());
        assert!(parse_statement("#1=IFCWALL('a')").is_none());
        assert!(parse_statement("#1=('a');").is_none());
        assert!(parse_statement("#99999999999=IFCWALL('a');").is_none());
    }

    #[test]
    fn test_missing_first_param_gives_empty_payload() {
        let entity = parse_statement("#9=IFCCARTESIANPOINT();").unwrap();
        assert_eq!(entity.params, EntityParams::NumericTuple(Vec::new()));
    }
}
