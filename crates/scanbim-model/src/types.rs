// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for decoded STEP entities
//!
//! Entities reference each other by [`EntityId`] only. Resolution always goes
//! through a lookup table, so the model never holds links between records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw STEP instance name (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    /// Parse `#123` or `123`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('#').unwrap_or(s).parse::<u32>().map(EntityId)
    }
}

/// Entity type tag
///
/// Only the types that take part in face/vertex reconstruction have their own
/// variant. Every other type is kept as `Unknown` with its upper-cased name.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IfcType {
    IfcCartesianPoint,
    IfcDirection,
    IfcPolyLoop,
    IfcFace,
    IfcFaceBound,
    IfcFaceOuterBound,
    /// Any other type, upper-cased
    Unknown(String),
}

impl IfcType {
    /// Parse a type name (case-insensitive)
    pub fn parse(s: &str) -> Self {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "IFCCARTESIANPOINT" => IfcType::IfcCartesianPoint,
            "IFCDIRECTION" => IfcType::IfcDirection,
            "IFCPOLYLOOP" => IfcType::IfcPolyLoop,
            "IFCFACE" => IfcType::IfcFace,
            "IFCFACEBOUND" => IfcType::IfcFaceBound,
            "IFCFACEOUTERBOUND" => IfcType::IfcFaceOuterBound,
            _ => IfcType::Unknown(upper),
        }
    }

    /// Canonical upper-case name
    pub fn name(&self) -> &str {
        match self {
            IfcType::IfcCartesianPoint => "IFCCARTESIANPOINT",
            IfcType::IfcDirection => "IFCDIRECTION",
            IfcType::IfcPolyLoop => "IFCPOLYLOOP",
            IfcType::IfcFace => "IFCFACE",
            IfcType::IfcFaceBound => "IFCFACEBOUND",
            IfcType::IfcFaceOuterBound => "IFCFACEOUTERBOUND",
            IfcType::Unknown(name) => name,
        }
    }

    /// Types whose first parameter is decoded as a number tuple
    pub fn has_numeric_payload(&self) -> bool {
        matches!(self, IfcType::IfcCartesianPoint | IfcType::IfcDirection)
    }

    /// Types whose first parameter is decoded as a reference list
    pub fn has_reference_payload(&self) -> bool {
        matches!(self, IfcType::IfcPolyLoop | IfcType::IfcFace)
    }
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(IfcType::parse(s))
    }
}

impl From<String> for IfcType {
    fn from(s: String) -> Self {
        IfcType::parse(&s)
    }
}

impl From<IfcType> for String {
    fn from(t: IfcType) -> Self {
        t.name().to_string()
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One element of a numeric tuple
///
/// Tokens that are neither integer nor float are kept verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NumericValue {
    Integer(i64),
    Float(f64),
    Raw(String),
}

impl NumericValue {
    /// Try to get as float (integers are widened)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericValue::Integer(i) => Some(*i as f64),
            NumericValue::Float(f) => Some(*f),
            NumericValue::Raw(_) => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            NumericValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

/// Decoded parameter payload
///
/// The shape is chosen once, from the entity type, when the statement is parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityParams {
    /// Number list (IFCCARTESIANPOINT, IFCDIRECTION)
    NumericTuple(Vec<NumericValue>),
    /// Reference list (IFCPOLYLOOP, IFCFACE)
    ReferenceList(Vec<EntityId>),
    /// Top-level parameters kept as text (all other types)
    RawParamList(Vec<String>),
}

impl Default for EntityParams {
    fn default() -> Self {
        EntityParams::RawParamList(Vec::new())
    }
}

/// Decoded STEP entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    /// Parameter payload
    pub params: EntityParams,
}

impl Entity {
    pub fn new(id: EntityId, ifc_type: IfcType, params: EntityParams) -> Self {
        Self {
            id,
            ifc_type,
            params,
        }
    }

    /// Get the number tuple, if this entity carries one
    pub fn numbers(&self) -> Option<&[NumericValue]> {
        match &self.params {
            EntityParams::NumericTuple(values) => Some(values),
            _ => None,
        }
    }

    /// Get the reference list, if this entity carries one
    pub fn references(&self) -> Option<&[EntityId]> {
        match &self.params {
            EntityParams::ReferenceList(refs) => Some(refs),
            _ => None,
        }
    }

    /// Read the first parameter as an entity reference
    ///
    /// Accepts an already-decoded reference, a non-negative integer, or a raw
    /// `#N` token.
    pub fn first_reference(&self) -> Option<EntityId> {
        match &self.params {
            EntityParams::ReferenceList(refs) => refs.first().copied(),
            EntityParams::NumericTuple(values) => values
                .first()
                .and_then(NumericValue::as_integer)
                .and_then(|i| u32::try_from(i).ok())
                .map(EntityId),
            EntityParams::RawParamList(params) => params.first()?.parse().ok(),
        }
    }

    /// Read the number tuple as a 3D coordinate
    ///
    /// Missing components and raw tokens read as 0.0; extra components are
    /// ignored. Entities without a number tuple yield `None`.
    pub fn coordinates(&self) -> Option<[f64; 3]> {
        let values = self.numbers()?;
        let component = |i: usize| values.get(i).and_then(NumericValue::as_f64).unwrap_or(0.0);
        Some([component(0), component(1), component(2)])
    }
}

/// Model metadata extracted from the STEP header
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Schema identifier (e.g., "IFC2X3", "IFC4")
    pub schema_version: String,
    /// Originating system (CAD application)
    pub originating_system: Option<String>,
    /// Preprocessor version
    pub preprocessor_version: Option<String>,
    /// File name from header
    pub file_name: Option<String>,
    /// File description
    pub file_description: Option<String>,
    /// Author
    pub author: Option<String>,
    /// Organization
    pub organization: Option<String>,
    /// Timestamp
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_display_and_parse() {
        assert_eq!(EntityId(7).to_string(), "#7");
        assert_eq!("#12".parse::<EntityId>(), Ok(EntityId(12)));
        assert_eq!("12".parse::<EntityId>(), Ok(EntityId(12)));
        assert!("#abc".parse::<EntityId>().is_err());
        assert!("##4".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_type_parse_is_case_insensitive() {
        assert_eq!(IfcType::parse("IfcPolyLoop"), IfcType::IfcPolyLoop);
        assert_eq!(IfcType::parse("ifcface"), IfcType::IfcFace);
        assert_eq!(
            IfcType::parse("IfcWall"),
            IfcType::Unknown("IFCWALL".to_string())
        );
        assert_eq!(IfcType::parse("ifcwall").name(), "IFCWALL");
    }

    #[test]
    fn test_first_reference_from_raw_param() {
        let bound = Entity::new(
            EntityId(6),
            IfcType::IfcFaceBound,
            EntityParams::RawParamList(vec!["#4".to_string(), ".T.".to_string()]),
        );
        assert_eq!(bound.first_reference(), Some(EntityId(4)));
    }

    #[test]
    fn test_first_reference_from_integer() {
        let entity = Entity::new(
            EntityId(1),
            IfcType::IfcDirection,
            EntityParams::NumericTuple(vec![NumericValue::Integer(9)]),
        );
        assert_eq!(entity.first_reference(), Some(EntityId(9)));

        let negative = Entity::new(
            EntityId(1),
            IfcType::IfcDirection,
            EntityParams::NumericTuple(vec![NumericValue::Integer(-1)]),
        );
        assert_eq!(negative.first_reference(), None);
    }

    #[test]
    fn test_coordinates_pad_and_skip_raw() {
        let point = Entity::new(
            EntityId(1),
            IfcType::IfcCartesianPoint,
            EntityParams::NumericTuple(vec![
                NumericValue::Float(1.5),
                NumericValue::Raw("$".to_string()),
            ]),
        );
        assert_eq!(point.coordinates(), Some([1.5, 0.0, 0.0]));
    }

    #[test]
    fn test_ifc_type_string_conversion() {
        assert_eq!(String::from(IfcType::IfcPolyLoop), "IFCPOLYLOOP");
        assert_eq!(IfcType::from("IfcFace".to_string()), IfcType::IfcFace);
    }
}
