// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up decoded entities by id

use crate::{Entity, EntityId, IfcType};

/// Entity lookup over a parsed entity table
///
/// Implementations keep entities in file order and provide O(1) lookup by id.
/// Geometry reconstruction only talks to this trait, so it does not depend on
/// a particular parser.
///
/// # Example
///
/// ```ignore
/// use scanbim_model::{EntityResolver, EntityId};
///
/// fn loop_of(resolver: &dyn EntityResolver, bound: EntityId) -> Option<EntityId> {
///     resolver.get(bound)?.first_reference()
/// }
/// ```
pub trait EntityResolver: Send + Sync {
    /// Get entity by ID
    fn get(&self, id: EntityId) -> Option<&Entity>;

    /// All entities in file order
    fn entities(&self) -> &[Entity];

    /// All entities of a specific type, in file order
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<&Entity> {
        self.entities()
            .iter()
            .filter(|e| &e.ifc_type == ifc_type)
            .collect()
    }

    /// Count entities of a specific type
    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.entities()
            .iter()
            .filter(|e| &e.ifc_type == ifc_type)
            .count()
    }

    /// Get total entity count
    fn entity_count(&self) -> usize {
        self.entities().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityParams;

    struct VecResolver(Vec<Entity>);

    impl EntityResolver for VecResolver {
        fn get(&self, id: EntityId) -> Option<&Entity> {
            self.0.iter().find(|e| e.id == id)
        }

        fn entities(&self) -> &[Entity] {
            &self.0
        }
    }

    fn fixture() -> VecResolver {
        VecResolver(vec![
            Entity::new(EntityId(3), IfcType::IfcCartesianPoint, EntityParams::NumericTuple(vec![])),
            Entity::new(EntityId(1), IfcType::IfcCartesianPoint, EntityParams::NumericTuple(vec![])),
            Entity::new(EntityId(2), IfcType::IfcPolyLoop, EntityParams::ReferenceList(vec![])),
        ])
    }

    #[test]
    fn test_entities_by_type_keeps_file_order() {
        let resolver = fixture();
        let points = resolver.entities_by_type(&IfcType::IfcCartesianPoint);
        let ids: Vec<_> = points.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![EntityId(3), EntityId(1)]);
        assert_eq!(resolver.entities_by_type(&IfcType::IfcPolyLoop).len(), 1);
        assert!(resolver.entities_by_type(&IfcType::IfcFace).is_empty());
    }

    #[test]
    fn test_count_by_type() {
        let resolver = fixture();
        assert_eq!(resolver.count_by_type(&IfcType::IfcCartesianPoint), 2);
        assert_eq!(resolver.entity_count(), 3);
    }
}
