// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity table: arena in file order plus an id index

use crate::scanner::StatementScanner;
use crate::tokenizer::parse_statement;
use rustc_hash::FxHashMap;
use scanbim_model::{Entity, EntityId, EntityResolver, IfcType};

/// Owning store of all parsed entities
///
/// Entities live in a `Vec` in file order; an id index maps each [`EntityId`]
/// to its slot. References between entities stay plain ids and are resolved
/// through [`EntityResolver::get`].
#[derive(Clone, Debug, Default)]
pub struct EntityGraph {
    /// Entities in file order
    entities: Vec<Entity>,
    /// Entity ID -> slot in `entities`
    index: FxHashMap<EntityId, usize>,
    /// Statements that did not match the entity grammar
    skipped: usize,
}

impl EntityGraph {
    /// Parse every statement of the `DATA;` section
    pub fn parse(content: &str) -> Self {
        let mut graph = Self::default();
        for statement in StatementScanner::new(content) {
            match parse_statement(&statement) {
                Some(entity) => graph.insert(entity),
                None => {
                    log::debug!("Skipping malformed statement: {}", statement);
                    graph.skipped += 1;
                }
            }
        }
        graph
    }

    /// Add an entity
    ///
    /// A repeated id overwrites the earlier record but keeps its position.
    fn insert(&mut self, entity: Entity) {
        match self.index.get(&entity.id) {
            Some(&slot) => {
                log::warn!("Duplicate entity id {}, keeping the later record", entity.id);
                self.entities[slot] = entity;
            }
            None => {
                self.index.insert(entity.id, self.entities.len());
                self.entities.push(entity);
            }
        }
    }

    /// Number of statements that were skipped as malformed
    pub fn skipped_statements(&self) -> usize {
        self.skipped
    }

    /// Entity counts per type, sorted by type name
    pub fn type_counts(&self) -> Vec<(String, usize)> {
        let mut counts: FxHashMap<&IfcType, usize> = FxHashMap::default();
        for entity in &self.entities {
            *counts.entry(&entity.ifc_type).or_insert(0) += 1;
        }

        let mut summary: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(ifc_type, count)| (ifc_type.name().to_string(), count))
            .collect();
        summary.sort();
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityResolver for EntityGraph {
    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    fn entities(&self) -> &[Entity] {
        &self.entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanbim_model::EntityParams;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#10=IFCCARTESIANPOINT((0.,0.,0.));
#2=IFCCARTESIANPOINT((1.,0.,0.));
#7=IFCPOLYLOOP((#10,#2));
not a statement;
#8=IFCWALL('guid',$,'Wall 1');
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_graph_get() {
        let graph = EntityGraph::parse(TEST_IFC);
        let entity = graph.get(EntityId(7)).unwrap();
        assert_eq!(entity.ifc_type, IfcType::IfcPolyLoop);
        assert!(graph.get(EntityId(99)).is_none());
    }

    #[test]
    fn test_graph_keeps_file_order() {
        let graph = EntityGraph::parse(TEST_IFC);
        let ids: Vec<u32> = graph.entities().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![10, 2, 7, 8]);
    }

    #[test]
    fn test_malformed_statement_is_counted() {
        let graph = EntityGraph::parse(TEST_IFC);
        assert_eq!(graph.entity_count(), 4);
        assert_eq!(graph.skipped_statements(), 1);
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let graph = EntityGraph::parse(
            "DATA;\n#1=IFCWALL('a');\n#2=IFCWALL('b');\n#1=IFCSLAB('c');\nENDSEC;\n",
        );
        assert_eq!(graph.entity_count(), 2);
        let first = &graph.entities()[0];
        assert_eq!(first.id, EntityId(1));
        assert_eq!(first.ifc_type.name(), "IFCSLAB");
        assert_eq!(
            first.params,
            EntityParams::RawParamList(vec!["'c'".to_string()])
        );
    }

    #[test]
    fn test_type_counts_sorted() {
        let graph = EntityGraph::parse(TEST_IFC);
        assert_eq!(
            graph.type_counts(),
            vec![
                ("IFCCARTESIANPOINT".to_string(), 2),
                ("IFCPOLYLOOP".to_string(), 1),
                ("IFCWALL".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_graph_is_shareable_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let graph = Arc::new(EntityGraph::parse(TEST_IFC));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let graph = Arc::clone(&graph);
                thread::spawn(move || graph.count_by_type(&IfcType::IfcCartesianPoint))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }
}
