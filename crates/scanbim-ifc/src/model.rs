// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IfcDocument - parsed entity graph plus header metadata

use crate::graph::EntityGraph;
use crate::header::parse_header;

use scanbim_geometry::build_mesh;
use scanbim_model::{EntityResolver, ModelMetadata, ProgressCallback, ResolvedMesh};

/// A parsed IFC file
///
/// Holds the entity graph of the `DATA;` section and the metadata of the
/// `HEADER;` section. Both are immutable after parsing.
#[derive(Clone, Debug, Default)]
pub struct IfcDocument {
    graph: EntityGraph,
    metadata: ModelMetadata,
}

impl IfcDocument {
    /// Parse IFC content
    ///
    /// Parsing is permissive: statements that do not match the entity grammar
    /// are skipped, so any text yields a (possibly empty) document.
    pub fn parse(content: &str) -> Self {
        let graph = EntityGraph::parse(content);
        let metadata = parse_header(content);
        Self { graph, metadata }
    }

    /// Parse with progress reporting
    pub fn parse_with_progress(content: &str, on_progress: ProgressCallback) -> Self {
        on_progress("Reading header", 0.0);
        let metadata = parse_header(content);

        on_progress("Scanning entities", 10.0);
        let graph = EntityGraph::parse(content);

        on_progress("Done", 100.0);
        Self { graph, metadata }
    }

    /// Entity lookup over the parsed file
    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    /// Same graph as a trait object
    pub fn resolver(&self) -> &dyn EntityResolver {
        &self.graph
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Entity counts per type name, sorted by name
    pub fn type_summary(&self) -> Vec<(String, usize)> {
        self.graph.type_counts()
    }

    pub fn entity_count(&self) -> usize {
        self.graph.entity_count()
    }

    /// Reconstruct the face/vertex mesh from points, loops and faces
    pub fn build_mesh(&self) -> ResolvedMesh {
        build_mesh(&self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('triangle.ifc','2024-05-01T10:00:00',(''),(''),'','Modeler','');
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCCARTESIANPOINT((0.,0.,0.));
#2=IFCCARTESIANPOINT((1.,0.,0.));
#3=IFCCARTESIANPOINT((0.,1.,0.));
#4=IFCPOLYLOOP((#1,#2,#3));
#5=IFCFACE((#6));
#6=IFCFACEBOUND(#4,.T.);
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_parse_document() {
        let doc = IfcDocument::parse(TEST_IFC);
        assert_eq!(doc.entity_count(), 6);
        assert_eq!(doc.metadata().schema_version, "IFC4");
        assert_eq!(doc.metadata().file_name.as_deref(), Some("triangle.ifc"));
        assert_eq!(doc.metadata().originating_system.as_deref(), Some("Modeler"));
        assert_eq!(doc.metadata().author, None);
    }

    #[test]
    fn test_type_summary() {
        let doc = IfcDocument::parse(TEST_IFC);
        let summary = doc.type_summary();
        assert_eq!(summary[0], ("IFCCARTESIANPOINT".to_string(), 3));
        assert_eq!(summary.len(), 4);
        let names: Vec<&str> = summary.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec!["IFCCARTESIANPOINT", "IFCFACE", "IFCFACEBOUND", "IFCPOLYLOOP"]
        );
    }

    #[test]
    fn test_build_mesh() {
        let doc = IfcDocument::parse(TEST_IFC);
        let mesh = doc.build_mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_parse_with_progress_reports_phases() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&phases);
        let doc = IfcDocument::parse_with_progress(
            TEST_IFC,
            Box::new(move |phase, percent| {
                sink.lock().unwrap().push((phase.to_string(), percent));
            }),
        );

        assert_eq!(doc.entity_count(), 6);
        let phases = phases.lock().unwrap();
        assert_eq!(phases.first().map(|p| p.1), Some(0.0));
        assert_eq!(phases.last().map(|p| p.1), Some(100.0));
    }
}
