// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! scanbim-ifc - Minimal-schema IFC (STEP) importer
//!
//! Parses the `DATA;` section of an IFC file into an entity graph and
//! reconstructs a face/vertex mesh from `IFCCARTESIANPOINT`, `IFCPOLYLOOP`,
//! `IFCFACE` and face bound entities.
//!
//! # Features
//!
//! - **Line-joining statement scanner** using `memchr`
//! - **Statement grammar** using `nom` combinators, numbers via `lexical-core`
//! - **Arena + id index** entity graph, references stay integer ids
//! - **Header metadata** from `FILE_NAME`, `FILE_DESCRIPTION`, `FILE_SCHEMA`
//!
//! # Example
//!
//! ```ignore
//! use scanbim_ifc::parse_ifc;
//!
//! let mesh = parse_ifc("model.ifc")?;
//! println!("{} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
//! ```

mod graph;
mod header;
mod model;
mod scanner;
mod tokenizer;

pub use graph::EntityGraph;
pub use header::parse_header;
pub use model::IfcDocument;
pub use scanner::{tokenize, StatementScanner};
pub use tokenizer::{parse_number_list, parse_reference_list, parse_statement, split_params};

use scanbim_model::{GeometryImporter, ImportError, ResolvedMesh, Result};
use std::path::Path;

/// File-level IFC importer
#[derive(Clone, Debug, Default)]
pub struct StepImporter {
    /// Replace invalid UTF-8 sequences instead of failing
    pub lossy_utf8: bool,
}

impl StepImporter {
    /// Create an importer with default settings (strict UTF-8)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether invalid UTF-8 is replaced with U+FFFD
    pub fn lossy_utf8(mut self, enabled: bool) -> Self {
        self.lossy_utf8 = enabled;
        self
    }

    /// Read and parse the file at `path`
    pub fn open(&self, path: &Path) -> Result<IfcDocument> {
        let bytes = std::fs::read(path).map_err(|e| ImportError::read(path, e))?;
        let content = if self.lossy_utf8 {
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            String::from_utf8(bytes).map_err(|e| ImportError::encoding(path, e))?
        };

        let doc = IfcDocument::parse(&content);
        log::info!(
            "Parsed {}: {} entities ({} skipped), schema {}",
            path.display(),
            doc.entity_count(),
            doc.graph().skipped_statements(),
            if doc.metadata().schema_version.is_empty() {
                "unknown"
            } else {
                doc.metadata().schema_version.as_str()
            }
        );
        Ok(doc)
    }
}

impl GeometryImporter for StepImporter {
    type Output = ResolvedMesh;
    type Error = ImportError;

    fn extensions(&self) -> &'static [&'static str] {
        &["ifc"]
    }

    fn import_file(&self, path: &Path) -> Result<ResolvedMesh> {
        let mesh = self.open(path)?.build_mesh();
        log::info!(
            "Built mesh from {}: {} vertices, {} faces",
            path.display(),
            mesh.vertex_count(),
            mesh.face_count()
        );
        Ok(mesh)
    }
}

/// Parse an IFC file into a face/vertex mesh
pub fn parse_ifc(path: impl AsRef<Path>) -> Result<ResolvedMesh> {
    StepImporter::new().import_file(path.as_ref())
}

/// Parse IFC text into a face/vertex mesh
pub fn parse_ifc_str(content: &str) -> ResolvedMesh {
    IfcDocument::parse(content).build_mesh()
}
