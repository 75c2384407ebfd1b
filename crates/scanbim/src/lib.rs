// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! scanbim - E57 and IFC import for host applications
//!
//! Picks the importer by file extension and hands back finished geometry:
//! a face/vertex mesh for IFC files, posed point clouds for E57 files.
//!
//! # Example
//!
//! ```ignore
//! use scanbim::{import, ImportedGeometry};
//!
//! match import("model.ifc")? {
//!     ImportedGeometry::Mesh(mesh) => println!("{} faces", mesh.face_count()),
//!     ImportedGeometry::Scans(scans) => println!("{} scans", scans.len()),
//! }
//! ```

pub use scanbim_e57 as e57;
pub use scanbim_geometry as geometry;
pub use scanbim_ifc as ifc;
pub use scanbim_model as model;

use scanbim_e57::ScanReader;
use scanbim_ifc::StepImporter;
use scanbim_model::{GeometryImporter, ImportError, ResolvedMesh, ScanCollection};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for dispatching imports
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from [`import`]
#[derive(Error, Debug)]
pub enum Error {
    /// IFC import failed
    #[error(transparent)]
    Ifc(#[from] ImportError),

    /// E57 import failed
    #[error(transparent)]
    E57(#[from] scanbim_e57::Error),

    /// No importer handles the file extension
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Supported input formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Ifc,
    E57,
}

impl Format {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        if StepImporter::new().accepts(path) {
            Some(Format::Ifc)
        } else if ScanReader::new().accepts(path) {
            Some(Format::E57)
        } else {
            None
        }
    }
}

/// Geometry produced by one import
#[derive(Clone, Debug, PartialEq)]
pub enum ImportedGeometry {
    Mesh(ResolvedMesh),
    Scans(ScanCollection),
}

/// Extension-dispatching importer with per-format settings
#[derive(Clone, Debug, Default)]
pub struct Importer {
    pub ifc: StepImporter,
    pub e57: ScanReader,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the IFC importer settings
    pub fn with_ifc(mut self, ifc: StepImporter) -> Self {
        self.ifc = ifc;
        self
    }

    /// Replace the E57 reader settings
    pub fn with_e57(mut self, e57: ScanReader) -> Self {
        self.e57 = e57;
        self
    }

    /// Import `path` with the importer matching its extension
    pub fn import(&self, path: &Path) -> Result<ImportedGeometry> {
        let Some(format) = Format::from_path(path) else {
            log::warn!("No importer for {}", path.display());
            return Err(Error::UnsupportedFormat(path.to_path_buf()));
        };
        log::debug!("Importing {} as {:?}", path.display(), format);

        match format {
            Format::Ifc => Ok(ImportedGeometry::Mesh(self.ifc.import_file(path)?)),
            Format::E57 => Ok(ImportedGeometry::Scans(self.e57.import_file(path)?)),
        }
    }
}

/// Import a file with default settings
pub fn import(path: impl AsRef<Path>) -> Result<ImportedGeometry> {
    Importer::new().import(path.as_ref())
}
