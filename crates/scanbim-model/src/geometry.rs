// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Geometry handed to the host: face/vertex meshes and scan point clouds

use serde::{Deserialize, Serialize};

/// Face/vertex mesh reconstructed from IFC faces
///
/// Every index in every face is `< vertices.len()`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMesh {
    /// Vertex positions in file order of their point entities
    pub vertices: Vec<[f64; 3]>,
    /// Faces as ordered vertex-index loops
    pub faces: Vec<Vec<u32>>,
}

impl ResolvedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get face count
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Total number of face corners
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }
}

/// GPU-ready mesh data
///
/// Contains flattened vertex data suitable for GPU rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions as flattened [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals as flattened [nx, ny, nz, nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create mesh with pre-allocated capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Sensor pose of a scan
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Sensor position
    pub translation: [f64; 3],
    /// Sensor orientation quaternion as [w, x, y, z]
    pub rotation: [f64; 4],
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        translation: [0.0, 0.0, 0.0],
        rotation: [1.0, 0.0, 0.0, 0.0],
    };

    pub fn new(translation: [f64; 3], rotation: [f64; 4]) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One scan read from an E57 container
///
/// `points_local`, `points_global` and `colors` (when present) are aligned
/// one-to-one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scan {
    /// Position of the scan in the container
    pub index: usize,
    /// Scan name
    pub name: String,
    /// Scan GUID, when the container records one
    pub guid: Option<String>,
    /// Points in the sensor frame
    pub points_local: Vec<[f32; 3]>,
    /// Sensor pose
    pub pose: Pose,
    /// Points in the global frame
    pub points_global: Vec<[f32; 3]>,
    /// Per-point RGB color, when the scan carries color channels
    pub colors: Option<Vec<[u8; 3]>>,
}

impl Scan {
    /// Get point count
    pub fn point_count(&self) -> usize {
        self.points_local.len()
    }

    /// Check if the scan carries colors
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }
}

/// A scan that could not be read
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanFailure {
    /// Position of the scan in the container
    pub index: usize,
    /// Scan name, when the header could be read
    pub name: Option<String>,
    /// Error description
    pub message: String,
}

/// All scans read from one container
///
/// `has_colors` is derived once from the scans and is true iff at least one
/// scan carries colors.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanCollection {
    scans: Vec<Scan>,
    has_colors: bool,
    failures: Vec<ScanFailure>,
}

impl ScanCollection {
    pub fn new(scans: Vec<Scan>, failures: Vec<ScanFailure>) -> Self {
        let has_colors = scans.iter().any(Scan::has_colors);
        Self {
            scans,
            has_colors,
            failures,
        }
    }

    /// Scans in container order
    pub fn scans(&self) -> &[Scan] {
        &self.scans
    }

    /// Take ownership of the scans
    pub fn into_scans(self) -> Vec<Scan> {
        self.scans
    }

    /// Whether any scan carries colors
    pub fn has_colors(&self) -> bool {
        self.has_colors
    }

    /// Scans skipped because they failed to read
    pub fn failures(&self) -> &[ScanFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    /// Total point count over all scans
    pub fn total_points(&self) -> usize {
        self.scans.iter().map(Scan::point_count).sum()
    }
}
