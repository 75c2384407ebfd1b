// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # scanbim Geometry
//!
//! Geometry reconstruction shared by the IFC and E57 importers. Uses the
//! `EntityResolver` trait from `scanbim-model` for entity lookup, so it does
//! not depend on a specific parser.
//!
//! ## Overview
//!
//! - **Mesh resolution**: faces, bounds and poly loops to a face/vertex mesh
//! - **Triangulation**: polygon faces to flat-shaded triangle buffers via earcutr
//! - **Pose transforms**: sensor-local scan points to global coordinates
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scanbim_geometry::{build_mesh, triangulate_mesh};
//!
//! let mesh = build_mesh(&graph);
//! let buffers = triangulate_mesh(&mesh);
//! println!("Generated {} triangles", buffers.triangle_count());
//! ```

pub mod error;
pub mod mesh;
pub mod transform;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use error::{Error, Result};
pub use mesh::build_mesh;
pub use transform::{pose_isometry, to_global};
pub use triangulation::{calculate_polygon_normal, triangulate_mesh, triangulate_polygon};
