// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! scanbim-model - Shared types and trait definitions for scan/BIM import
//!
//! This crate holds the data model that the IFC and E57 importers produce and
//! that host applications consume. It has no parsing logic of its own.
//!
//! # Architecture
//!
//! - [`Entity`] / [`EntityParams`] - decoded STEP records with a tagged payload
//! - [`EntityResolver`] - id lookup over a parsed entity table
//! - [`ResolvedMesh`] / [`MeshData`] - face/vertex output and GPU-ready buffers
//! - [`Scan`] / [`Pose`] - per-scan point cloud output of the E57 reader
//! - [`GeometryImporter`] - file-level entry point implemented by each format
//!
//! # Example
//!
//! ```ignore
//! use scanbim_model::{EntityResolver, IfcType};
//!
//! let points = graph.entities_by_type(&IfcType::IfcCartesianPoint);
//! println!("{} points", points.len());
//! ```

pub mod error;
pub mod geometry;
pub mod resolver;
pub mod traits;
pub mod types;

pub use error::*;
pub use geometry::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;
