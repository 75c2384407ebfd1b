// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face/vertex mesh reconstruction
//!
//! Walks `IFCFACE -> bound -> IFCPOLYLOOP -> IFCCARTESIANPOINT` through an
//! [`EntityResolver`]. Anything that does not resolve is skipped; the result
//! only ever contains faces whose indices are all valid.

use rustc_hash::FxHashMap;
use scanbim_model::{Entity, EntityId, EntityResolver, IfcType, ResolvedMesh};

/// Build the mesh for every face in the resolver
///
/// Vertices are all cartesian points in file order. Each face bound that
/// resolves to a poly loop of known points appends one face.
pub fn build_mesh(resolver: &dyn EntityResolver) -> ResolvedMesh {
    let mut mesh = ResolvedMesh::new();
    let mut vertex_index: FxHashMap<EntityId, u32> = FxHashMap::default();

    for entity in resolver.entities_by_type(&IfcType::IfcCartesianPoint) {
        vertex_index.insert(entity.id, mesh.vertices.len() as u32);
        mesh.vertices.push(entity.coordinates().unwrap_or([0.0; 3]));
    }

    for face in resolver.entities_by_type(&IfcType::IfcFace) {
        let Some(bounds) = face.references() else {
            continue;
        };

        for &bound_id in bounds {
            match resolve_bound(bound_id, resolver, &vertex_index) {
                Some(indices) => mesh.faces.push(indices),
                None => log::debug!("Skipping bound {} of face {}", bound_id, face.id),
            }
        }
    }

    mesh
}

/// Resolve one face bound to vertex indices
fn resolve_bound(
    bound_id: EntityId,
    resolver: &dyn EntityResolver,
    vertex_index: &FxHashMap<EntityId, u32>,
) -> Option<Vec<u32>> {
    let bound = resolver.get(bound_id)?;
    let loop_entity = resolver.get(bound.first_reference()?)?;
    loop_points(loop_entity, vertex_index)
}

/// Map the points of a poly loop through the vertex index
///
/// Fails if the entity is not a poly loop or names any unknown point.
fn loop_points(loop_entity: &Entity, vertex_index: &FxHashMap<EntityId, u32>) -> Option<Vec<u32>> {
    if loop_entity.ifc_type != IfcType::IfcPolyLoop {
        return None;
    }
    loop_entity
        .references()?
        .iter()
        .map(|id| vertex_index.get(id).copied())
        .collect()
}
