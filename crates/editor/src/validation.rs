//! Mesh validation utilities.
//!
//! `MeshValidator` provides integrity checks over [`MeshData`]: stride,
//! in-range indices, top/bottom column pairing, and a closed-manifold edge
//! count.

use std::collections::HashMap;

use glam::Vec3;

use crate::engine::MeshData;

/// Validator for [`MeshData`] integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Number of vertices (position buffer length / 3).
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of triangles (index buffer length / 3).
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Check that the position buffer length is a multiple of 3.
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.positions.len() % 3 == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max)
    }

    /// Prism pairing: vertex 2k and 2k+1 share (x, z). Holds for freshly
    /// extruded prisms; a per-vertex resize edit may break it on purpose.
    pub fn are_columns_paired(&self) -> bool {
        let count = self.vertex_count();
        if count % 2 != 0 {
            return false;
        }
        for k in 0..count / 2 {
            let top = self.mesh.position(2 * k);
            let bottom = self.mesh.position(2 * k + 1);
            if top.x != bottom.x || top.z != bottom.z {
                return false;
            }
        }
        true
    }

    /// Closed-manifold check: every undirected edge is shared by exactly
    /// two triangles.
    pub fn is_closed_manifold(&self) -> bool {
        let mut edges: HashMap<(u32, u32), usize> = HashMap::new();
        for tri in self.mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                *edges.entry(key).or_insert(0) += 1;
            }
        }
        !edges.is_empty() && edges.values().all(|&count| count == 2)
    }

    /// Axis-aligned bounding box of the mesh as (min, max).
    pub fn aabb(&self) -> (Vec3, Vec3) {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for i in 0..self.vertex_count() {
            let p = self.mesh.position(i);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Run every check and return a list of error messages. An empty list
    /// means the mesh is a valid prism.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "position buffer length {} is not a multiple of 3",
                self.mesh.positions.len()
            ));
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            errors.push(format!(
                "indices out of range (vertex_count={})",
                self.vertex_count()
            ));
        }

        if !self.are_columns_paired() {
            errors.push("top/bottom vertex columns are not paired".to_string());
        }

        if !self.is_closed_manifold() {
            errors.push("mesh is not a closed manifold".to_string());
        }

        errors
    }
}
