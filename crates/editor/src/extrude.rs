//! Prism construction from a captured ground footprint.
//!
//! A closed footprint becomes a closed prism: every ring point contributes
//! a top/bottom vertex pair, the caps come from the triangulator, and each
//! ring edge becomes a two-triangle wall quad. Top vertices sit at even
//! buffer offsets with their bottom counterparts directly after them, which
//! is what the vertex-resize markers rely on.

use glam::Vec3;

use crate::engine::MeshData;
use crate::triangulate::Triangulator;

/// Default prism height, base at y = 0.
pub const EXTRUDE_HEIGHT: f32 = 1.0;

/// Small y offset keeping captured points and relocated bodies off the
/// ground surface.
pub const GROUND_OFFSET: f32 = 0.01;

/// Pin a picked point just above the ground plane.
pub fn pin_to_ground(p: Vec3) -> Vec3 {
    Vec3::new(p.x, GROUND_OFFSET, p.z)
}

/// Build a prism mesh from a footprint ring.
///
/// `ring` may or may not carry the closing duplicate point; it is dropped
/// before triangulation. Vertex `2i` is the top of ring point `i`
/// (y = `height`), vertex `2i + 1` its bottom (y = 0).
pub fn extrude_footprint(
    ring: &[Vec3],
    height: f32,
    triangulator: &dyn Triangulator,
) -> Result<MeshData, String> {
    let points = open_ring(ring);
    let n = points.len();
    if n < 3 {
        return Err(format!("footprint needs at least 3 points, got {n}"));
    }

    let mut flat = Vec::with_capacity(n * 2);
    for p in points {
        flat.push(p.x as f64);
        flat.push(p.z as f64);
    }
    let cap = triangulator.triangulate(&flat)?;

    let mut positions = Vec::with_capacity(n * 6);
    for p in points {
        positions.extend_from_slice(&[p.x, height, p.z]); // top, offset 2i
        positions.extend_from_slice(&[p.x, 0.0, p.z]); // bottom, offset 2i+1
    }

    let mut indices = Vec::with_capacity(cap.len() * 2 + n * 6);
    for tri in cap.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        // Top cap keeps the triangulator's winding; the bottom cap is
        // reversed so both face outward.
        indices.extend_from_slice(&[a * 2, b * 2, c * 2]);
        indices.extend_from_slice(&[a * 2 + 1, c * 2 + 1, b * 2 + 1]);
    }

    for i in 0..n as u32 {
        let j = (i + 1) % n as u32;
        indices.extend_from_slice(&[i * 2, j * 2, i * 2 + 1]);
        indices.extend_from_slice(&[j * 2, j * 2 + 1, i * 2 + 1]);
    }

    Ok(MeshData { positions, indices })
}

/// The ring without its closing duplicate, if present.
fn open_ring(ring: &[Vec3]) -> &[Vec3] {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => {
            &ring[..ring.len() - 1]
        }
        _ => ring,
    }
}
