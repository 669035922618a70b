//! Simple-polygon triangulation.
//!
//! Triangulation is a replaceable collaborator: anything that turns a
//! flattened 2D ring into a triangle index list satisfies [`Triangulator`].
//! The default backend is the `earcutr` ear-clipping port. Input is assumed
//! non-self-intersecting; the result for self-intersecting rings is
//! undefined.

/// Triangulates the interleaved 2D coordinates of a simple polygon ring
/// (no closing duplicate). Returned indices reference ring points.
pub trait Triangulator {
    fn triangulate(&self, flat: &[f64]) -> Result<Vec<u32>, String>;
}

/// Ear-clipping triangulation backed by `earcutr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, flat: &[f64]) -> Result<Vec<u32>, String> {
        if flat.len() < 6 {
            return Err(format!(
                "polygon needs at least 3 points, got {}",
                flat.len() / 2
            ));
        }
        let triangles = earcutr::earcut(flat, &[], 2)
            .map_err(|e| format!("ear clipping failed: {e:?}"))?;
        Ok(triangles.into_iter().map(|i| i as u32).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_two_triangles() {
        let flat = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0];
        let tris = EarcutTriangulator.triangulate(&flat).unwrap();
        assert_eq!(tris.len(), 6);
        assert!(tris.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_concave_polygon() {
        // L-shape: 6 points yield 4 triangles
        let flat = [
            0.0, 0.0, 3.0, 0.0, 3.0, 1.0, 1.0, 1.0, 1.0, 3.0, 0.0, 3.0,
        ];
        let tris = EarcutTriangulator.triangulate(&flat).unwrap();
        assert_eq!(tris.len(), 12);
        assert!(tris.iter().all(|&i| i < 6));
    }

    #[test]
    fn test_every_ring_point_referenced() {
        let flat = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0];
        let tris = EarcutTriangulator.triangulate(&flat).unwrap();
        for i in 0..4u32 {
            assert!(tris.contains(&i), "ring point {i} missing from caps");
        }
    }

    #[test]
    fn test_too_few_points_error() {
        let result = EarcutTriangulator.triangulate(&[0.0, 0.0, 1.0, 1.0]);
        assert!(result.is_err());
    }
}
