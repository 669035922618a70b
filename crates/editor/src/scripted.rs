//! Headless stand-in for the rendering/picking engine.
//!
//! Picking follows a top-down orthographic model: screen (x, y) is the
//! ground-plane point (x, z). Markers win over bodies, bodies over the
//! ground plane. Tests that need a specific result under overlapping
//! geometry can force the next pick with [`ScriptedEngine::push_pick`].

use std::collections::VecDeque;

use glam::{Mat4, Vec3};
use shared::{Appearance, MeshId, PickHit};
use uuid::Uuid;

use crate::engine::{MeshData, SceneEngine};

/// Half extent of the 6x6 ground plane.
pub const GROUND_HALF_EXTENT: f32 = 3.0;

/// Pick radius of a vertex marker (a 0.1 diameter handle).
pub const MARKER_PICK_RADIUS: f32 = 0.05;

pub const GROUND_ID: &str = "ground";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Ground,
    Body,
    Guide,
    Marker,
}

struct SceneNode {
    id: MeshId,
    kind: NodeKind,
    data: MeshData,
    origin: Vec3,
    appearance: Appearance,
}

/// In-memory scene used by the test suite and the command-line driver.
pub struct ScriptedEngine {
    nodes: Vec<SceneNode>,
    camera_control: bool,
    forced_picks: VecDeque<Option<PickHit>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        let ground = SceneNode {
            id: GROUND_ID.to_string(),
            kind: NodeKind::Ground,
            data: MeshData::default(),
            origin: Vec3::ZERO,
            appearance: Appearance::ground(),
        };
        Self {
            nodes: vec![ground],
            camera_control: true,
            forced_picks: VecDeque::new(),
        }
    }

    /// Force the result of the next `pick` call (FIFO when queued more than
    /// once).
    pub fn push_pick(&mut self, hit: Option<PickHit>) {
        self.forced_picks.push_back(hit);
    }

    pub fn camera_control_enabled(&self) -> bool {
        self.camera_control
    }

    pub fn contains(&self, id: &MeshId) -> bool {
        self.find(id).is_some()
    }

    pub fn guide_count(&self) -> usize {
        self.count(NodeKind::Guide)
    }

    pub fn marker_count(&self) -> usize {
        self.count(NodeKind::Marker)
    }

    pub fn body_count(&self) -> usize {
        self.count(NodeKind::Body)
    }

    /// Full mesh payload of a node (positions and indices).
    pub fn mesh_data(&self, id: &MeshId) -> Option<&MeshData> {
        self.find(id).map(|n| &n.data)
    }

    fn count(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    fn find(&self, id: &MeshId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    fn find_mut(&mut self, id: &MeshId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == *id)
    }

    fn insert(
        &mut self,
        kind: NodeKind,
        data: MeshData,
        origin: Vec3,
        appearance: Appearance,
    ) -> MeshId {
        let id = Uuid::new_v4().to_string();
        self.nodes.push(SceneNode {
            id: id.clone(),
            kind,
            data,
            origin,
            appearance,
        });
        id
    }

    /// World-space bounds of a body, origin applied.
    fn body_bounds(node: &SceneNode) -> Option<(Vec3, Vec3)> {
        if node.data.positions.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for triple in node.data.positions.chunks_exact(3) {
            let p = Vec3::new(triple[0], triple[1], triple[2]) + node.origin;
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneEngine for ScriptedEngine {
    fn ground(&self) -> MeshId {
        GROUND_ID.to_string()
    }

    fn pick(&mut self, screen_x: f32, screen_y: f32) -> Option<PickHit> {
        if let Some(forced) = self.forced_picks.pop_front() {
            return forced;
        }
        let (x, z) = (screen_x, screen_y);

        // Markers first: small handles float above everything else.
        for node in &self.nodes {
            if node.kind == NodeKind::Marker {
                let dx = node.origin.x - x;
                let dz = node.origin.z - z;
                if (dx * dx + dz * dz).sqrt() <= MARKER_PICK_RADIUS {
                    return Some(PickHit {
                        mesh: node.id.clone(),
                        point: node.origin,
                    });
                }
            }
        }

        // Bodies by footprint bounds, the top surface as the picked point.
        for node in &self.nodes {
            if node.kind == NodeKind::Body {
                if let Some((min, max)) = Self::body_bounds(node) {
                    if x >= min.x && x <= max.x && z >= min.z && z <= max.z {
                        return Some(PickHit {
                            mesh: node.id.clone(),
                            point: Vec3::new(x, max.y, z),
                        });
                    }
                }
            }
        }

        if x.abs() <= GROUND_HALF_EXTENT && z.abs() <= GROUND_HALF_EXTENT {
            return Some(PickHit {
                mesh: GROUND_ID.to_string(),
                point: Vec3::new(x, 0.0, z),
            });
        }

        None
    }

    fn create_mesh(&mut self, data: MeshData, appearance: Appearance) -> MeshId {
        self.insert(NodeKind::Body, data, Vec3::ZERO, appearance)
    }

    fn create_guide(&mut self, points: &[Vec3]) -> MeshId {
        let mut positions = Vec::with_capacity(points.len() * 3);
        for p in points {
            positions.extend_from_slice(&[p.x, p.y, p.z]);
        }
        self.insert(
            NodeKind::Guide,
            MeshData {
                positions,
                indices: Vec::new(),
            },
            Vec3::ZERO,
            Appearance::guide(),
        )
    }

    fn create_marker(&mut self, position: Vec3) -> MeshId {
        self.insert(
            NodeKind::Marker,
            MeshData::default(),
            position,
            Appearance::marker(),
        )
    }

    fn dispose(&mut self, id: &MeshId) {
        self.nodes.retain(|n| n.id != *id);
    }

    fn positions(&self, id: &MeshId) -> Option<Vec<f32>> {
        self.find(id).map(|n| n.data.positions.clone())
    }

    fn set_positions(&mut self, id: &MeshId, positions: Vec<f32>) {
        if let Some(node) = self.find_mut(id) {
            node.data.positions = positions;
        }
    }

    fn origin(&self, id: &MeshId) -> Option<Vec3> {
        self.find(id).map(|n| n.origin)
    }

    fn set_origin(&mut self, id: &MeshId, origin: Vec3) {
        if let Some(node) = self.find_mut(id) {
            node.origin = origin;
        }
    }

    fn world_transform(&self, id: &MeshId) -> Mat4 {
        self.find(id)
            .map(|n| Mat4::from_translation(n.origin))
            .unwrap_or(Mat4::IDENTITY)
    }

    fn appearance(&self, id: &MeshId) -> Option<Appearance> {
        self.find(id).map(|n| n.appearance)
    }

    fn set_appearance(&mut self, id: &MeshId, appearance: Appearance) {
        if let Some(node) = self.find_mut(id) {
            node.appearance = appearance;
        }
    }

    fn set_camera_control(&mut self, enabled: bool) {
        self.camera_control = enabled;
    }
}
