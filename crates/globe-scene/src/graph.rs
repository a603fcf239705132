//! Scene hierarchy: a rotating group holding the globe and its atmosphere
//! shell, plus a free-standing star cloud.

use glam::{Mat4, Vec3};

use crate::sphere::{SphereMesh, generate_uv_sphere};
use crate::stars::{StarFieldParams, generate_star_positions};
use crate::transform::Transform;

/// Index of a node inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node draws, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure transform, draws nothing.
    Group,
    /// Textured sphere.
    Globe,
    /// Back-faced glow shell.
    Atmosphere,
    /// Point cloud.
    Stars,
}

/// A node with a local transform and an optional parent.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: &'static str,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub transform: Transform,
}

/// Flat, append-only node store. Parents are always inserted before their
/// children, so a node's parent index is lower than its own.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(
        &mut self,
        name: &'static str,
        kind: NodeKind,
        parent: Option<NodeId>,
        transform: Transform,
    ) -> NodeId {
        debug_assert!(parent.is_none_or(|p| p.0 < self.nodes.len()));
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name,
            kind,
            parent,
            transform,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes with their ids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Compose local matrices from the root down to `id`.
    pub fn world_matrix(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.local_matrix();
        match node.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }
}

/// Construction parameters for [`GlobeScene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Uniform scale of the atmosphere shell relative to the globe.
    pub atmosphere_scale: f32,
    pub stars: StarFieldParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            radius: 5.0,
            width_segments: 50,
            height_segments: 50,
            atmosphere_scale: 1.2,
            stars: StarFieldParams::default(),
        }
    }
}

/// The fixed scene: structure is built once, only the three animated
/// transforms change afterwards.
///
/// - `group` rotation follows the pointer.
/// - `globe` (child of `group`) spins about its own Y axis with time.
/// - `atmosphere` (child of `group`) never moves locally, so it turns only
///   with the group and does not share the globe's spin.
/// - `stars` translate uniformly on all axes with time.
pub struct GlobeScene {
    graph: SceneGraph,
    group: NodeId,
    globe: NodeId,
    atmosphere: NodeId,
    stars: NodeId,
    sphere: SphereMesh,
    star_positions: Vec<Vec3>,
}

impl GlobeScene {
    pub fn build(params: &SceneParams) -> Self {
        let mut graph = SceneGraph::new();
        let group = graph.add("globe-group", NodeKind::Group, None, Transform::IDENTITY);
        let globe = graph.add("globe", NodeKind::Globe, Some(group), Transform::IDENTITY);
        let atmosphere = graph.add(
            "atmosphere",
            NodeKind::Atmosphere,
            Some(group),
            Transform::from_uniform_scale(params.atmosphere_scale),
        );
        let stars = graph.add("stars", NodeKind::Stars, None, Transform::IDENTITY);

        let sphere = generate_uv_sphere(params.radius, params.width_segments, params.height_segments);
        let star_positions = generate_star_positions(&params.stars);

        log::info!(
            "Built globe scene: {} sphere vertices, {} stars",
            sphere.vertex_count(),
            star_positions.len()
        );

        Self {
            graph,
            group,
            globe,
            atmosphere,
            stars,
            sphere,
            star_positions,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Unit-sphere-shaped mesh shared by the globe and the atmosphere.
    pub fn sphere(&self) -> &SphereMesh {
        &self.sphere
    }

    /// Star positions in the star node's local space.
    pub fn star_positions(&self) -> &[Vec3] {
        &self.star_positions
    }

    pub fn globe_world(&self) -> Mat4 {
        self.graph.world_matrix(self.globe)
    }

    pub fn atmosphere_world(&self) -> Mat4 {
        self.graph.world_matrix(self.atmosphere)
    }

    pub fn stars_world(&self) -> Mat4 {
        self.graph.world_matrix(self.stars)
    }

    /// Group Euler rotation (pitch, yaw, roll).
    pub fn group_rotation(&self) -> Vec3 {
        self.graph.node(self.group).transform.rotation()
    }

    /// Globe spin about its local Y axis, radians.
    pub fn globe_spin(&self) -> f32 {
        self.graph.node(self.globe).transform.rotation().y
    }

    pub fn star_offset(&self) -> Vec3 {
        self.graph.node(self.stars).transform.position()
    }

    pub(crate) fn set_globe_spin(&mut self, spin: f32) {
        self.graph
            .node_mut(self.globe)
            .transform
            .set_rotation(Vec3::new(0.0, spin, 0.0));
    }

    pub(crate) fn set_group_rotation(&mut self, rotation: Vec3) {
        self.graph.node_mut(self.group).transform.set_rotation(rotation);
    }

    pub(crate) fn set_star_offset(&mut self, offset: Vec3) {
        self.graph.node_mut(self.stars).transform.set_position(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn small_scene() -> GlobeScene {
        GlobeScene::build(&SceneParams {
            width_segments: 8,
            height_segments: 6,
            stars: StarFieldParams {
                count: 10,
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_structure() {
        let scene = small_scene();
        let graph = scene.graph();
        assert_eq!(graph.len(), 4);

        let kinds: Vec<NodeKind> = graph.iter().map(|(_, n)| n.kind).collect();
        assert_eq!(
            kinds,
            [NodeKind::Group, NodeKind::Globe, NodeKind::Atmosphere, NodeKind::Stars]
        );

        let (group_id, _) = graph.iter().next().unwrap();
        for (_, node) in graph.iter() {
            match node.kind {
                NodeKind::Globe | NodeKind::Atmosphere => assert_eq!(node.parent, Some(group_id)),
                NodeKind::Group | NodeKind::Stars => assert_eq!(node.parent, None),
            }
        }
        assert_eq!(scene.star_positions().len(), 10);
    }

    #[test]
    fn test_initial_transforms() {
        let scene = small_scene();
        assert_eq!(scene.globe_world(), Mat4::IDENTITY);
        assert_eq!(scene.stars_world(), Mat4::IDENTITY);
        let p = scene.atmosphere_world().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.2, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_group_rotation_moves_globe_and_atmosphere() {
        let mut scene = small_scene();
        scene.set_group_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));

        let globe_p = scene.globe_world().transform_point3(Vec3::X);
        let atmo_p = scene.atmosphere_world().transform_point3(Vec3::X);
        assert!((globe_p - Vec3::NEG_Z).length() < 1e-6);
        assert!((atmo_p - Vec3::new(0.0, 0.0, -1.2)).length() < 1e-5);
        assert_eq!(scene.stars_world(), Mat4::IDENTITY);
    }

    #[test]
    fn test_globe_spin_does_not_move_atmosphere() {
        let mut scene = small_scene();
        scene.set_globe_spin(1.0);
        assert_eq!(scene.globe_spin(), 1.0);
        assert_ne!(scene.globe_world(), Mat4::IDENTITY);
        assert_eq!(scene.atmosphere_world(), Mat4::from_scale(Vec3::splat(1.2)));
    }

    #[test]
    fn test_spin_composes_inside_group_rotation() {
        let mut scene = small_scene();
        scene.set_group_rotation(Vec3::new(0.3, 0.0, 0.0));
        scene.set_globe_spin(0.5);
        let group = Mat4::from_euler(glam::EulerRot::XYZ, 0.3, 0.0, 0.0);
        let spin = Mat4::from_rotation_y(0.5);
        let diff = scene.globe_world() - group * spin;
        assert!(diff.to_cols_array().iter().all(|v| v.abs() < 1e-6));
    }

    #[test]
    fn test_star_offset_translates_only_stars() {
        let mut scene = small_scene();
        scene.set_star_offset(Vec3::splat(-0.5));
        assert_eq!(scene.star_offset(), Vec3::splat(-0.5));
        let p = scene.stars_world().transform_point3(Vec3::ZERO);
        assert_eq!(p, Vec3::splat(-0.5));
        assert_eq!(scene.globe_world(), Mat4::IDENTITY);
    }
}
